pub mod chat;
pub mod error;
pub mod event;
pub mod location;
pub mod player;
pub mod role;
pub mod session;
pub mod vote;
