pub mod agents;
pub mod app;
pub mod broadcast;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
