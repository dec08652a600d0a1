use thiserror::Error;

/// Registry-level failures. Everything else is a subsystem rule violation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("session not found")]
    SessionNotFound,
    #[error("could not allocate a unique join code")]
    DuplicateJoinCode,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("session not found")]
    SessionNotFound,
    #[error("session is full")]
    SessionFull,
    #[error("session has already started")]
    AlreadyStarted,
    #[error("only the host may do that")]
    NotHost,
    #[error("not enough players to start")]
    NotEnoughPlayers,
    #[error("player not found in this session")]
    PlayerNotFound,
    #[error("could not allocate a unique join code")]
    DuplicateJoinCode,
    #[error("phase durations are out of range")]
    InvalidSettings,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("session not found")]
    SessionNotFound,
    #[error("player not found in this session")]
    PlayerNotFound,
    #[error("invalid target")]
    InvalidTarget,
    #[error("only impostors can do that")]
    NotImpostor,
    #[error("dead players cannot act")]
    PlayerDead,
    #[error("that action is not allowed in the current phase")]
    WrongPhase,
    #[error("that body was already reported")]
    BodyAlreadyReported,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("session not found")]
    SessionNotFound,
    #[error("player not found in this session")]
    PlayerNotFound,
    #[error("that action is not allowed in the current phase")]
    WrongPhase,
    #[error("dead players cannot act")]
    PlayerDead,
    #[error("invalid target")]
    InvalidTarget,
    #[error("the vote was already finalized")]
    AlreadyFinalized,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,
    #[error("player not found in this session")]
    PlayerNotFound,
    #[error("that action is not allowed in the current phase")]
    WrongPhase,
    #[error("dead players cannot act")]
    PlayerDead,
}

/// Transport-boundary failures raised before any subsystem is reached.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("malformed message: {0}")]
    InvalidMessage(String),
    #[error("spectators cannot submit player commands")]
    NotAPlayer,
}

/// External decision capability failures. Logged and swallowed by the agent
/// manager, never surfaced to players.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("decision endpoint returned status {0}")]
    BadStatus(u16),
    #[error("decision provider unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::SessionNotFound => "session-not-found",
            StoreError::DuplicateJoinCode => "duplicate-join-code",
        }
    }
}

impl LobbyError {
    pub fn code(&self) -> &'static str {
        match self {
            LobbyError::SessionNotFound => "session-not-found",
            LobbyError::SessionFull => "session-full",
            LobbyError::AlreadyStarted => "already-started",
            LobbyError::NotHost => "not-host",
            LobbyError::NotEnoughPlayers => "not-enough-players",
            LobbyError::PlayerNotFound => "player-not-found",
            LobbyError::DuplicateJoinCode => "duplicate-join-code",
            LobbyError::InvalidSettings => "invalid-settings",
        }
    }
}

impl RoundError {
    pub fn code(&self) -> &'static str {
        match self {
            RoundError::SessionNotFound => "session-not-found",
            RoundError::PlayerNotFound => "player-not-found",
            RoundError::InvalidTarget => "invalid-target",
            RoundError::NotImpostor => "not-impostor",
            RoundError::PlayerDead => "player-dead",
            RoundError::WrongPhase => "wrong-phase",
            RoundError::BodyAlreadyReported => "body-already-reported",
        }
    }
}

impl VoteError {
    pub fn code(&self) -> &'static str {
        match self {
            VoteError::SessionNotFound => "session-not-found",
            VoteError::PlayerNotFound => "player-not-found",
            VoteError::WrongPhase => "wrong-phase",
            VoteError::PlayerDead => "player-dead",
            VoteError::InvalidTarget => "invalid-target",
            VoteError::AlreadyFinalized => "already-finalized",
        }
    }
}

impl ChatError {
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::SessionNotFound => "session-not-found",
            ChatError::PlayerNotFound => "player-not-found",
            ChatError::WrongPhase => "wrong-phase",
            ChatError::PlayerDead => "player-dead",
        }
    }
}

impl RouterError {
    pub fn code(&self) -> &'static str {
        match self {
            RouterError::InvalidMessage(_) => "invalid-message",
            RouterError::NotAPlayer => "not-a-player",
        }
    }
}

impl From<StoreError> for LobbyError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SessionNotFound => LobbyError::SessionNotFound,
            StoreError::DuplicateJoinCode => LobbyError::DuplicateJoinCode,
        }
    }
}

impl From<StoreError> for RoundError {
    fn from(_: StoreError) -> Self {
        RoundError::SessionNotFound
    }
}

impl From<StoreError> for VoteError {
    fn from(_: StoreError) -> Self {
        VoteError::SessionNotFound
    }
}

impl From<StoreError> for ChatError {
    fn from(_: StoreError) -> Self {
        ChatError::SessionNotFound
    }
}

/// Union of the subsystem errors, used where inbound commands fan out to
/// whichever subsystem applies. Carries the machine code for the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Lobby(#[from] LobbyError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Vote(#[from] VoteError),
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl GameError {
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Lobby(e) => e.code(),
            GameError::Round(e) => e.code(),
            GameError::Vote(e) => e.code(),
            GameError::Chat(e) => e.code(),
            GameError::Store(e) => e.code(),
            GameError::Router(e) => e.code(),
        }
    }
}
