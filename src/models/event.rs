use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::ChatMessage;
use super::location::Location;
use super::player::PlayerView;
use super::role::{Role, Team};
use super::session::GamePhase;

/// Everything the server pushes over a socket. One event per committed
/// mutation, emitted in mutation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    RoleAssigned {
        role: Role,
        /// Fellow impostors; empty for crew.
        allies: Vec<String>,
    },
    PlayerJoined {
        player: PlayerView,
    },
    PlayerLeft {
        player_id: String,
    },
    PhaseChanged {
        phase: GamePhase,
        round: u32,
        deadline: Option<DateTime<Utc>>,
    },
    MessageAdded {
        message: ChatMessage,
    },
    BodyReported {
        reporter_id: String,
        victim_id: String,
        location: Location,
    },
    /// Ballot targets stay secret until the tally.
    VoteCast {
        voter_id: String,
    },
    VoteResult {
        tally: HashMap<String, usize>,
        skipped: usize,
        eliminated: Option<String>,
        eliminated_role: Option<Role>,
    },
    GameOver {
        winner: Team,
        impostors: Vec<String>,
    },
    SpectatorCountChanged {
        count: usize,
    },
    Error {
        code: String,
        message: String,
    },
}

/// Who an event is addressed to. Subscribers drop envelopes that are not
/// for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Audience {
    Game,
    Players,
    Spectators,
    Player(String),
    Connection(Uuid),
}

impl Audience {
    /// Whether a connection should receive this envelope. `player_id` is
    /// None for spectator connections.
    pub fn includes(&self, connection: Uuid, player_id: Option<&str>) -> bool {
        match self {
            Audience::Game => true,
            Audience::Players => player_id.is_some(),
            Audience::Spectators => player_id.is_none(),
            Audience::Player(id) => player_id == Some(id.as_str()),
            Audience::Connection(c) => *c == connection,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Envelope {
    pub audience: Audience,
    pub event: ServerEvent,
}

impl Envelope {
    pub fn new(audience: Audience, event: ServerEvent) -> Self {
        Envelope { audience, event }
    }
}

/// In-game commands carried over an established socket. Identity comes from
/// the connection, never from the payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    StartSession,
    Move { to: Location },
    Vent,
    CompleteTask { task: String },
    Kill { victim_id: String },
    ReportBody { victim_id: String },
    ChatMessage { text: String },
    /// `target: None` is an explicit skip.
    CastVote {
        #[serde(default)]
        target: Option<String>,
    },
    LeaveSession,
}
