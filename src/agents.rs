use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::chat::ChatMessage;
use crate::models::error::DecisionError;
use crate::models::location::Location;
use crate::models::session::{GamePhase, SessionView};

pub mod http;
pub mod scripted;

/// Everything an agent may legitimately know when deciding: its own
/// redacted session view (the same one a human client fetches) plus recent
/// table talk. Never contains another player's hidden role.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionContext {
    pub session_id: String,
    pub player_id: String,
    pub persona: String,
    pub phase: GamePhase,
    pub round: u32,
    pub view: SessionView,
    pub recent_chat: Vec<ChatMessage>,
}

/// The action an agent chose. Mirrors the socket command set; `Wait` is a
/// deliberate pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentDecision {
    Chat {
        text: String,
    },
    CastVote {
        #[serde(default)]
        target: Option<String>,
    },
    Move {
        to: Location,
    },
    Vent,
    Kill {
        victim_id: String,
    },
    CompleteTask {
        task: String,
    },
    ReportBody {
        victim_id: String,
    },
    Wait,
}

/// External decision capability. Long-latency and failable; callers treat
/// a failure as a skipped turn, never as a session fault.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    async fn decide(&self, ctx: DecisionContext) -> Result<AgentDecision, DecisionError>;
}
