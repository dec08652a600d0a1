use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::GamePhase;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: String,
    pub sender: Sender,
    pub text: String,
    pub phase: GamePhase,
    pub round: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sender_type", rename_all = "snake_case")]
pub enum Sender {
    Player { id: String, name: String },
    System,
}

impl ChatLog {
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn add_system_message(&mut self, text: String, phase: GamePhase, round: u32) -> ChatMessage {
        let message = ChatMessage::new(Sender::System, text, phase, round);
        self.add_message(message.clone());
        message
    }

    /// Latest `limit` messages, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<ChatMessage> {
        let start = self.messages.len().saturating_sub(limit);
        self.messages[start..].to_vec()
    }
}

impl ChatMessage {
    pub fn new(sender: Sender, text: String, phase: GamePhase, round: u32) -> Self {
        ChatMessage {
            message_id: uuid::Uuid::new_v4().to_string(),
            sender,
            text,
            phase,
            round,
            timestamp: Utc::now(),
        }
    }
}
