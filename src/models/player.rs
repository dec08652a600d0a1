use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::Location;
use super::role::Role;

/// Where a player's actions come from. The engine never branches on this
/// except at the point that supplies the action value (socket vs. decision
/// call); validation and mutation are identical for both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Agent { persona: String },
}

impl PlayerKind {
    pub fn is_agent(&self) -> bool {
        matches!(self, PlayerKind::Agent { .. })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// None until roles are dealt at session start.
    pub role: Option<Role>,
    pub is_dead: bool,
    pub location: Location,
    pub in_vent: bool,
    /// Set when a vote elimination publicly revealed this player's role.
    pub revealed: bool,
    pub kind: PlayerKind,
    pub is_host: bool,
}

impl Player {
    pub fn new(name: String, kind: PlayerKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            role: None,
            is_dead: false,
            location: Location::SPAWN,
            in_vent: false,
            revealed: false,
            kind,
            is_host: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_impostor(&self) -> bool {
        self.role == Some(Role::Impostor)
    }
}

/// What one participant is allowed to know about another. Role stays None
/// unless the game revealed it; `kind` never appears here at all, so agents
/// are indistinguishable from humans on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub is_dead: bool,
    pub is_host: bool,
    pub role: Option<Role>,
}

/// The viewer's own slice of hidden state: role, position, concealment,
/// finished tasks, plus what is standing (or lying) in the same room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfView {
    pub id: String,
    pub role: Option<Role>,
    pub location: Location,
    pub in_vent: bool,
    pub tasks_done: Vec<String>,
    pub visible_players: Vec<String>,
    pub visible_bodies: Vec<String>,
}

impl Player {
    pub fn view_with_role(&self, role: Option<Role>) -> PlayerView {
        PlayerView {
            id: self.id.clone(),
            name: self.name.clone(),
            is_dead: self.is_dead,
            is_host: self.is_host,
            role,
        }
    }

    /// The fully redacted view, safe for anyone.
    pub fn public_view(&self) -> PlayerView {
        self.view_with_role(if self.revealed { self.role } else { None })
    }
}
