use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Crew,
    Impostor,
}

impl Role {
    pub fn team(self) -> Team {
        match self {
            Role::Crew => Team::Crew,
            Role::Impostor => Team::Impostors,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Crew => write!(f, "crew"),
            Role::Impostor => write!(f, "impostor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Crew,
    Impostors,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Crew => write!(f, "crew"),
            Team::Impostors => write!(f, "impostors"),
        }
    }
}
