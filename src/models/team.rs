//! Team and Group data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in games and lookups).
pub type TeamId = Uuid;

/// Unique identifier for a group (standings are computed per group).
pub type GroupId = Uuid;

/// A group of a tournament division; teams of one group share a standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Division the group belongs to, for display only.
    #[serde(default)]
    pub division: String,
}

impl Group {
    pub fn new(name: impl Into<String>, division: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            division: division.into(),
        }
    }
}

/// A team taking part in a tournament. Membership is per tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub group_id: GroupId,
}

impl Team {
    pub fn new(name: impl Into<String>, group_id: GroupId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group_id,
        }
    }
}
