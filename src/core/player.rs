use crate::core::chips::Chips;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a player seated at the game.
///
/// # Examples
///
/// ```
/// use homegame_settlement::core::player::PlayerId;
///
/// let alice = PlayerId::new();
/// let bob = PlayerId::new();
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player at the table.
///
/// `cashout` stays `None` while the player is still in the game. Once the
/// player cashes out it holds their final chip count and never changes for
/// the rest of the night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    cashout: Option<Chips>,
    joined_at: DateTime<Utc>,
}

impl Player {
    /// Create a player who has just joined and not yet cashed out.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PlayerId::new(), name)
    }

    /// Create a player with a specific ID (useful for testing / determinism).
    pub fn with_id(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cashout: None,
            joined_at: Utc::now(),
        }
    }

    /// Set the final chip count.
    pub fn with_cashout(mut self, cashout: Chips) -> Self {
        self.cashout = Some(cashout);
        self
    }

    /// Backdate or pin the join time, e.g. when restoring a saved night.
    pub fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }

    pub(crate) fn set_cashout(&mut self, cashout: Chips) {
        self.cashout = Some(cashout);
    }

    // --- Accessors ---

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cashout(&self) -> Option<Chips> {
        self.cashout
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Whether the player has left the game with a final chip count.
    pub fn has_cashed_out(&self) -> bool {
        self.cashout.is_some()
    }
}
