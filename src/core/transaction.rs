use crate::core::chips::Chips;
use crate::core::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a buy-in transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Banker approval state of a buy-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Requested by the player, awaiting the banker.
    Pending,
    /// Accepted by the banker. Final.
    Confirmed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// A buy-in request from one player.
///
/// Transactions are always created pending. The banker either confirms one
/// (after which it never changes again) or rejects it, which deletes the
/// record outright.
///
/// # Examples
///
/// ```
/// use homegame_settlement::core::player::PlayerId;
/// use homegame_settlement::core::transaction::{Transaction, TransactionStatus};
///
/// let tx = Transaction::new(PlayerId::new(), 50);
/// assert_eq!(tx.status(), TransactionStatus::Pending);
/// assert_eq!(tx.amount(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    player_id: PlayerId,
    /// Must be positive.
    amount: Chips,
    status: TransactionStatus,
    requested_at: DateTime<Utc>,
}

/// Wire shape of a [`Transaction`], checked before it becomes one.
#[derive(Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    player_id: PlayerId,
    amount: Chips,
    status: TransactionStatus,
    requested_at: DateTime<Utc>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = String;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        if record.amount <= 0 {
            return Err(format!(
                "Buy-in amount must be positive, got {}",
                record.amount
            ));
        }
        Ok(Self {
            id: record.id,
            player_id: record.player_id,
            amount: record.amount,
            status: record.status,
            requested_at: record.requested_at,
        })
    }
}

impl Transaction {
    /// Create a pending buy-in request.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(player_id: PlayerId, amount: Chips) -> Self {
        assert!(amount > 0, "Buy-in amount must be positive, got {}", amount);
        Self {
            id: TransactionId::new(),
            player_id,
            amount,
            status: TransactionStatus::Pending,
            requested_at: Utc::now(),
        }
    }

    /// Mark the buy-in as confirmed by the banker.
    pub fn confirmed(mut self) -> Self {
        self.status = TransactionStatus::Confirmed;
        self
    }

    /// Pin the request time, e.g. when restoring a saved night.
    pub fn with_requested_at(mut self, requested_at: DateTime<Utc>) -> Self {
        self.requested_at = requested_at;
        self
    }

    pub(crate) fn confirm(&mut self) {
        self.status = TransactionStatus::Confirmed;
    }

    // --- Accessors ---

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn amount(&self) -> Chips {
        self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }
}
