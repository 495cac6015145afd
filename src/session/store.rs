use crate::core::chips::Chips;
use crate::core::player::{Player, PlayerId};
use crate::core::transaction::{Transaction, TransactionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by a [`GameStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a player named '{0}' already exists")]
    DuplicateName(String),
    #[error("no player with id {0}")]
    PlayerNotFound(PlayerId),
    #[error("no transaction with id {0}")]
    TransactionNotFound(TransactionId),
    #[error("transaction {0} is not pending")]
    NotPending(TransactionId),
    #[error("player {0} has already cashed out")]
    AlreadyCashedOut(PlayerId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for one game night's players and buy-ins.
///
/// Implementations own uniqueness of player names and the single-shot
/// state changes (confirm once, cash out once). Table rules such as name
/// length and buy-in limits live in [`crate::session::game::GameNight`].
pub trait GameStore {
    /// All players in join order.
    fn players(&self) -> Result<Vec<Player>, StoreError>;

    /// All transactions in request order.
    fn transactions(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Add a player. Fails with [`StoreError::DuplicateName`] if the name is taken.
    fn insert_player(&mut self, player: Player) -> Result<(), StoreError>;

    /// Add a pending transaction for an existing player.
    fn insert_transaction(&mut self, transaction: Transaction) -> Result<(), StoreError>;

    /// Move a pending transaction to confirmed.
    fn confirm_transaction(&mut self, id: TransactionId) -> Result<Transaction, StoreError>;

    /// Remove a pending transaction.
    fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, StoreError>;

    /// Record a player's final chip count. Fails if already recorded.
    fn set_cashout(&mut self, player: PlayerId, cashout: Chips) -> Result<Player, StoreError>;

    /// Remove every transaction.
    fn clear_transactions(&mut self) -> Result<(), StoreError>;

    /// Remove every player.
    fn clear_players(&mut self) -> Result<(), StoreError>;

    /// Remove everything: transactions first, then players.
    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.clear_transactions()?;
        self.clear_players()
    }
}

/// Which collection a change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Players,
    Transactions,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Players => write!(f, "players"),
            Collection::Transactions => write!(f, "transactions"),
        }
    }
}

/// Kind of change made to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    Clear,
}

/// A single change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Position in the feed; strictly increasing.
    pub seq: u64,
    pub collection: Collection,
    pub kind: ChangeKind,
}

/// Change notifications for a store.
///
/// Callers keep a cursor and poll; any returned event means their snapshot
/// is stale and should be re-read before summarising or settling.
pub trait ChangeFeed {
    /// Events with `seq >= cursor`, plus the cursor to use next time.
    fn poll(&self, cursor: u64) -> (Vec<ChangeEvent>, u64);
}
