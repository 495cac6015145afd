use crate::core::chips::Chips;
use crate::core::player::{Player, PlayerId};
use crate::core::transaction::{Transaction, TransactionId};
use crate::session::store::{ChangeEvent, ChangeFeed, ChangeKind, Collection, GameStore, StoreError};
use std::collections::HashSet;

/// A [`GameStore`] held entirely in memory, with its own change feed.
///
/// # Examples
///
/// ```
/// use homegame_settlement::prelude::*;
///
/// let mut store = InMemoryStore::new();
/// store.insert_player(Player::new("Alice")).unwrap();
///
/// let (events, cursor) = store.poll(0);
/// assert_eq!(events.len(), 1);
/// assert!(store.poll(cursor).0.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    players: Vec<Player>,
    transactions: Vec<Transaction>,
    events: Vec<ChangeEvent>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from existing records, e.g. a loaded snapshot.
    ///
    /// Players are ordered by join time and transactions by request time.
    /// Names must be unique and every transaction must belong to a seeded
    /// player. No change events are recorded for the seeded records.
    pub fn from_records(
        mut players: Vec<Player>,
        mut transactions: Vec<Transaction>,
    ) -> Result<Self, StoreError> {
        let mut names = HashSet::with_capacity(players.len());
        for player in &players {
            if !names.insert(player.name()) {
                return Err(StoreError::DuplicateName(player.name().to_string()));
            }
        }
        let ids: HashSet<PlayerId> = players.iter().map(|p| p.id()).collect();
        if let Some(stray) = transactions.iter().find(|t| !ids.contains(&t.player_id())) {
            return Err(StoreError::PlayerNotFound(stray.player_id()));
        }

        players.sort_by_key(|p| p.joined_at());
        transactions.sort_by_key(|t| t.requested_at());
        Ok(Self {
            players,
            transactions,
            events: Vec::new(),
        })
    }

    fn record(&mut self, collection: Collection, kind: ChangeKind) {
        let seq = self.events.len() as u64;
        self.events.push(ChangeEvent {
            seq,
            collection,
            kind,
        });
    }

    fn pending_mut(&mut self, id: TransactionId) -> Result<&mut Transaction, StoreError> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StoreError::TransactionNotFound(id))?;
        if !tx.is_pending() {
            return Err(StoreError::NotPending(id));
        }
        Ok(tx)
    }
}

impl GameStore for InMemoryStore {
    fn players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.clone())
    }

    fn transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.transactions.clone())
    }

    fn insert_player(&mut self, player: Player) -> Result<(), StoreError> {
        if self.players.iter().any(|p| p.name() == player.name()) {
            return Err(StoreError::DuplicateName(player.name().to_string()));
        }
        let at = self
            .players
            .partition_point(|p| p.joined_at() <= player.joined_at());
        self.players.insert(at, player);
        self.record(Collection::Players, ChangeKind::Insert);
        Ok(())
    }

    fn insert_transaction(&mut self, transaction: Transaction) -> Result<(), StoreError> {
        if !transaction.is_pending() {
            return Err(StoreError::NotPending(transaction.id()));
        }
        if !self.players.iter().any(|p| p.id() == transaction.player_id()) {
            return Err(StoreError::PlayerNotFound(transaction.player_id()));
        }
        let at = self
            .transactions
            .partition_point(|t| t.requested_at() <= transaction.requested_at());
        self.transactions.insert(at, transaction);
        self.record(Collection::Transactions, ChangeKind::Insert);
        Ok(())
    }

    fn confirm_transaction(&mut self, id: TransactionId) -> Result<Transaction, StoreError> {
        let tx = self.pending_mut(id)?;
        tx.confirm();
        let confirmed = tx.clone();
        self.record(Collection::Transactions, ChangeKind::Update);
        Ok(confirmed)
    }

    fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, StoreError> {
        self.pending_mut(id)?;
        let idx = self
            .transactions
            .iter()
            .position(|t| t.id() == id)
            .ok_or(StoreError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(idx);
        self.record(Collection::Transactions, ChangeKind::Delete);
        Ok(removed)
    }

    fn set_cashout(&mut self, player: PlayerId, cashout: Chips) -> Result<Player, StoreError> {
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id() == player)
            .ok_or(StoreError::PlayerNotFound(player))?;
        if p.has_cashed_out() {
            return Err(StoreError::AlreadyCashedOut(player));
        }
        p.set_cashout(cashout);
        let updated = p.clone();
        self.record(Collection::Players, ChangeKind::Update);
        Ok(updated)
    }

    fn clear_transactions(&mut self) -> Result<(), StoreError> {
        self.transactions.clear();
        self.record(Collection::Transactions, ChangeKind::Clear);
        Ok(())
    }

    fn clear_players(&mut self) -> Result<(), StoreError> {
        self.players.clear();
        self.record(Collection::Players, ChangeKind::Clear);
        Ok(())
    }
}

impl ChangeFeed for InMemoryStore {
    fn poll(&self, cursor: u64) -> (Vec<ChangeEvent>, u64) {
        let start = (cursor as usize).min(self.events.len());
        (self.events[start..].to_vec(), self.events.len() as u64)
    }
}
