use crate::core::chips::{Chips, GameConfig};
use crate::core::player::{Player, PlayerId};
use crate::core::transaction::{Transaction, TransactionId};
use crate::session::store::{Collection, GameStore, StoreError};
use crate::settlement::report::SettlementReport;
use crate::settlement::summary::{build_summaries, PlayerSummary};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from game-night actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("player name cannot be empty")]
    EmptyName,
    #[error("player name is {len} characters, the maximum is {max}")]
    NameTooLong { len: usize, max: usize },
    #[error("buy-in must be between 1 and {max}, got {amount}")]
    InvalidBuyIn { amount: Chips, max: Chips },
    #[error("cash-out cannot be negative, got {0}")]
    NegativeCashout(Chips),
    #[error("no players have joined")]
    NoPlayers,
    #[error("all players must cash out before ending the game ({0} still playing)")]
    PlayersStillPlaying(usize),
    #[error("there are still {0} pending buy-in requests, confirm or reject them first")]
    PendingBuyIns(usize),
    #[error("failed to reset game while clearing {stage}: {source}")]
    ResetFailed {
        stage: Collection,
        source: StoreError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A buy-in waiting for the banker, with the requesting player's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub id: TransactionId,
    pub player_id: PlayerId,
    pub player: String,
    pub amount: Chips,
}

/// One game night on top of a [`GameStore`].
///
/// Validates requests before they reach the store and derives summaries
/// and settlements from fresh snapshots.
///
/// # Examples
///
/// ```
/// use homegame_settlement::prelude::*;
///
/// let mut night = GameNight::new(InMemoryStore::new(), GameConfig::default());
/// let alice = night.join("Alice").unwrap();
/// let bob = night.join("  Bob ").unwrap();
/// assert_eq!(bob.name(), "Bob");
///
/// for p in [&alice, &bob] {
///     let tx = night.request_buy_in(p.id(), 100).unwrap();
///     night.confirm(tx.id()).unwrap();
/// }
/// night.cash_out(alice.id(), 150).unwrap();
/// night.cash_out(bob.id(), 50).unwrap();
///
/// let report = night.settle().unwrap();
/// assert_eq!(report.transfers.len(), 1);
/// ```
pub struct GameNight<S: GameStore> {
    store: S,
    config: GameConfig,
}

impl<S: GameStore> GameNight<S> {
    pub fn new(store: S, config: GameConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seat a new player. The name is trimmed and must be unique.
    pub fn join(&mut self, name: &str) -> Result<Player, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        let len = name.chars().count();
        if len > self.config.max_name_len {
            return Err(GameError::NameTooLong {
                len,
                max: self.config.max_name_len,
            });
        }

        let player = Player::new(name);
        self.store.insert_player(player.clone())?;
        info!("{} joined the game", player.name());
        Ok(player)
    }

    /// Ask the banker for chips. The request starts out pending.
    pub fn request_buy_in(
        &mut self,
        player: PlayerId,
        amount: Chips,
    ) -> Result<Transaction, GameError> {
        if !self.config.is_valid_buy_in(amount) {
            return Err(GameError::InvalidBuyIn {
                amount,
                max: self.config.max_buy_in,
            });
        }
        let seated = self
            .store
            .players()?
            .into_iter()
            .find(|p| p.id() == player)
            .ok_or(StoreError::PlayerNotFound(player))?;
        if seated.has_cashed_out() {
            return Err(StoreError::AlreadyCashedOut(player).into());
        }

        let tx = Transaction::new(player, amount);
        self.store.insert_transaction(tx.clone())?;
        info!("{} requested a buy-in of {}", seated.name(), amount);
        Ok(tx)
    }

    /// Banker accepts a pending buy-in.
    pub fn confirm(&mut self, id: TransactionId) -> Result<Transaction, GameError> {
        let tx = self.store.confirm_transaction(id)?;
        info!("confirmed buy-in {} of {}", id, tx.amount());
        Ok(tx)
    }

    /// Banker turns down a pending buy-in; the request is removed.
    pub fn reject(&mut self, id: TransactionId) -> Result<Transaction, GameError> {
        let tx = self.store.delete_transaction(id)?;
        info!("rejected buy-in {} of {}", id, tx.amount());
        Ok(tx)
    }

    /// Record a player's final chip count. Zero is allowed; it can only be done once.
    pub fn cash_out(&mut self, player: PlayerId, chips: Chips) -> Result<Player, GameError> {
        if chips < 0 {
            return Err(GameError::NegativeCashout(chips));
        }
        let updated = self.store.set_cashout(player, chips)?;
        info!("{} cashed out with {}", updated.name(), chips);
        Ok(updated)
    }

    /// Summaries from a fresh snapshot of the store.
    pub fn summaries(&self) -> Result<Vec<PlayerSummary>, GameError> {
        let players = self.store.players()?;
        let transactions = self.store.transactions()?;
        Ok(build_summaries(&players, &transactions))
    }

    /// Buy-ins awaiting the banker, oldest first.
    pub fn pending(&self) -> Result<Vec<PendingRequest>, GameError> {
        let players = self.store.players()?;
        let mut waiting: Vec<Transaction> = self
            .store
            .transactions()?
            .into_iter()
            .filter(|t| t.is_pending())
            .collect();
        waiting.sort_by_key(|t| t.requested_at());
        Ok(waiting
            .into_iter()
            .filter_map(|t| {
                let player = players.iter().find(|p| p.id() == t.player_id())?;
                Some(PendingRequest {
                    id: t.id(),
                    player_id: t.player_id(),
                    player: player.name().to_string(),
                    amount: t.amount(),
                })
            })
            .collect())
    }

    /// Total confirmed chips bought into the game.
    pub fn total_in_play(&self) -> Result<Chips, GameError> {
        Ok(self.summaries()?.iter().map(|s| s.total_buy_in).sum())
    }

    /// Check that the game can end: everyone has cashed out and no
    /// buy-ins are waiting.
    pub fn check_end_game(&self) -> Result<(), GameError> {
        let summaries = self.summaries()?;
        if summaries.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let playing = summaries.iter().filter(|s| !s.has_cashed_out()).count();
        if playing > 0 {
            return Err(GameError::PlayersStillPlaying(playing));
        }
        let pending = self.pending()?.len();
        if pending > 0 {
            return Err(GameError::PendingBuyIns(pending));
        }
        Ok(())
    }

    /// End the game and compute who pays whom.
    pub fn settle(&self) -> Result<SettlementReport, GameError> {
        self.check_end_game()?;
        let report = SettlementReport::from_summaries(&self.summaries()?)
            .with_symbol(self.config.currency_symbol);
        if !report.is_balanced() {
            warn!(
                "cash-outs do not match buy-ins: {} unmatched after settlement",
                report.residual()
            );
        }
        Ok(report)
    }

    /// Discard every player and transaction.
    ///
    /// Transactions are cleared first. If clearing players then fails, the
    /// store is left half-reset and the caller should retry.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        self.store
            .clear_transactions()
            .map_err(|source| GameError::ResetFailed {
                stage: Collection::Transactions,
                source,
            })?;
        self.store
            .clear_players()
            .map_err(|source| GameError::ResetFailed {
                stage: Collection::Players,
                source,
            })?;
        info!("game reset");
        Ok(())
    }
}
