//! # homegame-settlement
//!
//! Buy-in tracking and settlement for a single poker game night.
//!
//! Players join, request buy-ins that the banker confirms or rejects, and
//! cash out. At the end of the night the engine turns everyone's net result
//! into a short list of peer-to-peer transfers that clears all balances.
//!
//! ## Architecture
//!
//! - **core** - Foundational types: players, transactions, chip amounts, ledger
//! - **settlement** - Summary derivation, the settlement solver and reports
//! - **session** - Store and change-feed seams plus the game-night workflow
//! - **simulation** - Random game-night generation for testing

pub mod core;
pub mod session;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::chips::{format_net, Chips, GameConfig};
    pub use crate::core::ledger::Ledger;
    pub use crate::core::player::{Player, PlayerId};
    pub use crate::core::transaction::{Transaction, TransactionId, TransactionStatus};
    pub use crate::session::game::{GameError, GameNight};
    pub use crate::session::memory::InMemoryStore;
    pub use crate::session::store::{ChangeFeed, GameStore, StoreError};
    pub use crate::settlement::report::SettlementReport;
    pub use crate::settlement::solver::{SettlementEngine, Transfer};
    pub use crate::settlement::summary::{build_summaries, PlayerSummary};
}
