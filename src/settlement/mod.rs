//! Pure end-of-game computations.
//!
//! Raw records flow through [`summary::build_summaries`] into
//! [`solver::SettlementEngine::settle`]; [`report::SettlementReport`]
//! bundles both for display. Nothing in this module performs I/O.

pub mod report;
pub mod solver;
pub mod summary;
