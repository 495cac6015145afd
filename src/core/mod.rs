pub mod chips;
pub mod ledger;
pub mod player;
pub mod transaction;
