use crate::core::chips::Chips;
use crate::core::player::{Player, PlayerId};
use crate::core::transaction::{Transaction, TransactionStatus};
use serde::{Deserialize, Serialize};

/// Per-player totals derived from the raw buy-in log.
///
/// `net` is present exactly when `cashout` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    /// Sum of confirmed buy-ins.
    pub total_buy_in: Chips,
    /// Sum of buy-ins still awaiting the banker.
    pub pending_buy_in: Chips,
    pub cashout: Option<Chips>,
    /// `cashout - total_buy_in` once the player has cashed out.
    pub net: Option<Chips>,
}

impl PlayerSummary {
    pub fn has_cashed_out(&self) -> bool {
        self.cashout.is_some()
    }
}

/// Build one summary per player, in the order the players are given.
///
/// Transactions are attributed by player ID. A transaction whose player is
/// not in `players` cannot be attributed to anyone and is ignored.
/// Totals saturate at the bounds of [`Chips`] instead of overflowing.
///
/// # Examples
///
/// ```
/// use homegame_settlement::prelude::*;
///
/// let alice = Player::new("Alice").with_cashout(150);
/// let txs = vec![Transaction::new(alice.id(), 100).confirmed()];
///
/// let summaries = build_summaries(&[alice], &txs);
/// assert_eq!(summaries[0].total_buy_in, 100);
/// assert_eq!(summaries[0].net, Some(50));
/// ```
pub fn build_summaries(players: &[Player], transactions: &[Transaction]) -> Vec<PlayerSummary> {
    players
        .iter()
        .map(|player| {
            let mut total_buy_in: Chips = 0;
            let mut pending_buy_in: Chips = 0;
            for tx in transactions.iter().filter(|t| t.player_id() == player.id()) {
                match tx.status() {
                    TransactionStatus::Confirmed => {
                        total_buy_in = Chips::saturating_add(total_buy_in, tx.amount())
                    }
                    TransactionStatus::Pending => {
                        pending_buy_in = Chips::saturating_add(pending_buy_in, tx.amount())
                    }
                }
            }

            PlayerSummary {
                id: player.id(),
                name: player.name().to_string(),
                total_buy_in,
                pending_buy_in,
                cashout: player.cashout(),
                net: player
                    .cashout()
                    .map(|cashout| cashout.saturating_sub(total_buy_in)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_and_pending_split() {
        let p = Player::new("Alice");
        let txs = vec![
            Transaction::new(p.id(), 20).confirmed(),
            Transaction::new(p.id(), 30),
        ];
        let s = &build_summaries(&[p], &txs)[0];
        assert_eq!(s.total_buy_in, 20);
        assert_eq!(s.pending_buy_in, 30);
        assert_eq!(s.cashout, None);
        assert_eq!(s.net, None);
    }

    #[test]
    fn test_no_transactions_yields_zero() {
        let p = Player::new("Bob").with_cashout(40);
        let s = &build_summaries(&[p], &[])[0];
        assert_eq!(s.total_buy_in, 0);
        assert_eq!(s.pending_buy_in, 0);
        assert_eq!(s.net, Some(40));
    }

    #[test]
    fn test_pending_does_not_affect_net() {
        let p = Player::new("Carol").with_cashout(0);
        let txs = vec![
            Transaction::new(p.id(), 100).confirmed(),
            Transaction::new(p.id(), 500),
        ];
        let s = &build_summaries(&[p], &txs)[0];
        assert_eq!(s.net, Some(-100));
    }

    #[test]
    fn test_unknown_player_transactions_ignored() {
        let p = Player::new("Dave");
        let stray = Transaction::new(PlayerId::new(), 75).confirmed();
        let summaries = build_summaries(&[p], &[stray]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_buy_in, 0);
    }

    #[test]
    fn test_order_preserved() {
        let players = vec![Player::new("Zed"), Player::new("Amy"), Player::new("Max")];
        let names: Vec<String> = build_summaries(&players, &[])
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Zed", "Amy", "Max"]);
    }

    #[test]
    fn test_huge_buy_ins_saturate() {
        let p = Player::new("Whale").with_cashout(0);
        let txs = vec![
            Transaction::new(p.id(), Chips::MAX).confirmed(),
            Transaction::new(p.id(), Chips::MAX).confirmed(),
        ];
        let s = &build_summaries(&[p], &txs)[0];
        assert_eq!(s.total_buy_in, Chips::MAX);
        assert_eq!(s.net, Some(-Chips::MAX));
    }

    #[test]
    fn test_multiple_confirmed_summed() {
        let p = Player::new("Eve").with_cashout(250);
        let txs = vec![
            Transaction::new(p.id(), 100).confirmed(),
            Transaction::new(p.id(), 50).confirmed(),
            Transaction::new(p.id(), 50).confirmed(),
        ];
        let s = &build_summaries(&[p], &txs)[0];
        assert_eq!(s.total_buy_in, 200);
        assert_eq!(s.net, Some(50));
    }
}
