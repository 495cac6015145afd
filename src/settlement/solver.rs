use crate::core::chips::Chips;
use crate::core::ledger::Ledger;
use crate::settlement::summary::PlayerSummary;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single payment from a net loser to a net winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Name of the paying player.
    pub from: String,
    /// Name of the receiving player.
    pub to: String,
    /// Always positive.
    pub amount: Chips,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.from, self.to, self.amount)
    }
}

/// The settlement solver.
///
/// Turns per-player net results into peer-to-peer transfers that clear
/// every balance, matching the largest remaining debt against the largest
/// remaining credit at each step.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Compute the transfers that settle the given players.
    ///
    /// Only players who have cashed out take part; anyone still playing
    /// has chips on the table and is left out entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use homegame_settlement::prelude::*;
    ///
    /// let alice = Player::new("Alice").with_cashout(150);
    /// let bob = Player::new("Bob").with_cashout(50);
    /// let txs = vec![
    ///     Transaction::new(alice.id(), 100).confirmed(),
    ///     Transaction::new(bob.id(), 100).confirmed(),
    /// ];
    ///
    /// let transfers = SettlementEngine::settle(&build_summaries(&[alice, bob], &txs));
    /// assert_eq!(transfers.len(), 1);
    /// assert_eq!(transfers[0].from, "Bob");
    /// assert_eq!(transfers[0].to, "Alice");
    /// assert_eq!(transfers[0].amount, 50);
    /// ```
    pub fn settle(summaries: &[PlayerSummary]) -> Vec<Transfer> {
        Self::settle_ledger(&Ledger::from_summaries(summaries))
    }

    /// Compute the transfers that clear the positions in `ledger`.
    ///
    /// # Algorithm
    ///
    /// 1. Split positions into debtors (negative) and creditors (positive);
    ///    zero positions are dropped.
    /// 2. Sort both sides by amount, largest first. Equal amounts keep
    ///    their ledger order.
    /// 3. Repeatedly pay `min(debt, credit)` from the current debtor to the
    ///    current creditor, moving past whichever side reaches zero.
    /// 4. Stop as soon as either side runs out.
    ///
    /// Produces at most `debtors + creditors - 1` transfers. If total debt
    /// and total credit differ, the excess on the longer side is left
    /// unmatched rather than treated as an error.
    pub fn settle_ledger(ledger: &Ledger) -> Vec<Transfer> {
        let mut debtors: Vec<(&str, Chips)> = Vec::new();
        let mut creditors: Vec<(&str, Chips)> = Vec::new();

        for (name, net) in ledger.positions() {
            if *net < 0 {
                debtors.push((name.as_str(), net.saturating_neg()));
            } else if *net > 0 {
                creditors.push((name.as_str(), *net));
            }
        }

        // sort_by is stable
        debtors.sort_by(|a, b| b.1.cmp(&a.1));
        creditors.sort_by(|a, b| b.1.cmp(&a.1));

        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
        let mut i = 0;
        let mut j = 0;

        while i < debtors.len() && j < creditors.len() {
            let amount = debtors[i].1.min(creditors[j].1);
            transfers.push(Transfer {
                from: debtors[i].0.to_string(),
                to: creditors[j].0.to_string(),
                amount,
            });

            debtors[i].1 -= amount;
            creditors[j].1 -= amount;

            if debtors[i].1 == 0 {
                i += 1;
            }
            if creditors[j].1 == 0 {
                j += 1;
            }
        }

        let unpaid: Chips = debtors[i..].iter().map(|(_, v)| v).sum();
        let unclaimed: Chips = creditors[j..].iter().map(|(_, v)| v).sum();
        if unpaid > 0 || unclaimed > 0 {
            debug!(
                "settlement left residual: {} unpaid debt, {} unclaimed credit",
                unpaid, unclaimed
            );
        }
        debug!(
            "settled {} debtors against {} creditors in {} transfers",
            debtors.len(),
            creditors.len(),
            transfers.len()
        );

        transfers
    }
}
