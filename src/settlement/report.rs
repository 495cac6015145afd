use crate::core::chips::{format_net, Chips, GameConfig};
use crate::core::ledger::Ledger;
use crate::settlement::solver::{SettlementEngine, Transfer};
use crate::settlement::summary::PlayerSummary;
use serde::{Deserialize, Serialize};

/// Final result line for a cashed-out player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub total_buy_in: Chips,
    pub cashout: Chips,
    pub net: Chips,
}

/// End-of-game view: results per player and who pays whom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Cashed-out players, biggest winner first.
    pub standings: Vec<Standing>,
    /// Transfers in the order the solver produced them.
    pub transfers: Vec<Transfer>,
    /// Confirmed buy-ins across every player, cashed out or not.
    pub total_buy_in: Chips,
    /// Owed by net losers.
    pub total_debt: Chips,
    /// Owed to net winners.
    pub total_credit: Chips,
    /// Players who have not cashed out and so are not settled.
    pub still_playing: usize,
    #[serde(skip, default = "default_symbol")]
    currency_symbol: char,
}

fn default_symbol() -> char {
    GameConfig::default().currency_symbol
}

impl SettlementReport {
    /// Compute transfers and totals for the given summaries.
    pub fn from_summaries(summaries: &[PlayerSummary]) -> Self {
        let ledger = Ledger::from_summaries(summaries);
        let transfers = SettlementEngine::settle_ledger(&ledger);

        let mut standings: Vec<Standing> = summaries
            .iter()
            .filter_map(|s| {
                Some(Standing {
                    name: s.name.clone(),
                    total_buy_in: s.total_buy_in,
                    cashout: s.cashout?,
                    net: s.net?,
                })
            })
            .collect();
        standings.sort_by(|a, b| b.net.cmp(&a.net));

        SettlementReport {
            standings,
            transfers,
            total_buy_in: summaries.iter().map(|s| s.total_buy_in).sum(),
            total_debt: ledger.total_debt(),
            total_credit: ledger.total_credit(),
            still_playing: summaries.iter().filter(|s| !s.has_cashed_out()).count(),
            currency_symbol: default_symbol(),
        }
    }

    /// Use a different currency symbol when rendering.
    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.currency_symbol = symbol;
        self
    }

    /// Amount left unmatched because winnings and losses differ.
    pub fn residual(&self) -> Chips {
        (self.total_credit - self.total_debt).abs()
    }

    /// Whether winnings exactly match losses.
    pub fn is_balanced(&self) -> bool {
        self.total_credit == self.total_debt
    }

    /// Sum of all transfer amounts.
    pub fn total_transferred(&self) -> Chips {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}

impl std::fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sym = self.currency_symbol;

        writeln!(f, "=== Results ===")?;
        if self.standings.is_empty() {
            writeln!(f, "No players have cashed out.")?;
        }
        for s in &self.standings {
            writeln!(
                f,
                "  {:<20} In: {}{:<8} Out: {}{:<8} {:>10}",
                s.name,
                sym,
                s.total_buy_in,
                sym,
                s.cashout,
                format_net(s.net, sym)
            )?;
        }

        writeln!(f, "\n=== Who Pays Who ===")?;
        if self.transfers.is_empty() {
            writeln!(f, "No transfers needed, everyone broke even!")?;
        }
        for t in &self.transfers {
            writeln!(f, "  {} → {}: {}{}", t.from, t.to, sym, t.amount)?;
        }

        writeln!(f, "\nTotal in play:  {}{}", sym, self.total_buy_in)?;
        if self.still_playing > 0 {
            writeln!(f, "Still playing:  {}", self.still_playing)?;
        }
        if !self.is_balanced() {
            writeln!(
                f,
                "Unbalanced:     winners owed {}{}, losers owe {}{} ({}{} unmatched)",
                sym,
                self.total_credit,
                sym,
                self.total_debt,
                sym,
                self.residual()
            )?;
        }
        Ok(())
    }
}
