use crate::core::chips::Chips;
use crate::settlement::solver::Transfer;
use crate::settlement::summary::PlayerSummary;
use serde::{Deserialize, Serialize};

/// Net position of each cashed-out player, in join order.
///
/// A positive balance means the player is owed (net winner).
/// A negative balance means the player owes (net loser).
///
/// The ledger is the input to the settlement solver, and applying the
/// solver's transfers to it should bring every position back to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// name -> net balance, serialized as a JSON object in insertion order
    #[serde(with = "positions_serde")]
    positions: Vec<(String, Chips)>,
}

mod positions_serde {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        positions: &[(String, Chips)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(positions.len()))?;
        for (name, amount) in positions {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, Chips)>, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Vec<(String, Chips)>;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of player name to net position")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut positions = Vec::new();
                while let Some((name, value)) = access.next_entry::<String, Chips>()? {
                    positions.push((name, value));
                }
                Ok(positions)
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the ledger from player summaries, one position per cashed-out
    /// summary.
    ///
    /// Players without a net result are still playing and are left out.
    /// Names are expected to be unique; name lookups such as
    /// [`Ledger::position`] and [`Ledger::apply_transfer`] only see the
    /// first position with a given name.
    pub fn from_summaries(summaries: &[PlayerSummary]) -> Self {
        let positions = summaries
            .iter()
            .filter_map(|s| s.net.map(|net| (s.name.clone(), net)))
            .collect();
        Self { positions }
    }

    /// Add `amount` to a player's position, creating it if needed.
    pub fn credit(&mut self, name: &str, amount: Chips) {
        match self.positions.iter_mut().find(|(n, _)| n == name) {
            Some((_, position)) => *position += amount,
            None => self.positions.push((name.to_string(), amount)),
        }
    }

    /// Apply a transfer: the payer's debt shrinks, the payee's credit shrinks.
    pub fn apply_transfer(&mut self, transfer: &Transfer) {
        self.credit(&transfer.from, transfer.amount);
        self.credit(&transfer.to, -transfer.amount);
    }

    /// Get the net position of a player (zero if unknown).
    pub fn position(&self, name: &str) -> Chips {
        self.positions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// All positions in insertion order.
    pub fn positions(&self) -> &[(String, Chips)] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total owed by net losers (sum of |negative| positions).
    pub fn total_debt(&self) -> Chips {
        self.positions
            .iter()
            .filter(|(_, v)| *v < 0)
            .map(|(_, v)| v.saturating_neg())
            .sum()
    }

    /// Total owed to net winners (sum of positive positions).
    pub fn total_credit(&self) -> Chips {
        self.positions
            .iter()
            .filter(|(_, v)| *v > 0)
            .map(|(_, v)| *v)
            .sum()
    }

    /// Whether winnings exactly match losses.
    pub fn is_balanced(&self) -> bool {
        self.positions.iter().map(|(_, v)| *v).sum::<Chips>() == 0
    }

    /// Whether every position has been settled to zero.
    pub fn is_cleared(&self) -> bool {
        self.positions.iter().all(|(_, v)| *v == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, total_buy_in: Chips, cashout: Option<Chips>) -> PlayerSummary {
        PlayerSummary {
            id: crate::core::player::PlayerId::new(),
            name: name.to_string(),
            total_buy_in,
            pending_buy_in: 0,
            cashout,
            net: cashout.map(|c| c - total_buy_in),
        }
    }

    #[test]
    fn test_ledger_from_summaries_skips_playing() {
        let ledger = Ledger::from_summaries(&[
            summary("Alice", 100, Some(150)),
            summary("Bob", 100, None),
            summary("Carol", 100, Some(50)),
        ]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.position("Alice"), 50);
        assert_eq!(ledger.position("Carol"), -50);
        assert_eq!(ledger.position("Bob"), 0);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_from_summaries_keeps_one_position_per_summary() {
        let ledger = Ledger::from_summaries(&[
            summary("Bob", 100, Some(60)),
            summary("Bob", 100, Some(140)),
        ]);
        assert_eq!(
            ledger.positions(),
            &[("Bob".to_string(), -40), ("Bob".to_string(), 40)]
        );
        assert_eq!(ledger.total_debt(), 40);
        assert_eq!(ledger.total_credit(), 40);
    }

    #[test]
    fn test_ledger_apply_transfer_clears() {
        let mut ledger = Ledger::new();
        ledger.credit("Alice", 50);
        ledger.credit("Bob", -50);
        ledger.apply_transfer(&Transfer {
            from: "Bob".to_string(),
            to: "Alice".to_string(),
            amount: 50,
        });
        assert!(ledger.is_cleared());
    }

    #[test]
    fn test_ledger_unbalanced_totals() {
        let mut ledger = Ledger::new();
        ledger.credit("Alice", 80);
        ledger.credit("Bob", -50);
        assert_eq!(ledger.total_credit(), 80);
        assert_eq!(ledger.total_debt(), 50);
        assert!(!ledger.is_balanced());
    }

    #[test]
    fn test_ledger_serializes_as_ordered_map() {
        let mut ledger = Ledger::new();
        ledger.credit("Zed", 10);
        ledger.credit("Amy", -10);
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"positions":{"Zed":10,"Amy":-10}}"#);

        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
