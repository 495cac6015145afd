use homegame_settlement::core::chips::Chips;
use homegame_settlement::core::ledger::Ledger;
use homegame_settlement::core::player::PlayerId;
use homegame_settlement::settlement::solver::SettlementEngine;
use homegame_settlement::settlement::summary::{build_summaries, PlayerSummary};
use homegame_settlement::simulation::random_game::{generate_random_night, NightConfig};
use proptest::prelude::*;
use std::collections::HashMap;

/// A player summary with a unique name; `None` cashout means still playing.
fn summary(i: usize, total_buy_in: Chips, cashout: Option<Chips>) -> PlayerSummary {
    PlayerSummary {
        id: PlayerId::new(),
        name: format!("P{}", i),
        total_buy_in,
        pending_buy_in: 0,
        cashout,
        net: cashout.map(|c| c - total_buy_in),
    }
}

/// Arbitrary table of 0..12 players, some still playing.
fn arb_summaries() -> impl Strategy<Value = Vec<PlayerSummary>> {
    prop::collection::vec((0i64..5_000, prop::option::of(0i64..10_000)), 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (buy_in, cashout))| summary(i, buy_in, cashout))
            .collect()
    })
}

/// Arbitrary table where every player has cashed out and nets sum to zero.
fn arb_balanced_summaries() -> impl Strategy<Value = Vec<PlayerSummary>> {
    prop::collection::vec(-5_000i64..5_000, 1..12).prop_map(|mut nets| {
        let total: Chips = nets.iter().sum();
        nets.push(-total);
        nets.into_iter()
            .enumerate()
            .map(|(i, net)| {
                // buy-in large enough that cashout stays non-negative
                let buy_in = 100_000;
                summary(i, buy_in, Some(buy_in + net))
            })
            .collect()
    })
}

fn count_sides(summaries: &[PlayerSummary]) -> (usize, usize) {
    let debtors = summaries.iter().filter(|s| s.net.is_some_and(|n| n < 0)).count();
    let creditors = summaries.iter().filter(|s| s.net.is_some_and(|n| n > 0)).count();
    (debtors, creditors)
}

proptest! {
    // ===================================================================
    // Balanced nights settle exactly: every player's received minus paid
    // equals their net.
    // ===================================================================
    #[test]
    fn balanced_transfers_conserve_nets(summaries in arb_balanced_summaries()) {
        let transfers = SettlementEngine::settle(&summaries);
        let mut flow: HashMap<&str, Chips> = HashMap::new();
        for t in &transfers {
            *flow.entry(t.to.as_str()).or_insert(0) += t.amount;
            *flow.entry(t.from.as_str()).or_insert(0) -= t.amount;
        }
        for s in &summaries {
            prop_assert_eq!(
                flow.get(s.name.as_str()).copied().unwrap_or(0),
                s.net.unwrap_or(0),
                "flow for {} must equal its net",
                s.name
            );
        }
    }

    // ===================================================================
    // Applying the transfers clears a balanced ledger.
    // ===================================================================
    #[test]
    fn balanced_ledger_clears(summaries in arb_balanced_summaries()) {
        let mut ledger = Ledger::from_summaries(&summaries);
        prop_assert!(ledger.is_balanced());
        for t in SettlementEngine::settle(&summaries) {
            ledger.apply_transfer(&t);
        }
        prop_assert!(ledger.is_cleared());
    }

    // ===================================================================
    // Every transfer is positive and between two different players.
    // ===================================================================
    #[test]
    fn transfers_positive_and_not_self(summaries in arb_summaries()) {
        for t in SettlementEngine::settle(&summaries) {
            prop_assert!(t.amount > 0, "transfer amount {} must be positive", t.amount);
            prop_assert_ne!(&t.from, &t.to);
        }
    }

    // ===================================================================
    // Greedy matching never needs more than debtors + creditors - 1
    // transfers.
    // ===================================================================
    #[test]
    fn transfer_count_bounded(summaries in arb_summaries()) {
        let transfers = SettlementEngine::settle(&summaries);
        let (debtors, creditors) = count_sides(&summaries);
        if debtors == 0 || creditors == 0 {
            prop_assert!(transfers.is_empty());
        } else {
            prop_assert!(
                transfers.len() <= debtors + creditors - 1,
                "{} transfers for {} debtors and {} creditors",
                transfers.len(), debtors, creditors
            );
        }
    }

    // ===================================================================
    // Break-even and still-playing players never appear in a transfer.
    // ===================================================================
    #[test]
    fn excluded_players_never_transfer(summaries in arb_summaries()) {
        let transfers = SettlementEngine::settle(&summaries);
        for s in summaries.iter().filter(|s| s.net.unwrap_or(0) == 0) {
            prop_assert!(
                transfers.iter().all(|t| t.from != s.name && t.to != s.name),
                "{} has no balance to settle",
                s.name
            );
        }
    }

    // ===================================================================
    // Payers only pay, payees only receive, and nobody moves more than
    // they owe or are owed, even on unbalanced nights.
    // ===================================================================
    #[test]
    fn transfers_never_exceed_balances(summaries in arb_summaries()) {
        let transfers = SettlementEngine::settle(&summaries);
        for s in &summaries {
            let paid: Chips = transfers.iter().filter(|t| t.from == s.name).map(|t| t.amount).sum();
            let received: Chips = transfers.iter().filter(|t| t.to == s.name).map(|t| t.amount).sum();
            let net = s.net.unwrap_or(0);
            if net < 0 {
                prop_assert_eq!(received, 0);
                prop_assert!(paid <= -net);
            } else {
                prop_assert_eq!(paid, 0);
                prop_assert!(received <= net);
            }
        }
    }

    // ===================================================================
    // Settling is deterministic.
    // ===================================================================
    #[test]
    fn settlement_is_deterministic(summaries in arb_summaries()) {
        prop_assert_eq!(
            SettlementEngine::settle(&summaries),
            SettlementEngine::settle(&summaries)
        );
    }

    // ===================================================================
    // Generated nights summarise to zero-sum nets and settle fully.
    // ===================================================================
    #[test]
    fn generated_nights_settle(players in 1usize..15, pending in any::<bool>()) {
        let night = generate_random_night(&NightConfig {
            player_count: players,
            with_pending: pending,
            ..Default::default()
        });
        let summaries = build_summaries(&night.players, &night.transactions);
        prop_assert_eq!(summaries.clone(), build_summaries(&night.players, &night.transactions));

        let mut ledger = Ledger::from_summaries(&summaries);
        prop_assert!(ledger.is_balanced());
        for t in SettlementEngine::settle(&summaries) {
            ledger.apply_transfer(&t);
        }
        prop_assert!(ledger.is_cleared());
    }
}
