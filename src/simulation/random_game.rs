//! Random game-night generation.
//!
//! Produces plausible nights for the CLI `generate` command, property
//! tests and benchmarks. Cash-outs always redistribute exactly the
//! confirmed pot, so the generated nights are balanced.

use crate::core::chips::Chips;
use crate::core::player::Player;
use crate::core::transaction::Transaction;
use rand::Rng;

/// Configuration for generating a random game night.
#[derive(Debug, Clone)]
pub struct NightConfig {
    /// Number of players at the table.
    pub player_count: usize,
    /// Smallest single buy-in.
    pub min_buy_in: Chips,
    /// Largest single buy-in.
    pub max_buy_in: Chips,
    /// Extra buy-ins a player may make after the first.
    pub max_rebuys: usize,
    /// Leave some buy-in requests unconfirmed.
    pub with_pending: bool,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            player_count: 6,
            min_buy_in: 20,
            max_buy_in: 200,
            max_rebuys: 2,
            with_pending: false,
        }
    }
}

/// Players and their buy-in log for one generated night.
#[derive(Debug, Clone)]
pub struct GeneratedNight {
    pub players: Vec<Player>,
    pub transactions: Vec<Transaction>,
}

/// Generate a random, fully cashed-out game night.
pub fn generate_random_night(config: &NightConfig) -> GeneratedNight {
    let mut rng = rand::thread_rng();
    let min = config.min_buy_in.max(1);
    let max = config.max_buy_in.max(min);

    let mut transactions = Vec::new();
    let mut bought_in: Vec<Chips> = Vec::with_capacity(config.player_count);
    let mut players: Vec<Player> = (0..config.player_count)
        .map(|i| Player::new(format!("PLAYER-{:02}", i + 1)))
        .collect();

    for player in &players {
        let buy_ins = rng.gen_range(1..=config.max_rebuys + 1);
        let mut total = 0;
        for _ in 0..buy_ins {
            let amount = rng.gen_range(min..=max);
            transactions.push(Transaction::new(player.id(), amount).confirmed());
            total += amount;
        }
        if config.with_pending && rng.gen_bool(0.3) {
            transactions.push(Transaction::new(player.id(), rng.gen_range(min..=max)));
        }
        bought_in.push(total);
    }

    // Split the confirmed pot by random weights; the last player takes the rounding remainder.
    let pot: Chips = bought_in.iter().sum();
    let weights: Vec<Chips> = (0..players.len()).map(|_| rng.gen_range(0..=100)).collect();
    let weight_sum: Chips = weights.iter().sum::<Chips>().max(1);

    let mut distributed = 0;
    let last = players.len().saturating_sub(1);
    for (i, player) in players.iter_mut().enumerate() {
        let share = if i == last {
            pot - distributed
        } else {
            pot * weights[i] / weight_sum
        };
        distributed += share;
        player.set_cashout(share);
    }

    GeneratedNight {
        players,
        transactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::solver::SettlementEngine;
    use crate::settlement::summary::build_summaries;

    #[test]
    fn test_random_night_generation() {
        let config = NightConfig {
            player_count: 5,
            ..Default::default()
        };
        let night = generate_random_night(&config);
        assert_eq!(night.players.len(), 5);
        assert!(night.transactions.len() >= 5);
        assert!(night.players.iter().all(|p| p.has_cashed_out()));
    }

    #[test]
    fn test_random_night_is_balanced() {
        let config = NightConfig {
            player_count: 12,
            with_pending: true,
            ..Default::default()
        };
        let night = generate_random_night(&config);
        let summaries = build_summaries(&night.players, &night.transactions);
        let total_net: Chips = summaries.iter().filter_map(|s| s.net).sum();
        assert_eq!(total_net, 0);

        let transfers = SettlementEngine::settle(&summaries);
        assert!(transfers.len() < config.player_count);
    }

    #[test]
    fn test_empty_night() {
        let night = generate_random_night(&NightConfig {
            player_count: 0,
            ..Default::default()
        });
        assert!(night.players.is_empty());
        assert!(night.transactions.is_empty());
    }
}
