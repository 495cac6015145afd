//! homegame-settlement CLI
//!
//! Summarise and settle a game night from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Per-player buy-in / cash-out summary
//! homegame-settlement summary --input night.json
//!
//! # Who pays who, as JSON
//! homegame-settlement settle --input night.json --format json
//!
//! # Generate a random night for testing
//! homegame-settlement generate --players 8 --output night.json
//! ```

use homegame_settlement::core::chips::{format_net, Chips, GameConfig};
use homegame_settlement::core::player::{Player, PlayerId};
use homegame_settlement::core::transaction::{Transaction, TransactionStatus};
use homegame_settlement::settlement::report::SettlementReport;
use homegame_settlement::settlement::summary::build_summaries;
use homegame_settlement::simulation::random_game::{generate_random_night, NightConfig};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"homegame-settlement - buy-in tracking and settlement for poker nights

USAGE:
    homegame-settlement <COMMAND> [OPTIONS]

COMMANDS:
    summary     Show each player's buy-ins, cash-out and net result
    settle      Compute the transfers that settle the night
    generate    Generate a random game night (for testing)
    help        Show this message

OPTIONS (summary, settle):
    --input <FILE>       Path to JSON game file
    --format <FORMAT>    Output format: text (default) or json
    --max-buy-in <N>     Reject buy-ins above N (default: the file's
                         "max_buy_in", else 100000)

OPTIONS (generate):
    --players <N>        Number of players (default: 6)
    --max-buy-in <N>     Largest single buy-in (default: 200); limits above
                         100000 are written into the file as "max_buy_in"
    --pending            Leave some buy-ins unconfirmed
    --output <FILE>      Write to file instead of stdout

Set RUST_LOG=info (or debug) for diagnostic logging.

EXAMPLES:
    homegame-settlement summary --input night.json
    homegame-settlement settle --input night.json --format json
    homegame-settlement generate --players 8 --pending --output night.json"#
    );
}

/// JSON schema for a game file.
#[derive(Serialize, Deserialize)]
struct GameFile {
    /// Buy-in limit the night was played with, if not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_buy_in: Option<Chips>,
    players: Vec<PlayerRecord>,
    #[serde(default)]
    transactions: Vec<TransactionRecord>,
}

#[derive(Serialize, Deserialize)]
struct PlayerRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cashout: Option<Chips>,
}

#[derive(Serialize, Deserialize)]
struct TransactionRecord {
    /// Player name.
    player: String,
    amount: Chips,
    #[serde(default = "default_status")]
    status: TransactionStatus,
}

fn default_status() -> TransactionStatus {
    TransactionStatus::Confirmed
}

/// JSON output schema for the summary command.
#[derive(Serialize)]
struct SummaryOutput {
    name: String,
    total_buy_in: Chips,
    pending_buy_in: Chips,
    cashout: Option<Chips>,
    net: Option<Chips>,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Buy-in limit for a loaded file: the command-line flag wins, then the
/// file's own limit, then the default.
fn effective_config(file: &GameFile, cli_max_buy_in: Option<Chips>) -> GameConfig {
    let mut config = GameConfig::default();
    if let Some(max) = cli_max_buy_in.or(file.max_buy_in) {
        config.max_buy_in = max;
    }
    config
}

fn load_game(
    path: &str,
    cli_max_buy_in: Option<Chips>,
) -> (GameConfig, Vec<Player>, Vec<Transaction>) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    let file: GameFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "players": [ {{ "name": "Alice", "cashout": 150 }} ],
  "transactions": [ {{ "player": "Alice", "amount": 100, "status": "confirmed" }} ]
}}"#
        );
        process::exit(1);
    });
    if file.max_buy_in.is_some_and(|n| n <= 0) {
        fail("max_buy_in in the game file must be positive");
    }
    let config = effective_config(&file, cli_max_buy_in);

    let mut players = Vec::with_capacity(file.players.len());
    let mut by_name: HashMap<String, PlayerId> = HashMap::new();
    for record in file.players {
        let name = record.name.trim();
        if name.is_empty() || name.chars().count() > config.max_name_len {
            fail(format!(
                "player name '{}' must be 1-{} characters",
                name, config.max_name_len
            ));
        }
        if by_name.contains_key(name) {
            fail(format!("duplicate player name '{}'", name));
        }
        let mut player = Player::new(name);
        if let Some(cashout) = record.cashout {
            if cashout < 0 {
                fail(format!("{} has a negative cash-out ({})", name, cashout));
            }
            player = player.with_cashout(cashout);
        }
        by_name.insert(name.to_string(), player.id());
        players.push(player);
    }

    let mut transactions = Vec::with_capacity(file.transactions.len());
    for record in file.transactions {
        let Some(&player_id) = by_name.get(record.player.trim()) else {
            warn!("skipping buy-in for unknown player '{}'", record.player);
            continue;
        };
        if !config.is_valid_buy_in(record.amount) {
            fail(format!(
                "buy-in of {} for {} must be between 1 and {}",
                record.amount, record.player, config.max_buy_in
            ));
        }
        let tx = Transaction::new(player_id, record.amount);
        transactions.push(match record.status {
            TransactionStatus::Confirmed => tx.confirmed(),
            TransactionStatus::Pending => tx,
        });
    }

    info!(
        "loaded {} players and {} buy-ins from {}",
        players.len(),
        transactions.len(),
        path
    );
    (config, players, transactions)
}

struct InputOptions {
    path: String,
    json: bool,
    max_buy_in: Option<Chips>,
}

fn parse_input_options(args: &[String]) -> InputOptions {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut max_buy_in = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--input requires a file path")),
                );
            }
            "--format" => {
                i += 1;
                format = args
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| fail("--format requires 'text' or 'json'"));
            }
            "--max-buy-in" => {
                i += 1;
                max_buy_in = Some(
                    args.get(i)
                        .and_then(|s| s.parse().ok())
                        .filter(|n: &Chips| *n > 0)
                        .unwrap_or_else(|| fail("--max-buy-in requires a positive number")),
                );
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    if format != "text" && format != "json" {
        fail(format!("unknown format '{}'", format));
    }
    InputOptions {
        path,
        json: format == "json",
        max_buy_in,
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(e))
}

fn cmd_summary(args: &[String]) {
    let opts = parse_input_options(args);
    let (config, players, transactions) = load_game(&opts.path, opts.max_buy_in);
    let summaries = build_summaries(&players, &transactions);

    if opts.json {
        let output: Vec<SummaryOutput> = summaries
            .into_iter()
            .map(|s| SummaryOutput {
                name: s.name,
                total_buy_in: s.total_buy_in,
                pending_buy_in: s.pending_buy_in,
                cashout: s.cashout,
                net: s.net,
            })
            .collect();
        println!("{}", to_json(&output));
        return;
    }

    let sym = config.currency_symbol;
    for s in &summaries {
        let mut line = format!("{:<20} Buy-in: {}{}", s.name, sym, s.total_buy_in);
        if s.pending_buy_in > 0 {
            line.push_str(&format!(" (+{}{} pending)", sym, s.pending_buy_in));
        }
        match (s.cashout, s.net) {
            (Some(cashout), Some(net)) => {
                line.push_str(&format!(
                    " | Cash-out: {}{} | {}",
                    sym,
                    cashout,
                    format_net(net, sym)
                ));
            }
            _ => line.push_str(" | Playing"),
        }
        println!("{}", line);
    }
    let in_play: Chips = summaries.iter().map(|s| s.total_buy_in).sum();
    println!("\nPlayers: {}  Total in play: {}{}", summaries.len(), sym, in_play);
}

fn cmd_settle(args: &[String]) {
    let opts = parse_input_options(args);
    let (config, players, transactions) = load_game(&opts.path, opts.max_buy_in);
    let summaries = build_summaries(&players, &transactions);

    let report =
        SettlementReport::from_summaries(&summaries).with_symbol(config.currency_symbol);
    if !report.is_balanced() {
        warn!(
            "cash-outs do not match buy-ins, {} left unmatched",
            report.residual()
        );
    }

    if opts.json {
        println!("{}", to_json(&report));
    } else {
        print!("{}", report);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = NightConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                i += 1;
                config.player_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--players requires a number"));
            }
            "--max-buy-in" => {
                i += 1;
                config.max_buy_in = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .filter(|n: &Chips| *n > 0)
                    .unwrap_or_else(|| fail("--max-buy-in requires a positive number"));
            }
            "--pending" => config.with_pending = true,
            "--output" => {
                i += 1;
                output_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--output requires a file path")),
                );
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }
    config.min_buy_in = config.min_buy_in.min(config.max_buy_in);

    let night = generate_random_night(&config);
    let names: HashMap<_, _> = night
        .players
        .iter()
        .map(|p| (p.id(), p.name().to_string()))
        .collect();

    let output = GameFile {
        max_buy_in: (config.max_buy_in > GameConfig::default().max_buy_in)
            .then_some(config.max_buy_in),
        players: night
            .players
            .iter()
            .map(|p| PlayerRecord {
                name: p.name().to_string(),
                cashout: p.cashout(),
            })
            .collect(),
        transactions: night
            .transactions
            .iter()
            .filter_map(|t| {
                Some(TransactionRecord {
                    player: names.get(&t.player_id())?.clone(),
                    amount: t.amount(),
                    status: t.status(),
                })
            })
            .collect(),
    };

    let json = to_json(&output);
    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} buy-ins across {} players → {}",
            output.transactions.len(),
            output.players.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "summary" => cmd_summary(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(max_buy_in: Option<Chips>) -> GameFile {
        GameFile {
            max_buy_in,
            players: Vec::new(),
            transactions: Vec::new(),
        }
    }

    #[test]
    fn test_file_limit_used_without_flag() {
        assert_eq!(effective_config(&file(Some(250_000)), None).max_buy_in, 250_000);
        assert_eq!(
            effective_config(&file(None), None).max_buy_in,
            GameConfig::default().max_buy_in
        );
    }

    #[test]
    fn test_flag_overrides_file_limit() {
        assert_eq!(effective_config(&file(Some(250_000)), Some(500)).max_buy_in, 500);
    }

    #[test]
    fn test_default_limit_not_written() {
        let json = serde_json::to_string(&file(None)).unwrap();
        assert!(!json.contains("max_buy_in"));
        let back: GameFile = serde_json::from_str(r#"{"max_buy_in": 300000, "players": []}"#).unwrap();
        assert_eq!(back.max_buy_in, Some(300_000));
    }
}
