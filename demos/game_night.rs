//! A full game night, from joining to settling up.
//!
//! Shows the banker confirming and rejecting buy-ins, players cashing
//! out, and the transfers that settle everyone.

use homegame_settlement::prelude::*;

fn main() -> Result<(), GameError> {
    env_logger::init();

    println!("╔══════════════════════════════════════════╗");
    println!("║  homegame-settlement: Game Night Example ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut night = GameNight::new(InMemoryStore::new(), GameConfig::default());

    // --- Players join ---
    let alice = night.join("Alice")?;
    let bob = night.join("Bob")?;
    let carol = night.join("Carol")?;
    let dave = night.join("Dave")?;

    // --- Buy-ins ---
    println!("━━━ Buy-ins ━━━\n");
    for p in [&alice, &bob, &carol, &dave] {
        night.request_buy_in(p.id(), 100)?;
    }
    let rebuy = night.request_buy_in(bob.id(), 50)?;
    let greedy = night.request_buy_in(dave.id(), 5_000)?;

    for request in night.pending()? {
        println!("  pending: {:<8} {}", request.player, request.amount);
    }

    for request in night.pending()? {
        if request.id == greedy.id() {
            night.reject(request.id)?;
        } else {
            night.confirm(request.id)?;
        }
    }
    println!("\n  Bob's rebuy {} confirmed", rebuy.id());
    println!("  Dave's 5000 request rejected");
    println!("  Total in play: {}\n", night.total_in_play()?);

    // --- Cash-outs ---
    println!("━━━ Cash-outs ━━━\n");
    night.cash_out(alice.id(), 210)?;
    night.cash_out(bob.id(), 20)?;
    night.cash_out(carol.id(), 95)?;

    if let Err(e) = night.check_end_game() {
        println!("  Can't end yet: {}", e);
    }
    night.cash_out(dave.id(), 125)?;

    for s in night.summaries()? {
        let net = s.net.map(|n| format_net(n, '£')).unwrap_or_default();
        println!("  {:<8} in {:>4}  out {:>4}  {}", s.name, s.total_buy_in, s.cashout.unwrap_or(0), net);
    }
    println!();

    // --- Settle ---
    let report = night.settle()?;
    println!("{}", report);

    night.new_game()?;
    println!("Table cleared for the next game.");
    Ok(())
}
