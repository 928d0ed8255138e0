// RTP Simulator — long-run validation of the cluster slot engine
// Seedable PRNG, no rendering, tight synchronous loop.
//
// Usage:
//   cargo run --release --bin sim                     # 100000 spins at bet 1
//   cargo run --release --bin sim -- 1000000 2        # spins, bet
//   cargo run --release --bin sim -- 50000 1 --seed 42
//   cargo run --release --bin sim -- --json           # also write JSON report

mod report;
mod stats;

use std::time::Instant;

use cluster_engine::SlotSession;
use stats::SpinTally;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    spins: u64,
    bet: f64,
    seed: u64,
    json: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        spins: 100_000,
        bet: 1.0,
        seed: 0,
        json: false,
    };

    let mut positional = 0;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--json" => {
                cli.json = true;
            }
            arg if !arg.starts_with('-') => {
                match positional {
                    0 => cli.spins = arg.parse().unwrap_or(100_000),
                    1 => cli.bet = arg.parse().unwrap_or(1.0),
                    _ => eprintln!("Ignoring extra argument: {arg}"),
                }
                positional += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();

    println!(
        "\n  Cluster Slot RTP Simulator\n  PRNG: ChaCha8Rng | Spins: {} | Bet: {} | Seed: {}\n",
        cli.spins, cli.bet, cli.seed
    );

    let mut session = SlotSession::with_seed(cli.seed);
    let mut tally = SpinTally::new();

    let start = Instant::now();
    for _ in 0..cli.spins {
        // Keep the session funded: the engine rejects underfunded paid
        // spins, and the harness must not let bankroll depth skew the
        // estimate. Wager/payout totals come from the tally, not balance.
        if session.balance() < cli.bet {
            session.deposit(cli.bet * 100_000.0);
        }

        match session.spin_core(cli.bet) {
            Ok(outcome) => tally.record(&outcome, cli.bet),
            Err(e) => {
                eprintln!("simulation aborted after {} spins: {e}", tally.spins_run);
                std::process::exit(1);
            }
        }
    }
    let elapsed_ms = start.elapsed().as_millis();

    let summary = tally.summarize(cli.bet, cli.seed, elapsed_ms);
    report::print_summary(&summary);

    if cli.json {
        match report::write_json(&summary) {
            Ok(path) => println!("Results saved to: {}", path.display()),
            Err(e) => eprintln!("Failed to write JSON report: {e}"),
        }
    }
}
