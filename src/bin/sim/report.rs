// Human-readable simulation report + optional JSON artifact

use crate::stats::SimSummary;

pub fn print_summary(s: &SimSummary) {
    println!("-------------------- SIMULATION SUMMARY --------------------");
    println!("Spins simulated:        {}", s.spins);
    println!("Seed:                   {}", s.seed);
    println!("Total bet placed:       {:.4}", s.total_bet);
    println!("Total payout:           {:.4}", s.total_payout);
    println!("RTP (estimate):         {:.4}%", s.rtp_pct);
    println!("Avg payout / spin:      {:.6}", s.avg_payout_per_spin);
    println!("Hit rate (base spins):  {:.3}%", s.hit_rate * 100.0);
    println!("Bonus triggers:         {}", s.bonus_triggers);
    println!(
        "Bonus frequency:        {:.6}%  (1 in {} spins)",
        s.bonus_frequency * 100.0,
        if s.bonus_frequency > 0.0 {
            format!("{:.1}", 1.0 / s.bonus_frequency)
        } else {
            "∞".to_string()
        }
    );
    println!("Average bonus win:      {:.4}", s.avg_bonus_win);
    println!("Max bonus win observed: {:.4}", s.max_bonus_win);
    println!("Max base-spin win obs:  {:.4}", s.max_base_win);
    println!(
        "Bonus triggers by scatter count: 3:{} 4:{} 5:{} 6:{} 7+:{}",
        s.by_scatter[0], s.by_scatter[1], s.by_scatter[2], s.by_scatter[3], s.by_scatter[4]
    );

    let b = &s.bonus_win_buckets;
    let total = b.total();
    if total > 0 {
        let pct = |n: u64| n as f64 / total as f64 * 100.0;
        println!("Bonus win buckets (vs bet):");
        println!("  <1x:      {} ({:.2}%)", b.below_1x, pct(b.below_1x));
        println!("  1x-10x:   {} ({:.2}%)", b.from_1x_to_10x, pct(b.from_1x_to_10x));
        println!("  10x-100x: {} ({:.2}%)", b.from_10x_to_100x, pct(b.from_10x_to_100x));
        println!("  100x+:    {} ({:.2}%)", b.over_100x, pct(b.over_100x));
    }
    println!(
        "Elapsed: {:.1}s ({:.0} spins/sec)",
        s.elapsed_ms as f64 / 1000.0,
        s.spins_per_sec
    );
    println!("------------------------------------------------------------");
}

/// Write the summary as pretty JSON under `sim-results/`.
pub fn write_json(s: &SimSummary) -> std::io::Result<std::path::PathBuf> {
    let dir = std::path::Path::new("sim-results");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("sim-{}x{}-seed{}.json", s.spins, s.bet, s.seed));
    let json = serde_json::to_string_pretty(s)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(&path, json)?;
    Ok(path)
}
