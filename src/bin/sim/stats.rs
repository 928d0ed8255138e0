// Spin Tally — per-spin aggregation for the RTP simulator
// Observational only: nothing here feeds back into engine decisions.

use serde::Serialize;

use cluster_engine::SpinOutcome;

/// Bonus-trigger breakdown indexed by scatter count: 3, 4, 5, 6, 7+.
const SCATTER_BUCKETS: usize = 5;

// ─── Running tally ──────────────────────────────────────────────────────────

pub struct SpinTally {
    pub spins_run: u64,
    pub total_bet: f64,
    pub total_payout: f64,
    /// Paid spins whose base-spin cascade win was non-zero.
    pub base_hits: u64,
    pub max_base_win: f64,
    pub bonus_triggers: u64,
    /// Free spins (within bonus chains) with a non-zero win.
    pub bonus_hits: u64,
    /// Total payout of each triggered bonus chain.
    pub bonus_wins: Vec<f64>,
    pub by_scatter: [u64; SCATTER_BUCKETS],
}

impl SpinTally {
    pub fn new() -> Self {
        Self {
            spins_run: 0,
            total_bet: 0.0,
            total_payout: 0.0,
            base_hits: 0,
            max_base_win: 0.0,
            bonus_triggers: 0,
            bonus_hits: 0,
            bonus_wins: Vec::new(),
            by_scatter: [0; SCATTER_BUCKETS],
        }
    }

    pub fn record(&mut self, outcome: &SpinOutcome, bet: f64) {
        self.spins_run += 1;
        self.total_bet += bet;
        self.total_payout += outcome.total_win;

        if outcome.base.win > 0.0 {
            self.base_hits += 1;
        }
        self.max_base_win = self.max_base_win.max(outcome.base.win);

        if outcome.triggered_bonus() {
            self.bonus_triggers += 1;
            let bucket = (outcome.scatter_count().clamp(3, 7) - 3) as usize;
            self.by_scatter[bucket] += 1;
            self.bonus_wins.push(outcome.bonus_win);
            self.bonus_hits += outcome
                .bonus_spins
                .iter()
                .filter(|r| r.win > 0.0)
                .count() as u64;
        }
    }

    pub fn summarize(&self, bet: f64, seed: u64, elapsed_ms: u128) -> SimSummary {
        let spins = self.spins_run.max(1) as f64;
        let rtp_pct = if self.total_bet > 0.0 {
            self.total_payout / self.total_bet * 100.0
        } else {
            0.0
        };
        let avg_bonus_win = if self.bonus_wins.is_empty() {
            0.0
        } else {
            self.bonus_wins.iter().sum::<f64>() / self.bonus_wins.len() as f64
        };
        let max_bonus_win = self.bonus_wins.iter().cloned().fold(0.0, f64::max);

        SimSummary {
            spins: self.spins_run,
            bet,
            seed,
            total_bet: self.total_bet,
            total_payout: self.total_payout,
            rtp_pct,
            avg_payout_per_spin: self.total_payout / spins,
            hit_rate: self.base_hits as f64 / spins,
            bonus_triggers: self.bonus_triggers,
            bonus_frequency: self.bonus_triggers as f64 / spins,
            bonus_hits: self.bonus_hits,
            avg_bonus_win,
            max_bonus_win,
            max_base_win: self.max_base_win,
            by_scatter: self.by_scatter,
            bonus_win_buckets: WinBuckets::from_wins(&self.bonus_wins, bet),
            elapsed_ms,
            spins_per_sec: if elapsed_ms > 0 {
                self.spins_run as f64 / (elapsed_ms as f64 / 1000.0)
            } else {
                0.0
            },
        }
    }
}

// ─── Win distribution buckets ───────────────────────────────────────────────

/// Bonus-chain win distribution relative to the bet: <1x, 1–10x, 10–100x, 100x+.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WinBuckets {
    pub below_1x: u64,
    pub from_1x_to_10x: u64,
    pub from_10x_to_100x: u64,
    pub over_100x: u64,
}

impl WinBuckets {
    pub fn from_wins(wins: &[f64], bet: f64) -> Self {
        let mut buckets = Self {
            below_1x: 0,
            from_1x_to_10x: 0,
            from_10x_to_100x: 0,
            over_100x: 0,
        };
        for &w in wins {
            if w < bet {
                buckets.below_1x += 1;
            } else if w < bet * 10.0 {
                buckets.from_1x_to_10x += 1;
            } else if w < bet * 100.0 {
                buckets.from_10x_to_100x += 1;
            } else {
                buckets.over_100x += 1;
            }
        }
        buckets
    }

    pub fn total(&self) -> u64 {
        self.below_1x + self.from_1x_to_10x + self.from_10x_to_100x + self.over_100x
    }
}

// ─── Summary record ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SimSummary {
    pub spins: u64,
    pub bet: f64,
    pub seed: u64,
    pub total_bet: f64,
    pub total_payout: f64,
    pub rtp_pct: f64,
    pub avg_payout_per_spin: f64,
    pub hit_rate: f64,
    pub bonus_triggers: u64,
    pub bonus_frequency: f64,
    pub bonus_hits: u64,
    pub avg_bonus_win: f64,
    pub max_bonus_win: f64,
    pub max_base_win: f64,
    /// Bonus triggers by scatter count: [3, 4, 5, 6, 7+].
    pub by_scatter: [u64; 5],
    pub bonus_win_buckets: WinBuckets,
    pub elapsed_ms: u128,
    pub spins_per_sec: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_cover_all_wins() {
        let wins = [0.5, 1.0, 3.0, 9.99, 10.0, 99.0, 100.0, 4200.0];
        let b = WinBuckets::from_wins(&wins, 1.0);
        assert_eq!(b.below_1x, 1);
        assert_eq!(b.from_1x_to_10x, 3);
        assert_eq!(b.from_10x_to_100x, 2);
        assert_eq!(b.over_100x, 2);
        assert_eq!(b.total(), wins.len() as u64);
    }

    #[test]
    fn buckets_scale_with_bet() {
        let wins = [5.0, 50.0, 500.0];
        let b = WinBuckets::from_wins(&wins, 10.0);
        assert_eq!(b.below_1x, 1);
        assert_eq!(b.from_1x_to_10x, 1);
        assert_eq!(b.from_10x_to_100x, 1);
        assert_eq!(b.over_100x, 0);
    }
}
