// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Spin Orchestration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::cascade::{run_cascade, CascadeError};
use crate::grid::Grid;
use crate::paytable::Paytable;
use crate::pool::SymbolPools;
use crate::types::{
    free_spin_award, SessionStats, SpinOutcome, SpinRecord, GRID_CELLS, STARTING_BALANCE,
};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SpinError {
    /// A paid spin whose bet exceeds the balance is rejected before any
    /// state mutation. Not retried by the engine; the caller decides.
    #[error("insufficient balance: bet {bet} exceeds balance {balance}")]
    InsufficientBalance { bet: f64, balance: f64 },

    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

// ─── SlotSession ─────────────────────────────────────────────────────────────

/// One player session: board, per-cell multipliers, balance and the
/// outstanding free-spin counter. The engine holds no state outside this
/// struct; the hosting application owns the single long-lived instance, and
/// a spin call resolves its whole cascade and free-spin chain before
/// returning (the session is not reentrant).
#[wasm_bindgen]
pub struct SlotSession {
    pub(crate) grid: Grid,
    pub(crate) multipliers: Vec<u32>,
    pub(crate) balance: f64,
    pub(crate) free_spins: u32,
    pub(crate) pools: SymbolPools,
    pub(crate) paytable: Paytable,
    pub(crate) rng: ChaCha8Rng,

    pub(crate) spins_played: u64,
    pub(crate) total_wagered: f64,
    pub(crate) total_won: f64,
}

impl SlotSession {
    /// New session with a deterministic PRNG seed. The board is pre-filled
    /// from the restricted pool, so no scatters show before the first spin.
    pub fn with_seed(seed: u64) -> Self {
        let pools = SymbolPools::build();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::filled(&pools, &mut rng);
        Self {
            grid,
            multipliers: vec![1; GRID_CELLS],
            balance: STARTING_BALANCE,
            free_spins: 0,
            pools,
            paytable: Paytable::new(),
            rng,
            spins_played: 0,
            total_wagered: 0.0,
            total_won: 0.0,
        }
    }

    /// Run one paid spin and drain any free-spin chain it triggers.
    ///
    /// Order of operations: validate and deduct the bet, reset multipliers
    /// (only when no free spins are pending), reveal from the full pool,
    /// resolve scatters, cascade, then consume the free-spin queue with an
    /// iterative loop — a free spin may retrigger and extend the queue.
    pub fn spin_core(&mut self, bet: f64) -> Result<SpinOutcome, SpinError> {
        if bet > self.balance {
            return Err(SpinError::InsufficientBalance {
                bet,
                balance: self.balance,
            });
        }
        self.balance -= bet;
        self.total_wagered += bet;
        self.spins_played += 1;

        // Fresh paid spin with no pending bonus: multipliers start over.
        // A pending queue (or any free spin) carries them forward.
        if self.free_spins == 0 {
            self.multipliers.fill(1);
        }

        let base = self.spin_once(bet)?;

        let mut bonus_spins = Vec::new();
        let mut bonus_win = 0.0;
        while self.free_spins > 0 {
            self.free_spins -= 1;
            let record = self.spin_once(bet)?;
            bonus_win += record.win;
            bonus_spins.push(record);
        }

        let total_win = base.win + bonus_win;
        Ok(SpinOutcome {
            base,
            bonus_spins,
            total_win,
            bonus_win,
            balance: self.balance,
        })
    }

    /// One board reveal plus full cascade resolution. Shared by paid and
    /// free spins; bet deduction and multiplier reset happen in the caller.
    fn spin_once(&mut self, bet: f64) -> Result<SpinRecord, SpinError> {
        self.grid.reveal(&self.pools, &mut self.rng);

        let scatter_count = self.grid.count_scatters();
        let awarded = free_spin_award(scatter_count);
        self.free_spins += awarded;
        if scatter_count > 0 {
            self.grid.replace_scatters(&self.pools, &mut self.rng);
        }

        let cascade = run_cascade(
            &mut self.grid,
            &mut self.multipliers,
            &self.pools,
            &self.paytable,
            bet,
            &mut self.rng,
        )?;

        self.balance += cascade.total_win;
        self.total_won += cascade.total_win;

        Ok(SpinRecord {
            win: cascade.total_win,
            scatter_count,
            free_spins_awarded: awarded,
            cascades: cascade.steps,
        })
    }

    /// Credit the balance (UI deposits, simulator bankroll top-ups).
    pub fn deposit(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn free_spins_remaining(&self) -> u32 {
        self.free_spins
    }

    /// Highest per-cell multiplier currently on the board.
    pub fn max_multiplier(&self) -> u32 {
        self.multipliers.iter().copied().max().unwrap_or(1)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            balance: self.balance,
            free_spins_remaining: self.free_spins,
            max_multiplier: self.max_multiplier(),
            spins_played: self.spins_played,
            total_wagered: self.total_wagered,
            total_won: self.total_won,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn multipliers(&self) -> &[u32] {
        &self.multipliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_rejected_before_mutation() {
        let mut session = SlotSession::with_seed(1);
        session.balance = 0.5;
        let before_spins = session.spins_played;
        let err = session.spin_core(1.0).unwrap_err();
        match err {
            SpinError::InsufficientBalance { bet, balance } => {
                assert_eq!(bet, 1.0);
                assert_eq!(balance, 0.5);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.balance, 0.5);
        assert_eq!(session.spins_played, before_spins);
        assert_eq!(session.free_spins_remaining(), 0);
    }

    #[test]
    fn spin_settles_balance_to_bet_and_win() {
        let mut session = SlotSession::with_seed(2);
        let start = session.balance;
        let outcome = session.spin_core(1.0).unwrap();
        // One paid bet, all wins credited (free spins cost nothing).
        let expected = start - 1.0 + outcome.total_win;
        assert!((session.balance - expected).abs() < 1e-9);
        assert_eq!(outcome.balance, session.balance);
    }

    #[test]
    fn free_spin_queue_fully_drained() {
        // Regardless of seed, after a paid spin returns the queue is empty.
        for seed in 0..50 {
            let mut session = SlotSession::with_seed(seed);
            session.deposit(10_000.0);
            for _ in 0..20 {
                let outcome = session.spin_core(1.0).unwrap();
                assert_eq!(session.free_spins_remaining(), 0);
                if outcome.triggered_bonus() {
                    assert!(
                        outcome.bonus_spins.len() as u32 >= outcome.base.free_spins_awarded
                    );
                }
            }
        }
    }

    #[test]
    fn multipliers_reset_only_on_fresh_paid_spin() {
        let mut session = SlotSession::with_seed(3);
        session.deposit(10_000.0);
        // Plant a stale multiplier; the queue is empty, so the next paid
        // spin must reset it before the reveal. Afterwards each cell's
        // multiplier is exactly 1 + its detonation count within the spin.
        assert_eq!(session.free_spins_remaining(), 0);
        session.multipliers[0] = 9;
        let outcome = session.spin_core(1.0).unwrap();

        let mut detonations = 0u32;
        let records = std::iter::once(&outcome.base).chain(outcome.bonus_spins.iter());
        for record in records {
            for step in &record.cascades {
                detonations += step
                    .detonated
                    .iter()
                    .filter(|p| p.row == 0 && p.col == 0)
                    .count() as u32;
            }
        }
        assert_eq!(session.multipliers[0], 1 + detonations);
    }

    #[test]
    fn deterministic_given_seed() {
        let mut a = SlotSession::with_seed(42);
        let mut b = SlotSession::with_seed(42);
        a.deposit(100_000.0);
        b.deposit(100_000.0);
        for _ in 0..200 {
            let oa = a.spin_core(1.0).unwrap();
            let ob = b.spin_core(1.0).unwrap();
            assert_eq!(oa.total_win.to_bits(), ob.total_win.to_bits());
            assert_eq!(oa.scatter_count(), ob.scatter_count());
        }
        assert_eq!(a.balance.to_bits(), b.balance.to_bits());
    }
}
