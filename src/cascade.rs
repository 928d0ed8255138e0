// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Cascade Engine

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cluster::find_clusters;
use crate::grid::Grid;
use crate::paytable::{evaluate_clusters, Paytable};
use crate::pool::SymbolPools;
use crate::types::{CascadeStep, GRID_COLS, MAX_CASCADES};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Raised only when the cascade loop fails to terminate within
/// [`MAX_CASCADES`] iterations. The detect→detonate→refill cycle always
/// settles within a handful of passes on a 7×7 board; hitting the ceiling
/// means the engine state is inconsistent, not that the player won big.
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    #[error("cascade exceeded {max} iterations (accumulated win: {accumulated})")]
    Overflow { max: usize, accumulated: f64 },
}

// ─── Cascade loop ────────────────────────────────────────────────────────────

/// Accumulated result of one spin's full cascade resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub total_win: f64,
    pub steps: Vec<CascadeStep>,
}

/// Run the tumble loop to quiescence: detect clusters, evaluate, and while
/// anything pays, bump the multiplier of every detonated cell (before
/// removal), remove, collapse, refill from the restricted pool, and go
/// again. The multiplier grid is per-position and is deliberately NOT
/// shifted by the column collapse.
pub fn run_cascade<R: Rng>(
    grid: &mut Grid,
    multipliers: &mut [u32],
    pools: &SymbolPools,
    paytable: &Paytable,
    bet: f64,
    rng: &mut R,
) -> Result<CascadeOutcome, CascadeError> {
    let mut total_win = 0.0;
    let mut steps = Vec::new();

    for step in 0..MAX_CASCADES {
        let clusters = find_clusters(grid);
        let eval = evaluate_clusters(paytable, &clusters, multipliers, bet, GRID_COLS);

        if eval.total_win <= 0.0 {
            return Ok(CascadeOutcome { total_win, steps });
        }

        for pos in &eval.detonated {
            multipliers[pos.row * GRID_COLS + pos.col] += 1;
        }
        total_win += eval.total_win;

        steps.push(CascadeStep {
            step,
            step_win: eval.total_win,
            cumulative_win: total_win,
            cluster_pays: eval.cluster_pays,
            detonated: eval.detonated.clone(),
        });

        grid.apply_detonations(&eval.detonated, pools, rng);
    }

    Err(CascadeError::Overflow {
        max: MAX_CASCADES,
        accumulated: total_win,
    })
}
