// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Paytable & Cluster Evaluation

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::types::{CellPos, ClusterPay, PayBracket, Symbol, PAYTABLE_SCALE};

// ─── Paytable ────────────────────────────────────────────────────────────────

/// Per-symbol, per-bracket pay multipliers with the global calibration scale
/// already applied. Built once at session init; the scatter row is all zero.
/// Lookups for missing entries fall back to 0.0 rather than failing, so a
/// misconfigured symbol degrades to an unpaid cluster instead of aborting a
/// cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paytable {
    pays: [[f64; 4]; 9],
}

impl Paytable {
    pub fn new() -> Self {
        let mut pays = [[0.0; 4]; 9];
        for sym in Symbol::ALL {
            for bracket in PayBracket::ALL {
                pays[sym as usize][bracket as usize] = sym.base_pay(bracket) * PAYTABLE_SCALE;
            }
        }
        Self { pays }
    }

    /// Scaled pay multiplier for a symbol/bracket pair; 0.0 for scatter.
    pub fn pay(&self, symbol: Symbol, bracket: PayBracket) -> f64 {
        self.pays[symbol as usize][bracket as usize]
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// Result of evaluating one board state's clusters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub total_win: f64,
    pub cluster_pays: Vec<ClusterPay>,
    pub detonated: Vec<CellPos>,
}

/// Score every cluster against the paytable. A cluster pays when it reaches
/// a size bracket and its symbol is not scatter; its win is the sum of
/// per-cell contributions `bet × pay × multiplier[cell]` — the persistent
/// cell multiplier applies per cell, not once per cluster. Non-paying
/// clusters are left on the board.
pub fn evaluate_clusters(
    paytable: &Paytable,
    clusters: &[Cluster],
    multipliers: &[u32],
    bet: f64,
    cols: usize,
) -> Evaluation {
    let mut total_win = 0.0;
    let mut cluster_pays = Vec::new();
    let mut detonated = Vec::new();

    for cluster in clusters {
        let bracket = match PayBracket::from_cluster_size(cluster.size()) {
            Some(b) => b,
            None => continue,
        };
        if cluster.symbol.is_scatter() {
            continue;
        }
        let pay = paytable.pay(cluster.symbol, bracket);
        if pay <= 0.0 {
            continue;
        }

        let mut win = 0.0;
        for pos in &cluster.cells {
            let mult = multipliers[pos.row * cols + pos.col] as f64;
            win += bet * pay * mult;
        }
        total_win += win;
        cluster_pays.push(ClusterPay {
            symbol: cluster.symbol,
            size: cluster.size(),
            win,
            cells: cluster.cells.clone(),
        });
        detonated.extend_from_slice(&cluster.cells);
    }

    Evaluation {
        total_win,
        cluster_pays,
        detonated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GRID_CELLS, GRID_COLS};

    fn cluster_of(symbol: Symbol, cells: Vec<CellPos>) -> Cluster {
        Cluster { symbol, cells }
    }

    #[test]
    fn scale_is_applied_once() {
        let pt = Paytable::new();
        let expected = 0.25 * PAYTABLE_SCALE; // 0.3825
        assert!((pt.pay(Symbol::Strawberry, PayBracket::Five) - expected).abs() < 1e-12);
        assert!((pt.pay(Symbol::Gem, PayBracket::Fifteen) - 4.0 * PAYTABLE_SCALE).abs() < 1e-12);
    }

    #[test]
    fn scatter_row_is_zero() {
        let pt = Paytable::new();
        for bracket in PayBracket::ALL {
            assert_eq!(pt.pay(Symbol::Scatter, bracket), 0.0);
        }
    }

    #[test]
    fn undersized_and_scatter_clusters_pay_nothing() {
        let pt = Paytable::new();
        let mults = vec![1u32; GRID_CELLS];
        let clusters = vec![
            cluster_of(
                Symbol::Gem,
                (0..4).map(|c| CellPos::new(0, c)).collect(),
            ),
            cluster_of(
                Symbol::Scatter,
                (0..6).map(|c| CellPos::new(1, c)).collect(),
            ),
        ];
        let eval = evaluate_clusters(&pt, &clusters, &mults, 1.0, GRID_COLS);
        assert_eq!(eval.total_win, 0.0);
        assert!(eval.detonated.is_empty());
        assert!(eval.cluster_pays.is_empty());
    }

    #[test]
    fn multiplier_applies_per_cell() {
        let pt = Paytable::new();
        let mut mults = vec![1u32; GRID_CELLS];
        // Five strawberries in row 0; one cell carries a 3x multiplier.
        mults[2] = 3;
        let clusters = vec![cluster_of(
            Symbol::Strawberry,
            (0..5).map(|c| CellPos::new(0, c)).collect(),
        )];
        let eval = evaluate_clusters(&pt, &clusters, &mults, 2.0, GRID_COLS);
        let pay = 0.25 * PAYTABLE_SCALE;
        let expected = 2.0 * pay * (1.0 + 1.0 + 3.0 + 1.0 + 1.0);
        assert!((eval.total_win - expected).abs() < 1e-9);
        assert_eq!(eval.detonated.len(), 5);
        assert_eq!(eval.cluster_pays.len(), 1);
        assert_eq!(eval.cluster_pays[0].size, 5);
    }
}
