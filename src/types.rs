// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Board geometry ──────────────────────────────────────────────────────────

pub const GRID_ROWS: usize = 7;
pub const GRID_COLS: usize = 7;
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

/// Global paytable calibration factor, applied exactly once when the
/// [`Paytable`](crate::paytable::Paytable) is built. Kept as a named constant
/// rather than folded into the base pay values.
pub const PAYTABLE_SCALE: f64 = 1.53;

/// Hard ceiling on cascade iterations within a single spin. The board
/// composition makes long chains astronomically unlikely; exceeding this
/// is an internal-consistency fault, not a payable outcome.
pub const MAX_CASCADES: usize = 256;

/// Session starting balance in currency units.
pub const STARTING_BALANCE: f64 = 1000.0;

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// The nine board symbols. Scatter triggers free spins and never pays
/// through clusters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    Strawberry = 0,
    Watermelon = 1,
    Grapes = 2,
    Orange = 3,
    Candy = 4,
    Lollipop = 5,
    Star = 6,
    Gem = 7,
    Scatter = 8,
}

impl Symbol {
    pub const ALL: [Symbol; 9] = [
        Self::Strawberry,
        Self::Watermelon,
        Self::Grapes,
        Self::Orange,
        Self::Candy,
        Self::Lollipop,
        Self::Star,
        Self::Gem,
        Self::Scatter,
    ];

    /// Static sampling weight. Scatter weight is deliberately low (1, was 6
    /// in an earlier tuning pass) to hit the target bonus frequency.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Strawberry => 18,
            Self::Watermelon => 16,
            Self::Grapes => 15,
            Self::Orange => 14,
            Self::Candy => 12,
            Self::Lollipop => 10,
            Self::Star => 8,
            Self::Gem => 4,
            Self::Scatter => 1,
        }
    }

    pub fn is_scatter(&self) -> bool {
        matches!(self, Self::Scatter)
    }

    /// Unscaled base pay per cell for a cluster in the given bracket.
    /// Scatter has no paytable entry.
    pub fn base_pay(&self, bracket: PayBracket) -> f64 {
        use PayBracket::*;
        match self {
            Self::Strawberry => match bracket {
                Five => 0.25,
                Eight => 0.6,
                Eleven => 1.2,
                Fifteen => 3.0,
            },
            Self::Watermelon => match bracket {
                Five => 0.20,
                Eight => 0.5,
                Eleven => 1.0,
                Fifteen => 2.5,
            },
            Self::Grapes => match bracket {
                Five => 0.16,
                Eight => 0.4,
                Eleven => 0.8,
                Fifteen => 2.0,
            },
            Self::Orange => match bracket {
                Five => 0.15,
                Eight => 0.35,
                Eleven => 0.7,
                Fifteen => 1.8,
            },
            Self::Candy => match bracket {
                Five => 0.12,
                Eight => 0.3,
                Eleven => 0.6,
                Fifteen => 1.6,
            },
            Self::Lollipop => match bracket {
                Five => 0.10,
                Eight => 0.25,
                Eleven => 0.5,
                Fifteen => 1.4,
            },
            Self::Star => match bracket {
                Five => 0.08,
                Eight => 0.2,
                Eleven => 0.4,
                Fifteen => 1.2,
            },
            Self::Gem => match bracket {
                Five => 0.30,
                Eight => 0.8,
                Eleven => 1.6,
                Fifteen => 4.0,
            },
            Self::Scatter => 0.0,
        }
    }

    /// Display glyph used by the rendering layer.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Strawberry => "🍓",
            Self::Watermelon => "🍉",
            Self::Grapes => "🍇",
            Self::Orange => "🍊",
            Self::Candy => "🍬",
            Self::Lollipop => "🍭",
            Self::Star => "⭐",
            Self::Gem => "💎",
            Self::Scatter => "🎁",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

// ─── Pay Bracket ─────────────────────────────────────────────────────────────

/// Cluster-size payout tier. The bracket is the largest threshold in
/// {5, 8, 11, 15} not exceeding the cluster size; sizes below 5 pay nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PayBracket {
    Five = 0,
    Eight = 1,
    Eleven = 2,
    Fifteen = 3,
}

impl PayBracket {
    pub const ALL: [PayBracket; 4] = [Self::Five, Self::Eight, Self::Eleven, Self::Fifteen];

    pub fn from_cluster_size(size: usize) -> Option<Self> {
        if size >= 15 {
            Some(Self::Fifteen)
        } else if size >= 11 {
            Some(Self::Eleven)
        } else if size >= 8 {
            Some(Self::Eight)
        } else if size >= 5 {
            Some(Self::Five)
        } else {
            None
        }
    }

    /// Threshold value of this bracket (5, 8, 11 or 15).
    pub fn threshold(&self) -> usize {
        match self {
            Self::Five => 5,
            Self::Eight => 8,
            Self::Eleven => 11,
            Self::Fifteen => 15,
        }
    }
}

// ─── Free-spin award table ───────────────────────────────────────────────────

/// Free spins awarded for a scatter count in the freshly generated grid.
/// 0–2 scatters award nothing; 7 or more cap at 25.
pub fn free_spin_award(scatter_count: u32) -> u32 {
    match scatter_count {
        0..=2 => 0,
        3 => 10,
        4 => 12,
        5 => 15,
        6 => 20,
        _ => 25,
    }
}

// ─── Cell position ───────────────────────────────────────────────────────────

/// A board coordinate; row 0 is the top row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// ─── Outcome records ─────────────────────────────────────────────────────────

/// One paying cluster within a cascade step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterPay {
    pub symbol: Symbol,
    pub size: usize,
    pub win: f64,
    pub cells: Vec<CellPos>,
}

/// One detect-evaluate-detonate-refill iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeStep {
    pub step: usize,
    pub step_win: f64,
    pub cumulative_win: f64,
    pub cluster_pays: Vec<ClusterPay>,
    pub detonated: Vec<CellPos>,
}

/// Result of a single board reveal plus its full cascade resolution
/// (one base spin or one free spin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinRecord {
    pub win: f64,
    pub scatter_count: u32,
    pub free_spins_awarded: u32,
    pub cascades: Vec<CascadeStep>,
}

/// Outcome of one paid spin including any free-spin chain it triggered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub base: SpinRecord,
    pub bonus_spins: Vec<SpinRecord>,
    pub total_win: f64,
    pub bonus_win: f64,
    pub balance: f64,
}

impl SpinOutcome {
    /// Scatter count observed on the triggering (base) reveal.
    pub fn scatter_count(&self) -> u32 {
        self.base.scatter_count
    }

    pub fn triggered_bonus(&self) -> bool {
        self.base.free_spins_awarded > 0
    }
}

// ─── Session stats snapshot (rendering layer) ────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub balance: f64,
    pub free_spins_remaining: u32,
    pub max_multiplier: u32,
    pub spins_played: u64,
    pub total_wagered: f64,
    pub total_won: f64,
}
