// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Symbol Pools

use rand::Rng;

use crate::types::Symbol;

// ─── SymbolPools ─────────────────────────────────────────────────────────────

/// Flat weighted sampling pools, built once at session init and treated as
/// immutable afterwards.
///
/// Each symbol appears `weight()` times, so a uniform index draw over the
/// pool samples symbols in proportion to their weights. `full` contains
/// every symbol including scatter and backs the visible spin reveal;
/// `restricted` excludes scatter and backs every refill during cascades,
/// scatter replacement, and the initial board fill.
#[derive(Debug, Clone)]
pub struct SymbolPools {
    full: Vec<Symbol>,
    restricted: Vec<Symbol>,
}

impl SymbolPools {
    pub fn build() -> Self {
        let mut full = Vec::new();
        let mut restricted = Vec::new();
        for sym in Symbol::ALL {
            for _ in 0..sym.weight() {
                full.push(sym);
                if !sym.is_scatter() {
                    restricted.push(sym);
                }
            }
        }
        // Zero-weight fallback: one copy of each non-scatter symbol. Cannot
        // happen with the current weight table but keeps refills total.
        if restricted.is_empty() {
            restricted = Symbol::ALL
                .into_iter()
                .filter(|s| !s.is_scatter())
                .collect();
        }
        Self { full, restricted }
    }

    /// Uniform draw over the full pool; may yield scatter.
    pub fn draw_any<R: Rng>(&self, rng: &mut R) -> Symbol {
        self.full[rng.gen_range(0..self.full.len())]
    }

    /// Uniform draw over the restricted pool; never yields scatter.
    pub fn draw_standard<R: Rng>(&self, rng: &mut R) -> Symbol {
        self.restricted[rng.gen_range(0..self.restricted.len())]
    }

    pub fn full_len(&self) -> usize {
        self.full.len()
    }

    pub fn restricted_len(&self) -> usize {
        self.restricted.len()
    }
}

impl Default for SymbolPools {
    fn default() -> Self {
        Self::build()
    }
}
