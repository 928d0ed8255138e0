// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Board Grid

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pool::SymbolPools;
use crate::types::{CellPos, Symbol, GRID_CELLS, GRID_COLS, GRID_ROWS};

// ─── Grid ────────────────────────────────────────────────────────────────────

/// The 7×7 board, row-major, row 0 on top. Cells are only transiently empty
/// while a detonation is being applied; every public operation leaves the
/// board fully populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Option<Symbol>>,
}

impl Grid {
    /// Empty board. Callers fill it before cluster evaluation.
    pub fn empty() -> Self {
        Self {
            cells: vec![None; GRID_CELLS],
        }
    }

    /// Initial board fill from the restricted pool, so a freshly opened
    /// session never shows scatters before the first spin.
    pub fn filled<R: Rng>(pools: &SymbolPools, rng: &mut R) -> Self {
        let mut grid = Self::empty();
        for cell in grid.cells.iter_mut() {
            *cell = Some(pools.draw_standard(rng));
        }
        grid
    }

    #[inline]
    fn idx(row: usize, col: usize) -> usize {
        debug_assert!(row < GRID_ROWS && col < GRID_COLS);
        row * GRID_COLS + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        self.cells[Self::idx(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, sym: Symbol) {
        self.cells[Self::idx(row, col)] = Some(sym);
    }

    /// Reveal a fresh spin result: every cell is an independent uniform draw
    /// over the full pool, so scatters may land.
    pub fn reveal<R: Rng>(&mut self, pools: &SymbolPools, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = Some(pools.draw_any(rng));
        }
    }

    pub fn count_scatters(&self) -> u32 {
        self.cells
            .iter()
            .filter(|c| matches!(c, Some(s) if s.is_scatter()))
            .count() as u32
    }

    /// Replace every scatter in place with a restricted draw. Runs exactly
    /// once per spin, between the free-spin award and the first cascade pass;
    /// scatters never survive into cluster detection.
    pub fn replace_scatters<R: Rng>(&mut self, pools: &SymbolPools, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            if matches!(cell, Some(s) if s.is_scatter()) {
                *cell = Some(pools.draw_standard(rng));
            }
        }
    }

    /// Remove the detonated cells, collapse each column downward preserving
    /// the relative order of survivors, and refill the vacated top cells from
    /// the restricted pool.
    pub fn apply_detonations<R: Rng>(
        &mut self,
        detonated: &[CellPos],
        pools: &SymbolPools,
        rng: &mut R,
    ) {
        let mut remove = [false; GRID_CELLS];
        for pos in detonated {
            remove[Self::idx(pos.row, pos.col)] = true;
        }

        for col in 0..GRID_COLS {
            // Survivors, collected bottom to top.
            let mut column: Vec<Option<Symbol>> = Vec::with_capacity(GRID_ROWS);
            for row in (0..GRID_ROWS).rev() {
                if !remove[Self::idx(row, col)] {
                    column.push(self.cells[Self::idx(row, col)]);
                }
            }
            while column.len() < GRID_ROWS {
                column.push(Some(pools.draw_standard(rng)));
            }
            // Write back bottom to top.
            for (i, sym) in column.into_iter().enumerate() {
                self.cells[Self::idx(GRID_ROWS - 1 - i, col)] = sym;
            }
        }
    }

    /// Row-major cell iterator with coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellPos, Option<Symbol>)> + '_ {
        self.cells.iter().enumerate().map(|(i, &sym)| {
            (CellPos::new(i / GRID_COLS, i % GRID_COLS), sym)
        })
    }
}
