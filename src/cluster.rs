// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Cluster Slot Engine ("Sugar Rush") - Cluster Detection

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{CellPos, Symbol, GRID_CELLS, GRID_COLS, GRID_ROWS};

// ─── Cluster ─────────────────────────────────────────────────────────────────

/// A maximal 4-directionally-connected group of identical symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub symbol: Symbol,
    pub cells: Vec<CellPos>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

// ─── Detection ───────────────────────────────────────────────────────────────

/// Full-grid connected-components scan. Up/down/left/right adjacency,
/// exact symbol equality. Every populated cell lands in exactly one
/// cluster (size-1 clusters included); empty cells are skipped but marked
/// visited. Output order follows the row-major position of each cluster's
/// first-scanned cell, so it is stable for a given grid.
pub fn find_clusters(grid: &Grid) -> Vec<Cluster> {
    let mut visited = [false; GRID_CELLS];
    let mut clusters = Vec::new();

    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let idx = row * GRID_COLS + col;
            if visited[idx] {
                continue;
            }
            let sym = match grid.get(row, col) {
                Some(s) => s,
                None => {
                    visited[idx] = true;
                    continue;
                }
            };

            // BFS flood fill from (row, col).
            visited[idx] = true;
            let mut cells = vec![CellPos::new(row, col)];
            let mut queue = std::collections::VecDeque::new();
            queue.push_back(CellPos::new(row, col));

            while let Some(cur) = queue.pop_front() {
                for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                    let nr = cur.row as i64 + dr;
                    let nc = cur.col as i64 + dc;
                    if nr < 0 || nr >= GRID_ROWS as i64 || nc < 0 || nc >= GRID_COLS as i64 {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    let nidx = nr * GRID_COLS + nc;
                    if visited[nidx] {
                        continue;
                    }
                    if grid.get(nr, nc) == Some(sym) {
                        visited[nidx] = true;
                        let pos = CellPos::new(nr, nc);
                        queue.push_back(pos);
                        cells.push(pos);
                    }
                }
            }

            clusters.push(Cluster { symbol: sym, cells });
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::SymbolPools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn grid_from_rows(rows: [[Symbol; GRID_COLS]; GRID_ROWS]) -> Grid {
        let mut g = Grid::empty();
        for (r, row) in rows.iter().enumerate() {
            for (c, &sym) in row.iter().enumerate() {
                g.set(r, c, sym);
            }
        }
        g
    }

    #[test]
    fn clusters_partition_the_grid() {
        let pools = SymbolPools::build();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let grid = Grid::filled(&pools, &mut rng);
            let clusters = find_clusters(&grid);
            let mut seen = HashSet::new();
            let mut total = 0usize;
            for cl in &clusters {
                for pos in &cl.cells {
                    assert!(seen.insert(*pos), "cell {:?} in two clusters", pos);
                    assert_eq!(grid.get(pos.row, pos.col), Some(cl.symbol));
                }
                total += cl.size();
            }
            assert_eq!(total, GRID_CELLS);
        }
    }

    #[test]
    fn diagonals_do_not_connect() {
        use Symbol::*;
        let mut rows = [[Candy; GRID_COLS]; GRID_ROWS];
        // Two diagonal Gems in a Candy sea.
        rows[0][0] = Gem;
        rows[1][1] = Gem;
        let grid = grid_from_rows(rows);
        let clusters = find_clusters(&grid);
        let gem_clusters: Vec<&Cluster> = clusters.iter().filter(|c| c.symbol == Gem).collect();
        assert_eq!(gem_clusters.len(), 2);
        assert!(gem_clusters.iter().all(|c| c.size() == 1));
    }

    #[test]
    fn scan_order_is_row_major_and_stable() {
        let pools = SymbolPools::build();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let grid = Grid::filled(&pools, &mut rng);
        let a = find_clusters(&grid);
        let b = find_clusters(&grid);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.symbol, y.symbol);
            assert_eq!(x.cells, y.cells);
        }
        // First cluster always contains the top-left cell.
        assert!(a[0].cells.contains(&CellPos::new(0, 0)));
    }

    #[test]
    fn l_shaped_region_is_one_cluster() {
        use Symbol::*;
        let mut rows = [[Candy; GRID_COLS]; GRID_ROWS];
        // L of Strawberry: (0,0)-(3,0) plus (3,1)-(3,2).
        for r in 0..4 {
            rows[r][0] = Strawberry;
        }
        rows[3][1] = Strawberry;
        rows[3][2] = Strawberry;
        let grid = grid_from_rows(rows);
        let clusters = find_clusters(&grid);
        let straw: Vec<&Cluster> = clusters.iter().filter(|c| c.symbol == Strawberry).collect();
        assert_eq!(straw.len(), 1);
        assert_eq!(straw[0].size(), 6);
    }
}
