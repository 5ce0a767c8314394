use ndarray::Array2;
use rand::prelude::*;

use crate::cell::Cell;
use crate::config::GameConfig;
use crate::types::{adjacent_coords, CellCount, Coord2, ToNdIndex};

/// Produces a fully initialized grid for one game: every cell hidden, mines
/// placed, and `adjacent_mines` filled in.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Array2<Cell>;
}

/// Uniform random placement from a seeded [`SmallRng`]: every set of
/// `config.mines` distinct positions is equally likely, and the same seed
/// reproduces the same board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Array2<Cell> {
        let mut grid: Array2<Cell> =
            Array2::default((config.rows as usize, config.cols as usize));

        let total = config.total_cells();
        if config.mines >= total {
            // Callers validate configs first; generate a full board anyway.
            log::warn!(
                "mine count {} leaves no safe cell among {} cells",
                config.mines,
                total
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut free: CellCount = total;
        let mut placed: CellCount = 0;
        while placed < config.mines && free > 0 {
            // Pick the n-th still-empty cell, counting in row-major order.
            let mut slot = rng.random_range(0..free);
            for cell in grid.iter_mut() {
                if cell.mine {
                    continue;
                }
                if slot == 0 {
                    cell.mine = true;
                    placed += 1;
                    free -= 1;
                    break;
                }
                slot -= 1;
            }
        }

        fill_adjacent_counts(&mut grid);
        grid
    }
}

/// Deterministic generator placing mines at fixed coordinates; used by tests
/// and ignores `config.mines` in favor of the given positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlantedBoardGenerator<'a> {
    mine_coords: &'a [Coord2],
}

impl<'a> PlantedBoardGenerator<'a> {
    pub const fn new(mine_coords: &'a [Coord2]) -> Self {
        Self { mine_coords }
    }
}

impl BoardGenerator for PlantedBoardGenerator<'_> {
    fn generate(self, config: GameConfig) -> Array2<Cell> {
        let mut grid: Array2<Cell> =
            Array2::default((config.rows as usize, config.cols as usize));

        for &coords in self.mine_coords {
            match grid.get_mut(coords.to_nd_index()) {
                Some(cell) => cell.mine = true,
                None => log::warn!("planted mine {:?} is out of bounds, skipped", coords),
            }
        }

        fill_adjacent_counts(&mut grid);
        grid
    }
}

/// Computes `adjacent_mines` for every cell over the up-to-8 neighbors
/// clipped at the grid edges.
pub(crate) fn fill_adjacent_counts(grid: &mut Array2<Cell>) {
    let dim = grid.dim();
    let bounds: Coord2 = (dim.0 as _, dim.1 as _);

    for row in 0..bounds.0 {
        for col in 0..bounds.1 {
            let count = adjacent_coords((row, col), bounds)
                .filter(|&pos| grid[pos.to_nd_index()].mine)
                .count() as u8;
            grid[(row, col).to_nd_index()].adjacent_mines = count;
        }
    }
}
