use alloc::collections::BTreeSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy used by a session to plant mines on a fresh grid.
pub trait MinePlacer {
    fn place(&mut self, grid: &mut Grid, count: CellCount) -> MineLocations;
}

/// Coordinates of every planted mine, derived from the grid's mine flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLocations(BTreeSet<Coord2>);

impl MineLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the cache from the grid, which stays the source of truth.
    pub fn from_grid(grid: &Grid) -> Self {
        grid.indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.0.contains(&coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn insert(&mut self, coords: Coord2) -> bool {
        self.0.insert(coords)
    }
}

impl FromIterator<Coord2> for MineLocations {
    fn from_iter<I: IntoIterator<Item = Coord2>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Samples uniformly random cells until `count` distinct mines are planted.
///
/// Already-mined picks are simply resampled. `count` must leave at least one
/// safe cell, which [`GameConfig::new`] guarantees; anything above the cell
/// total is clamped so the loop still terminates.
pub fn plant_mines<R: Rng + ?Sized>(
    grid: &mut Grid,
    count: CellCount,
    rng: &mut R,
) -> MineLocations {
    let total_cells = grid.total_cells();
    let count = if count > total_cells {
        log::warn!(
            "Requested {} mines but the board only fits {}, clamping",
            count,
            total_cells
        );
        total_cells
    } else {
        count
    };

    let size = grid.size();
    let mut mines = MineLocations::new();
    while mines.len() < usize::from(count) {
        let coords = (rng.random_range(0..size), rng.random_range(0..size));
        let cell = grid.cell_mut(coords);
        if !cell.is_mine {
            cell.is_mine = true;
            mines.insert(coords);
        }
    }

    log::debug!("Planted {} mines on a {}x{} board", mines.len(), size, size);
    mines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    #[test]
    fn plant_mines_places_exact_count() {
        for seed in 0..32 {
            let mut grid = Grid::create(15);
            let mut rng = SmallRng::seed_from_u64(seed);

            let mines = plant_mines(&mut grid, 25, &mut rng);

            assert_eq!(mines.len(), 25);
            assert_eq!(grid.count_where(Cell::is_mine), 25);
            assert_eq!(mines, MineLocations::from_grid(&grid));
        }
    }

    #[test]
    fn plant_mines_fills_all_but_one_cell() {
        let mut grid = Grid::create(3);
        let mut rng = SmallRng::seed_from_u64(7);

        let mines = plant_mines(&mut grid, 8, &mut rng);

        assert_eq!(mines.len(), 8);
        assert_eq!(grid.count_where(|cell| !cell.is_mine()), 1);
    }

    #[test]
    fn plant_mines_clamps_oversized_request() {
        let mut grid = Grid::create(2);
        let mut rng = SmallRng::seed_from_u64(1);

        let mines = plant_mines(&mut grid, 10, &mut rng);

        assert_eq!(mines.len(), 4);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut first = Grid::create(15);
        let mut second = Grid::create(15);

        let a = plant_mines(&mut first, 25, &mut SmallRng::seed_from_u64(42));
        let b = plant_mines(&mut second, 25, &mut SmallRng::seed_from_u64(42));

        assert_eq!(a, b);
        assert_eq!(first, second);
    }
}
