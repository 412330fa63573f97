use rand::{SeedableRng, rngs::SmallRng};

use super::*;

/// Purely random placement backed by a seedable fast RNG.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(&mut self, grid: &mut Grid, count: CellCount) -> MineLocations {
        plant_mines(grid, count, &mut self.rng)
    }
}
