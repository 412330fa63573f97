use alloc::vec::Vec;

use super::*;

/// Plants a predetermined layout, used for scripted boards.
///
/// The same coordinates are planted on every new game. Off-board and duplicate
/// entries are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, grid: &mut Grid, count: CellCount) -> MineLocations {
        let mut mines = MineLocations::new();
        for &coords in &self.mines {
            if grid.set(coords, CellPatch::mine()).is_ok() {
                mines.insert(coords);
            } else {
                log::warn!("Skipping off-board mine at {:?}", coords);
            }
        }

        if mines.len() != usize::from(count) {
            log::warn!(
                "Fixed layout mine count mismatch, actual: {}, requested: {}",
                mines.len(),
                count
            );
        }
        mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_duplicates_and_off_board_entries() {
        let mut grid = Grid::create(3);
        let mut placer = FixedPlacer::new([(0, 0), (0, 0), (5, 1), (2, 2)]);

        let mines = placer.place(&mut grid, 2);

        assert_eq!(mines.len(), 2);
        assert!(mines.contains((0, 0)));
        assert!(mines.contains((2, 2)));
        assert_eq!(grid.count_where(Cell::is_mine), 2);
    }
}
