use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// State of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbor_mine_count: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn neighbor_mine_count(&self) -> u8 {
        self.neighbor_mine_count
    }

    /// Hidden and not flagged, the only state reveal acts on.
    pub const fn is_hidden(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

/// Partial update applied by [`Grid::set`], `None` fields are left alone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellPatch {
    pub is_mine: Option<bool>,
    pub is_revealed: Option<bool>,
    pub is_flagged: Option<bool>,
    pub neighbor_mine_count: Option<u8>,
}

impl CellPatch {
    pub const fn mine() -> Self {
        Self {
            is_mine: Some(true),
            is_revealed: None,
            is_flagged: None,
            neighbor_mine_count: None,
        }
    }

    pub const fn revealed() -> Self {
        Self {
            is_mine: None,
            is_revealed: Some(true),
            is_flagged: None,
            neighbor_mine_count: None,
        }
    }

    pub const fn flagged(flagged: bool) -> Self {
        Self {
            is_mine: None,
            is_revealed: None,
            is_flagged: Some(flagged),
            neighbor_mine_count: None,
        }
    }

    pub const fn neighbor_mine_count(count: u8) -> Self {
        Self {
            is_mine: None,
            is_revealed: None,
            is_flagged: None,
            neighbor_mine_count: Some(count),
        }
    }

    fn apply(self, cell: &mut Cell) {
        if let Some(is_mine) = self.is_mine {
            cell.is_mine = is_mine;
        }
        if let Some(is_revealed) = self.is_revealed {
            cell.is_revealed = is_revealed;
        }
        if let Some(is_flagged) = self.is_flagged {
            cell.is_flagged = is_flagged;
        }
        if let Some(count) = self.neighbor_mine_count {
            cell.neighbor_mine_count = count;
        }
    }
}

/// Fixed-size square board of [`Cell`]s indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    size: Coord,
}

impl Grid {
    /// Board with every cell in the default hidden, mine-free state.
    ///
    /// `size` is clamped to `0..=MAX_SIZE` so the cell count fits [`CellCount`].
    pub fn create(size: Coord) -> Self {
        let size = size.clamp(0, MAX_SIZE);
        let side = size as usize;
        Self {
            cells: Array2::default((side, side)),
            size,
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub fn is_valid_coordinate(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_valid_coordinate(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn set(&mut self, coords: Coord2, patch: CellPatch) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        patch.apply(&mut self.cells[coords.to_nd_index()]);
        Ok(())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// All cells in row-major order together with their coordinates.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|&cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Panics on invalid coordinates, use [`Grid::get`] for checked access.
impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_yields_default_cells() {
        let grid = Grid::create(4);

        assert_eq!(grid.size(), 4);
        assert_eq!(grid.total_cells(), 16);
        assert!(grid.indexed_iter().all(|(_, cell)| *cell == Cell::default()));
        assert_eq!(grid.indexed_iter().count(), 16);
    }

    #[test]
    fn get_and_set_reject_out_of_bounds() {
        let mut grid = Grid::create(3);

        assert_eq!(grid.get((-1, 0)), Err(GameError::OutOfBounds));
        assert_eq!(grid.get((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(grid.set((3, 3), CellPatch::mine()), Err(GameError::OutOfBounds));
        assert_eq!(grid.count_where(Cell::is_mine), 0);
    }

    #[test]
    fn set_applies_only_given_fields() {
        let mut grid = Grid::create(3);

        grid.set((1, 2), CellPatch::mine()).unwrap();
        grid.set((1, 2), CellPatch::flagged(true)).unwrap();

        let cell = grid.get((1, 2)).unwrap();
        assert!(cell.is_mine());
        assert!(cell.is_flagged());
        assert!(!cell.is_revealed());
        assert_eq!(cell.neighbor_mine_count(), 0);
        assert_eq!(grid[(0, 0)], Cell::default());
    }

    #[test]
    fn create_clamps_oversized_boards() {
        let grid = Grid::create(1000);

        assert_eq!(grid.size(), MAX_SIZE);
        assert_eq!(grid.total_cells(), 65025);
        assert_eq!(Grid::create(-3).total_cells(), 0);
    }

    #[test]
    fn indexed_iter_is_row_major() {
        let grid = Grid::create(2);
        let coords: alloc::vec::Vec<_> = grid.indexed_iter().map(|(pos, _)| pos).collect();

        assert_eq!(coords, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
