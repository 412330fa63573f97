use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a presentation layer may know about a cell.
///
/// Mine and count information is only exposed for revealed cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    /// Revealed with no adjacent mines.
    Empty,
    Number(u8),
    Mine,
}

impl CellView {
    pub fn from_cell(cell: &Cell) -> Self {
        match (cell.is_revealed(), cell.is_flagged()) {
            (true, _) if cell.is_mine() => Self::Mine,
            (true, _) if cell.neighbor_mine_count() == 0 => Self::Empty,
            (true, _) => Self::Number(cell.neighbor_mine_count()),
            (false, true) => Self::Flagged,
            (false, false) => Self::Hidden,
        }
    }
}

/// Aggregate counters of a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub revealed_safe_count: CellCount,
    pub flagged_count: CellCount,
    pub elapsed_seconds: u32,
    pub phase: Phase,
}

/// Read-only copy of everything needed to render a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord,
    pub mine_count: CellCount,
    pub cells: Array2<CellView>,
    pub state: SessionState,
}

impl Snapshot {
    pub fn from_engine(engine: &PlayEngine, elapsed_seconds: u32) -> Self {
        let grid = engine.grid();
        let side = grid.size() as usize;
        let mut cells = Array2::from_elem((side, side), CellView::Hidden);
        for (coords, cell) in grid.indexed_iter() {
            cells[coords.to_nd_index()] = CellView::from_cell(cell);
        }

        Self {
            size: grid.size(),
            mine_count: engine.mine_locations().len() as CellCount,
            cells,
            state: SessionState {
                revealed_safe_count: engine.revealed_safe_count(),
                flagged_count: engine.flagged_count(),
                elapsed_seconds,
                phase: engine.phase(),
            },
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }

    /// Rows top to bottom, each left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(is_mine: bool, is_revealed: bool, is_flagged: bool, count: u8) -> Cell {
        Cell {
            is_mine,
            is_revealed,
            is_flagged,
            neighbor_mine_count: count,
        }
    }

    #[test]
    fn hidden_cells_leak_nothing() {
        assert_eq!(CellView::from_cell(&cell(true, false, false, 0)), CellView::Hidden);
        assert_eq!(CellView::from_cell(&cell(false, false, false, 3)), CellView::Hidden);
        assert_eq!(CellView::from_cell(&cell(true, false, true, 0)), CellView::Flagged);
    }

    #[test]
    fn revealed_cells_show_content() {
        assert_eq!(CellView::from_cell(&cell(true, true, true, 2)), CellView::Mine);
        assert_eq!(CellView::from_cell(&cell(false, true, false, 0)), CellView::Empty);
        assert_eq!(CellView::from_cell(&cell(false, true, false, 4)), CellView::Number(4));
    }

    #[test]
    fn snapshot_mirrors_engine() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut engine = PlayEngine::generate(config, &mut FixedPlacer::new([(0, 0)]));
        engine.toggle_flag((0, 0));
        engine.reveal((2, 2));

        let snapshot = Snapshot::from_engine(&engine, 12);

        assert_eq!(snapshot.size, 3);
        assert_eq!(snapshot.mine_count, 1);
        assert_eq!(snapshot.cell((0, 0)), Some(CellView::Flagged));
        assert_eq!(snapshot.cell((1, 1)), Some(CellView::Number(1)));
        assert_eq!(snapshot.cell((2, 2)), Some(CellView::Empty));
        assert_eq!(snapshot.cell((3, 0)), None);
        assert_eq!(snapshot.state.flagged_count, 1);
        assert_eq!(snapshot.state.revealed_safe_count, 8);
        assert_eq!(snapshot.state.elapsed_seconds, 12);
        assert_eq!(snapshot.state.phase, Phase::Won);
        assert_eq!(snapshot.rows().count(), 3);
    }
}
