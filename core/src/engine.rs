use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a single game, `Won` and `Lost` are terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Active,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Rules engine for one board: reveal, cascade, flags and win/loss detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: Grid,
    mine_locations: MineLocations,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
    phase: Phase,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    /// Creates the grid, plants mines and computes neighbor counts, in that order.
    pub fn generate(config: GameConfig, placer: &mut impl MinePlacer) -> Self {
        let mut grid = Grid::create(config.size());
        let mine_locations = placer.place(&mut grid, config.mines());
        compute_neighbor_counts(&mut grid, &mine_locations);
        Self::new(grid, mine_locations)
    }

    /// Wraps an already prepared grid, neighbor counts must be in place.
    pub fn new(grid: Grid, mine_locations: MineLocations) -> Self {
        Self {
            grid,
            mine_locations,
            revealed_safe_count: 0,
            flagged_count: 0,
            phase: Phase::Active,
            triggered_mine: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mine_locations(&self) -> &MineLocations {
        &self.mine_locations
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Number of safe reveals needed to clear the board.
    pub fn safe_cells(&self) -> CellCount {
        self.grid.total_cells() - self.mine_locations.len() as CellCount
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_locations.len() as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Player-visible view of a cell, `None` when off the board.
    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.grid.get(coords).ok().map(CellView::from_cell)
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.phase.is_active() {
            log::trace!("Ignoring reveal at {:?}, game already ended", coords);
            return RevealOutcome::Continue;
        }

        let Ok(cell) = self.grid.get(coords) else {
            log::trace!("Ignoring reveal at {:?}, out of bounds", coords);
            return RevealOutcome::Continue;
        };

        // flags lock the cell against reveal
        if !cell.is_hidden() {
            return RevealOutcome::Continue;
        }

        if cell.is_mine() {
            self.grid.cell_mut(coords).is_revealed = true;
            self.triggered_mine = Some(coords);
            self.reveal_mines();
            self.phase = Phase::Lost;
            log::debug!("Hit mine at {:?}", coords);
            return RevealOutcome::MineHit;
        }

        self.flood_reveal(coords);

        if self.revealed_safe_count == self.safe_cells() {
            self.phase = Phase::Won;
            log::debug!("Board cleared");
            RevealOutcome::Cleared
        } else {
            RevealOutcome::Continue
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.phase.is_active() {
            log::trace!("Ignoring flag at {:?}, game already ended", coords);
            return FlagOutcome::NoChange;
        }

        if !self.grid.is_valid_coordinate(coords) {
            log::trace!("Ignoring flag at {:?}, out of bounds", coords);
            return FlagOutcome::NoChange;
        }

        let cell = self.grid.cell_mut(coords);
        if cell.is_revealed {
            return FlagOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        FlagOutcome::Changed
    }

    /// Opens `start` and, through zero-count cells, its whole connected region.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = Vec::from([start]);

        while let Some(visit_coords) = to_visit.pop() {
            let cell = self.grid.cell_mut(visit_coords);
            if !cell.is_hidden() || cell.is_mine {
                continue;
            }

            cell.is_revealed = true;
            self.revealed_safe_count += 1;
            let count = cell.neighbor_mine_count;
            log::trace!("Revealed {:?}, neighbor mines: {}", visit_coords, count);

            if count == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    grid.iter_neighbors(visit_coords)
                        .filter(|&pos| grid[pos].is_hidden() && !grid[pos].is_mine()),
                );
            }
        }
    }

    fn reveal_mines(&mut self) {
        for coords in self.mine_locations.iter() {
            self.grid.cell_mut(coords).is_revealed = true;
        }
    }
}
