#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use neighbors::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod neighbors;
mod session;
mod snapshot;
mod types;

/// Largest supported board side, keeps the cell count within [`CellCount`].
pub const MAX_SIZE: Coord = 255;

/// Validated board size and mine count, only built through [`GameConfig::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord,
    mines: CellCount,
}

impl GameConfig {
    /// 15x15 board with 25 mines.
    pub const CLASSIC: Self = Self::new_unchecked(15, 25);

    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if !(1..=MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }
        if mines >= area(size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

/// Result of a reveal command.
///
/// `Continue` covers both a safe reveal that did not finish the board and a
/// command that changed nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Continue,
    MineHit,
    Cleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_config_is_valid() {
        assert_eq!(GameConfig::new(15, 25), Ok(GameConfig::CLASSIC));
        assert_eq!(GameConfig::default().safe_cells(), 200);
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert_eq!(GameConfig::new(3, 9), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(3, 8).map(|c| c.safe_cells()), Ok(1));
    }

    #[test]
    fn config_rejects_bad_sizes() {
        assert_eq!(GameConfig::new(0, 0), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(-4, 0), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(256, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(MAX_SIZE, 1).map(|c| c.size()), Ok(MAX_SIZE));
        assert_eq!(GameConfig::new(MAX_SIZE, 1).map(|c| c.total_cells()), Ok(65025));
    }
}
