use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board size must be between 1 and 255")]
    InvalidSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
