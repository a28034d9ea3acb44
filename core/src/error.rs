use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Mine count does not fit the board")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
