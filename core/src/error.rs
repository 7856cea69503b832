use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Field must have at least one row and one column")]
    EmptyField,
    #[error("Field must have at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
