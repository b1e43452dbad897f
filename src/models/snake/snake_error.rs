use std::fmt;

use super::snake_position::Position;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize { rows: usize, cols: usize },
    InvalidStart(String),
    OutsideBoard(Position),
    CellNotEmpty(Position),
    FoodAlreadyPlaced(Position),
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidBoardSize { rows, cols } => {
                write!(f, "board must be at least 5x5, got {rows}x{cols}")
            }
            SnakeError::InvalidStart(reason) => write!(f, "invalid snake start: {reason}"),
            SnakeError::OutsideBoard(pos) => write!(f, "{pos} is not inside the walls"),
            SnakeError::CellNotEmpty(pos) => write!(f, "cell {pos} is not empty"),
            SnakeError::FoodAlreadyPlaced(pos) => write!(f, "food already placed at {pos}"),
        }
    }
}

impl std::error::Error for SnakeError {}
