//! Board model: a rectangle of typed cells surrounded by a ring of walls.
use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use super::{
    snake_error::{Result, SnakeError},
    snake_position::{Direction, Position},
};

/// Smallest allowed number of rows or columns, walls included.
pub const MIN_BOARD_SIZE: usize = 5;

/// Type of a single cell on the board.
///
/// Every variant occupied by the snake compares greater than [`CellType::Food`],
/// so "is this snake" is a single comparison (see [`CellType::is_snake`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CellType {
    Empty = 0,
    Wall = 1,
    Food = 2,
    HeadLeft = 100,
    HeadUp = 101,
    HeadRight = 102,
    HeadDown = 103,
    /// Body segment joining the left and upper neighbours.
    BodyLeftUp = 104,
    BodyUpRight = 105,
    BodyRightDown = 106,
    BodyDownLeft = 107,
    BodyHorizontal = 108,
    BodyVertical = 109,
}

impl CellType {
    #[must_use]
    pub fn is_snake(self) -> bool {
        self >= CellType::HeadLeft
    }

    #[must_use]
    pub fn is_head(self) -> bool {
        matches!(
            self,
            CellType::HeadLeft | CellType::HeadUp | CellType::HeadRight | CellType::HeadDown
        )
    }

    /// Head cell for a snake moving in `direction`.
    ///
    /// [`Direction::None`] has no head of its own and maps to [`CellType::HeadRight`].
    #[must_use]
    pub fn head(direction: Direction) -> CellType {
        match direction {
            Direction::Up => CellType::HeadUp,
            Direction::Down => CellType::HeadDown,
            Direction::Left => CellType::HeadLeft,
            Direction::Right | Direction::None => CellType::HeadRight,
        }
    }

    /// Straight body cell along the axis of `direction`.
    #[must_use]
    pub fn straight(direction: Direction) -> CellType {
        if direction.is_vertical() {
            CellType::BodyVertical
        } else {
            CellType::BodyHorizontal
        }
    }

    /// Body cell connecting the neighbours that lie in directions `a` and `b`.
    ///
    /// Degenerate pairs (equal directions or `None`) fall back to a straight
    /// segment along whichever direction is real.
    #[must_use]
    pub fn joining(a: Direction, b: Direction) -> CellType {
        use Direction::{Down, Left, Right, Up};
        match (a, b) {
            (Left, Right) | (Right, Left) => CellType::BodyHorizontal,
            (Up, Down) | (Down, Up) => CellType::BodyVertical,
            (Left, Up) | (Up, Left) => CellType::BodyLeftUp,
            (Up, Right) | (Right, Up) => CellType::BodyUpRight,
            (Right, Down) | (Down, Right) => CellType::BodyRightDown,
            (Down, Left) | (Left, Down) => CellType::BodyDownLeft,
            (Direction::None, other) | (other, _) => CellType::straight(other),
        }
    }
}

/// Rectangular board. The outer ring is always [`CellType::Wall`] and at most
/// one interior cell holds [`CellType::Food`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellType>,
    food: Option<Position>,
}

impl Grid {
    /// Creates a board of `rows x cols` cells, walls included.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if either side is below
    /// [`MIN_BOARD_SIZE`] or does not fit in an `i32` coordinate.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let fits = i32::try_from(rows).is_ok() && i32::try_from(cols).is_ok();
        if rows < MIN_BOARD_SIZE || cols < MIN_BOARD_SIZE || !fits {
            return Err(SnakeError::InvalidBoardSize { rows, cols });
        }
        let mut grid = Self {
            rows,
            cols,
            cells: vec![CellType::Empty; rows * cols],
            food: None,
        };
        grid.reset();
        Ok(grid)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of interior cells the snake can occupy.
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.rows - 2) * (self.cols - 2)
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn has_food(&self) -> bool {
        self.food.is_some()
    }

    /// Flat index of `pos`, or `None` if it is off the board entirely.
    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Type of the cell at `pos`, or `None` if it is off the board.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<CellType> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrites the cell at `pos`. Returns false if `pos` is off the board.
    pub(crate) fn set_cell(&mut self, pos: Position, cell_type: CellType) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = cell_type;
                true
            }
            None => false,
        }
    }

    /// True iff `pos` lies strictly inside the wall ring.
    #[must_use]
    pub fn is_inside(&self, pos: Position) -> bool {
        // Board sides are checked to fit in i32 on construction.
        let last_row = i32::try_from(self.rows).unwrap_or(i32::MAX) - 1;
        let last_col = i32::try_from(self.cols).unwrap_or(i32::MAX) - 1;
        pos.row > 0 && pos.row < last_row && pos.col > 0 && pos.col < last_col
    }

    #[must_use]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.is_inside(pos) && self.cell(pos) == Some(CellType::Empty)
    }

    /// True iff the snake could move onto `pos` and survive.
    #[must_use]
    pub fn is_safe(&self, pos: Position) -> bool {
        self.is_inside(pos) && matches!(self.cell(pos), Some(CellType::Empty | CellType::Food))
    }

    /// True iff every interior cell belongs to the snake.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.interior_positions()
            .all(|pos| self.cell(pos).is_some_and(CellType::is_snake))
    }

    /// Iterates over every interior position, row by row.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let last_row = i32::try_from(self.rows).unwrap_or(i32::MAX) - 1;
        let last_col = i32::try_from(self.cols).unwrap_or(i32::MAX) - 1;
        (1..last_row).flat_map(move |row| (1..last_col).map(move |col| Position::new(row, col)))
    }

    /// Places food at `pos`.
    ///
    /// # Errors
    ///
    /// The grid is left untouched and an error is returned if food already
    /// exists, `pos` is not inside the walls, or the cell is not empty.
    pub fn create_food(&mut self, pos: Position) -> Result<()> {
        if let Some(existing) = self.food {
            return Err(SnakeError::FoodAlreadyPlaced(existing));
        }
        if !self.is_inside(pos) {
            return Err(SnakeError::OutsideBoard(pos));
        }
        if !self.is_empty(pos) {
            return Err(SnakeError::CellNotEmpty(pos));
        }
        self.set_cell(pos, CellType::Food);
        self.food = Some(pos);
        Ok(())
    }

    /// Removes the food, returning where it was.
    pub fn remove_food(&mut self) -> Option<Position> {
        let food = self.food.take()?;
        if self.cell(food) == Some(CellType::Food) {
            self.set_cell(food, CellType::Empty);
        }
        Some(food)
    }

    /// Places food on a uniformly chosen empty interior cell.
    ///
    /// Does nothing if food already exists or there is no empty cell.
    pub fn random_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        if self.has_food() {
            return None;
        }
        let available: Vec<Position> = self
            .interior_positions()
            .filter(|pos| self.cell(*pos) == Some(CellType::Empty))
            .collect();
        let Some(&pos) = available.choose(rng) else {
            warn!("No where left to place food");
            return None;
        };
        self.set_cell(pos, CellType::Food);
        self.food = Some(pos);
        debug!("Placed food at {pos}");
        Some(pos)
    }

    /// Restores the wall ring and clears food and snake cells.
    pub fn reset(&mut self) {
        self.food = None;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let border = row == 0 || row == self.rows - 1 || col == 0 || col == self.cols - 1;
                self.cells[row * self.cols + col] = if border {
                    CellType::Wall
                } else {
                    CellType::Empty
                };
            }
        }
    }

    /// Independent deep copy of the board.
    #[must_use]
    pub fn copy(&self) -> Grid {
        self.clone()
    }
}
