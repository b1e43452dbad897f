//! Grid coordinates and movement directions.
use std::fmt;

/// Direction a snake can move in. [`Direction::None`] means "no change".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// The four real directions, in the order neighbours are enumerated.
    pub const VARIANTS: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row/column offset of a single step in this direction.
    #[must_use]
    pub fn value(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::None => (0, 0),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Directions at a right angle to this one.
    #[must_use]
    pub fn perpendicular(self) -> &'static [Direction] {
        match self {
            Direction::Left | Direction::Right => &[Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => &[Direction::Left, Direction::Right],
            Direction::None => &[],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::None => write!(f, "none"),
        }
    }
}

/// A cell coordinate. Row grows downwards, column grows to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position one step away in `direction`.
    #[must_use]
    pub fn adjacent(self, direction: Direction) -> Position {
        let (dr, dc) = direction.value();
        Position::new(self.row + dr, self.col + dc)
    }

    /// All four neighbours, ordered as [`Direction::VARIANTS`].
    #[must_use]
    pub fn all_adjacent(self) -> [Position; 4] {
        Direction::VARIANTS.map(|d| self.adjacent(d))
    }

    /// Direction of the step from `self` to `other`.
    ///
    /// Returns [`Direction::None`] when `other` is not 4-adjacent.
    #[must_use]
    pub fn direction_to(self, other: Position) -> Direction {
        match (other.row - self.row, other.col - self.col) {
            (-1, 0) => Direction::Up,
            (1, 0) => Direction::Down,
            (0, -1) => Direction::Left,
            (0, 1) => Direction::Right,
            _ => Direction::None,
        }
    }

    #[must_use]
    pub fn manhattan_distance(a: Position, b: Position) -> u32 {
        a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
