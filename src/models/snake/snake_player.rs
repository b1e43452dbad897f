//! Module for containing the snake body and its movement rules.
use std::collections::VecDeque;

use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom};

use super::{
    snake_error::{Result, SnakeError},
    snake_grid::{CellType, Grid},
    snake_position::{Direction, Position},
};

/// Explicit starting configuration: heading plus body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeStart {
    pub direction: Direction,
    pub body: Vec<Position>,
}

impl SnakeStart {
    #[must_use]
    pub fn new(direction: Direction, body: Vec<Position>) -> Self {
        Self { direction, body }
    }

    /// Checks that the start can be placed on `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidStart`] if the body is empty, leaves the
    /// interior, is not contiguous, overlaps itself, or if the direction is
    /// `None` or points back into the neck.
    pub fn validate(&self, grid: &Grid) -> Result<()> {
        let Some(&head) = self.body.first() else {
            return Err(SnakeError::InvalidStart("body is empty".to_string()));
        };
        if self.direction == Direction::None {
            return Err(SnakeError::InvalidStart("direction is none".to_string()));
        }
        if let Some(pos) = self.body.iter().find(|pos| !grid.is_inside(**pos)) {
            return Err(SnakeError::InvalidStart(format!("{pos} is outside the walls")));
        }
        for (i, pair) in self.body.windows(2).enumerate() {
            if pair[0].direction_to(pair[1]) == Direction::None {
                return Err(SnakeError::InvalidStart(format!(
                    "segments {i} and {} are not adjacent",
                    i + 1
                )));
            }
        }
        for (i, pos) in self.body.iter().enumerate() {
            if self.body[..i].contains(pos) {
                return Err(SnakeError::InvalidStart(format!("{pos} appears twice")));
            }
        }
        if let Some(&neck) = self.body.get(1) {
            if head.direction_to(neck) == self.direction {
                return Err(SnakeError::InvalidStart(format!(
                    "heading {} runs into the neck",
                    self.direction
                )));
            }
        }
        Ok(())
    }

    /// Cell type of every segment, head first.
    #[must_use]
    pub fn cell_types(&self) -> Vec<CellType> {
        let last = self.body.len().saturating_sub(1);
        self.body
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                if i == 0 {
                    CellType::head(self.direction)
                } else if i == last {
                    CellType::straight(pos.direction_to(self.body[i - 1]))
                } else {
                    CellType::joining(
                        pos.direction_to(self.body[i - 1]),
                        pos.direction_to(self.body[i + 1]),
                    )
                }
            })
            .collect()
    }
}

/// Snake moving over its own [`Grid`].
///
/// The grid is owned by the snake, so [`Snake::copy`] clones both together and
/// simulations never touch the real board.
#[derive(Clone, Debug)]
pub struct Snake {
    grid: Grid,
    body: VecDeque<Position>,
    direction: Direction,
    next_direction: Direction,
    dead: bool,
    start: Option<SnakeStart>,
    rng: StdRng,
}

impl Snake {
    /// Places a snake with an explicit start on `grid`.
    ///
    /// # Errors
    ///
    /// Fails if the start is invalid or any of its cells is not empty.
    pub fn new(grid: Grid, start: SnakeStart, rng: StdRng) -> Result<Self> {
        start.validate(&grid)?;
        if let Some(pos) = start.body.iter().find(|pos| !grid.is_empty(**pos)) {
            return Err(SnakeError::CellNotEmpty(*pos));
        }
        let mut snake = Self::unplaced(grid, Some(start), rng);
        snake.reset(false);
        Ok(snake)
    }

    /// Places a two segment snake at a random spot with a random heading.
    ///
    /// The placement is redrawn from `rng` on every [`Snake::reset`].
    #[must_use]
    pub fn random(grid: Grid, rng: StdRng) -> Self {
        let mut snake = Self::unplaced(grid, None, rng);
        snake.reset(false);
        snake
    }

    fn unplaced(grid: Grid, start: Option<SnakeStart>, rng: StdRng) -> Self {
        Self {
            grid,
            body: VecDeque::new(),
            direction: Direction::None,
            next_direction: Direction::None,
            dead: false,
            start,
            rng,
        }
    }

    /// Puts the snake back at its starting configuration.
    ///
    /// With `reset_grid` the whole board is reset; otherwise only the current
    /// body cells are cleared, and food is kept unless the start covers it.
    pub fn reset(&mut self, reset_grid: bool) {
        if reset_grid {
            self.grid.reset();
        } else {
            for pos in &self.body {
                if self.grid.cell(*pos).is_some_and(CellType::is_snake) {
                    self.grid.set_cell(*pos, CellType::Empty);
                }
            }
        }
        self.body.clear();
        self.dead = false;
        self.next_direction = Direction::None;

        let start = if let Some(start) = self.start.clone() {
            start
        } else if let Some(start) = self.random_start() {
            start
        } else {
            warn!("No room left to place the snake");
            self.direction = Direction::None;
            return;
        };
        if start.body.iter().any(|pos| Some(*pos) == self.grid.food()) {
            self.grid.remove_food();
        }
        for (pos, cell_type) in start.body.iter().zip(start.cell_types()) {
            self.grid.set_cell(*pos, cell_type);
        }
        self.direction = start.direction;
        self.body = start.body.into_iter().collect();
    }

    fn random_start(&mut self) -> Option<SnakeStart> {
        let direction = *Direction::VARIANTS.choose(&mut self.rng)?;
        let candidates: Vec<Position> = self
            .grid
            .interior_positions()
            .filter(|head| {
                self.grid.is_empty(*head) && self.grid.is_empty(head.adjacent(direction.opposite()))
            })
            .collect();
        let head = *candidates.choose(&mut self.rng)?;
        Some(SnakeStart::new(
            direction,
            vec![head, head.adjacent(direction.opposite())],
        ))
    }

    /// Independent copy of the snake together with its grid.
    #[must_use]
    pub fn copy(&self) -> Snake {
        self.clone()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn set_next_direction(&mut self, direction: Direction) {
        self.next_direction = direction;
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Moves with the pending direction set by [`Snake::set_next_direction`].
    pub fn advance(&mut self) -> bool {
        self.make_move(self.next_direction)
    }

    /// Moves the head one step in `direction`.
    ///
    /// Returns false and changes nothing if the snake is dead, `direction` is
    /// `None`, or it would reverse the snake. A lethal move still happens: the
    /// head is pushed onto the deadly cell and the snake is marked dead.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        if self.dead {
            debug!("Tried to move a dead snake");
            return false;
        }
        if direction == Direction::None || direction == self.direction.opposite() {
            return false;
        }
        let Some(head) = self.head() else {
            debug!("Tried to move a snake without a body");
            return false;
        };

        self.grid
            .set_cell(head, CellType::joining(self.direction.opposite(), direction));
        let new_head = head.adjacent(direction);
        self.body.push_front(new_head);
        self.direction = direction;
        self.next_direction = direction;

        if !self.grid.is_safe(new_head) {
            debug!("Snake ran into {new_head}. Killing snake");
            self.dead = true;
            return true;
        }
        if self.grid.cell(new_head) == Some(CellType::Food) {
            self.grid.remove_food();
            self.grid.set_cell(new_head, CellType::head(direction));
        } else {
            self.grid.set_cell(new_head, CellType::head(direction));
            self.remove_tail();
        }
        true
    }

    /// Replays `path` one move at a time.
    pub fn move_path<I: IntoIterator<Item = Direction>>(&mut self, path: I) {
        for direction in path {
            self.make_move(direction);
        }
    }

    fn remove_tail(&mut self) {
        if let Some(old_tail) = self.body.pop_back() {
            self.grid.set_cell(old_tail, CellType::Empty);
        }
        let len = self.body.len();
        if len >= 2 {
            let tail = self.body[len - 1];
            self.grid
                .set_cell(tail, CellType::straight(tail.direction_to(self.body[len - 2])));
        }
    }
}
