use super::{snake_player::Snake, snake_position::Direction};

pub trait SnakeBot {
    /// Picks the direction for the next move of `snake`.
    ///
    /// The snake may be borrowed mutably for scratch work, but must be left as
    /// it was found. Illegal reversals are not filtered here; the snake
    /// ignores them when moving.
    fn next_direction(&mut self, snake: &mut Snake) -> Direction;

    /// Human readable name used in logs.
    fn name(&self) -> &'static str;
}
