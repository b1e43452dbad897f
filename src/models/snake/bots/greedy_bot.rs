use log::debug;

use crate::models::snake::{
    bots::path_solver::PathSolver,
    snake_bot::SnakeBot,
    snake_player::Snake,
    snake_position::{Direction, Position},
};

/// Goes for the food when that is safe, otherwise stalls by chasing its tail.
///
/// 1. Find the shortest path to the food and replay it on a copy of the snake.
///    If the copy fills the board, or can still reach its tail afterwards,
///    take the first step of the path.
/// 2. Otherwise follow the longest path to the real snake's tail.
/// 3. Otherwise step to the safe neighbour farthest from the food.
#[derive(Debug, Default)]
pub struct GreedyBot {
    path_solver: PathSolver,
}

impl GreedyBot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn seek_food_safely(&mut self, snake: &mut Snake) -> Option<Direction> {
        let path_to_food = self.path_solver.shortest_path_to_food(snake);
        let first = *path_to_food.front()?;

        let mut virtual_snake = snake.copy();
        virtual_snake.move_path(path_to_food);
        if virtual_snake.is_dead() {
            return None;
        }
        if virtual_snake.grid().is_full() {
            return Some(first);
        }
        let path_to_tail = self.path_solver.longest_path_to_tail(&mut virtual_snake);
        (path_to_tail.len() > 1).then_some(first)
    }

    fn stall_safely(&mut self, snake: &mut Snake) -> Option<Direction> {
        let path_to_tail = self.path_solver.longest_path_to_tail(snake);
        if path_to_tail.len() > 1 {
            path_to_tail.front().copied()
        } else {
            None
        }
    }

    /// Safe neighbour farthest from the food, or the current direction when no
    /// neighbour is safe.
    fn survive(snake: &Snake) -> Direction {
        let Some(head) = snake.head() else {
            return snake.direction();
        };
        let grid = snake.grid();
        let mut best = snake.direction();
        let mut max_dist = None;
        for adj in head.all_adjacent() {
            if !grid.is_safe(adj) {
                continue;
            }
            let dist = grid
                .food()
                .map_or(0, |food| Position::manhattan_distance(adj, food));
            if max_dist < Some(dist) {
                max_dist = Some(dist);
                best = head.direction_to(adj);
            }
        }
        best
    }
}

impl SnakeBot for GreedyBot {
    fn next_direction(&mut self, snake: &mut Snake) -> Direction {
        if let Some(direction) = self.seek_food_safely(snake) {
            debug!("Heading {direction} towards the food");
            return direction;
        }
        if let Some(direction) = self.stall_safely(snake) {
            debug!("Food is not safe. Stalling {direction} towards the tail");
            return direction;
        }
        let direction = Self::survive(snake);
        debug!("No safe path. Surviving with {direction}");
        direction
    }

    fn name(&self) -> &'static str {
        "Greedy Bot"
    }
}
