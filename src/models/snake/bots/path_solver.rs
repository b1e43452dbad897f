//! Shortest and (approximate) longest paths from the snake's head.
use std::collections::VecDeque;

use log::trace;

use crate::models::snake::{
    snake_grid::{CellType, Grid},
    snake_player::Snake,
    snake_position::{Direction, Position},
};

/// Scratch data for one cell during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TableCell {
    parent: Option<Position>,
    dist: usize,
    visited: bool,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            parent: None,
            dist: usize::MAX,
            visited: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PathKind {
    Shortest,
    Longest,
}

/// Path searches over a snake's grid.
///
/// Paths are returned as the directions to take from the head. An empty path
/// means there is no route.
#[derive(Clone, Debug, Default)]
pub struct PathSolver {
    table: Vec<TableCell>,
}

impl PathSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest path to the food, or the longest path to the tail if there is
    /// no food on the board.
    pub fn shortest_path_to_food(&mut self, snake: &mut Snake) -> VecDeque<Direction> {
        match snake.grid().food() {
            Some(food) => self.shortest_path_to(snake, food),
            None => self.longest_path_to_tail(snake),
        }
    }

    pub fn longest_path_to_tail(&mut self, snake: &mut Snake) -> VecDeque<Direction> {
        match snake.tail() {
            Some(tail) => self.longest_path_to(snake, tail),
            None => VecDeque::new(),
        }
    }

    /// Breadth first search from the head to `destination`.
    ///
    /// Among equally short paths, the one that keeps going straight is preferred.
    pub fn shortest_path_to(
        &mut self,
        snake: &mut Snake,
        destination: Position,
    ) -> VecDeque<Direction> {
        self.path_to(snake, destination, PathKind::Shortest)
    }

    /// Longer path to `destination`, made by adding detours to the shortest one.
    ///
    /// Finding a true longest path is NP-hard. This is only a lower bound,
    /// but it never leaves safe cells.
    pub fn longest_path_to(
        &mut self,
        snake: &mut Snake,
        destination: Position,
    ) -> VecDeque<Direction> {
        self.path_to(snake, destination, PathKind::Longest)
    }

    /// Treats `destination` as empty for the duration of the search so it
    /// passes the safety check, then restores it.
    fn path_to(
        &mut self,
        snake: &mut Snake,
        destination: Position,
        kind: PathKind,
    ) -> VecDeque<Direction> {
        if !snake.grid().is_inside(destination) {
            return VecDeque::new();
        }
        let Some(original) = snake.grid().cell(destination) else {
            return VecDeque::new();
        };
        snake.grid_mut().set_cell(destination, CellType::Empty);
        let path = match kind {
            PathKind::Shortest => self.shortest_search(snake, destination),
            PathKind::Longest => self.longest_search(snake, destination),
        };
        snake.grid_mut().set_cell(destination, original);
        trace!("{kind:?} path to {destination}: {path:?}");
        path
    }

    fn shortest_search(&mut self, snake: &Snake, destination: Position) -> VecDeque<Direction> {
        let grid = snake.grid();
        self.reset_table(grid);
        let Some(head) = snake.head() else {
            return VecDeque::new();
        };
        let Some(head_index) = grid.index(head) else {
            return VecDeque::new();
        };
        self.table[head_index].dist = 0;

        let mut queue = VecDeque::new();
        queue.push_back(head);
        while let Some(cur) = queue.pop_front() {
            if cur == destination {
                return self.build_path(grid, head, destination);
            }
            let Some(cur_index) = grid.index(cur) else {
                continue;
            };
            let cur_cell = self.table[cur_index];

            // Try the neighbour straight ahead first.
            let first_direction = match cur_cell.parent {
                Some(parent) => parent.direction_to(cur),
                None => snake.direction(),
            };
            let mut adjacent = cur.all_adjacent();
            if let Some(i) = adjacent
                .iter()
                .position(|pos| cur.direction_to(*pos) == first_direction)
            {
                adjacent.swap(0, i);
            }

            for pos in adjacent {
                if !grid.is_safe(pos) {
                    continue;
                }
                let Some(index) = grid.index(pos) else {
                    continue;
                };
                let cell = &mut self.table[index];
                if cell.dist == usize::MAX {
                    cell.parent = Some(cur);
                    cell.dist = cur_cell.dist + 1;
                    queue.push_back(pos);
                }
            }
        }
        VecDeque::new()
    }

    fn longest_search(&mut self, snake: &Snake, destination: Position) -> VecDeque<Direction> {
        let mut path = self.shortest_search(snake, destination);
        let (Some(head), false) = (snake.head(), path.is_empty()) else {
            return VecDeque::new();
        };
        let grid = snake.grid();
        self.reset_table(grid);

        let mut cur = head;
        self.visit(grid, cur);
        for direction in &path {
            cur = cur.adjacent(*direction);
            self.visit(grid, cur);
        }

        // Walk the path and try to replace each step with a three step detour
        // through the two cells next to it.
        let mut idx = 0;
        let mut cur = head;
        while idx < path.len() {
            let direction = path[idx];
            let nxt = cur.adjacent(direction);
            let detour = direction.perpendicular().iter().copied().find(|side| {
                self.is_free(grid, cur.adjacent(*side)) && self.is_free(grid, nxt.adjacent(*side))
            });
            if let Some(side) = detour {
                self.visit(grid, cur.adjacent(side));
                self.visit(grid, nxt.adjacent(side));
                path.insert(idx, side);
                path.insert(idx + 2, side.opposite());
            } else {
                cur = nxt;
                idx += 1;
            }
        }
        path
    }

    fn reset_table(&mut self, grid: &Grid) {
        self.table.clear();
        self.table
            .resize(grid.rows() * grid.cols(), TableCell::default());
    }

    fn visit(&mut self, grid: &Grid, pos: Position) {
        if let Some(index) = grid.index(pos) {
            self.table[index].visited = true;
        }
    }

    fn is_free(&self, grid: &Grid, pos: Position) -> bool {
        grid.is_safe(pos) && grid.index(pos).is_some_and(|i| !self.table[i].visited)
    }

    fn build_path(&self, grid: &Grid, src: Position, des: Position) -> VecDeque<Direction> {
        let mut path = VecDeque::new();
        let mut tmp = des;
        while tmp != src {
            let Some(parent) = grid.index(tmp).and_then(|i| self.table[i].parent) else {
                return VecDeque::new();
            };
            path.push_front(parent.direction_to(tmp));
            tmp = parent;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::models::snake::snake_player::SnakeStart;

    fn snake_on(rows: usize, cols: usize, direction: Direction, body: &[(i32, i32)]) -> Snake {
        let grid = Grid::new(rows, cols).unwrap();
        let body = body.iter().map(|(r, c)| Position::new(*r, *c)).collect();
        Snake::new(grid, SnakeStart::new(direction, body), StdRng::seed_from_u64(3)).unwrap()
    }

    /// Replays `path` on a copy and checks it ends at `destination` alive.
    fn assert_path_reaches(snake: &Snake, path: &VecDeque<Direction>, destination: Position) {
        let mut copy = snake.copy();
        for direction in path {
            assert!(copy.make_move(*direction), "move {direction} was ignored");
            assert!(copy.is_alive(), "died at {:?}", copy.head());
        }
        assert_eq!(copy.head(), Some(destination));
    }

    #[test]
    fn test_shortest_path_matches_manhattan_on_open_board() {
        let mut snake = snake_on(10, 12, Direction::Right, &[(3, 3), (3, 2)]);
        let before = snake.grid().clone();
        let mut solver = PathSolver::new();
        let head = snake.head().unwrap();
        let targets: Vec<Position> = snake
            .grid()
            .interior_positions()
            .filter(|p| p.col > head.col)
            .collect();
        for target in targets {
            let path = solver.shortest_path_to(&mut snake, target);
            assert_eq!(
                path.len(),
                Position::manhattan_distance(head, target) as usize,
                "path to {target}"
            );
            assert_path_reaches(&snake, &path, target);
        }
        assert_eq!(snake.grid(), &before);
    }

    #[test]
    fn test_shortest_path_prefers_straight_line() {
        let mut snake = snake_on(17, 19, Direction::Right, &[(7, 4), (7, 3), (7, 2), (7, 1)]);
        snake.grid_mut().create_food(Position::new(7, 13)).unwrap();
        let path = PathSolver::new().shortest_path_to_food(&mut snake);
        assert_eq!(path.len(), 9);
        assert!(path.iter().all(|d| *d == Direction::Right));
        assert_eq!(snake.grid().cell(Position::new(7, 13)), Some(CellType::Food));
    }

    #[test]
    fn test_shortest_path_around_body() {
        // Body wraps below and to the left of the head.
        let mut snake = snake_on(
            8,
            8,
            Direction::Up,
            &[(3, 4), (4, 4), (4, 3), (4, 2), (3, 2), (2, 2)],
        );
        let target = Position::new(3, 3);
        let path = PathSolver::new().shortest_path_to(&mut snake, target);
        assert_eq!(path, VecDeque::from([Direction::Left]));

        let target = Position::new(5, 3);
        let path = PathSolver::new().shortest_path_to(&mut snake, target);
        assert!(path.len() > Position::manhattan_distance(snake.head().unwrap(), target) as usize);
        assert_path_reaches(&snake, &path, target);
    }

    #[test]
    fn test_no_path_is_empty() {
        // Head boxed into the top-left corner by its own body.
        let mut snake = snake_on(
            7,
            7,
            Direction::Left,
            &[(1, 1), (1, 2), (2, 2), (2, 1), (3, 1)],
        );
        let mut solver = PathSolver::new();
        assert!(solver.shortest_path_to(&mut snake, Position::new(5, 5)).is_empty());
        assert!(solver.longest_path_to(&mut snake, Position::new(5, 5)).is_empty());
        assert!(solver.shortest_path_to(&mut snake, Position::new(0, 3)).is_empty());
    }

    #[test]
    fn test_destination_type_is_restored() {
        let mut snake = snake_on(8, 8, Direction::Right, &[(3, 3), (3, 2), (3, 1)]);
        let before = snake.grid().clone();
        let mut solver = PathSolver::new();
        let tail = snake.tail().unwrap();
        let path = solver.longest_path_to_tail(&mut snake);
        assert!(!path.is_empty());
        assert_eq!(snake.grid(), &before);
        assert_eq!(snake.grid().cell(tail), Some(CellType::BodyHorizontal));
    }

    #[test]
    fn test_longest_path_not_shorter_than_shortest() {
        let cases: [(Direction, &[(i32, i32)]); 3] = [
            (Direction::Right, &[(3, 3), (3, 2), (3, 1)]),
            (Direction::Up, &[(4, 4), (5, 4), (5, 3), (5, 2), (4, 2)]),
            (Direction::Left, &[(2, 5), (2, 6), (3, 6), (4, 6), (4, 5), (4, 4)]),
        ];
        for (direction, body) in cases {
            let mut snake = snake_on(9, 9, direction, body);
            let before = snake.grid().clone();
            let mut solver = PathSolver::new();
            let tail = snake.tail().unwrap();
            let shortest = solver.shortest_path_to(&mut snake, tail);
            let longest = solver.longest_path_to(&mut snake, tail);
            assert!(!shortest.is_empty());
            assert!(longest.len() >= shortest.len());
            assert_eq!(snake.grid(), &before);
        }
    }

    #[test]
    fn test_longest_path_is_collision_free() {
        let mut snake = snake_on(8, 8, Direction::Right, &[(3, 3), (3, 2), (3, 1)]);
        let target = Position::new(3, 6);
        let longest = PathSolver::new().longest_path_to(&mut snake, target);
        assert!(longest.len() > 3);
        // Visits no cell twice.
        let mut cur = snake.head().unwrap();
        let mut seen = vec![cur];
        for direction in &longest {
            cur = cur.adjacent(*direction);
            assert!(!seen.contains(&cur), "{cur} visited twice");
            seen.push(cur);
        }
        assert_eq!(cur, target);
        assert_path_reaches(&snake, &longest, target);
    }

    #[test]
    fn test_longest_path_extends_single_step() {
        // Two segment snake: the shortest route to the tail is one step and
        // the detours wind it through most of the 3x3 interior.
        let mut snake = snake_on(5, 5, Direction::Left, &[(1, 1), (1, 2)]);
        let path = PathSolver::new().longest_path_to_tail(&mut snake);
        assert_eq!(
            path,
            VecDeque::from([
                Direction::Down,
                Direction::Down,
                Direction::Right,
                Direction::Right,
                Direction::Up,
                Direction::Left,
                Direction::Up,
            ])
        );
    }
}
