//! Drives a bot from outside observations and forwards its moves to an actuator.
use log::{debug, info, warn};

use super::{
    snake_bot::SnakeBot,
    snake_player::Snake,
    snake_position::{Direction, Position},
};

/// One observation of the game, in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Percept {
    pub head: Position,
    pub food: Option<Position>,
}

/// Source of observations, e.g. a screen reader.
pub trait Perception {
    /// Returns `None` when nothing could be observed this cycle.
    fn perceive(&mut self) -> Option<Percept>;
}

/// Sink for moves, e.g. a key presser.
pub trait Actuator {
    fn send(&mut self, direction: Direction);
}

/// What happened during one [`SnakeAgent::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No observation was available.
    Idle,
    /// A direction was chosen. `sent` is false when it repeated the last one.
    Moved { direction: Direction, sent: bool },
    /// The tracked snake is dead; the driver decides whether to reset.
    Dead,
}

/// Keeps its own copy of the snake in step with the game and asks a bot
/// for each move.
#[derive(Debug)]
pub struct SnakeAgent<B: SnakeBot> {
    snake: Snake,
    bot: B,
    last_sent: Direction,
}

impl<B: SnakeBot> SnakeAgent<B> {
    #[must_use]
    pub fn new(snake: Snake, bot: B) -> Self {
        let last_sent = snake.direction();
        Self {
            snake,
            bot,
            last_sent,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn last_sent(&self) -> Direction {
        self.last_sent
    }

    /// Syncs the food from `percept`, asks the bot for a direction and applies
    /// it to the tracked snake.
    pub fn compute(&mut self, percept: &Percept) -> Direction {
        self.sync_food(percept.food);
        if self.snake.head() != Some(percept.head) {
            warn!(
                "Perceived head {} but tracking {:?}",
                percept.head,
                self.snake.head()
            );
        }
        let direction = self.bot.next_direction(&mut self.snake);
        self.snake.make_move(direction);
        if self.snake.is_dead() {
            info!("Tracked snake died moving {direction}");
        }
        direction
    }

    /// Runs one perceive, decide, act cycle.
    ///
    /// The actuator is only called when the direction differs from the last
    /// one sent, since a held heading needs no new input.
    pub fn tick<P: Perception, A: Actuator>(
        &mut self,
        perception: &mut P,
        actuator: &mut A,
    ) -> TickOutcome {
        if self.snake.is_dead() {
            return TickOutcome::Dead;
        }
        let Some(percept) = perception.perceive() else {
            debug!("Nothing perceived this cycle");
            return TickOutcome::Idle;
        };
        let direction = self.compute(&percept);
        let sent = direction != self.last_sent;
        if sent {
            actuator.send(direction);
            self.last_sent = direction;
        }
        TickOutcome::Moved { direction, sent }
    }

    /// Puts the tracked snake back at its start after a game over.
    pub fn reset(&mut self) {
        self.snake.reset(true);
        self.last_sent = self.snake.direction();
    }

    fn sync_food(&mut self, food: Option<Position>) {
        let grid = self.snake.grid_mut();
        if grid.food() == food {
            return;
        }
        grid.remove_food();
        if let Some(food) = food {
            if let Err(e) = grid.create_food(food) {
                warn!("Ignoring perceived food: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::models::snake::{
        bots::greedy_bot::GreedyBot, snake_grid::Grid, snake_player::SnakeStart,
    };

    struct ScriptedPerception {
        percepts: VecDeque<Option<Percept>>,
    }

    impl Perception for ScriptedPerception {
        fn perceive(&mut self) -> Option<Percept> {
            self.percepts.pop_front().flatten()
        }
    }

    #[derive(Default)]
    struct RecordingActuator {
        sent: Vec<Direction>,
    }

    impl Actuator for RecordingActuator {
        fn send(&mut self, direction: Direction) {
            self.sent.push(direction);
        }
    }

    fn agent() -> SnakeAgent<GreedyBot> {
        let grid = Grid::new(17, 19).unwrap();
        let start = SnakeStart::new(
            Direction::Right,
            vec![
                Position::new(8, 5),
                Position::new(8, 4),
                Position::new(8, 3),
                Position::new(8, 2),
            ],
        );
        let snake = Snake::new(grid, start, StdRng::seed_from_u64(0)).unwrap();
        SnakeAgent::new(snake, GreedyBot::new())
    }

    #[test]
    fn test_compute_syncs_food_and_moves() {
        let mut agent = agent();
        let percept = Percept {
            head: Position::new(8, 5),
            food: Some(Position::new(8, 13)),
        };
        assert_eq!(agent.compute(&percept), Direction::Right);
        assert_eq!(agent.snake().head(), Some(Position::new(8, 6)));
        assert_eq!(agent.snake().grid().food(), Some(Position::new(8, 13)));

        // Food moved somewhere else.
        let percept = Percept {
            head: Position::new(8, 6),
            food: Some(Position::new(2, 6)),
        };
        assert_eq!(agent.compute(&percept), Direction::Up);
        assert_eq!(agent.snake().grid().food(), Some(Position::new(2, 6)));
        assert!(agent.snake().grid().is_empty(Position::new(8, 13)));
    }

    #[test]
    fn test_food_on_body_is_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut agent = agent();
        let percept = Percept {
            head: Position::new(8, 5),
            food: Some(Position::new(8, 3)),
        };
        agent.compute(&percept);
        assert!(!agent.snake().grid().has_food());
        assert!(agent.snake().is_alive());
    }

    #[test]
    fn test_tick_deduplicates_actuation() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut agent = agent();
        let food = Some(Position::new(3, 8));
        let heads = [(8, 5), (8, 6), (8, 7), (8, 8), (7, 8)];
        let mut percepts: VecDeque<Option<Percept>> = heads
            .iter()
            .map(|(r, c)| {
                Some(Percept {
                    head: Position::new(*r, *c),
                    food,
                })
            })
            .collect();
        percepts.insert(2, None);
        let mut perception = ScriptedPerception { percepts };
        let mut actuator = RecordingActuator::default();

        let mut outcomes = Vec::new();
        for _ in 0..6 {
            outcomes.push(agent.tick(&mut perception, &mut actuator));
        }
        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Moved {
                    direction: Direction::Right,
                    sent: false
                },
                TickOutcome::Moved {
                    direction: Direction::Right,
                    sent: false
                },
                TickOutcome::Idle,
                TickOutcome::Moved {
                    direction: Direction::Right,
                    sent: false
                },
                TickOutcome::Moved {
                    direction: Direction::Up,
                    sent: true
                },
                TickOutcome::Moved {
                    direction: Direction::Up,
                    sent: false
                },
            ]
        );
        assert_eq!(actuator.sent, vec![Direction::Up]);
        assert_eq!(agent.last_sent(), Direction::Up);
    }

    #[test]
    fn test_dead_agent_stops_until_reset() {
        let mut agent = agent();
        // Drive the tracked snake into the top wall.
        agent.snake.move_path([Direction::Up; 7]);
        assert!(agent.snake().is_alive());
        agent.snake.make_move(Direction::Up);
        assert!(agent.snake().is_dead());

        let mut perception = ScriptedPerception {
            percepts: VecDeque::from([Some(Percept {
                head: Position::new(0, 5),
                food: None,
            })]),
        };
        let mut actuator = RecordingActuator::default();
        assert_eq!(agent.tick(&mut perception, &mut actuator), TickOutcome::Dead);
        assert!(actuator.sent.is_empty());

        agent.reset();
        assert!(agent.snake().is_alive());
        assert_eq!(agent.snake().head(), Some(Position::new(8, 5)));
        assert_eq!(agent.last_sent(), Direction::Right);
    }
}
