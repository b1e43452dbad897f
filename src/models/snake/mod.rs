pub mod bots;
pub mod snake_agent;
pub mod snake_bot;
pub mod snake_error;
pub mod snake_game;
pub mod snake_grid;
pub mod snake_player;
pub mod snake_position;
