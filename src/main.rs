use std::process::ExitCode;

use log::{debug, error, info};
use snake_autopilot::models::snake::{
    bots::greedy_bot::GreedyBot,
    snake_game::{GameConfig, SnakeGame},
};

/// Reads `[rows cols [seed]]` from the command line.
fn parse_config(args: &[String]) -> Result<GameConfig, String> {
    let mut config = GameConfig::default();
    match args {
        [] => {}
        [rows, cols, rest @ ..] => {
            let rows = rows.parse().map_err(|e| format!("bad rows {rows:?}: {e}"))?;
            let cols = cols.parse().map_err(|e| format!("bad cols {cols:?}: {e}"))?;
            if (rows, cols) != (config.rows, config.cols) {
                config = GameConfig::new(rows, cols);
            }
            match rest {
                [] => {}
                [seed] => {
                    config.seed =
                        Some(seed.parse().map_err(|e| format!("bad seed {seed:?}: {e}"))?);
                }
                _ => return Err("too many arguments".to_string()),
            }
        }
        [_] => return Err("expected both rows and cols".to_string()),
    }
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("snake_autopilot=info"),
    )
    .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}. Usage: snake_autopilot [rows cols [seed]]");
            return ExitCode::FAILURE;
        }
    };
    debug!("Starting with {config:?}");

    let mut game = match SnakeGame::new(config, GreedyBot::new()) {
        Ok(game) => game,
        Err(e) => {
            error!("Could not start game: {e}");
            return ExitCode::FAILURE;
        }
    };
    let summary = game.run();
    info!(
        "Finished: {:?}, score {}, length {}, {} steps",
        summary.outcome, summary.score, summary.length, summary.steps
    );
    ExitCode::SUCCESS
}
