pub mod greedy_bot;
pub mod path_solver;
