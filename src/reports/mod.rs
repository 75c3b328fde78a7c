mod grid;
mod tables;

pub use self::grid::print_grid;
pub use self::tables::{leaderboard as print_leaderboard, oracle as print_oracle_report};
