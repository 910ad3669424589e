pub mod app;
pub mod commands;
pub mod display;

pub use app::{App, Config, GameConfig, WatchEnd, WatchReport};
pub use commands::{Cli, Commands};
pub use display::{format_config, format_game_summary, format_leaderboard};
