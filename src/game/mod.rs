pub mod client;
pub mod error;
pub mod types;

pub use client::GameClient;
pub use error::{GameClientError, Operation};
pub use types::{
    Direction, GameId, GameState, Leaderboard, LeaderboardEntry, ParseDirectionError, ScoreRecord,
};
