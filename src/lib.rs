pub mod cli;
pub mod game;
pub mod network;

// Re-export key types for easy testing
pub use game::{Direction, GameClient, GameClientError, GameId, GameState, Leaderboard};
pub use network::{EndpointConfig, HttpTransport, ReqwestTransport, ResilientTransport};
