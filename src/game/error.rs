use crate::network::TransportError;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The five calls the client makes against the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateGame,
    GetGameState,
    UpdateDirection,
    SaveScore,
    GetLeaderboard,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateGame => "create game",
            Operation::GetGameState => "get game state",
            Operation::UpdateDirection => "update direction",
            Operation::SaveScore => "save score",
            Operation::GetLeaderboard => "get leaderboard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum GameClientError {
    /// No response after the retry budget (or a non-retryable transport failure)
    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// The service answered with a non-2xx status
    #[error("{operation} failed: {status_text}")]
    Rejected {
        operation: Operation,
        status: u16,
        status_text: String,
        payload: Value,
    },

    /// A 2xx response whose body is not the expected JSON
    #[error("{operation} failed: malformed response: {source}")]
    MalformedResponse {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} failed: could not encode request: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl GameClientError {
    pub fn operation(&self) -> Operation {
        match self {
            GameClientError::Transport { operation, .. }
            | GameClientError::Rejected { operation, .. }
            | GameClientError::MalformedResponse { operation, .. }
            | GameClientError::Encode { operation, .. } => *operation,
        }
    }

    /// HTTP status for rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            GameClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GameClientError::Transport { source, .. } if source.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, GameClientError>;
