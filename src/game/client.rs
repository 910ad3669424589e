use crate::game::error::{GameClientError, Operation, Result};
use crate::game::types::{GameId, GameState, Leaderboard, ScoreRecord};
use crate::network::{
    EndpointConfig, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, ResilientTransport,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct DirectionRequest {
    direction: String,
}

/// Client for the snake game service.
///
/// Construct one per process and hand it to whatever needs it; independent
/// calls may run concurrently and are not ordered relative to each other.
#[derive(Clone)]
pub struct GameClient {
    transport: ResilientTransport,
}

impl GameClient {
    /// Client over a real HTTP transport
    pub fn new(config: EndpointConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: EndpointConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport: ResilientTransport::new(transport, config),
        }
    }

    pub fn config(&self) -> &EndpointConfig {
        self.transport.config()
    }

    /// Start a new game; the returned state carries the new game's id
    pub async fn create_game(&self) -> Result<GameState> {
        let request = HttpRequest::post(self.config().url("/game"))
            .header("Content-Type", "application/json");
        let state: GameState = self.call(Operation::CreateGame, request).await?;
        info!(
            "Created game {}",
            state.id().map(|id| id.to_string()).unwrap_or_default()
        );
        Ok(state)
    }

    pub async fn get_game_state(&self, game_id: &GameId) -> Result<GameState> {
        let request = HttpRequest::get(self.config().url(&format!("/game/{}", game_id)));
        let state: GameState = self.call(Operation::GetGameState, request).await?;
        debug!(
            "Fetched state for game {} (status {})",
            game_id,
            state.status().unwrap_or("unknown")
        );
        Ok(state)
    }

    /// Send a new heading. The value is lowercased but otherwise forwarded
    /// unchecked; the service decides whether it is acceptable.
    pub async fn update_direction(
        &self,
        game_id: &GameId,
        direction: impl AsRef<str>,
    ) -> Result<Value> {
        let operation = Operation::UpdateDirection;
        let body = DirectionRequest {
            direction: direction.as_ref().to_lowercase(),
        };
        let request = HttpRequest::post(self.config().url(&format!("/game/{}/direction", game_id)))
            .json_body(encode(operation, &body)?);
        let response = self.call(operation, request).await?;
        info!("Direction for game {} set to {}", game_id, body.direction);
        Ok(response)
    }

    pub async fn save_score(
        &self,
        game_id: &GameId,
        player_name: &str,
        score: i64,
    ) -> Result<Value> {
        let operation = Operation::SaveScore;
        let record = ScoreRecord::new(player_name, score);
        let request = HttpRequest::post(self.config().url(&format!("/game/{}/record", game_id)))
            .json_body(encode(operation, &record)?);
        let response = self.call(operation, request).await?;
        info!("Saved score {} for {} (game {})", score, player_name, game_id);
        Ok(response)
    }

    /// Leaderboard in service order; no sorting or filtering happens here
    pub async fn get_leaderboard(&self) -> Result<Leaderboard> {
        let request = HttpRequest::get(self.config().url("/leaderboard"));
        let board: Leaderboard = self.call(Operation::GetLeaderboard, request).await?;
        debug!("Fetched leaderboard with {} entries", board.len());
        Ok(board)
    }

    /// One resilient round trip plus status check and body decoding
    async fn call<T: DeserializeOwned>(&self, operation: Operation, request: HttpRequest) -> Result<T> {
        debug!("{}: {} {}", operation, request.method, request.url);

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(source) => {
                warn!("{} failed: {}", operation, source);
                return Err(GameClientError::Transport { operation, source });
            }
        };
        debug!("{}: {} {}", operation, response.status, response.status_text);

        if !response.is_success() {
            return Err(rejection(operation, response));
        }

        serde_json::from_slice(&response.body).map_err(|source| {
            warn!("{}: unparseable response body: {}", operation, source);
            GameClientError::MalformedResponse { operation, source }
        })
    }
}

fn encode<B: Serialize>(operation: Operation, body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|source| GameClientError::Encode { operation, source })
}

/// Error bodies are best-effort: anything unparseable becomes `{}`
fn rejection(operation: Operation, response: HttpResponse) -> GameClientError {
    let payload = serde_json::from_slice::<Value>(&response.body)
        .unwrap_or_else(|_| Value::Object(Map::new()));
    warn!(
        "{} rejected with {} {}: {}",
        operation, response.status, response.status_text, payload
    );
    GameClientError::Rejected {
        operation,
        status: response.status,
        status_text: response.status_text,
        payload,
    }
}
