use crate::cli::display;
use crate::game::{Direction, GameClient, GameId, GameState};
use crate::network::EndpointConfig;
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Overrides the platform config directory when set
pub const CONFIG_DIR_ENV: &str = "SNAKE_CLIENT_CONFIG_DIR";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the game API, including the `/api` prefix
    pub api_base_url: String,
    /// Per-attempt request timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after the first attempt for timeouts and network failures
    pub max_retries: u32,
    /// Board and input settings
    pub game: GameConfig,
}

/// Settings consumed by the UI side: polling, board size, key bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    /// How often a watcher polls game state, in milliseconds
    pub poll_interval_ms: u64,
    /// Key code to direction name, e.g. `KeyW = "up"`
    pub key_mapping: BTreeMap<String, String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let key_mapping = [
            ("KeyW", Direction::Up),
            ("KeyS", Direction::Down),
            ("KeyA", Direction::Left),
            ("KeyD", Direction::Right),
        ]
        .into_iter()
        .map(|(key, direction)| (key.to_string(), direction.to_string()))
        .collect();

        Self {
            width: 15,
            height: 15,
            poll_interval_ms: 100,
            key_mapping,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let endpoint = EndpointConfig::default();
        Self {
            api_base_url: endpoint.base_url().to_string(),
            timeout_ms: endpoint.timeout().as_millis() as u64,
            max_retries: endpoint.max_retries(),
            game: GameConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        ProjectDirs::from("dev", "snake", "snake-client")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    pub fn load_or_create_default() -> Result<Self> {
        Self::load_or_create(&Self::default_config_file()?)
    }

    /// Load configuration from `path`, writing the defaults there if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            info!("Wrote default configuration to {}", path.display());
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).context("Failed to parse configuration file")?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than zero");
        }
        if self.game.poll_interval_ms == 0 {
            bail!("game.poll_interval_ms must be greater than zero");
        }
        if self.game.width == 0 || self.game.height == 0 {
            bail!(
                "board dimensions must be non-zero, got {}x{}",
                self.game.width,
                self.game.height
            );
        }
        for (key, direction) in &self.game.key_mapping {
            direction
                .parse::<Direction>()
                .with_context(|| format!("Invalid key mapping for {}", key))?;
        }
        Ok(())
    }

    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig::new(
            self.api_base_url.clone(),
            Duration::from_millis(self.timeout_ms),
            self.max_retries,
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.game.poll_interval_ms)
    }

    /// Resolve a key code through the key mapping
    pub fn direction_for_key(&self, key: &str) -> Option<Direction> {
        self.game
            .key_mapping
            .get(key)
            .and_then(|direction| direction.parse().ok())
    }
}

/// Why a watch loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEnd {
    GameOver,
    PollLimit,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchReport {
    pub polls: u64,
    /// Polls whose state differed from the one before
    pub updates: u64,
    pub end: WatchEnd,
}

/// Main application state: configuration plus the one game client built from it
pub struct App {
    pub config: Config,
    pub client: GameClient,
}

impl App {
    pub fn with_config(config: Config) -> Self {
        let client = GameClient::new(config.endpoint());
        Self { config, client }
    }

    pub async fn handle_new(&self) -> Result<()> {
        let state = self.client.create_game().await?;
        match state.id() {
            Some(id) => println!("Game created: {}", id),
            None => warn!("Service did not return a game id"),
        }
        println!("{}", display::format_game_summary(&state));
        Ok(())
    }

    pub async fn handle_state(&self, game_id: &GameId, raw: bool) -> Result<()> {
        let state = self.client.get_game_state(game_id).await?;
        if raw {
            println!("{}", serde_json::to_string_pretty(state.as_value())?);
        } else {
            println!("{}", display::format_game_summary(&state));
        }
        Ok(())
    }

    /// Accepts either a direction name or a bound key code such as `KeyW`
    pub async fn handle_turn(&self, game_id: &GameId, input: &str) -> Result<()> {
        let direction = match self.config.direction_for_key(input) {
            Some(direction) => direction.to_string(),
            None => input.to_string(),
        };
        self.client.update_direction(game_id, &direction).await?;
        println!("Direction set to {}", direction.to_lowercase());
        Ok(())
    }

    pub async fn handle_save(&self, game_id: &GameId, player: &str, score: i64) -> Result<()> {
        self.client.save_score(game_id, player, score).await?;
        println!("Saved score {} for {}", score, player);
        Ok(())
    }

    pub async fn handle_leaderboard(&self) -> Result<()> {
        let board = self.client.get_leaderboard().await?;
        println!("{}", display::format_leaderboard(&board));
        Ok(())
    }

    /// Poll a game until it ends, `max_polls` is reached, or Ctrl-C
    pub async fn handle_watch(&self, game_id: &GameId, max_polls: Option<u64>) -> Result<()> {
        let report = self
            .watch(game_id, max_polls, tokio::signal::ctrl_c(), |state| {
                println!("{}", display::format_game_summary(state))
            })
            .await?;

        match report.end {
            WatchEnd::GameOver => println!("Game over"),
            WatchEnd::PollLimit => debug!("Stopped after {} polls", report.polls),
            WatchEnd::Interrupted => info!("Stopped watching game {}", game_id),
        }
        Ok(())
    }

    /// Poll loop behind `handle_watch`.
    ///
    /// `stop` is raced against both the interval tick and the in-flight poll, so
    /// it ends the loop even while a slow request is retrying. `on_update` runs
    /// only when the state differs from the previous poll.
    pub async fn watch<S, F>(
        &self,
        game_id: &GameId,
        max_polls: Option<u64>,
        stop: S,
        mut on_update: F,
    ) -> Result<WatchReport>
    where
        S: Future,
        F: FnMut(&GameState),
    {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tokio::pin!(stop);

        let mut report = WatchReport {
            polls: 0,
            updates: 0,
            end: WatchEnd::Interrupted,
        };
        let mut last: Option<GameState> = None;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut stop => return Ok(report),
            }

            let state = tokio::select! {
                result = self.client.get_game_state(game_id) => {
                    result.with_context(|| format!("Lost track of game {}", game_id))?
                }
                _ = &mut stop => return Ok(report),
            };
            report.polls += 1;

            if last.as_ref() != Some(&state) {
                report.updates += 1;
                on_update(&state);
            }
            if state.is_ended() {
                report.end = WatchEnd::GameOver;
                return Ok(report);
            }
            last = Some(state);

            if max_polls.is_some_and(|max| report.polls >= max) {
                report.end = WatchEnd::PollLimit;
                return Ok(report);
            }
        }
    }

    pub fn handle_config(&self) -> Result<()> {
        let path = Config::default_config_file()?;
        println!("Configuration file: {}", path.display());
        println!("{}", display::format_config(&self.config));
        Ok(())
    }
}
