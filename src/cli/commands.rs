use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "snake-client")]
#[command(about = "Command-line client for the snake game service")]
pub struct Cli {
    /// Override the configured API base URL (e.g. http://127.0.0.1:8080/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new game and print its id
    New,

    /// Show the current state of a game
    State {
        game_id: String,
        /// Print the full JSON payload
        #[arg(long)]
        raw: bool,
    },

    /// Change the snake's direction
    ///
    /// Accepts a direction (up, down, left, right, any casing) or a bound
    /// key code from the configuration.
    ///
    /// Examples:
    ///   snake-client turn abc123 up
    ///   snake-client turn abc123 KeyA
    Turn { game_id: String, direction: String },

    /// Record a finished game's score
    Save {
        game_id: String,
        #[arg(short, long)]
        player: String,
        #[arg(short, long)]
        score: i64,
    },

    /// Show the leaderboard
    Leaderboard,

    /// Poll a game at the configured interval until it ends
    Watch {
        game_id: String,
        /// Stop after this many polls
        #[arg(long)]
        max_polls: Option<u64>,
    },

    /// Show the configuration file location and values
    Config,
}
