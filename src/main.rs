use anyhow::Result;
use clap::Parser;
use snake_client::cli::{App, Cli, Commands, Config};
use snake_client::GameId;
use tracing::error;
use tracing_subscriber::EnvFilter;

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_create_default()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
        config.validate()?;
    }
    let app = App::with_config(config);

    match cli.command {
        Commands::New => app.handle_new().await,
        Commands::State { game_id, raw } => app.handle_state(&GameId::from(game_id), raw).await,
        Commands::Turn { game_id, direction } => {
            app.handle_turn(&GameId::from(game_id), &direction).await
        }
        Commands::Save {
            game_id,
            player,
            score,
        } => {
            app.handle_save(&GameId::from(game_id), &player, score)
                .await
        }
        Commands::Leaderboard => app.handle_leaderboard().await,
        Commands::Watch { game_id, max_polls } => {
            app.handle_watch(&GameId::from(game_id), max_polls).await
        }
        Commands::Config => app.handle_config(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
