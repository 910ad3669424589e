use crate::cli::app::Config;
use crate::game::{GameState, Leaderboard};

/// One-line summary of a game state
pub fn format_game_summary(state: &GameState) -> String {
    let id = state.id().map(|id| id.to_string()).unwrap_or_else(|| "?".into());
    let status = state.status().unwrap_or("unknown");
    let score = state
        .score()
        .map(|score| score.to_string())
        .unwrap_or_else(|| "-".into());
    format!("game {} | status: {} | score: {}", id, status, score)
}

/// Leaderboard table, rows in service order
pub fn format_leaderboard(board: &Leaderboard) -> String {
    if board.is_empty() {
        return "No scores recorded yet.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<5} {:<16} {:>8} {:>8} {:>6}\n",
        "RANK", "PLAYER", "SCORE", "TIME", "FOOD"
    ));
    out.push_str(&"-".repeat(47));
    for (rank, entry) in board.iter().enumerate() {
        // Raw JSON text, so irregular values (fractions, strings) still show up
        let field = |name: &str| {
            entry
                .get(name)
                .filter(|value| !value.is_null())
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".into())
        };
        out.push_str(&format!(
            "\n{:<5} {:<16} {:>8} {:>8} {:>6}",
            rank + 1,
            entry.player_name().unwrap_or("-"),
            field("score"),
            field("time_played"),
            field("food_count"),
        ));
    }
    out
}

pub fn format_config(config: &Config) -> String {
    let mut out = format!(
        "api_base_url: {}\ntimeout: {}ms\nmax_retries: {}\nboard: {}x{}\npoll_interval: {}ms",
        config.api_base_url,
        config.timeout_ms,
        config.max_retries,
        config.game.width,
        config.game.height,
        config.game.poll_interval_ms,
    );
    for (key, direction) in &config.game.key_mapping {
        out.push_str(&format!("\nkey {} -> {}", key, direction));
    }
    out
}
