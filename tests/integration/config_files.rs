//! Configuration file handling in src/cli/app.rs

use snake_client::cli::app::CONFIG_DIR_ENV;
use snake_client::cli::{App, Config};
use snake_client::Direction;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_is_created_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let config = Config::load_or_create(&path).expect("defaults written");

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
api_base_url = "http://snake.local:9000/api/"
max_retries = 4

[game]
poll_interval_ms = 250

[game.key_mapping]
ArrowUp = "UP"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).expect("valid config");

    let endpoint = config.endpoint();
    assert_eq!(endpoint.base_url(), "http://snake.local:9000/api");
    assert_eq!(endpoint.timeout(), Duration::from_millis(3000));
    assert_eq!(endpoint.max_retries(), 4);
    assert_eq!(config.poll_interval(), Duration::from_millis(250));
    assert_eq!(config.game.width, 15);
    assert_eq!(config.direction_for_key("ArrowUp"), Some(Direction::Up));
    assert_eq!(config.direction_for_key("KeyW"), None);
}

#[test]
fn test_invalid_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    std::fs::write(&path, "timeout_ms = 0\n").unwrap();
    assert!(Config::load_from(&path).is_err());

    std::fs::write(&path, "[game.key_mapping]\nKeyQ = \"sideways\"\n").unwrap();
    assert!(Config::load_from(&path).is_err());

    std::fs::write(&path, "this is not toml [").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_app_client_uses_configured_endpoint() {
    let config = Config {
        api_base_url: "http://example.test/api".into(),
        timeout_ms: 750,
        max_retries: 1,
        ..Config::default()
    };

    let app = App::with_config(config);

    assert_eq!(app.client.config().base_url(), "http://example.test/api");
    assert_eq!(app.client.config().timeout(), Duration::from_millis(750));
    assert_eq!(app.client.config().max_retries(), 1);
}

#[test]
fn test_config_dir_env_override() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("snake");
    let original = std::env::var(CONFIG_DIR_ENV).ok();
    std::env::set_var(CONFIG_DIR_ENV, &dir);

    let file = Config::default_config_file();
    let loaded = Config::load_or_create_default();

    match original {
        Some(value) => std::env::set_var(CONFIG_DIR_ENV, value),
        None => std::env::remove_var(CONFIG_DIR_ENV),
    }

    assert_eq!(file.unwrap(), dir.join("config.toml"));
    assert_eq!(loaded.expect("defaults written"), Config::default());
    assert!(dir.join("config.toml").exists());
}
