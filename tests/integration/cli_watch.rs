//! The CLI watch loop against the in-process mock service.

use crate::common::mock_server::{MockService, ServiceState};
use snake_client::cli::{App, Config, GameConfig, WatchEnd, WatchReport};
use snake_client::GameId;
use std::future::pending;
use std::time::{Duration, Instant};

fn app_for(service: &MockService) -> App {
    App::with_config(Config {
        api_base_url: service.base_url(),
        game: GameConfig {
            poll_interval_ms: 20,
            ..GameConfig::default()
        },
        ..Config::default()
    })
}

async fn new_game(app: &App) -> GameId {
    app.client
        .create_game()
        .await
        .expect("create game")
        .id()
        .expect("created game has an id")
}

#[tokio::test]
async fn test_watch_stops_when_game_ends() {
    let service = MockService::start_with(ServiceState {
        end_after_reads: Some(3),
        ..ServiceState::default()
    })
    .await;
    let app = app_for(&service);
    let game_id = new_game(&app).await;

    let mut seen = Vec::new();
    let report = app
        .watch(&game_id, None, pending::<()>(), |state| {
            seen.push(state.status().unwrap_or_default().to_string())
        })
        .await
        .expect("watch finishes");

    assert_eq!(
        report,
        WatchReport {
            polls: 3,
            updates: 2,
            end: WatchEnd::GameOver,
        }
    );
    // The unchanged second read is not reported
    assert_eq!(seen, vec!["running", "ended"]);
    assert_eq!(service.state.lock().unwrap().reads, 3);
}

#[tokio::test]
async fn test_watch_respects_poll_limit() {
    let service = MockService::start().await;
    let app = app_for(&service);
    let game_id = new_game(&app).await;

    let mut updates = 0;
    let report = app
        .watch(&game_id, Some(4), pending::<()>(), |_| updates += 1)
        .await
        .expect("watch finishes");

    assert_eq!(
        report,
        WatchReport {
            polls: 4,
            updates: 1,
            end: WatchEnd::PollLimit,
        }
    );
    assert_eq!(updates, 1);
    assert_eq!(service.state.lock().unwrap().reads, 4);
}

#[tokio::test]
async fn test_stop_signal_interrupts_in_flight_poll() {
    let service = MockService::start_with(ServiceState {
        state_delay: Some(Duration::from_secs(2)),
        ..ServiceState::default()
    })
    .await;
    let app = app_for(&service);
    let game_id = new_game(&app).await;
    let started = Instant::now();

    let report = app
        .watch(
            &game_id,
            None,
            tokio::time::sleep(Duration::from_millis(200)),
            |_| panic!("no state should arrive"),
        )
        .await
        .expect("interrupted watch is not an error");

    assert_eq!(report.end, WatchEnd::Interrupted);
    assert_eq!(report.polls, 0);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_watch_fails_for_unknown_game() {
    let service = MockService::start().await;
    let app = app_for(&service);

    let err = app
        .watch(&GameId::from("nope"), Some(3), pending::<()>(), |_| {})
        .await
        .expect_err("unknown game");

    assert!(format!("{:#}", err).starts_with("Lost track of game nope"));
}

#[tokio::test]
async fn test_handle_watch_returns_after_game_over() {
    let service = MockService::start_with(ServiceState {
        end_after_reads: Some(2),
        ..ServiceState::default()
    })
    .await;
    let app = app_for(&service);
    let game_id = new_game(&app).await;

    tokio::time::timeout(Duration::from_secs(5), app.handle_watch(&game_id, None))
        .await
        .expect("watch ends with the game")
        .expect("watch succeeds");
}
