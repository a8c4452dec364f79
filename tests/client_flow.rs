#![cfg(all(feature = "client", feature = "sqlite-store"))]

use std::{net::SocketAddr, sync::Arc};

use courtside_back::{
    build_app,
    client::{ApiClient, ClientError, ReportRequest, TeamCache},
    dao::league_store::{
        LeagueStore,
        sqlite::{SqliteConfig, SqliteLeagueStore},
    },
    dto::team::{AddPlayerRequest, CreateTeamRequest},
    state::AppState,
};
use reqwest::StatusCode;
use tokio::net::TcpListener;

mod common;
use common::UI_ORIGIN;

async fn spawn_server() -> SocketAddr {
    let store = SqliteLeagueStore::connect(SqliteConfig::in_memory())
        .await
        .expect("in-memory store");
    let store: Arc<dyn LeagueStore> = Arc::new(store);
    let app = build_app(AppState::new(store), UI_ORIGIN);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Address nothing is listening on.
async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn team(id: &str, name: &str) -> CreateTeamRequest {
    CreateTeamRequest {
        id: id.into(),
        name: name.into(),
        logo: None,
        city: None,
    }
}

#[tokio::test]
async fn team_listing_refreshes_the_cache_and_falls_back_to_it() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("teams.json");

    let addr = spawn_server().await;
    let online = ApiClient::new(&format!("http://{addr}"), TeamCache::new(&cache_path)).unwrap();
    online.create_team(&team("t1", "Falcons")).await.unwrap();
    online
        .add_player(
            "t1",
            &AddPlayerRequest {
                id: "p1".into(),
                name: "Ana".into(),
                number: "7".into(),
            },
        )
        .await
        .unwrap();
    let fresh = online.list_teams().await;
    assert_eq!(fresh.len(), 1);

    let dead = dead_address().await;
    let offline = ApiClient::new(&format!("http://{dead}"), TeamCache::new(&cache_path)).unwrap();
    let cached = offline.list_teams().await;
    assert_eq!(cached, fresh);
    assert_eq!(cached[0].players[0].name, "Ana");
}

#[tokio::test]
async fn team_listing_without_cache_is_empty_when_offline() {
    let dir = tempfile::tempdir().unwrap();
    let dead = dead_address().await;
    let offline = ApiClient::new(
        &format!("http://{dead}"),
        TeamCache::new(dir.path().join("teams.json")),
    )
    .unwrap();

    assert!(offline.list_teams().await.is_empty());
}

#[tokio::test]
async fn other_calls_propagate_transport_errors() {
    let dir = tempfile::tempdir().unwrap();
    let dead = dead_address().await;
    let offline = ApiClient::new(
        &format!("http://{dead}"),
        TeamCache::new(dir.path().join("teams.json")),
    )
    .unwrap();

    assert!(matches!(
        offline.list_games().await,
        Err(ClientError::Request { .. })
    ));
    assert!(matches!(
        offline.create_team(&team("t1", "Falcons")).await,
        Err(ClientError::Request { .. })
    ));
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server().await;
    let client = ApiClient::new(
        &format!("http://{addr}"),
        TeamCache::new(dir.path().join("teams.json")),
    )
    .unwrap();

    let err = client.get_game(77).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ClientError::Status { message, .. } => assert!(message.contains("77")),
        other => panic!("unexpected error {other:?}"),
    }

    client.create_team(&team("t1", "Falcons")).await.unwrap();
    let err = client.create_team(&team("t1", "Falcons")).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn reports_download_with_their_filename() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server().await;
    let client = ApiClient::new(
        &format!("http://{addr}"),
        TeamCache::new(dir.path().join("teams.json")),
    )
    .unwrap();

    let report = client.download_report(ReportRequest::Teams).await.unwrap();
    assert_eq!(report.filename.as_deref(), Some("teams_report.pdf"));
    assert!(report.bytes.starts_with(b"%PDF"));

    let err = client
        .download_report(ReportRequest::PlayerStats("ghost".into()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn health_and_game_round_trip_through_the_client() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server().await;
    let client = ApiClient::new(
        &format!("http://{addr}"),
        TeamCache::new(dir.path().join("teams.json")),
    )
    .unwrap();

    assert!(client.health().await.unwrap().ok);

    let request = serde_json::from_value(common::test_data::game(3, 1)).unwrap();
    let saved = client.save_game(&request).await.unwrap();
    let game = client.get_game(saved.game_id).await.unwrap();
    assert_eq!(game.history.unwrap().len(), 3);
    assert_eq!(client.list_games().await.unwrap().len(), 1);
}
