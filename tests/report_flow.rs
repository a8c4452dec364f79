#![cfg(feature = "sqlite-store")]

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use lopdf::Document;
use serde_json::json;

mod common;
use common::{TestContext, json_response, test_data};

async fn download(ctx: &TestContext, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let response = ctx
        .send(Request::get(uri).body(Body::empty()).unwrap())
        .await;
    let status = response.status();
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, disposition, bytes)
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

#[tokio::test]
async fn team_without_players_gets_a_pdf_with_no_data_line() {
    let ctx = TestContext::new().await;
    ctx.post("/api/teams", test_data::team("t1", "Falcons")).await;

    let (status, disposition, bytes) = download(&ctx, "/api/reports/teams/t1/players").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(disposition, "attachment; filename=\"players_Falcons.pdf\"");

    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert!(contains(&bytes, "This team has no registered players."));
}

#[tokio::test]
async fn listing_reports_are_pdfs_even_when_empty() {
    let ctx = TestContext::new().await;

    for (uri, filename) in [
        ("/api/reports/teams", "teams_report.pdf"),
        ("/api/reports/matches/history", "match_history.pdf"),
    ] {
        let (status, disposition, bytes) = download(&ctx, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(disposition.contains(filename), "{disposition}");
        assert!(Document::load_mem(&bytes).is_ok());
    }
}

#[tokio::test]
async fn roster_and_player_reports_render_for_known_roots() {
    let ctx = TestContext::new().await;
    ctx.post("/api/teams", test_data::team("h", "Home")).await;
    ctx.post("/api/teams", test_data::team("a", "Away")).await;
    ctx.post("/api/teams/h/players", test_data::player("p1", "Ana", "7"))
        .await;
    let (_, created) = ctx
        .post(
            "/api/matches",
            json!({ "homeTeamId": "h", "awayTeamId": "a", "dateTime": "2025-03-01T18:30:00Z" }),
        )
        .await;
    let match_id = created["id"].as_str().unwrap().to_owned();

    let (status, disposition, bytes) =
        download(&ctx, &format!("/api/reports/matches/{match_id}/roster")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(disposition.contains(&format!("match_{match_id}_roster.pdf")));
    assert!(contains(&bytes, "No registered players."));

    let (status, disposition, bytes) = download(&ctx, "/api/reports/players/p1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert!(disposition.contains("player_stats_Ana.pdf"));
    assert!(contains(&bytes, "(Total points:) Tj"));
    assert!(contains(&bytes, "(N/A) Tj"));
}

#[tokio::test]
async fn unknown_report_roots_are_404_json() {
    let ctx = TestContext::new().await;

    for uri in [
        "/api/reports/teams/ghost/players",
        "/api/reports/matches/42/roster",
        "/api/reports/players/ghost/stats",
    ] {
        let response = ctx
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let (status, body) = json_response(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string());
    }
}
