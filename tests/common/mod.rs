#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use courtside_back::{
    build_app,
    dao::league_store::{
        LeagueStore,
        sqlite::{SqliteConfig, SqliteLeagueStore},
    },
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const UI_ORIGIN: &str = "http://localhost:5173";

/// Router backed by a private in-memory database, plus a handle on that database.
pub struct TestContext {
    pub app: Router,
    pub store: Arc<dyn LeagueStore>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let store = SqliteLeagueStore::connect(SqliteConfig::in_memory())
            .await
            .expect("in-memory store");
        let store: Arc<dyn LeagueStore> = Arc::new(store);
        let app = build_app(AppState::new(store.clone()), UI_ORIGIN);
        TestContext { app, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        json_response(self.send(Request::get(uri).body(Body::empty()).unwrap()).await).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        json_response(
            self.send(Request::delete(uri).body(Body::empty()).unwrap())
                .await,
        )
        .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        json_response(self.send(request).await).await
    }
}

pub async fn json_response(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub mod test_data {
    use serde_json::{Value, json};

    pub fn team(id: &str, name: &str) -> Value {
        json!({ "id": id, "name": name, "logo": null, "city": "Antigua" })
    }

    pub fn player(id: &str, name: &str, number: &str) -> Value {
        json!({ "id": id, "name": name, "number": number })
    }

    pub fn game(plays: usize, sanctions: usize) -> Value {
        let history: Vec<Value> = (0..plays)
            .map(|index| {
                json!({
                    "team": if index % 2 == 0 { "A" } else { "B" },
                    "playerName": format!("Player {index}"),
                    "playerNumber": index.to_string(),
                    "delta": 2,
                    "scoreA": index * 2,
                    "scoreB": index,
                    "period": 1 + index / 5,
                    "t": 1_000 + index as i64 * 100
                })
            })
            .collect();
        let sanctions: Vec<Value> = (0..sanctions)
            .map(|index| {
                json!({
                    "team": "B",
                    "playerName": "Bea",
                    "playerNumber": "11",
                    "type": "personal",
                    "period": 2,
                    "timestamp": 5_000 + index as i64 * 10
                })
            })
            .collect();

        json!({
            "teamA": { "id": "a", "name": "Aguilas" },
            "teamB": { "id": "b", "name": "Bisontes" },
            "finalScoreA": 70,
            "finalScoreB": 65,
            "period": 4,
            "status": "completed",
            "stats": { "fouls": { "A": 12, "B": 9 } },
            "history": history,
            "sanctions": sanctions,
            "settings": { "periodMinutes": 10 }
        })
    }
}
