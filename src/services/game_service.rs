//! Recording finished games and reading them back.

use tracing::{debug, info};

use crate::{
    dto::game::{GameView, SaveGameRequest, SaveGameResponse},
    error::ServiceError,
    state::SharedState,
};

/// Persist the game with its full history and sanctions in a single transaction.
pub async fn save_game(
    state: &SharedState,
    request: SaveGameRequest,
) -> Result<SaveGameResponse, ServiceError> {
    let plays = request.history.len();
    let sanctions = request.sanctions.len();
    let game_id = state.store().save_game(request.into()).await?;
    info!(game_id, plays, sanctions, "game saved");

    Ok(SaveGameResponse {
        message: "Game saved".into(),
        game_id,
    })
}

/// Every recorded game, newest first, without event logs.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameView>, ServiceError> {
    let games = state.store().list_games().await?;
    debug!(count = games.len(), "listed games");
    Ok(games.into_iter().map(Into::into).collect())
}

/// One game with its history and sanctions, most recent event first.
pub async fn get_game(state: &SharedState, id: i64) -> Result<GameView, ServiceError> {
    let Some(detail) = state.store().find_game(id).await? else {
        return Err(ServiceError::NotFound(format!("game `{id}` not found")));
    };
    Ok(detail.into())
}

#[cfg(all(test, feature = "sqlite-store"))]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        dao::league_store::sqlite::{SqliteConfig, SqliteLeagueStore},
        state::AppState,
    };

    async fn state() -> SharedState {
        let store = SqliteLeagueStore::connect(SqliteConfig::in_memory())
            .await
            .unwrap();
        AppState::new(Arc::new(store))
    }

    fn request(sanction_timestamp: i64) -> SaveGameRequest {
        serde_json::from_value(json!({
            "teamA": {"id": "a", "name": "Aguilas"},
            "teamB": {"id": "b", "name": "Bisontes"},
            "finalScoreA": 3,
            "finalScoreB": 0,
            "period": 2,
            "status": "completed",
            "stats": {"timeouts": 1},
            "history": [
                {"team": "A", "delta": 2, "scoreA": 2, "scoreB": 0, "period": 1, "t": 10},
                {"team": "A", "delta": 1, "scoreA": 3, "scoreB": 0, "period": 2, "t": 20}
            ],
            "sanctions": [
                {"team": "B", "type": "personal", "period": 2, "t": sanction_timestamp}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn saved_game_is_returned_with_newest_events_first() {
        let state = state().await;
        let saved = save_game(&state, request(15)).await.unwrap();

        let game = get_game(&state, saved.game_id).await.unwrap();
        let history = game.history.unwrap();
        assert_eq!(history[0].timestamp, 20);
        assert_eq!(history[1].timestamp, 10);
        assert_eq!(game.sanctions.unwrap()[0].kind, "personal");
        assert_eq!(game.stats, json!({"timeouts": 1}));
        assert_eq!(game.settings, json!({}));
    }

    #[tokio::test]
    async fn rejected_sanction_leaves_no_game_behind() {
        let state = state().await;
        let err = save_game(&state, request(-5)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert!(list_games(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let state = state().await;
        let err = get_game(&state, 404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
