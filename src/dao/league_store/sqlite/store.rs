use futures::future::BoxFuture;
use sqlx::{Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{
    config::SqliteConfig,
    connection::establish_connection,
    error::{SqliteDaoError, SqliteResult},
    models::{
        SqliteGameRow, SqliteMatchRow, SqlitePlayRow, SqlitePlayerProfileRow, SqlitePlayerRow,
        SqliteSanctionRow, SqliteTeamRow, datetime_to_millis, encode_payload,
    },
};
use crate::dao::{
    league_store::LeagueStore,
    models::{
        GameDetailEntity, GameEntity, MatchEntity, MatchRosterEntity, NewGameEntity,
        NewMatchEntity, NewTeamEntity, PlayerEntity, PlayerProfileEntity, TeamEntity,
    },
    storage::StorageResult,
};

const LIST_TEAMS_SQL: &str = r#"
    SELECT t.id, t.name, t.logo, t.city, t.created_at,
        (SELECT json_group_array(json_object('id', p.id, 'name', p.name, 'number', p.number))
         FROM players p
         WHERE p.team_id = t.id) AS players
    FROM teams t
    ORDER BY t.created_at DESC, t.rowid DESC
"#;

const PLAYERS_BY_NUMBER: &str = "CAST(number AS INTEGER), number, id";

const MATCH_COLUMNS_SQL: &str = r#"
    SELECT m.id, m.home_team_id, h.name AS home_team_name,
           m.away_team_id, a.name AS away_team_name, m.date_time
    FROM matches m
    JOIN teams h ON h.id = m.home_team_id
    JOIN teams a ON a.id = m.away_team_id
"#;

/// [`LeagueStore`] backed by a pooled SQLite database.
#[derive(Clone)]
pub struct SqliteLeagueStore {
    pool: SqlitePool,
}

impl SqliteLeagueStore {
    /// Open the pool and make sure the schema exists.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let pool = establish_connection(&config).await?;
        Ok(Self { pool })
    }

    /// Underlying pool, for maintenance and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ping(&self) -> SqliteResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::HealthCheck { source })?;
        Ok(())
    }

    async fn list_teams(&self) -> SqliteResult<Vec<TeamEntity>> {
        let rows: Vec<SqliteTeamRow> = sqlx::query_as(LIST_TEAMS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::ListTeams { source })?;

        Ok(rows.into_iter().map(SqliteTeamRow::into_entity).collect())
    }

    async fn find_team(&self, id: String) -> SqliteResult<Option<TeamEntity>> {
        let row: Option<SqliteTeamRow> =
            sqlx::query_as("SELECT id, name, logo, city, created_at FROM teams WHERE id = ?")
                .bind(&id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|source| SqliteDaoError::LoadTeam {
                    id: id.clone(),
                    source,
                })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let players = self
            .players_of(&id)
            .await
            .map_err(|source| SqliteDaoError::LoadTeam {
                id: id.clone(),
                source,
            })?;

        let mut team = row.into_entity();
        team.players = players;
        Ok(Some(team))
    }

    async fn players_of(&self, team_id: &str) -> Result<Vec<PlayerEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT id, team_id, name, number FROM players WHERE team_id = ? ORDER BY {PLAYERS_BY_NUMBER}"
        );
        let rows: Vec<SqlitePlayerRow> = sqlx::query_as(&sql)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_team(&self, team: NewTeamEntity) -> SqliteResult<()> {
        sqlx::query("INSERT INTO teams (id, name, logo, city, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&team.id)
            .bind(&team.name)
            .bind(&team.logo)
            .bind(&team.city)
            .bind(datetime_to_millis(OffsetDateTime::now_utc()))
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::CreateTeam {
                id: team.id.clone(),
                source,
            })?;
        Ok(())
    }

    async fn delete_team(&self, id: String) -> SqliteResult<()> {
        // Matches keep their teams, so refuse before touching the roster.
        let matches: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM matches WHERE home_team_id = ?1 OR away_team_id = ?1",
        )
        .bind(&id)
        .fetch_one(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::DeleteTeam {
            id: id.clone(),
            source,
        })?;
        if matches > 0 {
            return Err(SqliteDaoError::TeamScheduled { id, matches });
        }

        // Players first so the team row has no dependents left. The two
        // statements run outside a transaction.
        let removed_players = sqlx::query("DELETE FROM players WHERE team_id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::DeleteTeam {
                id: id.clone(),
                source,
            })?
            .rows_affected();

        sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::DeleteTeam {
                id: id.clone(),
                source,
            })?;

        debug!(team_id = %id, removed_players, "team deleted");
        Ok(())
    }

    async fn add_player(&self, player: PlayerEntity) -> SqliteResult<()> {
        sqlx::query("INSERT INTO players (id, team_id, name, number) VALUES (?, ?, ?, ?)")
            .bind(&player.id)
            .bind(&player.team_id)
            .bind(&player.name)
            .bind(&player.number)
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::AddPlayer {
                id: player.id.clone(),
                team_id: player.team_id.clone(),
                source,
            })?;
        Ok(())
    }

    async fn delete_player(&self, id: String) -> SqliteResult<()> {
        sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::DeletePlayer {
                id: id.clone(),
                source,
            })?;
        Ok(())
    }

    async fn list_players(&self) -> SqliteResult<Vec<PlayerEntity>> {
        let sql = format!(
            "SELECT id, team_id, name, number FROM players ORDER BY team_id, {PLAYERS_BY_NUMBER}"
        );
        let rows: Vec<SqlitePlayerRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::ListPlayers { source })?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_player(&self, id: String) -> SqliteResult<Option<PlayerProfileEntity>> {
        let row: Option<SqlitePlayerProfileRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.team_id, p.name, p.number, t.name AS team_name
            FROM players p
            JOIN teams t ON t.id = p.team_id
            WHERE p.id = ?
            "#,
        )
        .bind(&id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::LoadPlayer {
            id: id.clone(),
            source,
        })?;

        Ok(row.map(|row| PlayerProfileEntity {
            player: PlayerEntity {
                id: row.id,
                team_id: row.team_id,
                name: row.name,
                number: row.number,
            },
            team_name: row.team_name,
        }))
    }

    async fn save_game(&self, game: NewGameEntity) -> SqliteResult<i64> {
        let stats = encode_payload("stats", game.stats.as_ref())?;
        let settings = encode_payload("settings", game.settings.as_ref())?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| SqliteDaoError::SaveGame {
                step: "begin transaction",
                source,
            })?;

        match insert_game(&mut tx, &game, stats, settings).await {
            Ok(id) => {
                tx.commit().await.map_err(|source| SqliteDaoError::SaveGame {
                    step: "commit",
                    source,
                })?;
                debug!(
                    game_id = id,
                    plays = game.history.len(),
                    sanctions = game.sanctions.len(),
                    "game saved"
                );
                Ok(id)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "failed to roll back game transaction");
                }
                Err(err)
            }
        }
    }

    async fn list_games(&self) -> SqliteResult<Vec<GameEntity>> {
        let rows: Vec<SqliteGameRow> =
            sqlx::query_as("SELECT * FROM games ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|source| SqliteDaoError::ListGames { source })?;

        rows.into_iter().map(GameEntity::try_from).collect()
    }

    async fn find_game(&self, id: i64) -> SqliteResult<Option<GameDetailEntity>> {
        let load_err = |source| SqliteDaoError::LoadGame { id, source };

        let row: Option<SqliteGameRow> = sqlx::query_as("SELECT * FROM games WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(load_err)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let history: Vec<SqlitePlayRow> = sqlx::query_as(
            r#"
            SELECT team, player_name, player_number, delta, score_a, score_b, period, timestamp
            FROM game_history
            WHERE game_id = ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(load_err)?;

        let sanctions: Vec<SqliteSanctionRow> = sqlx::query_as(
            r#"
            SELECT team, player_name, player_number, type, period, timestamp
            FROM sanctions
            WHERE game_id = ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(load_err)?;

        Ok(Some(GameDetailEntity {
            game: row.try_into()?,
            history: history.into_iter().map(Into::into).collect(),
            sanctions: sanctions.into_iter().map(Into::into).collect(),
        }))
    }

    async fn create_match(&self, matchup: NewMatchEntity) -> SqliteResult<i64> {
        sqlx::query_scalar(
            "INSERT INTO matches (home_team_id, away_team_id, date_time) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&matchup.home_team_id)
        .bind(&matchup.away_team_id)
        .bind(datetime_to_millis(matchup.date_time))
        .fetch_one(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::CreateMatch {
            home: matchup.home_team_id.clone(),
            away: matchup.away_team_id.clone(),
            source,
        })
    }

    async fn list_matches(&self) -> SqliteResult<Vec<MatchEntity>> {
        let sql = format!("{MATCH_COLUMNS_SQL} ORDER BY m.date_time DESC, m.id DESC");
        let rows: Vec<SqliteMatchRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::ListMatches { source })?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_match_roster(&self, id: i64) -> SqliteResult<Option<MatchRosterEntity>> {
        let sql = format!("{MATCH_COLUMNS_SQL} WHERE m.id = ?");
        let row: Option<SqliteMatchRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::LoadMatch { id, source })?;
        let Some(row) = row else {
            return Ok(None);
        };

        let matchup: MatchEntity = row.into();
        let home_players = self
            .players_of(&matchup.home_team.id)
            .await
            .map_err(|source| SqliteDaoError::LoadMatch { id, source })?;
        let away_players = self
            .players_of(&matchup.away_team.id)
            .await
            .map_err(|source| SqliteDaoError::LoadMatch { id, source })?;

        Ok(Some(MatchRosterEntity {
            matchup,
            home_players,
            away_players,
        }))
    }
}

/// Insert the game row, then every play and sanction in input order.
async fn insert_game(
    tx: &mut Transaction<'_, Sqlite>,
    game: &NewGameEntity,
    stats: Option<String>,
    settings: Option<String>,
) -> SqliteResult<i64> {
    let game_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO games (team_a_id, team_a_name, team_b_id, team_b_name,
                           final_score_a, final_score_b, period, status,
                           stats, settings, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&game.team_a.id)
    .bind(&game.team_a.name)
    .bind(&game.team_b.id)
    .bind(&game.team_b.name)
    .bind(game.final_score_a)
    .bind(game.final_score_b)
    .bind(game.period)
    .bind(game.status.as_str())
    .bind(stats)
    .bind(settings)
    .bind(datetime_to_millis(OffsetDateTime::now_utc()))
    .fetch_one(&mut **tx)
    .await
    .map_err(|source| SqliteDaoError::SaveGame {
        step: "insert game",
        source,
    })?;

    for play in &game.history {
        sqlx::query(
            r#"
            INSERT INTO game_history (game_id, team, player_name, player_number,
                                      delta, score_a, score_b, period, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(game_id)
        .bind(&play.team)
        .bind(&play.player_name)
        .bind(&play.player_number)
        .bind(play.delta)
        .bind(play.score_a)
        .bind(play.score_b)
        .bind(play.period)
        .bind(play.timestamp)
        .execute(&mut **tx)
        .await
        .map_err(|source| SqliteDaoError::SaveGame {
            step: "insert play",
            source,
        })?;
    }

    for sanction in &game.sanctions {
        sqlx::query(
            r#"
            INSERT INTO sanctions (game_id, team, player_name, player_number,
                                   type, period, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(game_id)
        .bind(&sanction.team)
        .bind(&sanction.player_name)
        .bind(&sanction.player_number)
        .bind(&sanction.kind)
        .bind(sanction.period)
        .bind(sanction.timestamp)
        .execute(&mut **tx)
        .await
        .map_err(|source| SqliteDaoError::SaveGame {
            step: "insert sanction",
            source,
        })?;
    }

    Ok(game_id)
}

impl LeagueStore for SqliteLeagueStore {
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams().await.map_err(Into::into) })
    }

    fn find_team(&self, id: String) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team(id).await.map_err(Into::into) })
    }

    fn create_team(&self, team: NewTeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.create_team(team).await.map_err(Into::into) })
    }

    fn delete_team(&self, id: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(id).await.map_err(Into::into) })
    }

    fn add_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.add_player(player).await.map_err(Into::into) })
    }

    fn delete_player(&self, id: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.delete_player(id).await.map_err(Into::into) })
    }

    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_players().await.map_err(Into::into) })
    }

    fn find_player(
        &self,
        id: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerProfileEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_player(id).await.map_err(Into::into) })
    }

    fn save_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<i64>> {
        let store = self.clone();
        Box::pin(async move { store.save_game(game).await.map_err(Into::into) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_games().await.map_err(Into::into) })
    }

    fn find_game(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<GameDetailEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn create_match(&self, matchup: NewMatchEntity) -> BoxFuture<'static, StorageResult<i64>> {
        let store = self.clone();
        Box::pin(async move { store.create_match(matchup).await.map_err(Into::into) })
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_matches().await.map_err(Into::into) })
    }

    fn find_match_roster(
        &self,
        id: i64,
    ) -> BoxFuture<'static, StorageResult<Option<MatchRosterEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_match_roster(id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        let store = self.clone();
        Box::pin(async move { store.pool.close().await })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;
    use crate::dao::{
        models::{GameStatus, PlayEntity, SanctionEntity, TeamRefEntity},
        storage::StorageError,
    };

    async fn store() -> SqliteLeagueStore {
        SqliteLeagueStore::connect(SqliteConfig::in_memory())
            .await
            .expect("in-memory store")
    }

    fn team(id: &str, name: &str) -> NewTeamEntity {
        NewTeamEntity {
            id: id.into(),
            name: name.into(),
            logo: None,
            city: Some("Quetzaltenango".into()),
        }
    }

    fn player(id: &str, team_id: &str, number: &str) -> PlayerEntity {
        PlayerEntity {
            id: id.into(),
            team_id: team_id.into(),
            name: format!("Player {id}"),
            number: number.into(),
        }
    }

    fn play(timestamp: i64, delta: i32) -> PlayEntity {
        PlayEntity {
            team: "A".into(),
            player_name: Some("Ana".into()),
            player_number: Some("7".into()),
            delta,
            score_a: delta,
            score_b: 0,
            period: 1,
            timestamp,
        }
    }

    fn sanction(timestamp: i64, kind: &str) -> SanctionEntity {
        SanctionEntity {
            team: "B".into(),
            player_name: None,
            player_number: None,
            kind: kind.into(),
            period: 2,
            timestamp,
        }
    }

    fn game(history: Vec<PlayEntity>, sanctions: Vec<SanctionEntity>) -> NewGameEntity {
        NewGameEntity {
            team_a: TeamRefEntity {
                id: "a".into(),
                name: "Aguilas".into(),
            },
            team_b: TeamRefEntity {
                id: "b".into(),
                name: "Bisontes".into(),
            },
            final_score_a: 81,
            final_score_b: 77,
            period: 4,
            status: GameStatus::Completed,
            stats: Some(json!({"fouls": {"A": 3, "B": 5}})),
            settings: None,
            history,
            sanctions,
        }
    }

    async fn count(store: &SqliteLeagueStore, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(store.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn saved_game_reads_back_with_logs_newest_first() {
        let store = store().await;
        let history = vec![play(1_000, 2), play(3_000, 3), play(2_000, -1)];
        let sanctions = vec![sanction(1_500, "personal"), sanction(2_500, "technical")];

        let id = store
            .save_game(game(history.clone(), sanctions.clone()))
            .await
            .unwrap();
        let detail = store.find_game(id).await.unwrap().expect("saved game");

        let mut expected_history = history;
        expected_history.sort_by_key(|play| std::cmp::Reverse(play.timestamp));
        let mut expected_sanctions = sanctions;
        expected_sanctions.sort_by_key(|sanction| std::cmp::Reverse(sanction.timestamp));

        assert_eq!(detail.history, expected_history);
        assert_eq!(detail.sanctions, expected_sanctions);
        assert_eq!(detail.game.stats, json!({"fouls": {"A": 3, "B": 5}}));
        assert_eq!(detail.game.settings, json!({}));
        assert_eq!(detail.game.status, GameStatus::Completed);
        assert_eq!(detail.game.team_b.name, "Bisontes");
    }

    #[tokio::test]
    async fn failing_sanction_rolls_back_the_whole_game() {
        let store = store().await;
        let sanctions = vec![sanction(1_000, "personal"), sanction(-1, "technical")];

        let err = LeagueStore::save_game(&store, game(vec![play(500, 2), play(900, 2)], sanctions))
            .await
            .expect_err("negative timestamp violates the check constraint");

        assert!(matches!(err, StorageError::Persistence { .. }));
        assert_eq!(count(&store, "games").await, 0);
        assert_eq!(count(&store, "game_history").await, 0);
        assert_eq!(count(&store, "sanctions").await, 0);
        assert!(store.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn game_ids_are_not_reused() {
        let store = store().await;
        let first = store.save_game(game(vec![], vec![])).await.unwrap();
        let _ = store
            .save_game(game(vec![], vec![sanction(-5, "bad")]))
            .await
            .unwrap_err();
        let second = store.save_game(game(vec![], vec![])).await.unwrap();

        assert!(second > first);
        let listed: Vec<i64> = store
            .list_games()
            .await
            .unwrap()
            .into_iter()
            .map(|game| game.id)
            .collect();
        assert_eq!(listed, vec![second, first]);
    }

    #[tokio::test]
    async fn malformed_stats_do_not_break_the_listing() {
        let store = store().await;
        let id = store.save_game(game(vec![], vec![])).await.unwrap();
        sqlx::query("UPDATE games SET stats = '{oops' WHERE id = ?")
            .bind(id)
            .execute(store.pool())
            .await
            .unwrap();

        let games = store.list_games().await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].stats, json!({}));
    }

    #[tokio::test]
    async fn unknown_game_is_none() {
        let store = store().await;
        assert!(store.find_game(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn team_listing_nests_players_and_is_stable() {
        let store = store().await;
        store.create_team(team("t1", "Aguilas")).await.unwrap();
        store.create_team(team("t2", "Bisontes")).await.unwrap();
        store.add_player(player("p1", "t1", "4")).await.unwrap();
        store.add_player(player("p2", "t1", "11")).await.unwrap();

        let first = store.list_teams().await.unwrap();
        let second = store.list_teams().await.unwrap();

        assert_eq!(first, second);
        let ids: Vec<&str> = first.iter().map(|team| team.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert_eq!(first[1].players.len(), 2);
        assert!(first[0].players.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_team_removes_its_players() {
        let store = store().await;
        store.create_team(team("t1", "Aguilas")).await.unwrap();
        store.add_player(player("p1", "t1", "4")).await.unwrap();
        store.add_player(player("p2", "t1", "5")).await.unwrap();

        store.delete_team("t1".into()).await.unwrap();

        assert!(store.find_team("t1".into()).await.unwrap().is_none());
        assert!(
            store
                .list_players()
                .await
                .unwrap()
                .iter()
                .all(|player| player.team_id != "t1")
        );
        assert_eq!(count(&store, "players").await, 0);
    }

    #[tokio::test]
    async fn scheduled_team_is_not_deleted_and_keeps_its_roster() {
        let store = store().await;
        store.create_team(team("h", "Aguilas")).await.unwrap();
        store.create_team(team("a", "Bisontes")).await.unwrap();
        store.add_player(player("p1", "h", "4")).await.unwrap();
        store
            .create_match(NewMatchEntity {
                home_team_id: "h".into(),
                away_team_id: "a".into(),
                date_time: datetime!(2025-03-14 19:30 UTC),
            })
            .await
            .unwrap();

        let err = LeagueStore::delete_team(&store, "h".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ForeignKeyViolation { .. }));

        let kept = store.find_team("h".into()).await.unwrap().unwrap();
        assert_eq!(kept.players.len(), 1);
        assert_eq!(count(&store, "players").await, 1);
    }

    #[tokio::test]
    async fn duplicate_and_dangling_inserts_map_to_constraint_errors() {
        let store = store().await;
        store.create_team(team("t1", "Aguilas")).await.unwrap();

        let duplicate = LeagueStore::create_team(&store, team("t1", "Again"))
            .await
            .unwrap_err();
        assert!(matches!(duplicate, StorageError::ConstraintViolation { .. }));

        let dangling = LeagueStore::add_player(&store, player("p1", "missing", "1"))
            .await
            .unwrap_err();
        assert!(matches!(dangling, StorageError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn deleting_unknown_player_is_a_no_op() {
        let store = store().await;
        store.delete_player("ghost".into()).await.unwrap();
    }

    #[tokio::test]
    async fn team_players_are_ordered_by_number() {
        let store = store().await;
        store.create_team(team("t1", "Aguilas")).await.unwrap();
        store.add_player(player("p1", "t1", "23")).await.unwrap();
        store.add_player(player("p2", "t1", "4")).await.unwrap();
        store.add_player(player("p3", "t1", "10")).await.unwrap();

        let numbers: Vec<String> = store
            .find_team("t1".into())
            .await
            .unwrap()
            .unwrap()
            .players
            .into_iter()
            .map(|player| player.number)
            .collect();
        assert_eq!(numbers, vec!["4", "10", "23"]);
    }

    #[tokio::test]
    async fn match_roster_joins_both_teams() {
        let store = store().await;
        store.create_team(team("home", "Aguilas")).await.unwrap();
        store.create_team(team("away", "Bisontes")).await.unwrap();
        store.add_player(player("p1", "home", "1")).await.unwrap();

        let id = store
            .create_match(NewMatchEntity {
                home_team_id: "home".into(),
                away_team_id: "away".into(),
                date_time: datetime!(2025-03-14 19:30 UTC),
            })
            .await
            .unwrap();

        let roster = store.find_match_roster(id).await.unwrap().unwrap();
        assert_eq!(roster.matchup.home_team.name, "Aguilas");
        assert_eq!(roster.matchup.date_time, datetime!(2025-03-14 19:30 UTC));
        assert_eq!(roster.home_players.len(), 1);
        assert!(roster.away_players.is_empty());
        assert!(store.find_match_roster(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn player_profile_includes_team_name() {
        let store = store().await;
        store.create_team(team("t1", "Aguilas")).await.unwrap();
        store.add_player(player("p1", "t1", "8")).await.unwrap();

        let profile = store.find_player("p1".into()).await.unwrap().unwrap();
        assert_eq!(profile.team_name, "Aguilas");
        assert!(store.find_player("p9".into()).await.unwrap().is_none());
    }
}
