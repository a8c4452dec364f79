/// SQLite backend built on `sqlx`.
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

use crate::dao::models::{
    GameDetailEntity, GameEntity, MatchEntity, MatchRosterEntity, NewGameEntity, NewMatchEntity,
    NewTeamEntity, PlayerEntity, PlayerProfileEntity, TeamEntity,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for teams, games and matches.
pub trait LeagueStore: Send + Sync {
    /// Every team with its roster, newest first.
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Team with its players ordered by jersey number.
    fn find_team(&self, id: String) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// Insert a team; duplicate ids are a constraint violation.
    fn create_team(&self, team: NewTeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Removes the team's players, then the team. Not transactional.
    /// Teams referenced by a match are refused before anything is deleted.
    fn delete_team(&self, id: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Insert a player on an existing team.
    fn add_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove a player; unknown ids are a no-op.
    fn delete_player(&self, id: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Every player across all teams.
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    /// Player with the name of its team.
    fn find_player(
        &self,
        id: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerProfileEntity>>>;
    /// Persist a game and both event logs atomically, returning the generated id.
    fn save_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<i64>>;
    /// Game headers, newest first.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Game with both event logs, newest event first.
    fn find_game(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<GameDetailEntity>>>;
    /// Schedule a match, returning the generated id.
    fn create_match(&self, matchup: NewMatchEntity) -> BoxFuture<'static, StorageResult<i64>>;
    /// Matches, most recent date first.
    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>>;
    /// Match with the rosters of both teams.
    fn find_match_roster(
        &self,
        id: i64,
    ) -> BoxFuture<'static, StorageResult<Option<MatchRosterEntity>>>;
    /// Cheap round trip proving the backend answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Release pooled connections; the store must not be used afterwards.
    fn close(&self) -> BoxFuture<'static, ()>;
}
