use utoipa::OpenApi;

/// OpenAPI description of every route under `/api`.
#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Courtside Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::teams::list_teams,
        crate::routes::teams::create_team,
        crate::routes::teams::delete_team,
        crate::routes::teams::add_player,
        crate::routes::teams::delete_player,
        crate::routes::teams::list_players,
        crate::routes::games::save_game,
        crate::routes::games::list_games,
        crate::routes::games::get_game,
        crate::routes::matches::create_match,
        crate::routes::matches::list_matches,
        crate::routes::reports::teams_report,
        crate::routes::reports::players_report,
        crate::routes::reports::match_history_report,
        crate::routes::reports::match_roster_report,
        crate::routes::reports::player_stats_report,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::MessageResponse,
            crate::dto::common::ErrorResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::AddPlayerRequest,
            crate::dto::team::TeamView,
            crate::dto::team::PlayerView,
            crate::dto::game::TeamRef,
            crate::dto::game::Play,
            crate::dto::game::Sanction,
            crate::dto::game::SaveGameRequest,
            crate::dto::game::SaveGameResponse,
            crate::dto::game::GameView,
            crate::dto::matchup::CreateMatchRequest,
            crate::dto::matchup::MatchView,
            crate::dao::models::GameStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Teams and rosters"),
        (name = "games", description = "Recorded games"),
        (name = "matches", description = "Scheduled matches"),
        (name = "reports", description = "PDF reports"),
    )
)]
pub struct ApiDoc;
