//! Typed HTTP facade over the REST API, one method per endpoint.
//!
//! Every call propagates its failure unchanged except [`ApiClient::list_teams`], which
//! falls back to the last listing kept in a [`TeamCache`] (or an empty list).

mod cache;
mod error;

use reqwest::{
    Client, Method, RequestBuilder, Response, Url,
    header::{CONTENT_DISPOSITION, HeaderMap},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

pub use self::cache::TeamCache;
pub use self::error::{ClientError, ClientResult};
use crate::dto::{
    common::{ErrorResponse, MessageResponse},
    game::{GameView, SaveGameRequest, SaveGameResponse},
    health::HealthResponse,
    matchup::{CreateMatchRequest, MatchView},
    team::{AddPlayerRequest, CreateTeamRequest, PlayerView, TeamView},
};

const UNKNOWN_ERROR: &str = "unknown error";

/// Report to download through [`ApiClient::download_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    /// Every registered team.
    Teams,
    /// Roster of the team with this id.
    TeamPlayers(String),
    /// Every scheduled match.
    MatchHistory,
    /// Both rosters of the match with this id.
    MatchRoster(i64),
    /// Statistics sheet of the player with this id.
    PlayerStats(String),
}

impl ReportRequest {
    fn segments(&self) -> Vec<String> {
        let (root, id, leaf) = match self {
            ReportRequest::Teams => ("teams", None, None),
            ReportRequest::TeamPlayers(team_id) => ("teams", Some(team_id.clone()), Some("players")),
            ReportRequest::MatchHistory => ("matches", None, Some("history")),
            ReportRequest::MatchRoster(match_id) => {
                ("matches", Some(match_id.to_string()), Some("roster"))
            }
            ReportRequest::PlayerStats(player_id) => {
                ("players", Some(player_id.clone()), Some("stats"))
            }
        };

        let mut segments = vec!["reports".to_owned(), root.to_owned()];
        segments.extend(id);
        segments.extend(leaf.map(str::to_owned));
        segments
    }
}

/// Downloaded PDF report.
#[derive(Debug, Clone)]
pub struct ReportDownload {
    /// Filename suggested by the server's `Content-Disposition` header.
    pub filename: Option<String>,
    /// PDF document.
    pub bytes: Vec<u8>,
}

/// Client for the courtside REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    cache: TeamCache,
}

impl ApiClient {
    /// Build a client for the server at `base_url` (for example `http://localhost:3010`).
    pub fn new(base_url: &str, cache: TeamCache) -> ClientResult<Self> {
        let invalid = |message: String| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            message,
        };
        let base_url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".into()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            cache,
        })
    }

    /// `GET /api/health`.
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get_json(&["health"]).await
    }

    /// Team listing with cache fallback: never fails.
    pub async fn list_teams(&self) -> Vec<TeamView> {
        match self.get_json::<Vec<TeamView>>(&["teams"]).await {
            Ok(teams) => {
                self.cache.store(&teams).await;
                teams
            }
            Err(err) => {
                warn!(error = %err, "team listing failed; serving cached teams");
                self.cache.load().await.unwrap_or_default()
            }
        }
    }

    /// `POST /api/teams`.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> ClientResult<MessageResponse> {
        self.send_json(Method::POST, &["teams"], Some(request)).await
    }

    /// `DELETE /api/teams/{id}`.
    pub async fn delete_team(&self, id: &str) -> ClientResult<MessageResponse> {
        self.send_json::<(), _>(Method::DELETE, &["teams", id], None)
            .await
    }

    /// `POST /api/teams/{teamId}/players`.
    pub async fn add_player(
        &self,
        team_id: &str,
        request: &AddPlayerRequest,
    ) -> ClientResult<MessageResponse> {
        self.send_json(Method::POST, &["teams", team_id, "players"], Some(request))
            .await
    }

    /// `DELETE /api/teams/players/{playerId}`.
    pub async fn delete_player(&self, id: &str) -> ClientResult<MessageResponse> {
        self.send_json::<(), _>(Method::DELETE, &["teams", "players", id], None)
            .await
    }

    /// `GET /api/players`.
    pub async fn list_players(&self) -> ClientResult<Vec<PlayerView>> {
        self.get_json(&["players"]).await
    }

    /// `POST /api/games`.
    pub async fn save_game(&self, request: &SaveGameRequest) -> ClientResult<SaveGameResponse> {
        self.send_json(Method::POST, &["games"], Some(request)).await
    }

    /// `GET /api/games`.
    pub async fn list_games(&self) -> ClientResult<Vec<GameView>> {
        self.get_json(&["games"]).await
    }

    /// `GET /api/games/{id}`.
    pub async fn get_game(&self, id: i64) -> ClientResult<GameView> {
        self.get_json(&["games", &id.to_string()]).await
    }

    /// `POST /api/matches`.
    pub async fn create_match(&self, request: &CreateMatchRequest) -> ClientResult<MessageResponse> {
        self.send_json(Method::POST, &["matches"], Some(request))
            .await
    }

    /// `GET /api/matches`.
    pub async fn list_matches(&self) -> ClientResult<Vec<MatchView>> {
        self.get_json(&["matches"]).await
    }

    /// Download one PDF report.
    pub async fn download_report(&self, report: ReportRequest) -> ClientResult<ReportDownload> {
        let segments = report.segments();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let url = self.endpoint(&segments);
        let path = url.path().to_owned();

        let response = self.execute(self.client.get(url), &path).await?;
        let filename = attachment_filename(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Decode { path, source })?;

        Ok(ReportDownload {
            filename,
            bytes: bytes.to_vec(),
        })
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn get_json<T>(&self, segments: &[&str]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.send_json::<(), T>(Method::GET, segments, None).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let path = url.path().to_owned();
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.execute(request, &path).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { path, source })
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|source| ClientError::Request {
            path: path.to_owned(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| UNKNOWN_ERROR.to_owned());
        Err(ClientError::Status {
            path: path.to_owned(),
            status,
            message,
        })
    }
}

fn attachment_filename(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_owned())
        .filter(|name| !name.is_empty())
}
