//! File-backed copy of the last successful team listing.

use std::{io::ErrorKind, path::PathBuf};

use tracing::{debug, warn};

use crate::dto::team::TeamView;

/// JSON file holding the most recent team listing fetched from the server.
#[derive(Debug, Clone)]
pub struct TeamCache {
    path: PathBuf,
}

impl TeamCache {
    /// Cache stored at `path`; nothing is read until [`TeamCache::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cached listing, or `None` when nothing usable has been stored yet.
    pub async fn load(&self) -> Option<Vec<TeamView>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read team cache");
                return None;
            }
        };

        match serde_json::from_slice(&contents) {
            Ok(teams) => Some(teams),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring malformed team cache");
                None
            }
        }
    }

    /// Replace the cached listing. Failures are logged, never returned.
    pub async fn store(&self, teams: &[TeamView]) {
        let contents = match serde_json::to_vec(teams) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(error = %err, "failed to encode team cache");
                return;
            }
        };
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %parent.display(), error = %err, "failed to create team cache directory");
                return;
            }
        }
        match tokio::fs::write(&self.path, contents).await {
            Ok(()) => debug!(path = %self.path.display(), count = teams.len(), "team cache refreshed"),
            Err(err) => warn!(path = %self.path.display(), error = %err, "failed to write team cache"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str) -> TeamView {
        TeamView {
            id: id.into(),
            name: format!("Team {id}"),
            logo: None,
            city: None,
            created_at: "2025-01-01T00:00:00Z".into(),
            players: Vec::new(),
        }
    }

    #[tokio::test]
    async fn stored_listing_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TeamCache::new(dir.path().join("nested").join("teams.json"));

        assert!(cache.load().await.is_none());
        cache.store(&[team("a"), team("b")]).await;

        let loaded = cache.load().await.unwrap();
        assert_eq!(loaded, vec![team("a"), team("b")]);
    }

    #[tokio::test]
    async fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.json");
        std::fs::write(&path, b"[{\"id\":").unwrap();

        assert!(TeamCache::new(path).load().await.is_none());
    }
}
