//! Application-level configuration loading: listening port, CORS origin and database pool.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::league_store::sqlite::SqliteConfig;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "COURTSIDE_CONFIG_PATH";
const DEFAULT_PORT: u16 = 3010;
const DEFAULT_UI_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// TCP port the HTTP server binds on all interfaces.
    pub port: u16,
    /// Origin allowed by the CORS layer (the scoreboard UI).
    pub ui_origin: String,
    /// Pool settings for the league database.
    pub database: SqliteConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            ui_origin: DEFAULT_UI_ORIGIN.to_owned(),
            database: SqliteConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the configuration: built-in defaults, then the JSON file, then environment variables.
    pub fn load() -> Self {
        let mut config = Self::from_file(&resolve_config_path());
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Read the JSON configuration file, falling back to defaults when it is missing or invalid.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Override fields from environment-style variables provided by `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        override_parsed(&lookup, "PORT", &mut self.port);
        if let Some(origin) = lookup("UI_ORIGIN").filter(|value| !value.is_empty()) {
            self.ui_origin = origin;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|value| !value.is_empty()) {
            self.database.url = url;
        }
        override_parsed(
            &lookup,
            "DB_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        override_parsed(
            &lookup,
            "DB_MIN_CONNECTIONS",
            &mut self.database.min_connections,
        );
        override_millis(&lookup, "DB_IDLE_TIMEOUT_MS", &mut self.database.idle_timeout);
        override_millis(
            &lookup,
            "DB_ACQUIRE_TIMEOUT_MS",
            &mut self.database.acquire_timeout,
        );
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(err) => warn!(key, value = %raw, error = %err, "ignoring invalid environment value"),
    }
}

fn override_millis<F>(lookup: &F, key: &str, target: &mut Option<Duration>)
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<u64>() {
        Ok(millis) => *target = Some(Duration::from_millis(millis)),
        Err(err) => warn!(key, value = %raw, error = %err, "ignoring invalid environment value"),
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
