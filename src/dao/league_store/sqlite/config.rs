use std::time::Duration;

use serde::Deserialize;

/// Database location used when neither the config file nor the environment provide one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://courtside.db?mode=rwc";
const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Runtime configuration describing how to open the SQLite pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SqliteConfig {
    /// `sqlx` connection URL, e.g. `sqlite://courtside.db?mode=rwc`.
    pub url: String,
    /// Upper bound of the pool.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Idle connections above `min_connections` are closed after this long.
    #[serde(with = "duration_ms")]
    pub idle_timeout: Option<Duration>,
    /// How long a request waits for a free connection.
    #[serde(with = "duration_ms")]
    pub acquire_timeout: Option<Duration>,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: 10,
            min_connections: 0,
            idle_timeout: Some(Duration::from_millis(30_000)),
            acquire_timeout: Some(Duration::from_millis(30_000)),
        }
    }
}

impl SqliteConfig {
    /// Construct a configuration for the given database URL with default pool bounds.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_owned(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            acquire_timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Whether this configuration targets a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SqliteConfig =
            serde_json::from_str(r#"{ "url": "sqlite://league.db", "idleTimeout": 500 }"#)
                .unwrap();

        assert_eq!(config.url, "sqlite://league.db");
        assert_eq!(config.idle_timeout, Some(Duration::from_millis(500)));
        assert_eq!(config.max_connections, 10);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn in_memory_pins_single_connection() {
        let config = SqliteConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.idle_timeout, None);
    }
}
