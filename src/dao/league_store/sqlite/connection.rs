use std::{str::FromStr, time::Duration};

use sqlx::{
    Executor, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info};

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
    schema,
};

/// Open the pool described by `config` and make sure every table exists.
///
/// A single attempt is made; callers decide whether to retry.
pub async fn establish_connection(config: &SqliteConfig) -> SqliteResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|source| SqliteDaoError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .min_connections(config.min_connections)
        .idle_timeout(config.idle_timeout);
    if config.is_in_memory() {
        pool_options = pool_options.max_lifetime(None::<Duration>);
    }
    if let Some(timeout) = config.acquire_timeout {
        pool_options = pool_options.acquire_timeout(timeout);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|source| SqliteDaoError::Connect {
            url: config.url.clone(),
            source,
        })?;

    apply_schema(&pool).await?;
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "SQLite pool ready"
    );
    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> SqliteResult<()> {
    for (index, statement) in schema::STATEMENTS.iter().enumerate() {
        pool.execute(*statement)
            .await
            .map_err(|source| SqliteDaoError::Schema { index, source })?;
    }
    debug!(statements = schema::STATEMENTS.len(), "schema applied");
    Ok(())
}
