use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the store; a failed check is logged and reported as `ok: false`.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
