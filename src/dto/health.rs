use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health response returned by the `/api/health` route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// False when the storage health check failed.
    pub ok: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok() -> Self {
        Self { ok: true }
    }

    /// Create a health response indicating storage is unreachable.
    pub fn degraded() -> Self {
        Self { ok: false }
    }
}
