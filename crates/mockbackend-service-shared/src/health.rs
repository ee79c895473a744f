//! Health check handler used as a liveness check.
//!
//! A 200 response from `/api/health` is the whole contract; pollers do not
//! need to inspect the body.

use axum::{extract::State, Json};
use mockbackend_lib::Port;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Status value reported by a live process.
pub const STATUS_HEALTHY: &str = "healthy";

/// Health status response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,

    /// Port the process is listening on.
    pub port: Port,
}

impl HealthStatus {
    /// Create a healthy status for the given port.
    pub fn healthy(port: Port) -> Self {
        Self {
            status: STATUS_HEALTHY.to_string(),
            port,
        }
    }
}

/// Liveness handler.
///
/// # Example
///
/// ```text
/// GET /api/health
/// {"status":"healthy","port":3000}
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.port()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_healthy() {
        let status = HealthStatus::healthy(Port::new(4000).unwrap());
        assert_eq!(status.status, "healthy");
        assert_eq!(status.port.get(), 4000);
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::healthy(Port::new(4000).unwrap());
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"status":"healthy","port":4000}"#);
    }

    #[tokio::test]
    async fn test_health_check_handler_reports_state_port() {
        let state = AppState::seeded(Port::new(5123).unwrap());
        let Json(status) = health_check(State(state)).await;
        assert_eq!(status, HealthStatus::healthy(Port::new(5123).unwrap()));
    }
}
