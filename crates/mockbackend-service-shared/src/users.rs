//! User listing handler.

use axum::{extract::State, Json};
use mockbackend_lib::{Port, User};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Response body for `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersResponse {
    /// Identifies the backend instance, e.g. `"Backend on port 3000"`.
    pub server: String,
    /// Users in directory order.
    pub users: Vec<User>,
}

impl UsersResponse {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            server: server_label(state.port()),
            users: state.directory().users().to_vec(),
        }
    }
}

/// Human-readable backend description embedded in user listings.
pub fn server_label(port: Port) -> String {
    format!("Backend on port {}", port)
}

/// Handle `GET /api/users`.
pub async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    Json(UsersResponse::from_state(&state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_label() {
        assert_eq!(server_label(Port::DEFAULT), "Backend on port 3000");
    }

    #[test]
    fn test_users_response_default_port_body() {
        let response = UsersResponse::from_state(&AppState::seeded(Port::DEFAULT));
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"server":"Backend on port 3000","users":[{"id":1,"name":"Alice"},{"id":2,"name":"Bob"}]}"#
        );
    }

    #[tokio::test]
    async fn test_list_users_is_deterministic() {
        let state = AppState::seeded(Port::new(4000).unwrap());
        let Json(first) = list_users(State(state.clone())).await;
        let Json(second) = list_users(State(state)).await;

        assert_eq!(first, second);
        assert_eq!(first.server, "Backend on port 4000");
    }
}
