//! Application state for the HTTP service.
//!
//! Holds the resolved port and the static user directory. Neither changes
//! after construction, so handlers read them without any synchronization.

use std::sync::Arc;

use mockbackend_lib::{Port, UserDirectory};

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use mockbackend_lib::{Port, UserDirectory};
/// use mockbackend_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) -> String {
///     state.port().to_string()
/// }
///
/// let state = AppState::new(Port::DEFAULT, UserDirectory::seeded());
/// let app = Router::new()
///     .route("/port", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    port: Port,
    directory: UserDirectory,
}

impl AppState {
    /// Create application state from the resolved port and directory.
    pub fn new(port: Port, directory: UserDirectory) -> Self {
        Self {
            inner: Arc::new(AppStateInner { port, directory }),
        }
    }

    /// State with the seeded directory, as every deployment runs.
    pub fn seeded(port: Port) -> Self {
        Self::new(port, UserDirectory::seeded())
    }

    /// The port this process listens on.
    pub fn port(&self) -> Port {
        self.inner.port
    }

    /// Access the user directory.
    pub fn directory(&self) -> &UserDirectory {
        &self.inner.directory
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("port", &self.inner.port)
            .field("user_count", &self.inner.directory.len())
            .finish()
    }
}
