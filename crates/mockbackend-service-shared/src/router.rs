//! Explicit route table and router construction.
//!
//! Routing is driven by a [`RouteTable`] value rather than ad-hoc calls to
//! `Router::route`, so the full HTTP surface is visible in one place and can be
//! checked before any handler is mounted.
//!
//! Only exact `(method, path)` matches are dispatched. Everything else,
//! including a known path requested with another method, gets the framework's
//! default empty 404.

use std::collections::HashSet;

use axum::{
    http::{Method, StatusCode},
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use thiserror::Error;

use crate::echo::diagnostic_echo;
use crate::health::health_check;
use crate::middleware::RequestTrackingLayer;
use crate::users::list_users;
use crate::AppState;

/// Handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListUsers,
    HealthCheck,
    DiagnosticEcho,
}

impl Endpoint {
    fn method_router(self, filter: MethodFilter) -> MethodRouter<AppState> {
        match self {
            Endpoint::ListUsers => on(filter, list_users),
            Endpoint::HealthCheck => on(filter, health_check),
            Endpoint::DiagnosticEcho => on(filter, diagnostic_echo),
        }
    }
}

/// A `(method, path)` pair bound to exactly one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub endpoint: Endpoint,
}

impl Route {
    pub fn get(path: &'static str, endpoint: Endpoint) -> Self {
        Self {
            method: Method::GET,
            path,
            endpoint,
        }
    }
}

/// Ordered collection of routes handed to [`build_router`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The service's HTTP surface.
    ///
    /// | Method | Path          | Endpoint         |
    /// |--------|---------------|------------------|
    /// | GET    | `/api/users`  | `ListUsers`      |
    /// | GET    | `/api/health` | `HealthCheck`    |
    /// | GET    | `/`           | `DiagnosticEcho` |
    pub fn standard() -> Self {
        Self::new(vec![
            Route::get("/api/users", Endpoint::ListUsers),
            Route::get("/api/health", Endpoint::HealthCheck),
            Route::get("/", Endpoint::DiagnosticEcho),
        ])
    }

    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Errors raised while turning a [`RouteTable`] into a router.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("duplicate route {method} {path}")]
    DuplicateRoute { method: Method, path: String },

    #[error("method {method} cannot be routed (path {path})")]
    UnsupportedMethod { method: Method, path: String },

    #[error("route path {path} is not a literal absolute path")]
    InvalidPath { path: String },
}

/// Whether `path` is absolute and free of axum capture or wildcard syntax.
///
/// Anything else would either match more than one path or make
/// `Router::route` panic.
fn is_literal_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}', '*'])
        && !path.split('/').any(|segment| segment.starts_with(':'))
}

/// Build the service router from `table`.
///
/// The returned router has request tracking applied and `state` attached.
pub fn build_router(table: &RouteTable, state: AppState) -> Result<Router, RouterError> {
    let mut seen = HashSet::with_capacity(table.routes().len());
    let mut router: Router<AppState> = Router::new();

    for route in table.routes() {
        if !is_literal_path(route.path) {
            return Err(RouterError::InvalidPath {
                path: route.path.to_string(),
            });
        }
        if !seen.insert((route.method.clone(), route.path)) {
            return Err(RouterError::DuplicateRoute {
                method: route.method.clone(),
                path: route.path.to_string(),
            });
        }

        let filter = MethodFilter::try_from(route.method.clone()).map_err(|_| {
            RouterError::UnsupportedMethod {
                method: route.method.clone(),
                path: route.path.to_string(),
            }
        })?;

        tracing::debug!(method = %route.method, path = route.path, endpoint = ?route.endpoint, "registering route");
        // Routes sharing a path merge into one method router; the duplicate
        // check above keeps their method sets disjoint.
        router = router.route(route.path, route.endpoint.method_router(filter));
    }

    Ok(router
        .method_not_allowed_fallback(not_found)
        .layer(RequestTrackingLayer)
        .with_state(state))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
