//! Shared HTTP infrastructure for the mock backend service.
//!
//! This crate provides everything the service binary mounts:
//!
//! - [`AppState`]: Resolved port and static user directory
//! - [`RouteTable`] and [`build_router`]: The explicit `(method, path)` table
//! - [`list_users`], [`health_check`], [`diagnostic_echo`]: Route handlers
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking middleware
//! - [`ServiceConfig`]: Startup configuration
//!
//! # Architecture
//!
//! Handlers are thin and stateless. Each one reads the immutable state and,
//! for the echo page, the request metadata:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Router (built from RouteTable)                        │
//! │  - GET /api/users   → list_users                            │
//! │  - GET /api/health  → health_check                          │
//! │  - GET /            → diagnostic_echo                       │
//! │  - anything else    → 404                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides ready-made state and helpers for
//! handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod config;
mod echo;
mod health;
pub mod logging;
pub mod middleware;
mod router;
mod state;
mod users;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, DEFAULT_BIND_IP};
pub use echo::{
    diagnostic_echo, render_diagnostic_page, EchoedHeaders, HeaderField, RequestMetadata,
};
pub use health::{health_check, HealthStatus, STATUS_HEALTHY};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
pub use middleware::{extract_or_generate_request_id, RequestId, RequestTrackingLayer};
pub use router::{build_router, Endpoint, Route, RouteTable, RouterError};
pub use state::AppState;
pub use users::{list_users, server_label, UsersResponse};
