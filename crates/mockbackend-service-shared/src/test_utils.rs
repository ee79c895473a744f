//! Test utilities for handler and router testing.
//!
//! This module provides a ready-made [`AppState`] and router on the default
//! port, plus helpers for picking apart the diagnostic echo page.

use axum::Router;
use mockbackend_lib::Port;
use serde_json::Value;

use crate::router::{build_router, RouteTable};
use crate::state::AppState;

/// Seeded state listening on the default port.
pub fn test_state() -> AppState {
    AppState::seeded(Port::DEFAULT)
}

/// Router with the standard route table and [`test_state`].
pub fn test_router() -> Router {
    build_router(&RouteTable::standard(), test_state())
        .unwrap_or_else(|e| panic!("standard route table must build: {}", e))
}

/// Parse the JSON block embedded in an echo page.
///
/// Returns `None` when the page has no `<pre>` block or its contents are not
/// valid JSON.
pub fn echoed_metadata(page: &str) -> Option<Value> {
    let start = page.find("<pre>")? + "<pre>".len();
    let end = page.rfind("</pre>")?;
    if end < start {
        return None;
    }
    serde_json::from_str(&page[start..end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_default_port() {
        assert_eq!(test_state().port(), Port::DEFAULT);
    }

    #[test]
    fn test_router_builds() {
        let _router = test_router();
    }

    #[test]
    fn test_echoed_metadata_extracts_block() {
        let page = "<h1>x</h1>\n<pre>{\"method\": \"GET\"}</pre>\n";
        assert_eq!(
            echoed_metadata(page),
            Some(serde_json::json!({"method": "GET"}))
        );
    }

    #[test]
    fn test_echoed_metadata_missing_block() {
        assert!(echoed_metadata("<h1>nothing</h1>").is_none());
        assert!(echoed_metadata("<pre>not json</pre>").is_none());
    }
}
