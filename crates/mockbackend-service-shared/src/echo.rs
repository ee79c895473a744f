//! Diagnostic echo handler.
//!
//! Reflects the method, url, and headers of the incoming request back to the
//! caller as pretty-printed JSON inside an HTML `<pre>` block.
//!
//! # Header fidelity
//!
//! Header names and their order are taken exactly as the HTTP stack hands them
//! over. Nothing is filtered, renamed, or re-sorted. A header that appears once
//! is echoed as a string; one that appears several times is echoed as an array
//! of its values in arrival order.
//!
//! # Escaping
//!
//! Values are embedded without HTML escaping. A header value containing markup
//! is reflected verbatim, so the page must only be used for diagnostics against
//! trusted callers.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use mockbackend_lib::Port;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::AppState;

/// Value(s) of one echoed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderField {
    Single(String),
    Multiple(Vec<String>),
}

/// Ordered header name to value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoedHeaders(Vec<(String, HeaderField)>);

impl EchoedHeaders {
    /// Capture every header in `headers`, keeping first-seen name order.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let fields = headers
            .keys()
            .map(|name| {
                let mut values: Vec<String> = headers
                    .get_all(name)
                    .iter()
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                    .collect();
                let field = if values.len() == 1 {
                    HeaderField::Single(values.remove(0))
                } else {
                    HeaderField::Multiple(values)
                };
                (name.as_str().to_string(), field)
            })
            .collect();
        Self(fields)
    }
}

impl Serialize for EchoedHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, field) in &self.0 {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

/// Per-request view of the metadata reflected by the echo page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestMetadata {
    pub headers: EchoedHeaders,
    /// Path plus query string, e.g. `/?debug=1`.
    pub url: String,
    pub method: String,
}

impl RequestMetadata {
    pub fn from_parts(parts: &Parts) -> Self {
        let url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Self {
            headers: EchoedHeaders::from_header_map(&parts.headers),
            url,
            method: parts.method.as_str().to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestMetadata
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Render the echo page for `metadata` served from `port`.
pub fn render_diagnostic_page(port: Port, metadata: &RequestMetadata) -> serde_json::Result<String> {
    let echoed = serde_json::to_string_pretty(metadata)?;
    Ok(format!(
        "<h1>Backend Server on port {port}</h1>\n<h2>Request Information:</h2>\n<pre>{echoed}</pre>\n"
    ))
}

/// Handle `GET /`.
pub async fn diagnostic_echo(State(state): State<AppState>, metadata: RequestMetadata) -> Response {
    match render_diagnostic_page(state.port(), &metadata) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            // Unreachable for string-only metadata.
            tracing::error!(error = %e, "failed to serialize request metadata");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
