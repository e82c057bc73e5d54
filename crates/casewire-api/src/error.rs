// ── API error types ──
//
// Failures of the machinery around a call (building an endpoint, reading
// the session config, driving the HTTP client). A call that reaches the
// service and comes back with a non-2xx status is NOT an error here — it
// is a `CallOutcome` with `succeeded == false`, because the explorer wants
// to display failed exchanges just like successful ones.

use thiserror::Error;

/// Unified error type for the request pipeline and transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client failed below the protocol level (connect, TLS,
    /// timeout, body read).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// An endpoint could not be derived from the session config.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The session config is structurally unusable.
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
