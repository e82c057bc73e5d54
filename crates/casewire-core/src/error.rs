// ── Core error types ──
//
// Two severities exist in this crate and only one of them lives here:
// fatal construction failures (the document cannot be represented) surface
// as `CoreError`; known-but-unsupported features of a single component are
// captured as data on the component itself (`is_broken` + reason) and never
// abort a build.

use thiserror::Error;

use crate::model::ComponentKey;

/// Unified error type for the component graph engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document could not be represented: a finalized component would
    /// have an empty name, an empty class id, or an unspecified kind.
    #[error("malformed component in document:\n{json}")]
    MalformedComponent { json: String },

    /// A name expression failed to resolve against the content namespace.
    #[error("could not resolve name '{name}': {reason}")]
    UnresolvedName { name: String, reason: String },

    /// A label expression referenced field metadata that does not exist.
    #[error("no field metadata for key '{key}'")]
    MissingField { key: ComponentKey },

    /// A component is missing a required attribute (`type`, `config`, ...).
    #[error("component is missing required attribute '{attribute}'")]
    MissingAttribute { attribute: String },

    /// The response's root component uses an unsupported context or type.
    #[error("unsupported root component: {detail}")]
    UnsupportedRoot { detail: String },

    /// The case-type listing reported an application this client cannot
    /// drive, or no case types at all.
    #[error("application is not compatible or defines no case types")]
    IncompatibleApplication,

    /// The response body was not valid JSON or missed the expected shape.
    #[error("malformed service response: {0}")]
    Json(#[from] serde_json::Error),
}
