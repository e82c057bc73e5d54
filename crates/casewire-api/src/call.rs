//! Call descriptors — the request/response vocabulary of the pipeline.
//!
//! The interaction side never touches HTTP. It submits a [`CallKind`] and
//! later correlates the delivered [`CallOutcome`] by [`CallId`]; outcomes
//! may arrive in any order relative to submission. Everything the adapter
//! wants to display about an exchange (method, endpoint, both header
//! blocks, both bodies) travels on the outcome as plain strings.

use serde_json::Value;
use url::Url;

use crate::error::ApiError;

/// Correlation id for one submitted call. Monotonically allocated by the
/// handle; never reused within a session.
pub type CallId = u64;

/// The closed set of service operations the pipeline can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum CallKind {
    /// OAuth password-grant token request. Credentials come from the
    /// session config, not the descriptor.
    Login,
    /// Fetch the case-type listing for the configured application.
    RefreshCaseTypes,
    /// Create (and implicitly open) a new case of the given type.
    CreateCase { case_type_id: String },
    /// Open an assignment, fetching its first form.
    OpenAssignment { assignment_id: String },
    /// Open one action of an assignment.
    OpenAssignmentAction {
        assignment_id: String,
        action_id: String,
    },
    /// Submit an action with edited content. `etag` is the value captured
    /// when the action was opened; the service rejects stale submissions.
    SubmitAssignmentAction {
        assignment_id: String,
        action_id: String,
        etag: String,
        content: Value,
    },
}

impl CallKind {
    /// HTTP method for this operation.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Login | Self::CreateCase { .. } => "POST",
            Self::RefreshCaseTypes
            | Self::OpenAssignment { .. }
            | Self::OpenAssignmentAction { .. } => "GET",
            Self::SubmitAssignmentAction { .. } => "PATCH",
        }
    }

    /// Derive the endpoint URL under the service's API base.
    ///
    /// Assignment and action ids contain spaces and `!` and are pushed as
    /// path segments so they are percent-encoded. [`CallKind::Login`] does
    /// not live under the API base; the transport routes it to the token
    /// endpoint instead.
    pub fn endpoint(&self, api_base: &Url) -> Result<Url, ApiError> {
        let mut url = api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| ApiError::Config {
                message: format!("API base '{api_base}' cannot carry path segments"),
            })?;
            segments.pop_if_empty();

            match self {
                Self::Login => {}
                Self::RefreshCaseTypes => {
                    segments.push("casetypes");
                }
                Self::CreateCase { .. } => {
                    segments.push("cases");
                }
                Self::OpenAssignment { assignment_id } => {
                    segments.push("assignments").push(assignment_id);
                }
                Self::OpenAssignmentAction {
                    assignment_id,
                    action_id,
                }
                | Self::SubmitAssignmentAction {
                    assignment_id,
                    action_id,
                    ..
                } => {
                    segments
                        .push("assignments")
                        .push(assignment_id)
                        .push("actions")
                        .push(action_id);
                }
            }
        }
        Ok(url)
    }
}

/// One submitted call: correlation id, operation, and the bearer token to
/// authenticate with (absent for [`CallKind::Login`]).
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub id: CallId,
    pub kind: CallKind,
    pub access_token: Option<String>,
}

/// The delivered result of one call — a full record of the exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    pub id: CallId,
    pub kind: CallKind,
    /// Whether the exchange completed with a 2xx status.
    pub succeeded: bool,
    /// HTTP status code; `0` when the request never reached the service.
    pub status: u16,
    pub method: String,
    pub endpoint: String,
    pub request_headers: String,
    pub request_body: String,
    pub response_headers: String,
    pub response_body: String,
    /// The `etag` response header, needed for later submission.
    pub etag: Option<String>,
    pub error: Option<String>,
}

impl CallOutcome {
    /// Outcome for a call that never produced an HTTP exchange.
    pub fn failure(request: &CallRequest, error: String) -> Self {
        Self {
            id: request.id,
            kind: request.kind.clone(),
            succeeded: false,
            status: 0,
            method: request.kind.method().to_owned(),
            endpoint: String::new(),
            request_headers: String::new(),
            request_body: String::new(),
            response_headers: String::new(),
            response_body: String::new(),
            etag: None,
            error: Some(error),
        }
    }
}
