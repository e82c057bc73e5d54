//! HTTP transport — where call descriptors become network exchanges.
//!
//! The worker drives the [`Transport`] trait so tests can substitute a
//! canned implementation. [`HttpTransport`] is the real one: a shared
//! `reqwest::Client`, endpoint derivation from the session config, OAuth
//! password-grant login, bearer-token JSON calls for everything else.
//!
//! Nothing here returns an error to the worker. A failure at any stage —
//! unusable config, connection refused, non-2xx status — is recorded on
//! the [`CallOutcome`] so the adapter can display the broken exchange.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{ETAG, HeaderMap};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::call::{CallKind, CallOutcome, CallRequest};
use crate::config::SessionConfig;
use crate::error::ApiError;

/// Execution seam between the worker and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &CallRequest) -> CallOutcome;
}

/// `reqwest`-backed transport for one configured service session.
pub struct HttpTransport {
    http: reqwest::Client,
    config: SessionConfig,
}

impl HttpTransport {
    pub fn new(config: SessionConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    async fn exchange(&self, request: &CallRequest) -> Result<CallOutcome, ApiError> {
        let (url, builder, request_body) = self.prepare(request)?;
        let method = request.kind.method();

        let http_request = builder.build()?;
        let request_headers = format_headers(http_request.headers());

        debug!(id = request.id, method, %url, "dispatching call");
        let response = self.http.execute(http_request).await?;

        let status = response.status();
        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let response_headers = format_headers(response.headers());
        let response_body = response.text().await?;

        Ok(CallOutcome {
            id: request.id,
            kind: request.kind.clone(),
            succeeded: status.is_success(),
            status: status.as_u16(),
            method: method.to_owned(),
            endpoint: url.to_string(),
            request_headers,
            request_body,
            response_headers,
            response_body,
            etag,
            error: (!status.is_success()).then(|| format!("HTTP {status}")),
        })
    }

    /// Build the request for one call. Returns the resolved URL, the ready
    /// builder, and the body as recorded on the outcome.
    fn prepare(
        &self,
        request: &CallRequest,
    ) -> Result<(Url, reqwest::RequestBuilder, String), ApiError> {
        if matches!(request.kind, CallKind::Login) {
            let url = self.config.token_url()?;
            let form = [
                ("grant_type", "password"),
                ("username", self.config.user_id.as_str()),
                ("password", self.config.password.as_str()),
            ];
            let builder = self
                .http
                .post(url.clone())
                .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
                .form(&form);
            // The recorded copy never carries the credential.
            let body = format!(
                "grant_type=password&username={}&password=<redacted>",
                self.config.user_id
            );
            return Ok((url, builder, body));
        }

        let api_base = self.config.api_base()?;
        let url = request.kind.endpoint(&api_base)?;

        let method = match request.kind.method() {
            "POST" => Method::POST,
            "PATCH" => Method::PATCH,
            _ => Method::GET,
        };
        let mut builder = self.http.request(method, url.clone());
        if let Some(token) = &request.access_token {
            builder = builder.bearer_auth(token);
        }

        let body = match &request.kind {
            CallKind::CreateCase { case_type_id } => {
                let payload = json!({ "caseTypeID": case_type_id });
                builder = builder.json(&payload);
                payload.to_string()
            }
            CallKind::SubmitAssignmentAction { etag, content, .. } => {
                let payload = json!({ "content": content });
                builder = builder.header("if-match", etag).json(&payload);
                payload.to_string()
            }
            _ => String::new(),
        };

        Ok((url, builder, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &CallRequest) -> CallOutcome {
        match self.exchange(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(id = request.id, error = %err, "call failed before completion");
                CallOutcome::failure(request, err.to_string())
            }
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Extract the bearer token from a successful login response body.
pub fn parse_access_token(body: &str) -> Result<String, ApiError> {
    let token: TokenResponse = serde_json::from_str(body)?;
    Ok(token.access_token)
}

fn format_headers(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(value.to_str().unwrap_or("<binary>"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn access_token_extraction() {
        let body = r#"{ "access_token": "abc123", "token_type": "bearer", "expires_in": 3600 }"#;
        assert_eq!(parse_access_token(body).unwrap(), "abc123");

        assert!(parse_access_token(r#"{ "error": "invalid_client" }"#).is_err());
    }

    #[test]
    fn header_formatting_is_line_per_header() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("etag", "20240301T093000".parse().unwrap());

        let formatted = format_headers(&headers);
        assert!(formatted.contains("content-type: application/json\n"));
        assert!(formatted.contains("etag: 20240301T093000\n"));
    }
}
