//! # HTTP Client Adapter
//!
//! Every Resource Action talks to the backend through a [`Transport`]. The production
//! implementation, [`ReqwestTransport`], holds the base URL, the default headers and
//! the request timeout. Tests substitute [`MockTransport`](crate::mock::MockTransport).
//!
//! A transport only answers "did the call succeed at the HTTP level". Network errors
//! and non-2xx statuses become [`ActionError::Transport`]; reading the body's own
//! success flag is left to [`envelope`](crate::envelope).

use crate::envelope;
use crate::error::{status_message, ActionError};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// HTTP verbs used by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Request body encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

/// One call to the admin API, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json_of<T: serde::Serialize>(self, body: &T) -> Result<Self, ActionError> {
        let value =
            serde_json::to_value(body).map_err(|e| ActionError::Decode(e.to_string()))?;
        Ok(self.json(value))
    }

    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self.body {
            Body::Form(fields) => fields.push((key.into(), value.into())),
            _ => self.body = Body::Form(vec![(key.into(), value.into())]),
        }
        self
    }
}

/// A 2xx response. `body` is `Null` when empty and a JSON string when the server
/// answered with something other than JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// The seam between Resource Actions and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ActionError>;
}

/// Settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("resource-slice/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Why a [`ReqwestTransport`] could not be built.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Could not build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// `reqwest`-backed transport with a fixed base URL and default headers.
pub struct ReqwestTransport {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Fails when the token or user agent is not a valid header value, so a bad
    /// token never turns into unauthenticated requests.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_request(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };
        match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Form(fields) => builder.form(fields),
        }
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> ActionError {
        if e.is_timeout() {
            ActionError::Timeout(self.timeout)
        } else {
            ActionError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ActionError> {
        debug!(method = %request.method, path = %request.path, "Sending request");

        let response = self
            .build_request(&request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;
        let body = parse_body(&text);
        debug!(status = status.as_u16(), path = %request.path, "Response received");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        Ok(ApiResponse::new(status.as_u16(), body))
    }
}

/// The error for a non-2xx response: the body's message when it has one.
pub(crate) fn status_error(status: u16, body: &Value) -> ActionError {
    let message = envelope::extract_message(body).unwrap_or_else(|| status_message(status));
    ActionError::Transport {
        status: Some(status),
        message,
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
