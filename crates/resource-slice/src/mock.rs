//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Tests register the
//! calls they expect and the responses to return, hand the mock to the code under
//! test, and call [`MockTransport::verify`] at the end.
//!
//! ## When to use the mock vs a real server
//!
//! | Feature | MockTransport | `wiremock` + ReqwestTransport |
//! |---------|---------------|-------------------------------|
//! | **Speed** | Instant | Fast (local socket) |
//! | **Paused clock** | Works with `start_paused` | Needs real time |
//! | **Covers** | Actions, stores, screens | Headers, encodings, status mapping |
//! | **Error Injection** | `fail(ActionError)` | Status codes and delays |
//!
//! ## Example
//!
//! ```rust
//! use resource_slice::mock::MockTransport;
//! use resource_slice::{ApiRequest, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/changelog/fetch")
//!         .respond_json(json!({"success": true, "data": []}));
//!
//!     let response = mock.send(ApiRequest::get("/changelog/fetch")).await.unwrap();
//!     assert_eq!(response.body["success"], json!(true));
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are matched on method and path. Several expectations for the same
//! call are consumed in registration order, so a test can script "first fetch
//! returns three rows, second fetch returns two".

use crate::error::ActionError;
use crate::transport::{status_error, ApiRequest, ApiResponse, Body, Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

struct Expectation {
    method: Method,
    path: String,
    body: Option<Body>,
    delay: Option<Duration>,
    response: Result<ApiResponse, ActionError>,
}

#[derive(Default)]
struct Ledger {
    expectations: VecDeque<Expectation>,
    received: Vec<ApiRequest>,
    unexpected: Vec<String>,
}

/// An in-memory [`Transport`] with expectation tracking.
///
/// Cloning shares the same expectations, so a test can keep one handle while the
/// code under test owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    ledger: Arc<Mutex<Ledger>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one call to `method path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            body: None,
            delay: None,
            ledger: self.ledger.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().received.clone()
    }

    /// How many requests matched `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .received
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Panics if any expectation is unmet or any request was unexpected.
    pub fn verify(&self) {
        let ledger = self.lock();
        if !ledger.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", ledger.unexpected);
        }
        if !ledger.expectations.is_empty() {
            let remaining: Vec<String> = ledger
                .expectations
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                remaining
            );
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        // A panicking test thread must not hide the ledger from `verify`.
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ActionError> {
        let matched = {
            let mut ledger = self.lock();
            ledger.received.push(request.clone());
            let index = ledger
                .expectations
                .iter()
                .position(|e| e.method == request.method && e.path == request.path);
            match index.and_then(|i| ledger.expectations.remove(i)) {
                Some(expectation) => {
                    if let Some(body) = &expectation.body {
                        if body != &request.body {
                            ledger.unexpected.push(format!(
                                "{} {} with body {:?}, expected {:?}",
                                request.method, request.path, request.body, body
                            ));
                        }
                    }
                    Some(expectation)
                }
                None => {
                    ledger
                        .unexpected
                        .push(format!("{} {}", request.method, request.path));
                    None
                }
            }
        };

        let Some(expectation) = matched else {
            return Err(ActionError::Transport {
                status: None,
                message: format!("No mock response for {} {}", request.method, request.path),
            });
        };
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Builder returned by [`MockTransport::expect`].
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    body: Option<Body>,
    delay: Option<Duration>,
    ledger: Arc<Mutex<Ledger>>,
}

impl ExpectationBuilder {
    /// Also require this exact JSON body.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Also require these form fields.
    pub fn with_form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = Some(Body::Form(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self
    }

    /// Hold the response back for `delay`.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `200` with this body.
    pub fn respond_json(self, body: Value) {
        self.finish(Ok(ApiResponse::new(200, body)));
    }

    /// Answer with `status`; non-2xx statuses fail the way a real transport would.
    pub fn respond_status(self, status: u16, body: Value) {
        let response = if (200..300).contains(&status) {
            Ok(ApiResponse::new(status, body))
        } else {
            Err(status_error(status, &body))
        };
        self.finish(response);
    }

    /// Fail with `error` without producing a response.
    pub fn fail(self, error: ActionError) {
        self.finish(Err(error));
    }

    fn finish(self, response: Result<ApiResponse, ActionError>) {
        let mut ledger = self.ledger.lock().unwrap_or_else(|e| e.into_inner());
        ledger.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            body: self.body,
            delay: self.delay,
            response,
        });
    }
}
