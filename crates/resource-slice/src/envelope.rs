//! # Response Envelopes
//!
//! The admin API does not agree with itself on how a 2xx body reports success. Some
//! endpoints send `{success, message, data}`, others `{code, status, data, message}`,
//! and one answers with a bare array. `message` is sometimes a string and sometimes
//! `{"msg": "..."}`.
//!
//! Each action therefore declares an [`Envelope`]: which [`Convention`] its endpoint
//! follows and what to say when the body carries no message. There is no universal
//! rule.

use crate::error::ActionError;
use crate::transport::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// How an endpoint signals application-level success inside a 2xx body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `success == true`
    SuccessFlag,
    /// `status == "success"`
    StatusString,
    /// `code == 200`
    Code200,
    /// `success == true` or `code == 200`
    SuccessOrCode200,
    /// The body is an array, or `success == true`.
    BareArrayOrSuccess,
    /// Any 2xx is success.
    TransportOnly,
}

/// The outcome of a mutation: the server's message or a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: String,
}

/// Success rule and fallback failure text for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    convention: Convention,
    failure: &'static str,
}

impl Envelope {
    pub const fn new(convention: Convention, failure: &'static str) -> Self {
        Self {
            convention,
            failure,
        }
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// The text used when the server gives no reason for a failure.
    pub fn failure(&self) -> &'static str {
        self.failure
    }

    /// Applies this endpoint's fallback to a transport failure without a message.
    pub fn transport(&self, error: ActionError) -> ActionError {
        error.or_fallback(self.failure)
    }

    /// Fails with [`ActionError::Application`] when the body reports failure.
    pub fn check(&self, response: &ApiResponse) -> Result<(), ActionError> {
        if is_success(self.convention, &response.body) {
            return Ok(());
        }
        Err(ActionError::Application(
            extract_message(&response.body).unwrap_or_else(|| self.failure.to_string()),
        ))
    }

    /// Checks the body and returns its message, or `success` when it has none.
    pub fn ack(&self, response: &ApiResponse, success: &str) -> Result<Ack, ActionError> {
        self.check(response)?;
        Ok(Ack {
            message: extract_message(&response.body).unwrap_or_else(|| success.to_string()),
        })
    }

    /// Checks the body and decodes its `data` field.
    pub fn data<T: DeserializeOwned>(&self, response: &ApiResponse) -> Result<T, ActionError> {
        self.check(response)?;
        decode(response.body.get("data").cloned().unwrap_or(Value::Null))
    }

    /// Checks the body and decodes a list. A missing or null `data` is an empty list;
    /// a bare-array body is the list itself.
    pub fn list<T: DeserializeOwned>(&self, response: &ApiResponse) -> Result<Vec<T>, ActionError> {
        self.check(response)?;
        let items = match &response.body {
            Value::Array(_) => response.body.clone(),
            body => match body.get("data") {
                None | Some(Value::Null) => return Ok(Vec::new()),
                Some(data) => data.clone(),
            },
        };
        decode(items)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ActionError> {
    serde_json::from_value(value).map_err(|e| ActionError::Decode(e.to_string()))
}

fn is_success(convention: Convention, body: &Value) -> bool {
    let flag = body.get("success").and_then(Value::as_bool) == Some(true);
    match convention {
        Convention::SuccessFlag => flag,
        Convention::StatusString => body.get("status").and_then(Value::as_str) == Some("success"),
        Convention::Code200 => code_is_200(body),
        Convention::SuccessOrCode200 => flag || code_is_200(body),
        Convention::BareArrayOrSuccess => body.is_array() || flag,
        Convention::TransportOnly => true,
    }
}

// The API sends `code` as either a number or a numeric string.
fn code_is_200(body: &Value) -> bool {
    match body.get("code") {
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(Value::String(s)) => s.trim() == "200",
        _ => false,
    }
}

/// Reads `message` as a plain string or as `{"msg": string}`. Blank messages count
/// as absent.
pub fn extract_message(body: &Value) -> Option<String> {
    let message = body.get("message")?;
    let text = match message {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("msg")?.as_str()?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
