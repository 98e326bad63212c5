//! # Action Errors
//!
//! Every way a Resource Action can fail, normalized into one enum so views never
//! branch on raw envelope shapes or transport details.

/// A settled failure of a Resource Action.
///
/// [`ActionError::message`] is what a view shows to the user. The `Display`
/// impl carries the category prefix and is meant for logs.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    /// The payload failed structural validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Network error or non-2xx status.
    #[error("Transport error ({status:?}): {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The request did not settle within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// 2xx response whose body reports failure.
    #[error("Request failed: {0}")]
    Application(String),

    /// The body could not be decoded into the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A newer invocation of the same action replaced this one.
    #[error("Superseded by a newer request")]
    Superseded,

    #[error("Store closed")]
    StoreClosed,

    #[error("Store dropped response channel")]
    StoreDropped,
}

impl ActionError {
    /// The human-readable text for a notice or an error row.
    pub fn message(&self) -> String {
        match self {
            ActionError::Validation(msg)
            | ActionError::Application(msg)
            | ActionError::Transport { message: msg, .. } => msg.clone(),
            ActionError::Timeout(after) => {
                format!("Request timed out after {}s", after.as_secs())
            }
            ActionError::Decode(_) => "Unexpected response from server".to_string(),
            ActionError::Superseded => "Request superseded".to_string(),
            ActionError::StoreClosed | ActionError::StoreDropped => {
                "Console is shutting down".to_string()
            }
        }
    }

    /// Superseded requests are not failures from the user's point of view.
    pub fn is_superseded(&self) -> bool {
        matches!(self, ActionError::Superseded)
    }

    /// Replaces the text of a transport failure that carried no server message,
    /// such as a bare status code or a connection error, with `fallback`.
    pub fn or_fallback(self, fallback: &str) -> Self {
        match self {
            ActionError::Transport { status, message }
                if status.is_none_or(|code| message == status_message(code)) =>
            {
                ActionError::Transport {
                    status,
                    message: fallback.to_string(),
                }
            }
            other => other,
        }
    }
}

/// Text of a non-2xx failure whose body had no message.
pub(crate) fn status_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn message_strips_category() {
        let err = ActionError::Transport {
            status: Some(500),
            message: "Database unavailable".into(),
        };
        assert_eq!(err.message(), "Database unavailable");
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn fallback_only_replaces_messageless_failures() {
        let bare = ActionError::Transport {
            status: Some(502),
            message: status_message(502),
        };
        assert_eq!(
            bare.or_fallback("Failed to fetch history").message(),
            "Failed to fetch history"
        );

        let offline = ActionError::Transport {
            status: None,
            message: "error sending request".into(),
        };
        assert_eq!(offline.or_fallback("Failed").message(), "Failed");

        let explained = ActionError::Transport {
            status: Some(400),
            message: "PAN already registered".into(),
        };
        assert_eq!(explained.or_fallback("Failed").message(), "PAN already registered");

        let validation = ActionError::Validation("Title is required".into());
        assert_eq!(validation.clone().or_fallback("Failed"), validation);
    }

    #[test]
    fn timeout_message_reports_seconds() {
        let err = ActionError::Timeout(Duration::from_secs(30));
        assert_eq!(err.message(), "Request timed out after 30s");
    }
}
