//! Error Taxonomy
//!
//! `AiError` is the classification the workflow controller actually acts on:
//! quota exhaustion and credential rejection get user-visible banners, a
//! malformed structured block degrades gracefully, and everything else is a
//! generic transport failure carrying the original message text.
//!
//! `CoreError` covers the non-AI failures of the core crate (invalid state
//! transitions, I/O during export, serialization).

use thiserror::Error;

/// Classified failure of an external AI call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// Rate limiting by the external service (HTTP 429 and friends)
    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// Missing or rejected API key (HTTP 401/403, key validation errors)
    #[error("Invalid credential: {message}")]
    InvalidCredential { message: String },

    /// Response text that could not be decoded or lacked required content
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Any other network/server failure, passed through with its message
    #[error("Transport failure: {message}")]
    Transport { message: String },
}

impl AiError {
    /// Classify an HTTP error status plus response body.
    ///
    /// 429 maps to quota, 401/403 to credential; anything else passes
    /// through as a transport failure so the original text reaches the
    /// error banner unchanged.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            429 => AiError::QuotaExceeded {
                message: body.to_string(),
            },
            401 | 403 => AiError::InvalidCredential {
                message: body.to_string(),
            },
            _ => AiError::Transport {
                message: format!("HTTP {}: {}", status, body),
            },
        }
    }

    /// Classify a failure from its message text alone.
    ///
    /// Used when the underlying library surfaces a string instead of a
    /// status code. Sniffs the rate-limit and authentication markers the
    /// Gemini API is known to emit.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if message.contains("429")
            || lower.contains("resource_exhausted")
            || lower.contains("rate limit")
            || lower.contains("quota")
        {
            AiError::QuotaExceeded {
                message: message.to_string(),
            }
        } else if message.contains("401")
            || lower.contains("api key")
            || lower.contains("api_key")
            || lower.contains("unauthenticated")
            || lower.contains("permission")
        {
            AiError::InvalidCredential {
                message: message.to_string(),
            }
        } else {
            AiError::Transport {
                message: message.to_string(),
            }
        }
    }

    /// Whether this failure kind must reach the user as a banner even when
    /// the surrounding call is allowed to fail open.
    pub fn is_distinguished(&self) -> bool {
        matches!(
            self,
            AiError::QuotaExceeded { .. } | AiError::InvalidCredential { .. }
        )
    }
}

/// Core error type for the Wing Analyst workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid workflow transition or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// File I/O errors (report export)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Classified AI failure
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_quota() {
        let err = AiError::from_status(429, "slow down");
        assert!(matches!(err, AiError::QuotaExceeded { .. }));
        assert!(err.is_distinguished());
    }

    #[test]
    fn test_from_status_credential() {
        for status in [401, 403] {
            let err = AiError::from_status(status, "no key");
            assert!(matches!(err, AiError::InvalidCredential { .. }));
        }
    }

    #[test]
    fn test_from_status_other_keeps_message() {
        let err = AiError::from_status(503, "backend down");
        match err {
            AiError::Transport { message } => {
                assert!(message.contains("503"));
                assert!(message.contains("backend down"));
            }
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[test]
    fn test_from_message_sniffing() {
        assert!(matches!(
            AiError::from_message("got 429 from upstream"),
            AiError::QuotaExceeded { .. }
        ));
        assert!(matches!(
            AiError::from_message("RESOURCE_EXHAUSTED: try later"),
            AiError::QuotaExceeded { .. }
        ));
        assert!(matches!(
            AiError::from_message("API key not valid"),
            AiError::InvalidCredential { .. }
        ));
        assert!(matches!(
            AiError::from_message("connection reset by peer"),
            AiError::Transport { .. }
        ));
    }

    #[test]
    fn test_malformed_is_not_distinguished() {
        let err = AiError::MalformedResponse {
            message: "bad json".into(),
        };
        assert!(!err.is_distinguished());
    }

    #[test]
    fn test_core_error_display() {
        let err = CoreError::validation("wrong step");
        assert_eq!(err.to_string(), "Validation error: wrong step");
    }
}
