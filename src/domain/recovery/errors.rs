//! Recovery error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification shared by every error a generation run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Provider returned non-2xx or the transport failed. Fatal.
    ProviderError,
    /// Provider call timed out or was cancelled. Fatal.
    ProviderTimeout,
    /// Fragment is not valid JSON. Recoverable.
    ParseError,
    /// Fragment parsed but violates the domain schema. Recoverable.
    SchemaError,
    /// Required request fields are missing or out of range. Fatal.
    InvalidRequest,
}

impl ErrorKind {
    /// Whether the pipeline absorbs this error through repair or fallback.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::ParseError | ErrorKind::SchemaError)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::ProviderTimeout => "provider_timeout",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::SchemaError => "schema_error",
            ErrorKind::InvalidRequest => "invalid_request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while turning a fragment into a domain object.
///
/// Never surfaced to callers: the pipeline retries once after repair and
/// then falls back to a synthesized object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("schema error at {location}: {reason}")]
    Schema { location: String, reason: String },
}

impl RecoveryError {
    pub fn parse(message: impl Into<String>) -> Self {
        RecoveryError::Parse(message.into())
    }

    pub fn schema(location: impl Into<String>, reason: impl Into<String>) -> Self {
        RecoveryError::Schema {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecoveryError::Parse(_) => ErrorKind::ParseError,
            RecoveryError::Schema { .. } => ErrorKind::SchemaError,
        }
    }
}

impl From<serde_json::Error> for RecoveryError {
    fn from(err: serde_json::Error) -> Self {
        RecoveryError::Parse(err.to_string())
    }
}
