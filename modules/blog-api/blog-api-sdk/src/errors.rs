//! Error type shared by every API call.

use thiserror::Error;

/// Why a remote call did not produce the expected payload.
///
/// Every variant carries a message suitable for inline display; use
/// [`ApiError::user_message`] rather than `Display` when rendering to a user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response (DNS, connect, timeout).
    #[error("network error: {message}")]
    Network { message: String },

    /// 401: no session or the session expired.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// 403: the session's role lacks the capability.
    #[error("forbidden: {message}")]
    Forbidden {
        message: String,
        remaining_time: Option<String>,
    },

    /// Any other non-2xx answer.
    #[error("HTTP {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        remaining_time: Option<String>,
    },

    /// 2xx with a body that does not decode into the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// The request could not be built (bad base URL, bad identifier).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            remaining_time: None,
        }
    }

    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            remaining_time: None,
        }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Message for inline display next to the control that failed.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message, .. }
            | Self::Rejected { message, .. }
            | Self::MalformedResponse { message }
            | Self::InvalidRequest { message } => message,
        }
    }

    /// Remaining ban period reported by the server, if any.
    #[must_use]
    pub fn remaining_time(&self) -> Option<&str> {
        match self {
            Self::Forbidden { remaining_time, .. } | Self::Rejected { remaining_time, .. } => {
                remaining_time.as_deref()
            }
            _ => None,
        }
    }

    /// 401 or 403.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Forbidden { .. })
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
