use blog_api_sdk::ApiError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Rejected locally before any request was sent.
    #[error("{message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SessionError {
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Text a form renders next to the failed action.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidInput { message } => message,
            Self::Api(e) => e.user_message(),
        }
    }

    /// Ban period reported by the server, if any.
    #[must_use]
    pub fn remaining_time(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { .. } => None,
            Self::Api(e) => e.remaining_time(),
        }
    }
}
