use blog_api_sdk::ApiError;
use inkpost_security::CapabilityDenied;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Denied(#[from] CapabilityDenied),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PublishError {
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => message.clone(),
            Self::Denied(denied) => denied.to_string(),
            Self::Api(e) => e.user_message().to_owned(),
        }
    }

    /// Ban period reported by the server, if any.
    #[must_use]
    pub fn remaining_time(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.remaining_time(),
            Self::InvalidInput { .. } | Self::Denied(_) => None,
        }
    }
}
