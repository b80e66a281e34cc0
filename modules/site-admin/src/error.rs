use blog_api_sdk::ApiError;
use inkpost_security::{Action, CapabilityDenied};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Refused locally before any request, or by the server with 401/403.
    #[error("{message}")]
    Denied { action: Action, message: String },

    /// The operation does not apply to the chosen account.
    #[error("{message}")]
    InvalidTarget { message: String },

    #[error(transparent)]
    Api(ApiError),
}

impl AdminError {
    pub(crate) fn from_api(action: Action, err: ApiError) -> Self {
        if err.is_permission_denied() {
            Self::Denied {
                action,
                message: err.user_message().to_owned(),
            }
        } else {
            Self::Api(err)
        }
    }

    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Denied { message, .. } | Self::InvalidTarget { message } => message,
            Self::Api(e) => e.user_message(),
        }
    }
}

impl From<CapabilityDenied> for AdminError {
    fn from(denied: CapabilityDenied) -> Self {
        Self::Denied {
            action: denied.action,
            message: denied.to_string(),
        }
    }
}
