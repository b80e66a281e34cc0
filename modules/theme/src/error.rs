use blog_api_sdk::ApiError;
use thiserror::Error;

/// Failure of a theme operation. In-memory theme state is never changed
/// when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("'{value}' is not a hex color (#rgb or #rrggbb)")]
    InvalidColor { value: String },

    #[error("unknown theme '{value}', expected 'light' or 'dark'")]
    InvalidMode { value: String },

    #[error("unknown color token '{value}'")]
    InvalidToken { value: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ThemeError {
    /// Inline message for the color settings screen.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message().to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<blog_api_sdk::UnknownToken> for ThemeError {
    fn from(e: blog_api_sdk::UnknownToken) -> Self {
        Self::InvalidToken { value: e.0 }
    }
}
