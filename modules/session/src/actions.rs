use std::sync::Arc;

use blog_api_sdk::{AuthApi, Credentials};
use inkpost_security::Principal;
use inkpost_utils::{is_valid_email, is_valid_image_url};
use tracing::{info, instrument, warn};

use crate::error::SessionError;
use crate::store::SessionStore;

/// Account flows behind the login, profile and password forms.
///
/// Each flow that changes who the user is ends by replacing the
/// [`SessionStore`] value with the server's snapshot.
pub struct AuthActions {
    session: Arc<SessionStore>,
    api: Arc<dyn AuthApi>,
}

impl AuthActions {
    #[must_use]
    pub fn new(session: Arc<SessionStore>, api: Arc<dyn AuthApi>) -> Self {
        Self { session, api }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Sign in, then load the identity the new session belongs to.
    ///
    /// # Errors
    /// `InvalidInput` for empty fields; otherwise the API failure of either
    /// call. The store is left as it was on any failure.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Arc<Principal>, SessionError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::invalid_input("Email and password are required"));
        }

        self.api
            .login(&Credentials {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await?;
        let user = Arc::new(self.api.current_user().await?);
        info!(user.id = %user.id, role = %user.role, "signed in");
        self.session.set(Some(Principal::clone(&user)));
        Ok(user)
    }

    /// Sign out. The local session is cleared even when the server call
    /// fails, so a dead connection never leaves a stale identity on screen.
    ///
    /// # Errors
    /// Returns the server failure after clearing the store.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), SessionError> {
        let outcome = self.api.logout().await;
        self.session.set(None);
        if let Err(e) = &outcome {
            warn!(error = %e, "server logout failed; local session cleared anyway");
        }
        outcome.map_err(SessionError::from)
    }

    /// # Errors
    /// `InvalidInput` when the link is empty or not an image URL; the API
    /// failure otherwise, including any ban period.
    #[instrument(skip_all)]
    pub async fn update_profile_picture(
        &self,
        picture_url: &str,
    ) -> Result<Arc<Principal>, SessionError> {
        let picture_url = picture_url.trim();
        if picture_url.is_empty() {
            return Err(SessionError::invalid_input("Please enter the image link."));
        }
        if !is_valid_image_url(picture_url) {
            return Err(SessionError::invalid_input(
                "The link entered is not a valid image link",
            ));
        }

        let user = Arc::new(self.api.update_profile_picture(picture_url).await?);
        self.session.set(Some(Principal::clone(&user)));
        Ok(user)
    }

    /// # Errors
    /// `InvalidInput` for empty or identical passwords; the API failure
    /// otherwise.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        if old_password.is_empty() || new_password.is_empty() {
            return Err(SessionError::invalid_input(
                "Both the old and the new password are required",
            ));
        }
        if old_password == new_password {
            return Err(SessionError::invalid_input(
                "The new password must differ from the old one",
            ));
        }
        self.api
            .change_password(old_password, new_password)
            .await
            .map_err(SessionError::from)
    }

    /// # Errors
    /// `InvalidInput` for a malformed address; the API failure otherwise.
    #[instrument(skip_all)]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), SessionError> {
        let email = require_email(email)?;
        self.api
            .request_password_reset(email)
            .await
            .map_err(SessionError::from)
    }

    /// # Errors
    /// `InvalidInput` for a malformed address; the API failure otherwise.
    #[instrument(skip_all)]
    pub async fn resend_confirmation_email(&self, email: &str) -> Result<(), SessionError> {
        let email = require_email(email)?;
        self.api
            .resend_confirmation_email(email)
            .await
            .map_err(SessionError::from)
    }
}

fn require_email(email: &str) -> Result<&str, SessionError> {
    let email = email.trim();
    if is_valid_email(email) {
        Ok(email)
    } else {
        Err(SessionError::invalid_input("Please enter a valid email address"))
    }
}
