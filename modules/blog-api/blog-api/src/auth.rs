use async_trait::async_trait;
use blog_api_sdk::{ApiError, AuthApi, Credentials};
use inkpost_security::Principal;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::{HttpBlogApi, execute_json, execute_unit};

#[derive(Deserialize)]
struct IdentityEnvelope {
    user: Principal,
}

#[async_trait]
impl AuthApi for HttpBlogApi {
    #[instrument(skip_all)]
    async fn current_user(&self) -> Result<Principal, ApiError> {
        let url = self.endpoint(&["api", "auth", "me"])?;
        let envelope: IdentityEnvelope = execute_json(self.get(url), "Not signed in").await?;
        Ok(envelope.user)
    }

    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "login"])?;
        execute_unit(self.post(url).json(credentials), "Failed to login").await
    }

    #[instrument(skip_all)]
    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "logout"])?;
        execute_unit(self.post(url), "Failed to logout").await
    }

    #[instrument(skip_all)]
    async fn update_profile_picture(&self, picture_url: &str) -> Result<Principal, ApiError> {
        let url = self.endpoint(&["api", "users", "profile"])?;
        let body = json!({ "profilePicture": picture_url });
        execute_json(self.put(url).json(&body), "Failed to update profile").await
    }

    #[instrument(skip_all)]
    async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "users", "change-password"])?;
        let body = json!({ "oldPassword": old_password, "newPassword": new_password });
        execute_unit(self.put(url).json(&body), "Failed to change password").await
    }

    #[instrument(skip_all)]
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "forget-password"])?;
        execute_unit(
            self.post(url).json(&json!({ "email": email })),
            "Something went wrong.",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn resend_confirmation_email(&self, email: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "order-new-confirmation-email"])?;
        execute_unit(
            self.post(url).json(&json!({ "email": email })),
            "Failed to send the activation email",
        )
        .await
    }
}
