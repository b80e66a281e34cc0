use async_trait::async_trait;
use blog_api_sdk::{ApiError, SiteSettings, SiteSettingsApi, ThemeColors};
use inkpost_security::AdminPermissions;
use serde::Deserialize;
use tracing::instrument;

use crate::client::{HttpBlogApi, execute, execute_json};

// The server spells this resource "webiste".
const SETTINGS: &str = "webiste-settings";
const RESET_SETTINGS: &str = "reset-webiste-settings";

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

#[async_trait]
impl SiteSettingsApi for HttpBlogApi {
    #[instrument(skip_all)]
    async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
        let url = self.endpoint(&["api", "admin", SETTINGS])?;
        execute_json(self.get(url), "Failed to load site settings").await
    }

    #[instrument(skip_all)]
    async fn save_settings(&self, settings: &SiteSettings) -> Result<SiteSettings, ApiError> {
        let url = self.endpoint(&["api", "admin", SETTINGS])?;
        execute_json(self.post(url).json(settings), "An error occurred.").await
    }

    #[instrument(skip_all)]
    async fn reset_settings(&self) -> Result<SiteSettings, ApiError> {
        let url = self.endpoint(&["api", "admin", RESET_SETTINGS])?;
        execute_json(self.get(url), "Failed to reset site settings").await
    }

    #[instrument(skip_all)]
    async fn save_colors(&self, colors: &ThemeColors) -> Result<Option<String>, ApiError> {
        let url = self.endpoint(&["api", "admin", "website-colors"])?;
        let response =
            execute(self.put(url).json(colors), "An error occurred while saving colors.").await?;
        // the body is informational; an empty or odd body still means saved
        let bytes = response.bytes().await.unwrap_or_default();
        Ok(serde_json::from_slice::<MessageBody>(&bytes)
            .ok()
            .and_then(|b| b.message))
    }

    #[instrument(skip_all)]
    async fn reset_colors(&self) -> Result<ThemeColors, ApiError> {
        let url = self.endpoint(&["api", "admin", "reset-website-colors"])?;
        execute_json(self.get(url), "An error occurred while resetting colors.").await
    }

    #[instrument(skip_all)]
    async fn update_admin_permissions(
        &self,
        permissions: &AdminPermissions,
    ) -> Result<SiteSettings, ApiError> {
        let url = self.endpoint(&["api", "admin", "update-admin-settings"])?;
        execute_json(self.put(url).json(permissions), "Failed to save admin settings").await
    }
}
