//! API trait definitions.
//!
//! Every call carries the ambient session credential; none of them take an
//! explicit token.

use async_trait::async_trait;
use inkpost_security::{AdminPermissions, Principal};

use crate::errors::ApiError;
use crate::models::{
    Blog, BlogDraft, BlogsPage, ContactMessage, Credentials, SiteSettings, UserStats, UsersPage,
};
use crate::palette::ThemeColors;

/// Session and own-account endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Identity check. `Unauthorized` means "no session", not a fault.
    async fn current_user(&self) -> Result<Principal, ApiError>;

    /// Establish a session; the credential is kept by the transport.
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// Returns the full updated user document.
    async fn update_profile_picture(&self, url: &str) -> Result<Principal, ApiError>;

    async fn change_password(&self, old_password: &str, new_password: &str)
    -> Result<(), ApiError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    async fn resend_confirmation_email(&self, email: &str) -> Result<(), ApiError>;
}

/// Site-wide settings and palettes.
#[async_trait]
pub trait SiteSettingsApi: Send + Sync {
    async fn fetch_settings(&self) -> Result<SiteSettings, ApiError>;

    async fn save_settings(&self, settings: &SiteSettings) -> Result<SiteSettings, ApiError>;

    async fn reset_settings(&self) -> Result<SiteSettings, ApiError>;

    /// Persist both palettes. Returns the server's message, if any.
    async fn save_colors(&self, colors: &ThemeColors) -> Result<Option<String>, ApiError>;

    /// Restore the server's default palettes and return them.
    async fn reset_colors(&self) -> Result<ThemeColors, ApiError>;

    async fn update_admin_permissions(
        &self,
        permissions: &AdminPermissions,
    ) -> Result<SiteSettings, ApiError>;
}

/// Dashboard endpoints for staff accounts.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_users(&self, page: u32) -> Result<UsersPage, ApiError>;

    /// Flip a user between `user` and `admin`.
    async fn toggle_user_role(&self, user_id: &str) -> Result<(), ApiError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), ApiError>;

    async fn list_admins(&self) -> Result<Vec<Principal>, ApiError>;

    /// Flip an account between `admin` and `superAdmin`.
    async fn toggle_super_admin(&self, user_id: &str) -> Result<(), ApiError>;

    async fn list_blogs(&self, page: u32) -> Result<BlogsPage, ApiError>;

    /// Flip a post between public and private.
    async fn toggle_blog_visibility(&self, blog_id: &str) -> Result<(), ApiError>;

    async fn approve_blog(&self, blog_id: &str) -> Result<Blog, ApiError>;

    async fn delete_blog(&self, blog_id: &str) -> Result<(), ApiError>;
}

/// Authoring endpoints.
#[async_trait]
pub trait BlogsApi: Send + Sync {
    async fn publish(&self, draft: &BlogDraft) -> Result<(), ApiError>;

    async fn get_blog(&self, blog_id: &str) -> Result<Blog, ApiError>;

    async fn update_blog(&self, blog: &Blog) -> Result<(), ApiError>;

    async fn own_blogs(&self, page: u32, limit: u32) -> Result<BlogsPage, ApiError>;

    async fn user_stats(&self, user_id: &str) -> Result<UserStats, ApiError>;
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn send_message(&self, message: &ContactMessage) -> Result<(), ApiError>;
}

/// Everything the remote API offers, for callers that want one handle.
pub trait BlogApi: AuthApi + SiteSettingsApi + AdminApi + BlogsApi + ContactApi {}

impl<T> BlogApi for T where T: AuthApi + SiteSettingsApi + AdminApi + BlogsApi + ContactApi {}
