use std::sync::Arc;

use arc_swap::ArcSwapOption;
use blog_api_sdk::{AdminApi, Blog, BlogsPage, SiteSettings, SiteSettingsApi, UsersPage};
use inkpost_security::{
    Action, AdminPermissions, Principal, Role, SiteFlags, resolve, resolve_on_target,
};
use session::SessionStore;
use tracing::{debug, info, instrument, warn};

use crate::error::AdminError;

/// Staff dashboard backed by the current session.
///
/// Keeps the last site settings it saw; their flags decide what an admin
/// may do. Until settings are loaded every flag reads as off, so plain
/// admins are refused flag-gated actions while super-admins are not.
pub struct AdminConsole {
    session: Arc<SessionStore>,
    settings_api: Arc<dyn SiteSettingsApi>,
    admin_api: Arc<dyn AdminApi>,
    settings: ArcSwapOption<SiteSettings>,
}

impl AdminConsole {
    #[must_use]
    pub fn new<A>(session: Arc<SessionStore>, api: Arc<A>) -> Self
    where
        A: SiteSettingsApi + AdminApi + 'static,
    {
        Self {
            session,
            settings_api: api.clone(),
            admin_api: api,
            settings: ArcSwapOption::empty(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> Option<Arc<SiteSettings>> {
        self.settings.load_full()
    }

    fn flags(&self) -> SiteFlags {
        self.settings
            .load()
            .as_ref()
            .map(|s| s.flags())
            .unwrap_or_default()
    }

    /// Whether the current principal may perform `action` right now.
    #[must_use]
    pub fn can(&self, action: Action) -> bool {
        resolve(self.session.role(), &self.flags(), action).is_allowed()
    }

    /// Refuse `action` up front, for callers that drive another store
    /// (such as the theme) on the console's behalf.
    ///
    /// # Errors
    /// [`AdminError::Denied`] when the current principal may not act.
    pub fn require(&self, action: Action) -> Result<(), AdminError> {
        resolve(self.session.role(), &self.flags(), action)
            .require(action)
            .inspect_err(|_| debug!(%action, "refused before request"))
            .map_err(AdminError::from)
    }

    fn require_on(&self, action: Action, target: &Principal) -> Result<(), AdminError> {
        resolve_on_target(self.session.role(), &self.flags(), action, target.role)
            .require(action)
            .inspect_err(|_| debug!(%action, target.id = %target.id, "refused before request"))
            .map_err(AdminError::from)
    }

    fn store_settings(&self, settings: SiteSettings) -> Arc<SiteSettings> {
        let settings = Arc::new(settings);
        self.settings.store(Some(settings.clone()));
        settings
    }

    /// # Errors
    /// The API failure; cached settings are kept.
    #[instrument(skip_all)]
    pub async fn load_settings(&self) -> Result<Arc<SiteSettings>, AdminError> {
        let settings = self
            .settings_api
            .fetch_settings()
            .await
            .map_err(|e| AdminError::from_api(Action::ViewDashboard, e))?;
        Ok(self.store_settings(settings))
    }

    /// # Errors
    /// `Denied` without a request when the principal may not change site
    /// settings; the API failure otherwise.
    #[instrument(skip_all)]
    pub async fn save_settings(
        &self,
        settings: &SiteSettings,
    ) -> Result<Arc<SiteSettings>, AdminError> {
        self.require(Action::UpdateSiteSettings)?;
        let saved = self
            .settings_api
            .save_settings(settings)
            .await
            .map_err(|e| AdminError::from_api(Action::UpdateSiteSettings, e))?;
        info!("site settings saved");
        Ok(self.store_settings(saved))
    }

    /// # Errors
    /// Same as [`AdminConsole::save_settings`].
    #[instrument(skip_all)]
    pub async fn reset_settings(&self) -> Result<Arc<SiteSettings>, AdminError> {
        self.require(Action::UpdateSiteSettings)?;
        let settings = self
            .settings_api
            .reset_settings()
            .await
            .map_err(|e| AdminError::from_api(Action::UpdateSiteSettings, e))?;
        info!("site settings reset");
        Ok(self.store_settings(settings))
    }

    /// Set what plain admins may do. Super-admin only.
    ///
    /// # Errors
    /// `Denied` for anyone but a super-admin; the API failure otherwise.
    #[instrument(skip_all)]
    pub async fn update_admin_permissions(
        &self,
        permissions: AdminPermissions,
    ) -> Result<Arc<SiteSettings>, AdminError> {
        self.require(Action::UpdateAdminPermissions)?;
        let settings = self
            .settings_api
            .update_admin_permissions(&permissions)
            .await
            .map_err(|e| AdminError::from_api(Action::UpdateAdminPermissions, e))?;
        info!(
            web_settings = permissions.can_admin_update_web_settings,
            web_colors = permissions.can_admin_update_web_colors,
            remove_users = permissions.can_admin_remove_users,
            "admin permissions updated"
        );
        Ok(self.store_settings(settings))
    }

    /// # Errors
    /// `Denied` for non-staff; the API failure otherwise.
    pub async fn list_users(&self, page: u32) -> Result<UsersPage, AdminError> {
        self.require(Action::ViewDashboard)?;
        self.admin_api
            .list_users(page.max(1))
            .await
            .map_err(|e| AdminError::from_api(Action::ViewDashboard, e))
    }

    /// Promote a user to admin or demote an admin to user.
    ///
    /// # Errors
    /// `Denied` for non-staff or when `target` is a super-admin.
    #[instrument(skip_all, fields(target.id = %target.id))]
    pub async fn toggle_user_role(&self, target: &Principal) -> Result<(), AdminError> {
        self.require_on(Action::ManageUserRoles, target)?;
        self.admin_api
            .toggle_user_role(&target.id)
            .await
            .map_err(|e| AdminError::from_api(Action::ManageUserRoles, e))
    }

    /// # Errors
    /// `Denied` unless the principal may remove users and `target` is not a
    /// super-admin.
    #[instrument(skip_all, fields(target.id = %target.id))]
    pub async fn delete_user(&self, target: &Principal) -> Result<(), AdminError> {
        self.require_on(Action::RemoveUsers, target)?;
        self.admin_api
            .delete_user(&target.id)
            .await
            .map_err(|e| AdminError::from_api(Action::RemoveUsers, e))?;
        warn!(target.id = %target.id, "user deleted");
        Ok(())
    }

    /// # Errors
    /// `Denied` for anyone but a super-admin.
    pub async fn list_admins(&self) -> Result<Vec<Principal>, AdminError> {
        self.require(Action::ManageAdmins)?;
        self.admin_api
            .list_admins()
            .await
            .map_err(|e| AdminError::from_api(Action::ManageAdmins, e))
    }

    /// Grant or withdraw super-admin status.
    ///
    /// # Errors
    /// `Denied` for anyone but a super-admin; `InvalidTarget` for plain users.
    #[instrument(skip_all, fields(target.id = %target.id))]
    pub async fn toggle_super_admin(&self, target: &Principal) -> Result<(), AdminError> {
        self.require(Action::ManageAdmins)?;
        if !target.role.is_staff() {
            return Err(AdminError::InvalidTarget {
                message: format!("{} is not an admin", target.username),
            });
        }
        self.admin_api
            .toggle_super_admin(&target.id)
            .await
            .map_err(|e| AdminError::from_api(Action::ManageAdmins, e))
    }

    /// Demote an admin back to a plain user.
    ///
    /// # Errors
    /// `Denied` for anyone but a super-admin; `InvalidTarget` unless
    /// `target` is an admin.
    #[instrument(skip_all, fields(target.id = %target.id))]
    pub async fn remove_admin_role(&self, target: &Principal) -> Result<(), AdminError> {
        self.require(Action::ManageAdmins)?;
        if target.role != Role::Admin {
            return Err(AdminError::InvalidTarget {
                message: format!("{} does not hold the admin role", target.username),
            });
        }
        self.admin_api
            .toggle_user_role(&target.id)
            .await
            .map_err(|e| AdminError::from_api(Action::ManageAdmins, e))
    }

    /// # Errors
    /// `Denied` for non-staff; the API failure otherwise.
    pub async fn list_blogs(&self, page: u32) -> Result<BlogsPage, AdminError> {
        self.require(Action::ModerateBlogs)?;
        self.admin_api
            .list_blogs(page.max(1))
            .await
            .map_err(|e| AdminError::from_api(Action::ModerateBlogs, e))
    }

    /// # Errors
    /// `Denied` for non-staff; the API failure otherwise.
    #[instrument(skip_all, fields(blog_id = %blog_id))]
    pub async fn toggle_blog_visibility(&self, blog_id: &str) -> Result<(), AdminError> {
        self.require(Action::ModerateBlogs)?;
        self.admin_api
            .toggle_blog_visibility(blog_id)
            .await
            .map_err(|e| AdminError::from_api(Action::ModerateBlogs, e))
    }

    /// # Errors
    /// `Denied` for non-staff; the API failure otherwise.
    #[instrument(skip_all, fields(blog_id = %blog_id))]
    pub async fn approve_blog(&self, blog_id: &str) -> Result<Blog, AdminError> {
        self.require(Action::ModerateBlogs)?;
        self.admin_api
            .approve_blog(blog_id)
            .await
            .map_err(|e| AdminError::from_api(Action::ModerateBlogs, e))
    }

    /// # Errors
    /// `Denied` for non-staff; the API failure otherwise.
    #[instrument(skip_all, fields(blog_id = %blog_id))]
    pub async fn delete_blog(&self, blog_id: &str) -> Result<(), AdminError> {
        self.require(Action::ModerateBlogs)?;
        self.admin_api
            .delete_blog(blog_id)
            .await
            .map_err(|e| AdminError::from_api(Action::ModerateBlogs, e))
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
