//! Single place where role, site flags and the requested action meet.
//!
//! Views used to repeat `role == admin && !flag` checks inline; every gate now
//! goes through [`resolve`] so the rules cannot drift between screens.

use std::fmt;
use std::str::FromStr;

use crate::permissions::AdminPermissions;
use crate::role::Role;

/// Something a view may offer to the current principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewDashboard,
    ModerateBlogs,
    ManageUserRoles,
    UpdateSiteSettings,
    UpdateSiteColors,
    RemoveUsers,
    ManageAdmins,
    UpdateAdminPermissions,
    PublishBlog,
    UpdateOwnProfile,
    EditOwnBlogs,
    ContactAdmins,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Self::ViewDashboard,
        Self::ModerateBlogs,
        Self::ManageUserRoles,
        Self::UpdateSiteSettings,
        Self::UpdateSiteColors,
        Self::RemoveUsers,
        Self::ManageAdmins,
        Self::UpdateAdminPermissions,
        Self::PublishBlog,
        Self::UpdateOwnProfile,
        Self::EditOwnBlogs,
        Self::ContactAdmins,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewDashboard => "view-dashboard",
            Self::ModerateBlogs => "moderate-blogs",
            Self::ManageUserRoles => "manage-user-roles",
            Self::UpdateSiteSettings => "update-site-settings",
            Self::UpdateSiteColors => "update-site-colors",
            Self::RemoveUsers => "remove-users",
            Self::ManageAdmins => "manage-admins",
            Self::UpdateAdminPermissions => "update-admin-permissions",
            Self::PublishBlog => "publish-blog",
            Self::UpdateOwnProfile => "update-own-profile",
            Self::EditOwnBlogs => "edit-own-blogs",
            Self::ContactAdmins => "contact-admins",
        }
    }

    /// Actions that act on another account and are therefore refused when
    /// that account is a super-admin.
    #[must_use]
    pub fn targets_account(self) -> bool {
        matches!(self, Self::ManageUserRoles | Self::RemoveUsers)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

/// Site-level switches that take part in capability resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteFlags {
    pub admin: AdminPermissions,
    pub can_publish: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Turn a deny into an error carrying the refused action.
    ///
    /// # Errors
    /// Returns [`CapabilityDenied`] when the decision is [`Decision::Deny`].
    pub fn require(self, action: Action) -> Result<(), CapabilityDenied> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny => Err(CapabilityDenied { action }),
        }
    }

    fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not allowed to {action}")]
pub struct CapabilityDenied {
    pub action: Action,
}

/// Decide whether `role` (or an anonymous visitor when `None`) may perform
/// `action` under the given site flags.
#[must_use]
pub fn resolve(role: Option<Role>, flags: &SiteFlags, action: Action) -> Decision {
    if action == Action::ContactAdmins {
        return Decision::Allow;
    }
    let Some(role) = role else {
        return Decision::Deny;
    };

    let allowed = match action {
        Action::ContactAdmins | Action::UpdateOwnProfile | Action::EditOwnBlogs => true,
        Action::ViewDashboard | Action::ModerateBlogs | Action::ManageUserRoles => role.is_staff(),
        Action::UpdateSiteSettings => {
            admin_gate(role, flags.admin.can_admin_update_web_settings)
        }
        Action::UpdateSiteColors => admin_gate(role, flags.admin.can_admin_update_web_colors),
        Action::RemoveUsers => admin_gate(role, flags.admin.can_admin_remove_users),
        Action::ManageAdmins | Action::UpdateAdminPermissions => role == Role::SuperAdmin,
        Action::PublishBlog => role.is_staff() || flags.can_publish,
    };
    Decision::from_bool(allowed)
}

/// Like [`resolve`], but also refuses account-targeting actions aimed at a
/// super-admin.
#[must_use]
pub fn resolve_on_target(
    role: Option<Role>,
    flags: &SiteFlags,
    action: Action,
    target: Role,
) -> Decision {
    if action.targets_account() && target == Role::SuperAdmin {
        return Decision::Deny;
    }
    resolve(role, flags, action)
}

fn admin_gate(role: Role, flag: bool) -> bool {
    match role {
        Role::SuperAdmin => true,
        Role::Admin => flag,
        Role::User => false,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[path = "capability_test.rs"]
mod capability_test;
