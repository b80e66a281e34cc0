use serde::{Deserialize, Serialize};

/// Server-issued switches that widen what plain admins may do.
///
/// Super-admins own these flags; the client only reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct AdminPermissions {
    #[serde(default)]
    pub can_admin_update_web_settings: bool,
    #[serde(default)]
    pub can_admin_update_web_colors: bool,
    #[serde(default)]
    pub can_admin_remove_users: bool,
}

impl AdminPermissions {
    /// Every admin capability switched on.
    #[must_use]
    pub fn all() -> Self {
        Self {
            can_admin_update_web_settings: true,
            can_admin_update_web_colors: true,
            can_admin_remove_users: true,
        }
    }
}
