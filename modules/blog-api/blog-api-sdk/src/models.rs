//! Wire models for the Inkpost API.
//!
//! Field names follow the server's JSON (camelCase, Mongo-style `_id`).
//! Documents the client edits and sends back keep unknown fields in `extra`
//! so a round-trip never drops server data.

use inkpost_security::{AdminPermissions, Principal, SiteFlags};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::palette::ThemeColors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Server-owned site configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SiteSettings {
    #[serde(default)]
    pub website_name: String,
    #[serde(default)]
    pub website_title: String,
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub website_logo: String,
    #[serde(default)]
    pub can_publish: bool,
    #[serde(default)]
    pub show_logo: bool,
    #[serde(default)]
    pub show_name: bool,
    #[serde(flatten)]
    pub admin_permissions: AdminPermissions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ThemeColors>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SiteSettings {
    /// Flags that take part in capability resolution.
    #[must_use]
    pub fn flags(&self) -> SiteFlags {
        SiteFlags {
            admin: self.admin_permissions,
            can_publish: self.can_publish,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub users: Vec<Principal>,
    #[serde(default = "one")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogsPage {
    pub blogs: Vec<Blog>,
    #[serde(default = "one")]
    pub total_pages: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogAuthor {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// A blog post as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<BlogAuthor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Blog {
    /// Posts from non-staff authors wait for approval.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some("pending")
    }
}

/// A new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedBlog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

/// Per-author activity summary. Every figure is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub account_age: Option<u64>,
    pub total_blogs: u64,
    pub published_blogs: u64,
    pub pending_blogs: u64,
    pub total_likes: u64,
    pub total_dislikes: u64,
    pub total_comments_made: u64,
    pub total_blogs_liked: u64,
    pub most_liked_blog: Option<LinkedBlog>,
    pub most_commented_blog: Option<LinkedBlog>,
    pub avg_likes_per_blog: Option<f64>,
    pub avg_comments_per_blog: Option<f64>,
    pub engagement_rate: Option<f64>,
    pub top_tags: Vec<String>,
}

/// Message to the site staff, from a signed-in user or a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub subject: String,
    pub message: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub is_guest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
