//! Inkpost API SDK
//!
//! Transport-agnostic contract between the client-side stores and the remote
//! blogging API:
//! - [`AuthApi`], [`SiteSettingsApi`], [`AdminApi`], [`BlogsApi`], [`ContactApi`]
//! - wire models in [`models`]
//! - [`ApiError`], the single failure type every call resolves to
//!
//! The HTTP implementation lives in the `blog-api` crate; stores depend only
//! on these traits so tests can hand them in-memory doubles.

pub mod api;
pub mod errors;
pub mod models;
pub mod palette;

pub use api::{AdminApi, AuthApi, BlogApi, BlogsApi, ContactApi, SiteSettingsApi};
pub use errors::ApiError;
pub use models::{
    Blog, BlogAuthor, BlogDraft, BlogsPage, ContactMessage, Credentials, LinkedBlog, SiteSettings,
    UserStats, UsersPage,
};
pub use palette::{ColorToken, Palette, ThemeColors, UnknownToken};
