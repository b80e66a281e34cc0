#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! reqwest-backed implementation of every `blog-api-sdk` trait.
//!
//! The client keeps a cookie store, so the session cookie set by the login
//! endpoint is replayed on every later call. That cookie is the only
//! credential the API uses; [`SessionCookies`] lets a caller carry it from
//! one process to the next.

mod admin;
mod auth;
mod blogs;
mod client;
mod config;
mod cookies;
mod error;
mod settings;

pub use client::HttpBlogApi;
pub use config::ApiClientConfig;
pub use cookies::SessionCookies;
pub use error::error_from_body;
