#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Who is using the application right now.
//!
//! [`SessionStore`] is the single source of truth for the current
//! [`Principal`](inkpost_security::Principal); [`AuthActions`] are the
//! account flows (login, logout, profile edits) that replace it.

mod actions;
mod error;
mod store;

pub use actions::AuthActions;
pub use error::SessionError;
pub use store::SessionStore;
