#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Identity and authorization primitives shared by every Inkpost module.
//!
//! The server remains the authority on what a principal may do; the types
//! here only decide which affordances a view should offer.

pub mod capability;
pub mod permissions;
pub mod principal;
pub mod role;

pub use capability::{Action, CapabilityDenied, Decision, SiteFlags, resolve, resolve_on_target};
pub use permissions::AdminPermissions;
pub use principal::Principal;
pub use role::{Role, UnknownRole};
