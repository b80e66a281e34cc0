#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Dashboard operations for staff accounts.
//!
//! Every mutator checks the current principal's capability before touching
//! the network; the server's own checks remain the final word.

mod console;
mod error;

pub use console::AdminConsole;
pub use error::AdminError;
