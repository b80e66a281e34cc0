#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Site colors and the light/dark switch.
//!
//! [`ThemeStore`] owns two palettes that always share one key set plus the
//! active [`Mode`]. The mode survives restarts through [`LocalStorage`]; the
//! palettes are durable only once saved to the server.

mod defaults;
mod error;
mod mode;
mod storage;
mod store;

pub use blog_api_sdk::{ColorToken, Palette, ThemeColors};
pub use defaults::default_colors;
pub use error::ThemeError;
pub use mode::Mode;
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};
pub use store::{MODE_KEY, ThemeState, ThemeStore};
