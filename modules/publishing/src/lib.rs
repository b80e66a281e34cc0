#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod forms;
mod publisher;

pub use error::PublishError;
pub use forms::{ContactForm, NewPost};
pub use inkpost_utils::{preview, strip_html_tags};
pub use publisher::{OWN_BLOGS_PAGE_SIZE, Publisher};
