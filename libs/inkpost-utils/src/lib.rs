#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod markup;
pub mod tags;
pub mod validate;

pub use markup::{preview, strip_html_tags};
pub use tags::{MAX_TAG_LEN, TagRule, parse_tags};
pub use validate::{is_hex_color, is_valid_email, is_valid_image_url};
