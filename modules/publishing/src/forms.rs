use inkpost_utils::{TagRule, parse_tags, strip_html_tags};

use crate::error::PublishError;

pub const MAX_SUBJECT_CHARS: usize = 100;
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// The publish form as typed, with tags still one free-text string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    /// Rich-text HTML.
    pub content: String,
    pub tags: String,
    pub is_private: bool,
}

impl NewPost {
    pub(crate) fn validate(&self) -> Result<(String, Vec<String>), PublishError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PublishError::invalid_input("Please enter a title"));
        }
        if strip_html_tags(&self.content).trim().is_empty() {
            return Err(PublishError::invalid_input("Please write some content"));
        }
        Ok((title.to_owned(), parse_tags(&self.tags, TagRule::Strict)))
    }
}

/// The contact-the-admins form. `email` is only read for guests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub subject: String,
    pub message: String,
    pub email: Option<String>,
}

impl ContactForm {
    pub(crate) fn validate(&self) -> Result<(), PublishError> {
        if self.subject.trim().is_empty() {
            return Err(PublishError::invalid_input("Please enter a subject"));
        }
        if self.subject.chars().count() > MAX_SUBJECT_CHARS {
            return Err(PublishError::invalid_input(
                "The subject must not exceed 100 characters",
            ));
        }
        if self.message.trim().is_empty() {
            return Err(PublishError::invalid_input("Please enter a message"));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(PublishError::invalid_input(
                "The message must not exceed 2000 characters",
            ));
        }
        Ok(())
    }
}
