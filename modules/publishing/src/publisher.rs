use std::sync::Arc;

use arc_swap::ArcSwap;
use blog_api_sdk::{
    Blog, BlogDraft, BlogsApi, BlogsPage, ContactApi, ContactMessage, UserStats,
};
use inkpost_security::{Action, Principal, SiteFlags, resolve};
use inkpost_utils::{TagRule, is_valid_email, parse_tags};
use session::SessionStore;
use tracing::{info, instrument};

use crate::error::PublishError;
use crate::forms::{ContactForm, NewPost};

/// Posts per page on the author's own listing.
pub const OWN_BLOGS_PAGE_SIZE: u32 = 10;

/// Authoring flows for the signed-in principal, plus the contact form that
/// guests may use too.
pub struct Publisher {
    session: Arc<SessionStore>,
    blogs: Arc<dyn BlogsApi>,
    contact: Arc<dyn ContactApi>,
    flags: ArcSwap<SiteFlags>,
}

impl Publisher {
    #[must_use]
    pub fn new<A>(session: Arc<SessionStore>, api: Arc<A>) -> Self
    where
        A: BlogsApi + ContactApi + 'static,
    {
        Self {
            session,
            blogs: api.clone(),
            contact: api,
            flags: ArcSwap::from_pointee(SiteFlags::default()),
        }
    }

    /// Adopt the site flags from freshly loaded settings. Until then plain
    /// users may not publish.
    pub fn set_site_flags(&self, flags: SiteFlags) {
        self.flags.store(Arc::new(flags));
    }

    #[must_use]
    pub fn can_publish(&self) -> bool {
        resolve(self.session.role(), &self.flags.load(), Action::PublishBlog).is_allowed()
    }

    fn require(&self, action: Action) -> Result<(), PublishError> {
        resolve(self.session.role(), &self.flags.load(), action)
            .require(action)
            .map_err(PublishError::from)
    }

    /// # Errors
    /// `InvalidInput` for a missing title or empty content, `Denied` when
    /// the principal may not publish, or the API failure.
    #[instrument(skip_all)]
    pub async fn publish(&self, post: &NewPost) -> Result<(), PublishError> {
        self.require(Action::PublishBlog)?;
        let (title, tags) = post.validate()?;
        let draft = BlogDraft {
            title,
            content: post.content.clone(),
            tags,
            is_private: post.is_private,
        };
        self.blogs.publish(&draft).await?;
        info!(title = %draft.title, tags = draft.tags.len(), "post published");
        Ok(())
    }

    /// # Errors
    /// The API failure.
    pub async fn load_blog(&self, blog_id: &str) -> Result<Blog, PublishError> {
        Ok(self.blogs.get_blog(blog_id).await?)
    }

    /// Save an edited post. `tags` is the free-text tag field; only empty
    /// fragments are dropped.
    ///
    /// # Errors
    /// `InvalidInput` for a blank title, `Denied` for anonymous visitors,
    /// or the API failure.
    #[instrument(skip_all, fields(blog_id = %blog.id))]
    pub async fn update_blog(&self, mut blog: Blog, tags: &str) -> Result<Blog, PublishError> {
        self.require(Action::EditOwnBlogs)?;
        if blog.title.trim().is_empty() {
            return Err(PublishError::invalid_input("Please enter a title"));
        }
        blog.tags = parse_tags(tags, TagRule::Lenient);
        self.blogs.update_blog(&blog).await?;
        Ok(blog)
    }

    /// One page of the signed-in author's posts.
    ///
    /// # Errors
    /// `Denied` for anonymous visitors, or the API failure.
    pub async fn my_blogs(&self, page: u32) -> Result<BlogsPage, PublishError> {
        self.require(Action::EditOwnBlogs)?;
        Ok(self
            .blogs
            .own_blogs(page.max(1), OWN_BLOGS_PAGE_SIZE)
            .await?)
    }

    /// # Errors
    /// `InvalidInput` for an empty id, or the API failure.
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, PublishError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(PublishError::invalid_input("No user selected"));
        }
        Ok(self.blogs.user_stats(user_id).await?)
    }

    /// Send a message to the staff. Signed-in principals write as
    /// themselves; guests must give a reply address.
    ///
    /// # Errors
    /// `InvalidInput` when the form fails validation, or the API failure.
    #[instrument(skip_all)]
    pub async fn contact_admins(&self, form: &ContactForm) -> Result<(), PublishError> {
        form.validate()?;
        let message = match self.session.get() {
            Some(principal) => signed_message(form, &principal),
            None => guest_message(form)?,
        };
        self.contact.send_message(&message).await?;
        info!(is_guest = message.is_guest, "message sent to admins");
        Ok(())
    }
}

fn signed_message(form: &ContactForm, principal: &Principal) -> ContactMessage {
    ContactMessage {
        subject: form.subject.clone(),
        message: form.message.clone(),
        email: principal.email.clone(),
        username: Some(principal.username.clone()),
        is_guest: false,
        user_id: Some(principal.id.clone()),
    }
}

fn guest_message(form: &ContactForm) -> Result<ContactMessage, PublishError> {
    let email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| PublishError::invalid_input("Please enter a valid email address"))?;
    Ok(ContactMessage {
        subject: form.subject.clone(),
        message: form.message.clone(),
        email: email.to_owned(),
        username: None,
        is_guest: true,
        user_id: None,
    })
}

#[cfg(test)]
#[path = "publisher_test.rs"]
mod publisher_test;
