use async_trait::async_trait;
use blog_api_sdk::{
    ApiError, Blog, BlogDraft, BlogsApi, BlogsPage, ContactApi, ContactMessage, UserStats,
};
use tracing::instrument;

use crate::client::{HttpBlogApi, execute_json, execute_unit};

#[async_trait]
impl BlogsApi for HttpBlogApi {
    #[instrument(skip_all, fields(title = %draft.title))]
    async fn publish(&self, draft: &BlogDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "blogs"])?;
        execute_unit(self.post(url).json(draft), "Something went wrong").await
    }

    #[instrument(skip_all, fields(blog_id = %blog_id))]
    async fn get_blog(&self, blog_id: &str) -> Result<Blog, ApiError> {
        let url = self.endpoint(&["api", "blogs", blog_id])?;
        execute_json(self.get(url), "Failed to fetch blog").await
    }

    #[instrument(skip_all, fields(blog_id = %blog.id))]
    async fn update_blog(&self, blog: &Blog) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "blogs", blog.id.as_str()])?;
        execute_unit(self.put(url).json(blog), "Failed to update blog").await
    }

    #[instrument(skip_all, fields(page = page, limit = limit))]
    async fn own_blogs(&self, page: u32, limit: u32) -> Result<BlogsPage, ApiError> {
        let url =
            self.paged_endpoint(&["api", "blogs", "user"], &[("page", page), ("limit", limit)])?;
        execute_json(self.get(url), "Failed to fetch blogs").await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn user_stats(&self, user_id: &str) -> Result<UserStats, ApiError> {
        let url = self.endpoint(&["api", "blogs", "user-stats", user_id])?;
        execute_json(self.get(url), "No statistics found for this user.").await
    }
}

#[async_trait]
impl ContactApi for HttpBlogApi {
    #[instrument(skip_all, fields(is_guest = message.is_guest))]
    async fn send_message(&self, message: &ContactMessage) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "contact", "send-msg"])?;
        execute_unit(self.post(url).json(message), "Failed to send email").await
    }
}
