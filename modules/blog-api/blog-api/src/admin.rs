use async_trait::async_trait;
use blog_api_sdk::{AdminApi, ApiError, Blog, BlogsPage, UsersPage};
use inkpost_security::Principal;
use serde_json::json;
use tracing::instrument;

use crate::client::{HttpBlogApi, execute_json, execute_unit};

#[async_trait]
impl AdminApi for HttpBlogApi {
    #[instrument(skip_all, fields(page = page))]
    async fn list_users(&self, page: u32) -> Result<UsersPage, ApiError> {
        let url = self.paged_endpoint(&["api", "admin", "users"], &[("page", page)])?;
        execute_json(self.get(url), "Failed to fetch users").await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn toggle_user_role(&self, user_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "users", user_id, "role"])?;
        execute_unit(self.put(url).json(&json!({})), "Failed to update role").await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "users", "delete-user", user_id])?;
        execute_unit(self.delete(url), "Failed to delete user").await
    }

    #[instrument(skip_all)]
    async fn list_admins(&self) -> Result<Vec<Principal>, ApiError> {
        let url = self.endpoint(&["api", "users", "get-admins"])?;
        execute_json(self.get(url), "Failed to get admins").await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn toggle_super_admin(&self, user_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "make-super-admin", user_id])?;
        execute_unit(self.get(url), "Failed to make super admin").await
    }

    #[instrument(skip_all, fields(page = page))]
    async fn list_blogs(&self, page: u32) -> Result<BlogsPage, ApiError> {
        let url = self.paged_endpoint(&["api", "admin", "blogs"], &[("page", page)])?;
        execute_json(self.get(url), "Something went wrong").await
    }

    #[instrument(skip_all, fields(blog_id = %blog_id))]
    async fn toggle_blog_visibility(&self, blog_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "blogs", blog_id, "status"])?;
        execute_unit(self.put(url).json(&json!({})), "Failed to update status").await
    }

    #[instrument(skip_all, fields(blog_id = %blog_id))]
    async fn approve_blog(&self, blog_id: &str) -> Result<Blog, ApiError> {
        let url = self.endpoint(&["api", "admin", "approve-blog", blog_id])?;
        execute_json(self.get(url), "Failed to approve blog").await
    }

    #[instrument(skip_all, fields(blog_id = %blog_id))]
    async fn delete_blog(&self, blog_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "blogs", blog_id])?;
        execute_unit(self.delete(url), "Failed to delete blog").await
    }
}
