//! Public retrieval functions
//!
//! Each call goes through the shared adapter from
//! [`get_content_adapter`](crate::provider::get_content_adapter).

use crate::content::Post;
use crate::error::Result;
use crate::provider::get_content_adapter;

/// Every post, newest first
pub async fn get_all_posts() -> Result<Vec<Post>> {
    get_content_adapter()?.get_all_posts().await
}

/// Posts in a category, ignoring case
pub async fn get_posts_by_category(category: &str) -> Result<Vec<Post>> {
    get_content_adapter()?.get_posts_by_category(category).await
}

/// A single post by category and slug (or id)
pub async fn get_post_by_slug(category: &str, slug: &str) -> Result<Option<Post>> {
    get_content_adapter()?.get_post_by_slug(category, slug).await
}

/// Every category name, first-seen order
pub async fn get_distinct_categories() -> Result<Vec<String>> {
    get_content_adapter()?.get_distinct_categories().await
}
