//! inkpress: content provider layer for static blogs and magazines
//!
//! Posts come from a local markdown collection or a hosted CMS query API and
//! are normalized into one [`Post`] shape. Page code calls the functions in
//! [`posts`], which forward to a process-wide [`ContentAdapter`] chosen from
//! configuration.

pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod posts;
pub mod provider;

pub use config::ContentConfig;
pub use content::{Heading, Post, PostData, ReadingTime, RenderedContent};
pub use error::{ContentError, Result};
pub use posts::{get_all_posts, get_distinct_categories, get_post_by_slug, get_posts_by_category};
pub use provider::{
    get_content_adapter, init_content_adapter, ContentAdapter, ProviderKind,
};
