//! Content providers
//!
//! Every backing source implements [`ContentAdapter`]; callers hold an
//! `Arc<dyn ContentAdapter>` from the factory and never branch on the kind.

pub mod factory;
pub mod markdown;
pub mod remote;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::content::Post;
use crate::error::Result;

pub use factory::{create_adapter, get_content_adapter, init_content_adapter, resolve_provider_kind};
pub use markdown::MarkdownContentAdapter;
pub use remote::RemoteContentAdapter;

/// The configured backing source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Markdown,
    Remote,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    /// Case-insensitive
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" => Ok(Self::Markdown),
            "remote" => Ok(Self::Remote),
            other => Err(other.to_string()),
        }
    }
}

/// Read operations over a post collection
#[async_trait]
pub trait ContentAdapter: Send + Sync {
    /// Which source backs this adapter
    fn kind(&self) -> ProviderKind;

    /// Every post, newest first
    async fn get_all_posts(&self) -> Result<Vec<Post>>;

    /// Posts whose category matches, ignoring case
    async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>>;

    /// The post with this slug (or id) in the category, if any
    async fn get_post_by_slug(&self, category: &str, slug: &str) -> Result<Option<Post>>;

    /// Category names without duplicates, in first-seen order
    async fn get_distinct_categories(&self) -> Result<Vec<String>>;
}
