//! Normalized post model shared by every adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::frontmatter::date_field;
use super::normalize;
use super::reading_time;
use crate::error::Result;

/// Post metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    /// Post title
    pub title: String,

    /// Cover image reference
    pub image: String,

    /// Credit line for the cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_attribution: Option<String>,

    /// Publication date
    #[serde(with = "date_field")]
    pub date: DateTime<Utc>,

    /// Category name, compared case-insensitively
    pub category: String,

    #[serde(default)]
    pub trending: bool,

    #[serde(default)]
    pub top_pick: bool,

    #[serde(default)]
    pub popular: bool,

    /// Explicit slug override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Estimated reading time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingTime {
    /// Human text, e.g. "3 min read"
    pub text: String,
    /// Whole minutes, rounded up
    pub minutes: u32,
    /// Milliseconds
    pub time: u64,
    /// Word count
    pub words: usize,
}

/// A heading in a rendered post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub slug: String,
    pub text: String,
}

/// Output of a post's render accessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedContent {
    /// Displayable HTML
    pub content: String,
    /// Heading outline, empty when the source has none
    pub headings: Vec<Heading>,
}

/// Produces the displayable form of a post on demand
#[async_trait]
pub trait RenderSource: Send + Sync {
    async fn render(&self) -> Result<RenderedContent>;
}

/// A normalized blog post
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier from the source system
    pub id: String,

    /// URL-safe identifier
    pub slug: String,

    /// Raw content payload
    pub body: String,

    /// Preview text, never empty
    pub excerpt: String,

    pub data: PostData,

    pub reading_time: ReadingTime,

    #[serde(skip)]
    renderer: Arc<dyn RenderSource>,
}

impl Post {
    /// Build a post from source parts, deriving excerpt and reading time
    pub fn new(
        id: String,
        slug: String,
        body: String,
        data: PostData,
        renderer: Arc<dyn RenderSource>,
    ) -> Self {
        let content_text = normalize::content_text(&data.title, &body);
        let reading_time = reading_time::estimate(&content_text);
        let excerpt = normalize::excerpt(&body, &data.title);

        Self {
            id,
            slug,
            body,
            excerpt,
            data,
            reading_time,
            renderer,
        }
    }

    /// Render the post; recomputed on every call
    pub async fn render(&self) -> Result<RenderedContent> {
        self.renderer.render().await
    }

    /// Case-insensitive category comparison
    pub fn in_category(&self, category: &str) -> bool {
        self.data.category.to_lowercase() == category.to_lowercase()
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.slug == other.slug
            && self.body == other.body
            && self.excerpt == other.excerpt
            && self.data == other.data
            && self.reading_time == other.reading_time
    }
}

impl fmt::Debug for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Post")
            .field("id", &self.id)
            .field("slug", &self.slug)
            .field("excerpt", &self.excerpt)
            .field("data", &self.data)
            .field("reading_time", &self.reading_time)
            .finish_non_exhaustive()
    }
}
