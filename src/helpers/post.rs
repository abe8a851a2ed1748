//! Post helpers: URLs and template-ready post summaries

use serde::Serialize;

use super::date::{format_date_long, format_date_short};
use crate::content::reading_time::DEFAULT_WORDS_PER_MINUTE;
use crate::content::Post;

/// Whole minutes needed to read `words` at `words_per_minute`
pub fn calculate_reading_time(words: usize, words_per_minute: f64) -> u32 {
    if words_per_minute <= 0.0 {
        return 0;
    }
    (words as f64 / words_per_minute).ceil() as u32
}

/// The post's slug, or the slugified title when it has none
pub fn post_slug(post: &Post) -> String {
    if post.slug.is_empty() {
        slug::slugify(post.data.title.to_lowercase())
    } else {
        post.slug.clone()
    }
}

/// Site path of a post: `/{category}/{slug}`
pub fn post_url(post: &Post) -> String {
    format!(
        "/{}/{}",
        slug::slugify(post.data.category.to_lowercase()),
        post_slug(post)
    )
}

/// Site path of a category listing
pub fn category_url(category: &str) -> String {
    format!("/{}", slug::slugify(category.to_lowercase()))
}

/// Flat view of a post for listing templates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPostData {
    pub title: String,
    pub category: String,
    /// RFC 3339 timestamp
    pub date: String,
    pub date_long: String,
    pub date_short: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub excerpt: String,
    /// Whole minutes
    pub reading_time: u32,
    pub url: String,
    pub category_url: String,
}

/// Flatten a post for listing templates
pub fn normalize_post_data(post: &Post) -> NormalizedPostData {
    let date = post.data.date;
    NormalizedPostData {
        title: post.data.title.clone(),
        category: post.data.category.clone(),
        date: date.to_rfc3339(),
        date_long: format_date_long(&date),
        date_short: format_date_short(&date),
        slug: post_slug(post),
        image: Some(post.data.image.clone()).filter(|image| !image.is_empty()),
        excerpt: post.excerpt.clone(),
        reading_time: calculate_reading_time(post.reading_time.words, DEFAULT_WORDS_PER_MINUTE),
        url: post_url(post),
        category_url: category_url(&post.data.category),
    }
}
