//! Markdown provider - posts from a local directory collection

use async_trait::async_trait;
use futures::future::join_all;
use indexmap::IndexSet;
use std::sync::Arc;

use super::{ContentAdapter, ProviderKind};
use crate::config::ContentConfig;
use crate::content::{
    normalize, DirectoryCollection, MarkdownRenderer, Post, RawEntry, RenderSource,
    RenderedContent,
};
use crate::error::{ContentError, Result};

/// Serves posts from markdown files with YAML front-matter
pub struct MarkdownContentAdapter {
    collection: DirectoryCollection,
    renderer: Arc<MarkdownRenderer>,
}

/// Re-renders an entry's markdown each time it is asked
struct MarkdownRender {
    body: String,
    renderer: Arc<MarkdownRenderer>,
}

#[async_trait]
impl RenderSource for MarkdownRender {
    async fn render(&self) -> Result<RenderedContent> {
        let body = self.body.clone();
        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.render(&body))
            .await
            .map_err(|e| ContentError::Render(e.to_string()))
    }
}

impl MarkdownContentAdapter {
    /// Create an adapter over `config.content_dir`
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let collection = DirectoryCollection::new(&config.content_dir)?;
        tracing::debug!("Markdown provider reading {:?}", collection.root());
        Ok(Self {
            collection,
            renderer: Arc::new(MarkdownRenderer::new()),
        })
    }

    async fn convert_post(&self, entry: RawEntry) -> Post {
        let slug = normalize::derive_slug(entry.data.slug.as_deref(), &entry.data.title);
        let renderer = Arc::new(MarkdownRender {
            body: entry.body.clone(),
            renderer: Arc::clone(&self.renderer),
        });

        Post::new(entry.id, slug, entry.body, entry.data, renderer)
    }
}

#[async_trait]
impl ContentAdapter for MarkdownContentAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Markdown
    }

    async fn get_all_posts(&self) -> Result<Vec<Post>> {
        let entries = self.collection.load().await?;
        let mut posts = join_all(entries.into_iter().map(|entry| self.convert_post(entry))).await;

        // Stable: equal dates keep collection order
        posts.sort_by(|a, b| b.data.date.cmp(&a.data.date));

        Ok(posts)
    }

    async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>> {
        let posts = self.get_all_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|post| post.in_category(category))
            .collect())
    }

    async fn get_post_by_slug(&self, category: &str, slug: &str) -> Result<Option<Post>> {
        let posts = self.get_all_posts().await?;
        Ok(posts
            .into_iter()
            .find(|post| post.in_category(category) && (post.slug == slug || post.id == slug)))
    }

    async fn get_distinct_categories(&self) -> Result<Vec<String>> {
        let posts = self.get_all_posts().await?;
        let categories: IndexSet<String> = posts.into_iter().map(|post| post.data.category).collect();
        Ok(categories.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, front: &str, body: &str) {
        fs::write(dir.join(name), format!("---\n{}\n---\n{}", front, body)).unwrap();
    }

    fn fixture() -> (TempDir, MarkdownContentAdapter) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write_post(
            root,
            "a1.md",
            "title: Hello World\nimage: hello.png\ndate: 2024-01-01\ncategory: Tech",
            "# Hi\nSome **bold** text.",
        );
        write_post(
            root,
            "b2.md",
            "title: Black Holes\nimage: bh.png\ndate: 2024-03-10\ncategory: Science\ntrending: true",
            "Gravity wins.",
        );
        write_post(
            root,
            "c3.md",
            "title: Quantum Foam\nimage: qf.png\ndate: 2024-01-01\ncategory: science\nslug: foam",
            "Tiny bubbles.",
        );
        write_post(
            root,
            "d4.md",
            "title: Rust Async\nimage: ra.png\ndate: 2023-06-01\ncategory: TECH",
            &"x".repeat(200),
        );

        let config = ContentConfig {
            content_dir: root.to_path_buf(),
            ..Default::default()
        };
        let adapter = MarkdownContentAdapter::new(&config).unwrap();
        (dir, adapter)
    }

    #[tokio::test]
    async fn test_convert_example_post() {
        let (_dir, adapter) = fixture();
        let posts = adapter.get_all_posts().await.unwrap();
        let post = posts.iter().find(|p| p.id == "a1").unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.excerpt, "Hi Some bold text.");
        assert_eq!(post.data.category, "Tech");
        assert!(!post.data.trending);
        assert_eq!(post.data.slug, None);
    }

    #[tokio::test]
    async fn test_all_posts_sorted_newest_first_and_stable() {
        let (_dir, adapter) = fixture();
        let posts = adapter.get_all_posts().await.unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        // a1 and c3 share a date and keep file order
        assert_eq!(ids, vec!["b2", "a1", "c3", "d4"]);

        for post in &posts {
            assert!(!post.excerpt.is_empty());
            assert!(post.excerpt.chars().count() <= 163);
        }
    }

    #[tokio::test]
    async fn test_long_body_excerpt() {
        let (_dir, adapter) = fixture();
        let posts = adapter.get_all_posts().await.unwrap();
        let post = posts.iter().find(|p| p.id == "d4").unwrap();
        assert_eq!(post.excerpt, format!("{}...", "x".repeat(160)));
    }

    #[tokio::test]
    async fn test_posts_by_category_ignores_case() {
        let (_dir, adapter) = fixture();
        for query in ["science", "Science", "SCIENCE"] {
            let posts = adapter.get_posts_by_category(query).await.unwrap();
            let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["b2", "c3"]);
        }
        assert!(adapter.get_posts_by_category("art").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_by_slug_or_id() {
        let (_dir, adapter) = fixture();

        let by_slug = adapter.get_post_by_slug("SCIENCE", "foam").await.unwrap();
        assert_eq!(by_slug.map(|p| p.id), Some("c3".to_string()));

        let by_id = adapter.get_post_by_slug("science", "c3").await.unwrap();
        assert_eq!(by_id.map(|p| p.slug), Some("foam".to_string()));

        let wrong_category = adapter.get_post_by_slug("tech", "foam").await.unwrap();
        assert!(wrong_category.is_none());

        let missing = adapter.get_post_by_slug("science", "nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_distinct_categories_first_seen() {
        let (_dir, adapter) = fixture();
        let categories = adapter.get_distinct_categories().await.unwrap();
        assert_eq!(categories, vec!["Science", "Tech", "science", "TECH"]);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_equal() {
        let (_dir, adapter) = fixture();
        let first = adapter.get_all_posts().await.unwrap();
        let second = adapter.get_all_posts().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_render_is_lazy_and_repeatable() {
        let (_dir, adapter) = fixture();
        let post = adapter.get_post_by_slug("tech", "hello-world").await.unwrap().unwrap();

        let first = post.render().await.unwrap();
        let second = post.render().await.unwrap();
        assert_eq!(first, second);
        assert!(first.content.contains("<strong>bold</strong>"));
        assert_eq!(first.headings.len(), 1);
        assert_eq!(first.headings[0].slug, "hi");
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let dir = TempDir::new().unwrap();
        let config = ContentConfig {
            content_dir: dir.path().join("missing"),
            ..Default::default()
        };
        let adapter = MarkdownContentAdapter::new(&config).unwrap();
        assert!(adapter.get_all_posts().await.unwrap().is_empty());
        assert!(adapter.get_distinct_categories().await.unwrap().is_empty());
    }
}
