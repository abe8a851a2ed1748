//! Content module - post model, collection loading, and normalization

pub mod frontmatter;
pub mod loader;
mod markdown;
pub mod normalize;
mod post;
pub mod reading_time;

pub use loader::{DirectoryCollection, RawEntry};
pub use markdown::MarkdownRenderer;
pub use post::{Heading, Post, PostData, ReadingTime, RenderSource, RenderedContent};
