//! Post normalization: slug, content text and excerpt derivation

use lazy_static::lazy_static;
use regex::Regex;

/// Excerpt length cap in characters
pub const EXCERPT_LENGTH: usize = 160;

/// Title characters kept when the body yields no excerpt
pub const TITLE_FALLBACK_LENGTH: usize = 100;

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"```[\s\S]*?```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]+`").unwrap();
    static ref MARKUP: Regex = Regex::new(r"[#*_~\[\]()]").unwrap();
    static ref MARKUP_AND_BANG: Regex = Regex::new(r"[#*_~\[\]()!]").unwrap();
    static ref NEWLINES: Regex = Regex::new(r"\n+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Explicit slug if non-empty, otherwise the slugified lower-cased title
pub fn derive_slug(explicit: Option<&str>, title: &str) -> String {
    match explicit {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slug::slugify(title.to_lowercase()),
    }
}

/// Title and body with markup punctuation blanked and whitespace collapsed
pub fn content_text(title: &str, body: &str) -> String {
    let joined = format!("{} {}", title, body);
    let blanked = MARKUP.replace_all(&joined, " ");
    WHITESPACE.replace_all(&blanked, " ").trim().to_string()
}

/// Plain-text preview of `body`, falling back to the title
///
/// The ellipsis is appended only when the cut text reaches the cap, so the
/// cut may land mid-word.
pub fn excerpt(body: &str, title: &str) -> String {
    let text = FENCED_CODE.replace_all(body, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = MARKUP_AND_BANG.replace_all(&text, "");
    let text = NEWLINES.replace_all(&text, " ");
    let plain: String = text.trim().chars().take(EXCERPT_LENGTH).collect();

    if plain.is_empty() {
        let head: String = title.chars().take(TITLE_FALLBACK_LENGTH).collect();
        format!("{}...", head)
    } else if plain.chars().count() >= EXCERPT_LENGTH {
        format!("{}...", plain)
    } else {
        plain
    }
}
