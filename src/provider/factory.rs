//! Provider factory
//!
//! Resolves the configured provider kind, builds the matching adapter, and
//! keeps one shared instance for the life of the process.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::{ContentAdapter, MarkdownContentAdapter, ProviderKind, RemoteContentAdapter};
use crate::config::ContentConfig;
use crate::error::Result;

/// Process-wide adapter. Concurrent first callers block until one of them
/// has built it; a failed build leaves the cell empty.
static CONTENT_ADAPTER: OnceCell<Arc<dyn ContentAdapter>> = OnceCell::new();

/// Resolve the provider kind, defaulting to markdown
pub fn resolve_provider_kind(config: &ContentConfig) -> ProviderKind {
    let provider = match config.provider.as_deref() {
        Some(provider) if !provider.is_empty() => provider,
        _ => return ProviderKind::Markdown,
    };

    provider.parse().unwrap_or_else(|invalid| {
        tracing::warn!(
            "Invalid content provider \"{}\". Falling back to \"markdown\".",
            invalid
        );
        ProviderKind::Markdown
    })
}

/// Build the adapter for the configured kind
///
/// A remote adapter that fails to build is replaced by the markdown adapter.
/// Only a markdown construction failure reaches the caller.
pub fn create_adapter(config: &ContentConfig) -> Result<Arc<dyn ContentAdapter>> {
    match resolve_provider_kind(config) {
        ProviderKind::Remote => match RemoteContentAdapter::new(&config.remote) {
            Ok(adapter) => Ok(Arc::new(adapter)),
            Err(e) => {
                tracing::error!("Failed to initialize remote adapter: {}", e);
                tracing::warn!("Falling back to markdown adapter.");
                Ok(Arc::new(MarkdownContentAdapter::new(config)?))
            }
        },
        ProviderKind::Markdown => Ok(Arc::new(MarkdownContentAdapter::new(config)?)),
    }
}

/// Initialize the shared adapter from `config`
///
/// Returns the existing adapter unchanged if one was already built.
pub fn init_content_adapter(config: &ContentConfig) -> Result<Arc<dyn ContentAdapter>> {
    CONTENT_ADAPTER
        .get_or_try_init(|| -> Result<Arc<dyn ContentAdapter>> {
            let adapter = create_adapter(config)?;
            tracing::info!("Using {} content provider", adapter.kind());
            Ok(adapter)
        })
        .cloned()
}

/// The shared adapter, built from the environment on first use
pub fn get_content_adapter() -> Result<Arc<dyn ContentAdapter>> {
    match CONTENT_ADAPTER.get() {
        Some(adapter) => Ok(Arc::clone(adapter)),
        None => init_content_adapter(&ContentConfig::from_env()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use std::fs;
    use tempfile::TempDir;

    fn config(provider: Option<&str>) -> ContentConfig {
        ContentConfig {
            provider: provider.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_defaults_to_markdown() {
        assert_eq!(resolve_provider_kind(&config(None)), ProviderKind::Markdown);
        assert_eq!(resolve_provider_kind(&config(Some(""))), ProviderKind::Markdown);
    }

    #[test]
    fn test_resolve_ignores_case() {
        assert_eq!(resolve_provider_kind(&config(Some("Remote"))), ProviderKind::Remote);
        assert_eq!(resolve_provider_kind(&config(Some("MARKDOWN"))), ProviderKind::Markdown);
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(resolve_provider_kind(&config(Some("wordpress"))), ProviderKind::Markdown);
    }

    #[test]
    fn test_remote_without_project_falls_back_to_markdown() {
        let adapter = create_adapter(&config(Some("remote"))).unwrap();
        assert_eq!(adapter.kind(), ProviderKind::Markdown);
    }

    #[test]
    fn test_remote_with_project() {
        let mut config = config(Some("remote"));
        config.remote.project_id = Some("abc".to_string());
        let adapter = create_adapter(&config).unwrap();
        assert_eq!(adapter.kind(), ProviderKind::Remote);
    }

    #[test]
    fn test_markdown_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("posts.md");
        fs::write(&file, "not a directory").unwrap();

        let config = ContentConfig {
            provider: Some("remote".to_string()),
            content_dir: file,
            ..Default::default()
        };
        let err = create_adapter(&config).err().unwrap();
        assert!(matches!(err, ContentError::InvalidContentDir(_)));
    }
}
