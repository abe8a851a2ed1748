//! Content provider configuration
//!
//! Values come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! | Variable             | Field                 | Default              |
//! |----------------------|-----------------------|----------------------|
//! | `CONTENT_PROVIDER`   | `provider`            | markdown             |
//! | `CONTENT_DIR`        | `content_dir`         | `content/posts`      |
//! | `REMOTE_PROJECT_ID`  | `remote.project_id`   | required for remote  |
//! | `REMOTE_DATASET`     | `remote.dataset`      | `production`         |
//! | `REMOTE_API_VERSION` | `remote.api_version`  | `2024-01-01`         |
//! | `REMOTE_USE_CDN`     | `remote.use_cdn`      | true unless "false"  |
//! | `REMOTE_API_TOKEN`   | `remote.token`        | none                 |
//! | `REMOTE_API_URL`     | `remote.api_url`      | none                 |

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const ENV_PROVIDER: &str = "CONTENT_PROVIDER";
pub const ENV_CONTENT_DIR: &str = "CONTENT_DIR";
pub const ENV_PROJECT_ID: &str = "REMOTE_PROJECT_ID";
pub const ENV_DATASET: &str = "REMOTE_DATASET";
pub const ENV_API_VERSION: &str = "REMOTE_API_VERSION";
pub const ENV_USE_CDN: &str = "REMOTE_USE_CDN";
pub const ENV_API_TOKEN: &str = "REMOTE_API_TOKEN";
pub const ENV_API_URL: &str = "REMOTE_API_URL";

/// Top-level content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Provider kind as written by the user, resolved by the factory
    pub provider: Option<String>,

    /// Directory holding the markdown collection
    pub content_dir: PathBuf,

    /// Remote CMS settings
    pub remote: RemoteConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            provider: None,
            content_dir: PathBuf::from("content/posts"),
            remote: RemoteConfig::default(),
        }
    }
}

/// Remote query API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
    /// Replaces `https://{project_id}.api.sanity.io` when set
    pub api_url: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token: None,
            api_url: None,
        }
    }
}

impl ContentConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ContentConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded content config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment-style overrides from `lookup`
    ///
    /// Empty values are treated as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(provider) = get(ENV_PROVIDER) {
            self.provider = Some(provider);
        }
        if let Some(dir) = get(ENV_CONTENT_DIR) {
            self.content_dir = PathBuf::from(dir);
        }
        if let Some(project_id) = get(ENV_PROJECT_ID) {
            self.remote.project_id = Some(project_id);
        }
        if let Some(dataset) = get(ENV_DATASET) {
            self.remote.dataset = dataset;
        }
        if let Some(version) = get(ENV_API_VERSION) {
            self.remote.api_version = version;
        }
        if let Some(use_cdn) = get(ENV_USE_CDN) {
            self.remote.use_cdn = use_cdn != "false";
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.remote.token = Some(token);
        }
        if let Some(url) = get(ENV_API_URL) {
            self.remote.api_url = Some(url);
        }

        self
    }

    /// Resolve a relative content directory against `base_dir`
    pub fn rebase<P: AsRef<Path>>(mut self, base_dir: P) -> Self {
        if self.content_dir.is_relative() {
            self.content_dir = base_dir.as_ref().join(&self.content_dir);
        }
        self
    }
}
