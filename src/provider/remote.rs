//! Remote provider - posts from a hosted CMS query API
//!
//! Queries are GROQ strings sent as `GET {base}?query=...` with `$name`
//! parameters encoded as JSON literals. The response envelope carries the
//! matched documents under `result`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ContentAdapter, ProviderKind};
use crate::config::RemoteConfig;
use crate::content::frontmatter::parse_date_string;
use crate::content::{normalize, Post, PostData, RenderSource, RenderedContent};
use crate::error::{ContentError, Result};
use crate::helpers::html_escape;

/// Category used when a document has no category reference
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

const POST_PROJECTION: &str = r#"{
  _id,
  title,
  slug,
  image,
  imageAttribution,
  publishedAt,
  category->{ title },
  trending,
  topPick,
  popular,
  body,
  "bodyRaw": pt::text(body)
}"#;

/// Serves posts from a CMS query endpoint
pub struct RemoteContentAdapter {
    base_url: String,
    client: Client,
}

/// Query response envelope
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct SlugField {
    current: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryRef {
    title: Option<String>,
}

/// A post document as projected by [`POST_PROJECTION`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemotePost {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<SlugField>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_attribution: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    category: Option<CategoryRef>,
    #[serde(default)]
    trending: Option<bool>,
    #[serde(default)]
    top_pick: Option<bool>,
    #[serde(default)]
    popular: Option<bool>,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default)]
    body_raw: Option<String>,
}

/// Wraps the plain-text body in a `<div>`; no headings
struct PlainTextRender {
    body: String,
}

#[async_trait]
impl RenderSource for PlainTextRender {
    async fn render(&self) -> Result<RenderedContent> {
        Ok(RenderedContent {
            content: format!("<div>{}</div>", html_escape(&self.body)),
            headings: Vec::new(),
        })
    }
}

impl RemoteContentAdapter {
    /// Create an adapter; fails when no project id is configured
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ContentError::MissingConfiguration(
                    "REMOTE_PROJECT_ID is required for the remote provider".to_string(),
                )
            })?;

        let host = match config.api_url.as_deref() {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", project_id),
        };
        let base_url = format!(
            "{}/v{}/data/query/{}",
            host, config.api_version, config.dataset
        );

        let client = Client::builder()
            .default_headers(Self::create_headers(config)?)
            .build()?;

        tracing::debug!("Remote provider querying {}", base_url);
        Ok(Self { base_url, client })
    }

    /// Endpoint every query is sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers(config: &RemoteConfig) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let cache_hint = if config.use_cdn {
            "max-age=60"
        } else {
            "no-cache"
        };
        headers.insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static(cache_hint),
        );

        if let Some(token) = config.token.as_deref() {
            let auth_header = format!("Bearer {}", token);
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_header).map_err(|e| {
                    ContentError::MissingConfiguration(format!("Invalid API token format: {}", e))
                })?,
            );
        }

        Ok(headers)
    }

    fn query_url(&self, query: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}?query={}", self.base_url, encode(query));
        for (name, value) in params {
            let literal = Value::String(value.to_string()).to_string();
            url.push_str(&format!("&${}={}", name, encode(&literal)));
        }
        url
    }

    /// Run a query, logging and returning any failure
    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        match self.fetch(query, params).await {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::error!("Remote query error: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self.query_url(query, params);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::RemoteStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let text = response.text().await?;
        let envelope: QueryResponse = serde_json::from_str(&text)?;
        result_items(envelope.result)
    }

    async fn query_posts(&self, query: &str, params: &[(&str, &str)]) -> Result<Vec<Post>> {
        let records: Vec<RemotePost> = self.query(query, params).await?;
        Ok(records.into_iter().map(convert_post).collect())
    }
}

#[async_trait]
impl ContentAdapter for RemoteContentAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Remote
    }

    async fn get_all_posts(&self) -> Result<Vec<Post>> {
        let query = format!(
            r#"*[_type == "post"] | order(publishedAt desc) {}"#,
            POST_PROJECTION
        );
        self.query_posts(&query, &[]).await
    }

    async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>> {
        let query = format!(
            r#"*[_type == "post" && category->title match $category] | order(publishedAt desc) {}"#,
            POST_PROJECTION
        );
        self.query_posts(&query, &[("category", category)]).await
    }

    async fn get_post_by_slug(&self, category: &str, slug: &str) -> Result<Option<Post>> {
        let query = format!(
            r#"*[_type == "post" && slug.current == $slug && category->title match $category][0] {}"#,
            POST_PROJECTION
        );
        let posts = self
            .query_posts(&query, &[("slug", slug), ("category", category)])
            .await?;
        Ok(posts.into_iter().next())
    }

    async fn get_distinct_categories(&self) -> Result<Vec<String>> {
        let query = r#"array::unique(*[_type == "post"].category->title)"#;
        let titles: Vec<Option<String>> = self.query(query, &[]).await?;
        Ok(titles
            .into_iter()
            .flatten()
            .filter(|title| !title.is_empty())
            .collect())
    }
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// `null` is no documents, an object is one, an array is many
fn result_items<T: DeserializeOwned>(result: Value) -> Result<Vec<T>> {
    let items = match result {
        Value::Null => Vec::new(),
        Value::Array(values) => values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(items)
}

fn convert_post(record: RemotePost) -> Post {
    let title = record.title.unwrap_or_default();
    let explicit_slug = record.slug.and_then(|slug| slug.current);
    let slug = normalize::derive_slug(explicit_slug.as_deref(), &title);

    let category = record
        .category
        .and_then(|category| category.title)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let body = match record.body_raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => raw,
        None => {
            let body = record.body.unwrap_or_else(|| Value::String(String::new()));
            serde_json::to_string(&body).unwrap_or_default()
        }
    };

    let date = record
        .published_at
        .as_deref()
        .and_then(parse_date_string)
        .unwrap_or_else(|| {
            tracing::warn!("Post {} has no valid publishedAt, using epoch", record.id);
            DateTime::<Utc>::default()
        });

    let data = PostData {
        title,
        image: record.image.unwrap_or_default(),
        image_attribution: record.image_attribution,
        date,
        category,
        trending: record.trending.unwrap_or(false),
        top_pick: record.top_pick.unwrap_or(false),
        popular: record.popular.unwrap_or(false),
        slug: explicit_slug,
    };

    let renderer = Arc::new(PlainTextRender { body: body.clone() });
    Post::new(record.id, slug, body, data, renderer)
}
