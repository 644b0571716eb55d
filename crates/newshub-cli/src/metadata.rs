//! URL metadata fetching
//!
//! Fills in title, description, byline and publisher when a page is
//! bookmarked by URL alone.

use anyhow::Result;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

use newshub_core::{Article, Source};

/// Metadata extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<String>,
}

impl UrlMetadata {
    /// Build an article for `url`, using the URL itself when no title was found
    pub fn into_article(self, url: &str) -> Article {
        Article {
            title: self.title.unwrap_or_else(|| url.to_string()),
            description: self.description,
            url: url.to_string(),
            url_to_image: self.image,
            author: self.author,
            published_at: self.published_at,
            source: self.site_name.map(Source::named),
            content: None,
            ai_summary: None,
        }
    }
}

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Fetch metadata from a URL
///
/// Returns empty metadata on failure (graceful degradation).
pub async fn fetch_metadata(url: &str) -> UrlMetadata {
    match fetch_metadata_inner(url).await {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!(%url, error = %e, "metadata fetch failed");
            UrlMetadata::default()
        }
    }
}

async fn fetch_metadata_inner(url: &str) -> Result<UrlMetadata> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent(concat!("Mozilla/5.0 (compatible; NewsHub/", env!("CARGO_PKG_VERSION"), ")"))
        .build()?;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Ok(UrlMetadata::default());
    }

    let html = response.text().await?;
    Ok(parse_metadata(&html))
}

/// Parse metadata from HTML content
fn parse_metadata(html: &str) -> UrlMetadata {
    let document = Html::parse_document(html);

    UrlMetadata {
        title: extract_title(&document),
        description: first_meta(&document, &["og:description", "twitter:description", "description"]),
        author: first_meta(&document, &["article:author", "author", "dc.creator"]),
        site_name: first_meta(&document, &["og:site_name", "application-name"]),
        image: first_meta(&document, &["og:image", "twitter:image"]),
        published_at: first_meta(&document, &["article:published_time", "date"]),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    if let Some(title) = first_meta(document, &["og:title", "twitter:title"]) {
        return Some(title);
    }

    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Content of the first meta tag present, in order of preference
fn first_meta(document: &Html, properties: &[&str]) -> Option<String> {
    properties
        .iter()
        .find_map(|property| extract_meta_content(document, property))
}

/// Extract content from a meta tag by property or name
fn extract_meta_content(document: &Html, property: &str) -> Option<String> {
    ["property", "name"].iter().find_map(|attr| {
        let selector = Selector::parse(&format!(r#"meta[{}="{}"]"#, attr, property)).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    })
}
