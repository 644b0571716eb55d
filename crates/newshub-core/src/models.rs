//! Data models for NewsHub
//!
//! Defines the article shape returned by the news API and the bookmark
//! snapshot persisted for offline reading. Field names serialize in
//! camelCase so stored records stay compatible with the browser client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Publisher of an article
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Source {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// An article as returned by the news API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Short description or lede
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical article URL (the bookmark key)
    pub url: String,
    /// Lead image
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// Byline
    #[serde(default)]
    pub author: Option<String>,
    /// Publication time, kept as the text the API sent
    #[serde(default)]
    pub published_at: Option<String>,
    /// Publisher
    #[serde(default)]
    pub source: Option<Source>,
    /// Truncated body text
    #[serde(default)]
    pub content: Option<String>,
    /// Generated summary (only on summary endpoints)
    #[serde(default)]
    pub ai_summary: Option<String>,
}

impl Article {
    /// Create an article with just a URL and title
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Name of the publisher, if known
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// A bookmarked article: a frozen copy of the article plus when it was saved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkEntry {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    /// Set once when the bookmark is created
    pub bookmarked_at: DateTime<Utc>,
}

impl BookmarkEntry {
    /// Snapshot an article at the given time
    pub fn from_article(article: &Article, bookmarked_at: DateTime<Utc>) -> Self {
        Self {
            url: article.url.clone(),
            title: article.title.clone(),
            description: article.description.clone(),
            author: article.author.clone(),
            source: article.source.clone(),
            url_to_image: article.url_to_image.clone(),
            published_at: article.published_at.clone(),
            content: article.content.clone(),
            ai_summary: article.ai_summary.clone(),
            bookmarked_at,
        }
    }

    /// Name of the publisher, if known
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// The article this entry was made from (without the timestamp)
    pub fn to_article(&self) -> Article {
        Article {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            url_to_image: self.url_to_image.clone(),
            author: self.author.clone(),
            published_at: self.published_at.clone(),
            source: self.source.clone(),
            content: self.content.clone(),
            ai_summary: self.ai_summary.clone(),
        }
    }
}

/// Ordered, unique-by-url list of bookmarks; the unit of persistence
pub type BookmarkCollection = Vec<BookmarkEntry>;

/// Read an explicit `null` the same way as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
