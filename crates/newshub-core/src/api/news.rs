//! News API client
//!
//! Endpoints under `<api_url>/api/news`:
//! - `GET /headlines?country&category`
//! - `GET /category-summary?country&category` (articles carry `aiSummary`)
//! - `GET /top10?country`
//! - `GET /search?query&sortBy&pageSize`

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use super::{endpoint, http_client, status_error, ApiResult};
use crate::config::Config;
use crate::models::Article;

/// Default sort order for search
pub const DEFAULT_SORT_BY: &str = "publishedAt";

/// Default number of search results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Headline categories offered by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
        }
    }

    /// The following category, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The preceding category, wrapping around
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}'. Valid: {}", s, valid.join(", "))
            })
    }
}

/// Which article feed to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRequest {
    /// Category headlines, optionally with generated summaries
    Headlines { category: Category, summaries: bool },
    /// Top ten stories with summaries
    Top,
    /// Free-text search
    Search {
        query: String,
        sort_by: String,
        page_size: u32,
    },
}

impl FeedRequest {
    /// Search with default sort and page size
    pub fn search(query: impl Into<String>) -> Self {
        FeedRequest::Search {
            query: query.into(),
            sort_by: DEFAULT_SORT_BY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Short title for display
    pub fn title(&self) -> String {
        match self {
            FeedRequest::Headlines { category, .. } => format!("{} News", category.label()),
            FeedRequest::Top => "Top Stories".to_string(),
            FeedRequest::Search { query, .. } => format!("Search: {}", query),
        }
    }
}

/// Client for the news endpoints
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsClient {
    /// Create a client for the backend at `api_url`
    pub fn new(api_url: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: endpoint(api_url, "api/news"),
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    /// Category headlines
    pub async fn headlines(&self, country: &str, category: Category) -> ApiResult<Vec<Article>> {
        self.get_articles(
            "headlines",
            &[("country", country), ("category", category.as_str())],
        )
        .await
    }

    /// Category headlines with generated summaries
    pub async fn category_summary(
        &self,
        country: &str,
        category: Category,
    ) -> ApiResult<Vec<Article>> {
        self.get_articles(
            "category-summary",
            &[("country", country), ("category", category.as_str())],
        )
        .await
    }

    /// Top ten stories with generated summaries
    pub async fn top10(&self, country: &str) -> ApiResult<Vec<Article>> {
        self.get_articles("top10", &[("country", country)]).await
    }

    /// Search all articles
    pub async fn search(
        &self,
        query: &str,
        sort_by: &str,
        page_size: u32,
    ) -> ApiResult<Vec<Article>> {
        let page_size = page_size.to_string();
        self.get_articles(
            "search",
            &[
                ("query", query),
                ("sortBy", sort_by),
                ("pageSize", page_size.as_str()),
            ],
        )
        .await
    }

    /// Load the feed described by `request`
    pub async fn fetch(&self, request: &FeedRequest, country: &str) -> ApiResult<Vec<Article>> {
        match request {
            FeedRequest::Headlines {
                category,
                summaries: false,
            } => self.headlines(country, *category).await,
            FeedRequest::Headlines {
                category,
                summaries: true,
            } => self.category_summary(country, *category).await,
            FeedRequest::Top => self.top10(country).await,
            FeedRequest::Search {
                query,
                sort_by,
                page_size,
            } => self.search(query, sort_by, *page_size).await,
        }
    }

    async fn get_articles(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<Vec<Article>> {
        let url = endpoint(&self.base_url, path);
        debug!(%url, ?query, "fetching articles");

        let response = self.http.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let articles: Vec<Article> = response.json().await?;
        debug!(%url, count = articles.len(), "articles fetched");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn articles_json() -> serde_json::Value {
        serde_json::json!([
            {
                "source": {"id": null, "name": "Wire"},
                "author": "Reporter",
                "title": "First",
                "description": "One",
                "url": "https://news.example/1",
                "urlToImage": null,
                "publishedAt": "2024-03-01T12:00:00Z",
                "content": null
            },
            {
                "source": {"name": "Daily"},
                "title": "Second",
                "url": "https://news.example/2",
                "aiSummary": "In short"
            }
        ])
    }

    fn client(server: &MockServer) -> NewsClient {
        NewsClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!("Technology".parse::<Category>().unwrap(), Category::Technology);
        let err = "weather".parse::<Category>().unwrap_err();
        assert!(err.contains("general"));
    }

    #[test]
    fn test_category_cycle() {
        assert_eq!(Category::General.next(), Category::Business);
        assert_eq!(Category::Technology.next(), Category::General);
        assert_eq!(Category::General.prev(), Category::Technology);
    }

    #[test]
    fn test_feed_titles() {
        let headlines = FeedRequest::Headlines {
            category: Category::Science,
            summaries: false,
        };
        assert_eq!(headlines.title(), "Science News");
        assert_eq!(FeedRequest::Top.title(), "Top Stories");
        assert_eq!(FeedRequest::search("rust").title(), "Search: rust");
    }

    #[tokio::test]
    async fn test_headlines_sends_country_and_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/headlines"))
            .and(query_param("country", "us"))
            .and(query_param("category", "business"))
            .respond_with(ResponseTemplate::new(200).set_body_json(articles_json()))
            .expect(1)
            .mount(&server)
            .await;

        let articles = client(&server)
            .headlines("us", Category::Business)
            .await
            .unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_name(), Some("Wire"));
        assert_eq!(articles[1].ai_summary.as_deref(), Some("In short"));
    }

    #[tokio::test]
    async fn test_fetch_routes_summaries_and_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/category-summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(articles_json()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/news/search"))
            .and(query_param("query", "rust"))
            .and(query_param("sortBy", "publishedAt"))
            .and(query_param("pageSize", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let summaries = FeedRequest::Headlines {
            category: Category::General,
            summaries: true,
        };
        assert_eq!(client.fetch(&summaries, "us").await.unwrap().len(), 2);
        assert!(client
            .fetch(&FeedRequest::search("rust"), "us")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_top10() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/top10"))
            .and(query_param("country", "gb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(articles_json()))
            .mount(&server)
            .await;

        let articles = client(&server).top10("gb").await.unwrap();
        assert_eq!(articles[0].title, "First");
    }

    #[tokio::test]
    async fn test_error_status_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/top10"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(serde_json::json!({"message": "Upstream news API failed"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).top10("us").await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Upstream news API failed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/headlines"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server)
            .headlines("us", Category::General)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not Found (HTTP 404)");
    }
}
