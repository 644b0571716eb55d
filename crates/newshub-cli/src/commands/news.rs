//! News feed command handlers

use anyhow::{Context, Result};

use newshub_core::{Config, FeedRequest, NewsClient};

use super::open_repository;
use crate::output::Output;

/// Fetch a feed and print it, marking articles already bookmarked
pub async fn show(
    config: &Config,
    request: FeedRequest,
    country: Option<String>,
    output: &Output,
) -> Result<()> {
    let country = country
        .map(|c| c.to_lowercase())
        .unwrap_or_else(|| config.country.clone());

    let client = NewsClient::from_config(config).context("Failed to create news client")?;
    let articles = client
        .fetch(&request, &country)
        .await
        .with_context(|| format!("Failed to load {}", request.title()))?;

    let repo = open_repository(config);
    let saved = repo.list();
    output.print_articles(&articles, |url| saved.iter().any(|e| e.url == url));

    Ok(())
}
