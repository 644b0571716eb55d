//! Bookmark command handlers

use anyhow::{bail, Result};

use newshub_core::{Article, BookmarkRepository, Source};

use super::StorageContext;
use crate::metadata::fetch_metadata;
use crate::output::Output;
use crate::prompt::confirm;

/// Article fields given on the command line
#[derive(Debug, Default, Clone)]
pub struct ArticleFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
}

impl ArticleFields {
    /// Build the article directly when a title was given
    fn into_article(self, url: &str) -> Option<Article> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        Some(Article {
            description: self.description,
            author: self.author,
            source: self.source.map(Source::named),
            ..Article::new(url, title)
        })
    }
}

/// List the offline library
pub fn list(repo: &BookmarkRepository, output: &Output) -> Result<()> {
    output.print_bookmarks(&repo.list());
    Ok(())
}

/// Print the number of bookmarks
pub fn count(repo: &BookmarkRepository, output: &Output) -> Result<()> {
    output.print_count(repo.count());
    Ok(())
}

/// Bookmark a URL
///
/// Without `--title`, the page is fetched for its metadata.
pub async fn add(
    repo: &BookmarkRepository,
    url: String,
    fields: ArticleFields,
    output: &Output,
) -> Result<()> {
    if let Some(existing) = repo.get(&url) {
        output.message(&format!("Already bookmarked: '{}'", existing.title));
        return Ok(());
    }

    let article = resolve_article(&url, fields).await;
    repo.add(&article).storage_context("Failed to save bookmark")?;

    output.success(&format!("Bookmarked: {}", article.title));
    if let Some(entry) = repo.get(&url) {
        if !output.is_quiet() {
            output.print_bookmark(&entry);
        }
    }

    Ok(())
}

/// Remove a bookmark
pub fn remove(repo: &BookmarkRepository, url: String, output: &Output) -> Result<()> {
    let existed = repo.is_bookmarked(&url);
    repo.remove(&url).storage_context("Failed to remove bookmark")?;

    if existed {
        output.success(&format!("Removed bookmark: {}", url));
    } else {
        output.message(&format!("Not bookmarked: {}", url));
    }
    Ok(())
}

/// Bookmark a URL, or remove it if already bookmarked
pub async fn toggle(
    repo: &BookmarkRepository,
    url: String,
    fields: ArticleFields,
    output: &Output,
) -> Result<()> {
    let article = if repo.is_bookmarked(&url) {
        // Removal only needs the key
        Article::new(&url, "")
    } else {
        resolve_article(&url, fields).await
    };

    let now_bookmarked = repo.toggle(&article).storage_context("Failed to update bookmark")?;
    if now_bookmarked {
        output.success(&format!("Bookmarked: {}", article.title));
    } else {
        output.success(&format!("Removed bookmark: {}", url));
    }
    Ok(())
}

/// Remove every bookmark
pub fn clear(repo: &BookmarkRepository, yes: bool, output: &Output) -> Result<()> {
    let count = repo.count();
    if count == 0 {
        output.message("No bookmarks to clear.");
        return Ok(());
    }

    if !yes {
        if !output.should_prompt() {
            bail!("Refusing to clear {} bookmark(s) without --yes", count);
        }
        if !confirm(&format!("Remove all {} bookmark(s)?", count))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    repo.clear_all().storage_context("Failed to clear bookmarks")?;
    output.success(&format!("Cleared {} bookmark(s)", count));
    Ok(())
}

async fn resolve_article(url: &str, fields: ArticleFields) -> Article {
    match fields.into_article(url) {
        Some(article) => article,
        None => fetch_metadata(url).await.into_article(url),
    }
}
