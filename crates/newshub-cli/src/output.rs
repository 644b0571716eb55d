//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use newshub_core::api::User;
use newshub_core::{Article, BookmarkEntry};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a feed of articles
    ///
    /// `is_saved` marks articles already in the offline library.
    pub fn print_articles(&self, articles: &[Article], is_saved: impl Fn(&str) -> bool) {
        match self.format {
            OutputFormat::Human => {
                if articles.is_empty() {
                    println!("No articles found.");
                    return;
                }
                for (i, article) in articles.iter().enumerate() {
                    let marker = if is_saved(&article.url) { "★" } else { " " };
                    println!("{:>2}. {} {}", i + 1, marker, truncate(&article.title, 70));
                    let byline = byline(article.source_name(), article.published_at.as_deref());
                    if !byline.is_empty() {
                        println!("       {}", byline);
                    }
                    if let Some(ref summary) = article.ai_summary {
                        println!("       {}", truncate_line(summary, 90));
                    }
                    println!("       {}", article.url);
                }
                println!("\n{} article(s)", articles.len());
            }
            OutputFormat::Json => print_json(&articles),
            OutputFormat::Quiet => {
                for article in articles {
                    println!("{}", article.url);
                }
            }
        }
    }

    /// Print a single bookmark
    pub fn print_bookmark(&self, entry: &BookmarkEntry) {
        match self.format {
            OutputFormat::Human => {
                println!("Title:       {}", entry.title);
                println!("URL:         {}", entry.url);
                if let Some(name) = entry.source_name() {
                    println!("Source:      {}", name);
                }
                if let Some(ref author) = entry.author {
                    println!("Author:      {}", author);
                }
                if let Some(ref desc) = entry.description {
                    println!("Description: {}", desc);
                }
                if let Some(ref published) = entry.published_at {
                    println!("Published:   {}", published);
                }
                println!(
                    "Saved:       {}",
                    entry.bookmarked_at.format("%Y-%m-%d %H:%M")
                );
            }
            OutputFormat::Json => print_json(entry),
            OutputFormat::Quiet => {
                println!("{}", entry.url);
            }
        }
    }

    /// Print the offline library
    pub fn print_bookmarks(&self, entries: &[BookmarkEntry]) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No bookmarks saved.");
                    return;
                }
                for entry in entries {
                    println!(
                        "{} | {} | {}",
                        entry.bookmarked_at.format("%Y-%m-%d"),
                        truncate(&entry.title, 40),
                        truncate(&entry.url, 50)
                    );
                }
                println!("\n{} bookmark(s)", entries.len());
            }
            OutputFormat::Json => print_json(&entries),
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.url);
                }
            }
        }
    }

    /// Print the bookmark count
    pub fn print_count(&self, count: usize) {
        match self.format {
            OutputFormat::Human => println!("{} bookmark(s)", count),
            OutputFormat::Json => println!("{}", serde_json::json!({ "count": count })),
            OutputFormat::Quiet => println!("{}", count),
        }
    }

    /// Print the logged-in user
    pub fn print_user(&self, user: &User) {
        match self.format {
            OutputFormat::Human => {
                println!("Name:  {}", user.full_name);
                println!("Email: {}", user.email);
                if let Some(ref role) = user.role {
                    println!("Role:  {}", role);
                }
            }
            OutputFormat::Json => print_json(user),
            OutputFormat::Quiet => println!("{}", user.email),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// "Source · date" line, skipping missing parts
fn byline(source: Option<&str>, published_at: Option<&str>) -> String {
    let date = published_at.map(|p| p.split('T').next().unwrap_or(p));
    [source, date]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Zürich über alles", 8), "Züric...");
        assert_eq!(truncate("日本語のニュース", 5), "日本...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
    }

    #[test]
    fn test_byline() {
        assert_eq!(
            byline(Some("Wire"), Some("2024-03-01T12:00:00Z")),
            "Wire · 2024-03-01"
        );
        assert_eq!(byline(None, Some("2024-03-01")), "2024-03-01");
        assert_eq!(byline(Some(""), None), "");
    }

    #[test]
    fn test_prompt_only_for_humans() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(Output::new(OutputFormat::Quiet).is_quiet());
    }
}
