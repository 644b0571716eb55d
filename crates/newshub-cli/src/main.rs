//! NewsHub CLI
//!
//! Command-line interface for NewsHub - news feeds with an offline library.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use newshub_core::api::news::{DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};
use newshub_core::{Category, Config, FeedRequest};

mod commands;
mod metadata;
mod output;
mod prompt;
mod tui;

use commands::bookmark::ArticleFields;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "newshub")]
#[command(about = "NewsHub - news headlines with an offline reading library")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Show headlines for a category
    Headlines {
        /// Category (general, business, entertainment, health, science, sports, technology)
        #[arg(short = 'C', long, default_value_t = Category::General)]
        category: Category,
        /// Two-letter country code (defaults to config)
        #[arg(long)]
        country: Option<String>,
        /// Include AI-generated summaries
        #[arg(short, long)]
        summaries: bool,
    },
    /// Show the top ten stories with summaries
    Top {
        /// Two-letter country code (defaults to config)
        #[arg(long)]
        country: Option<String>,
    },
    /// Search all articles
    Search {
        /// Search query
        query: String,
        /// Sort order (publishedAt, relevancy, popularity)
        #[arg(long, default_value = DEFAULT_SORT_BY)]
        sort_by: String,
        /// Number of results
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Manage the offline library
    #[command(alias = "bm")]
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Create an account
    Signup {
        /// Full name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Log in (password from NEWSHUB_PASSWORD or prompt)
    Login {
        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum BookmarkCommands {
    /// List saved articles
    #[command(alias = "ls")]
    List,
    /// Save an article by URL
    Add {
        /// Article URL
        url: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Remove a saved article
    #[command(alias = "rm")]
    Remove {
        /// Article URL
        url: String,
    },
    /// Save the article if it isn't saved, otherwise remove it
    Toggle {
        /// Article URL
        url: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Remove every saved article
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the number of saved articles
    Count,
}

/// Article details; without a title the page is fetched for metadata
#[derive(clap::Args)]
struct FieldArgs {
    /// Title
    #[arg(short = 'T', long)]
    title: Option<String>,
    /// Description
    #[arg(short, long)]
    description: Option<String>,
    /// Author
    #[arg(short, long)]
    author: Option<String>,
    /// Publisher name
    #[arg(short, long)]
    source: Option<String>,
}

impl From<FieldArgs> for ArticleFields {
    fn from(args: FieldArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            author: args.author,
            source: args.source,
        }
    }
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, api_url, country, request_timeout_secs, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands load (and save) the file themselves
    if let Some(Commands::Config { command }) = &cli.command {
        init_cli_logging();
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        return tui::run(config).await;
    };

    init_cli_logging();

    match command {
        Commands::Tui => tui::run(config).await,
        Commands::Headlines {
            category,
            country,
            summaries,
        } => {
            let request = FeedRequest::Headlines {
                category,
                summaries,
            };
            commands::news::show(&config, request, country, &output).await
        }
        Commands::Top { country } => {
            commands::news::show(&config, FeedRequest::Top, country, &output).await
        }
        Commands::Search {
            query,
            sort_by,
            page_size,
        } => {
            let request = FeedRequest::Search {
                query,
                sort_by,
                page_size,
            };
            commands::news::show(&config, request, None, &output).await
        }
        Commands::Bookmark { command } => handle_bookmark_command(command, &config, &output).await,
        Commands::Signup { name, email } => {
            commands::auth::signup(&config, name, email, &output).await
        }
        Commands::Login { email } => commands::auth::login(&config, email, &output).await,
        Commands::Logout => commands::auth::logout(&config, &output),
        Commands::Whoami => commands::auth::whoami(&config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

async fn handle_bookmark_command(
    command: BookmarkCommands,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let repo = commands::open_repository(config);

    match command {
        BookmarkCommands::List => commands::bookmark::list(&repo, output),
        BookmarkCommands::Add { url, fields } => {
            commands::bookmark::add(&repo, url, fields.into(), output).await
        }
        BookmarkCommands::Remove { url } => commands::bookmark::remove(&repo, url, output),
        BookmarkCommands::Toggle { url, fields } => {
            commands::bookmark::toggle(&repo, url, fields.into(), output).await
        }
        BookmarkCommands::Clear { yes } => commands::bookmark::clear(&repo, yes, output),
        BookmarkCommands::Count => commands::bookmark::count(&repo, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize stderr logging for one-shot commands
///
/// Only initializes if NEWSHUB_LOG is set (e.g. `NEWSHUB_LOG=debug`).
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("NEWSHUB_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!("newshub_core={0},newshub={0}", log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_headlines_defaults() {
        let cli = Cli::try_parse_from(["newshub", "headlines"]).unwrap();
        match cli.command {
            Some(Commands::Headlines {
                category,
                country,
                summaries,
            }) => {
                assert_eq!(category, Category::General);
                assert!(country.is_none());
                assert!(!summaries);
            }
            _ => panic!("expected headlines"),
        }
    }

    #[test]
    fn test_parse_search_defaults() {
        let cli = Cli::try_parse_from(["newshub", "search", "rust lang"]).unwrap();
        match cli.command {
            Some(Commands::Search {
                query,
                sort_by,
                page_size,
            }) => {
                assert_eq!(query, "rust lang");
                assert_eq!(sort_by, "publishedAt");
                assert_eq!(page_size, 20);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_bookmark_add_with_fields() {
        let cli = Cli::try_parse_from([
            "newshub",
            "--json",
            "bookmark",
            "add",
            "https://news.example/a",
            "--title",
            "A",
            "--source",
            "Wire",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Bookmark {
                command: BookmarkCommands::Add { url, fields },
            }) => {
                assert_eq!(url, "https://news.example/a");
                assert_eq!(fields.title.as_deref(), Some("A"));
                assert_eq!(fields.source.as_deref(), Some("Wire"));
            }
            _ => panic!("expected bookmark add"),
        }
    }

    #[test]
    fn test_invalid_category_rejected() {
        assert!(Cli::try_parse_from(["newshub", "headlines", "--category", "weather"]).is_err());
    }

    #[test]
    fn test_no_command_means_tui() {
        let cli = Cli::try_parse_from(["newshub"]).unwrap();
        assert!(cli.command.is_none());
    }
}
