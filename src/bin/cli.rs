//! ReconNews CLI
//!
//! Local entry point: list the tagged news feed, score ad-hoc text and
//! check the configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use reconnews::{
    config::{DEFAULT_CONFIG_PATH, load_config},
    error::Result,
    models::FilterState,
    pipeline::{self, FeedOptions, FeedOrder},
    utils::log as report,
};

/// ReconNews - Christian news feed with topic tagging
#[derive(Parser, Debug)]
#[command(
    name = "reconnews",
    version,
    about = "Tagged and filtered Christian news feed"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress report output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load, filter and print the news feed
    Feed {
        /// Free-text search (synonym expanded)
        #[arg(short, long)]
        search: Option<String>,

        /// Keep items with this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Keep items in this category (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Minimum relevance score
        #[arg(long, default_value_t = 0)]
        min_score: u32,

        #[arg(long, value_enum, default_value_t = Order::Feed)]
        order: Order,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 6)]
        per_page: usize,

        /// Ignore cached data
        #[arg(long)]
        refresh: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a title and summary against the taxonomy
    Score {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        summary: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List taxonomy categories and search clusters
    Tags,

    /// Validate configuration
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Order {
    Feed,
    Relevance,
    Balanced,
}

impl From<Order> for FeedOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Feed => FeedOrder::Feed,
            Order::Relevance => FeedOrder::Relevance,
            Order::Balanced => FeedOrder::Balanced,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    report::init(cli.quiet);

    // Relative document paths resolve against the working directory
    let base_dir = PathBuf::from(".");

    match cli.command {
        Command::Feed {
            search,
            tags,
            categories,
            min_score,
            order,
            page,
            per_page,
            refresh,
            json,
        } => {
            let config = load_config(&cli.config);
            let options = FeedOptions {
                filter: FilterState {
                    search_term: search.unwrap_or_default(),
                    selected_tags: tags.into_iter().collect(),
                    selected_categories: categories.into_iter().collect(),
                    min_relevance_score: min_score,
                },
                order: order.into(),
                page: page.saturating_sub(1),
                per_page,
                refresh,
                json,
            };
            pipeline::run_feed(&config, &base_dir, &options).await?;
        }

        Command::Score {
            title,
            summary,
            json,
        } => {
            let config = load_config(&cli.config);
            pipeline::run_score(&config, &title, &summary, json)?;
        }

        Command::Tags => {
            let config = load_config(&cli.config);
            pipeline::run_tags(&config);
        }

        Command::Validate => {
            pipeline::run_validate(&cli.config)?;
        }
    }

    Ok(())
}
