//! Pipeline entry points for CLI commands.
//!
//! - `run_feed`: Load, filter, order and print the news feed
//! - `run_score`: Score ad-hoc text against the taxonomy
//! - `run_tags`: List the taxonomy and search clusters
//! - `run_validate`: Check the configuration

pub mod feed;
pub mod score;
pub mod validate;

pub use feed::{FeedOptions, FeedOrder, FeedReport, build_report, run_feed};
pub use score::{run_score, run_tags};
pub use validate::run_validate;
