// src/models/mod.rs

//! Domain models for the news feed.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod filter;
mod news;
mod taxonomy;

// Re-export all public types
pub use config::{
    CacheConfig, Config, ENV_REMOTE_KEY, ENV_REMOTE_URL, ENV_SOURCES_ALLOWLIST, FeedConfig,
    FetchConfig, MAX_AGE_HOURS, MAX_TTL_MINUTES, RemoteConfig, ScoringConfig, SourcesConfig,
};
pub use filter::FilterState;
pub use news::{
    AnnotatedItem, NewsDocument, NewsItem, NewsRecord, items_from_records, records_from_values,
};
pub use taxonomy::{KeywordCategory, SynonymCluster, Taxonomy};
