//! Service layer for the news feed.
//!
//! This module contains the business logic for:
//! - Tag and score extraction (`TagEngine`)
//! - Synonym-expanded search (`SynonymSearch`)
//! - Compound filtering, ordering and paging (`NewsFilter`)
//! - Round-robin ordering by publisher (`balance_by_source`)
//! - The cached feed over the source chain (`NewsFeed`)

pub mod balance;
pub mod feed;
pub mod filter;
pub mod search;
pub mod tagging;

pub use balance::{Sourced, balance_by_source};
pub use feed::{CacheInfo, FeedOrigin, FeedPolicy, NewsFeed};
pub use filter::{
    FeedStats, NewsFilter, Page, available_categories, available_tags, paginate, sort_by_relevance,
};
pub use search::SynonymSearch;
pub use tagging::{Extraction, MatchedKeywords, TagEngine};
