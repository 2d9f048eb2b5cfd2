// src/services/feed.rs

//! Cached, annotated news feed.
//!
//! `NewsFeed` owns a single cache slot. A fresh slot is returned as-is;
//! otherwise the source chain is walked (primary, then the static
//! document, then the built-in samples), the result is post-processed and
//! annotated, and the slot is refilled.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use crate::error::Result;
use crate::models::{
    AnnotatedItem, Config, MAX_AGE_HOURS, MAX_TTL_MINUTES, NewsItem, NewsRecord,
    items_from_records,
};
use crate::services::tagging::TagEngine;
use crate::storage::samples::sample_items;
use crate::storage::{DocumentSource, LocalStorage, NewsBatch, NewsSource, RemoteSource};
use crate::utils::parse_date;

/// Which link of the source chain produced the current items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrigin {
    Primary,
    Fallback,
    Samples,
}

/// Cache status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheInfo {
    pub is_cached: bool,
    /// Zero when nothing is cached or the slot has expired
    pub time_until_expiry: Duration,
}

/// Post-processing applied to fetched records.
#[derive(Debug, Clone)]
pub struct FeedPolicy {
    /// Records older than this are dropped
    pub max_age: chrono::Duration,
    /// Short feeds are topped up with samples to this length
    pub min_articles: usize,
    /// Accepted publishers; empty accepts all
    pub allowlist: Vec<String>,
}

impl FeedPolicy {
    pub fn from_config(config: &Config) -> Self {
        let max_age_hours = config.feed.max_age_hours.min(MAX_AGE_HOURS);
        Self {
            max_age: chrono::Duration::hours(max_age_hours as i64),
            min_articles: config.feed.min_articles,
            allowlist: config.sources.allowlist.clone(),
        }
    }

    pub fn allows(&self, source: &str) -> bool {
        self.allowlist.is_empty() || self.allowlist.iter().any(|s| s == source)
    }

    /// Whether `date` falls inside the recency window ending at `now`.
    ///
    /// Missing or unparsable dates are never recent.
    pub fn is_recent(&self, date: Option<&str>, now: DateTime<Utc>) -> bool {
        date.and_then(parse_date)
            .is_some_and(|at| now.signed_duration_since(at) <= self.max_age)
    }

    /// Recency window, record validation, allowlist and top-up.
    pub fn apply(&self, batch: NewsBatch, now: DateTime<Utc>) -> Vec<NewsItem> {
        let default_date = batch.last_updated.as_deref();
        let total = batch.records.len();

        let recent: Vec<NewsRecord> = batch
            .records
            .into_iter()
            .filter(|record| self.is_recent(record.freshness_date().or(default_date), now))
            .collect();
        let mut items = items_from_records(recent, default_date);
        items.retain(|item| self.allows(&item.source));

        log::debug!("{} of {} record(s) passed recency and allowlist", items.len(), total);
        self.top_up(&mut items, now);
        items
    }

    /// Append samples until `min_articles` is reached, skipping known ids.
    pub fn top_up(&self, items: &mut Vec<NewsItem>, now: DateTime<Utc>) {
        if items.len() >= self.min_articles {
            return;
        }
        let mut seen: HashSet<String> = items.iter().map(NewsItem::id).collect();
        for sample in sample_items(now) {
            if items.len() >= self.min_articles {
                break;
            }
            if seen.insert(sample.id()) {
                items.push(sample);
            }
        }
    }
}

struct CachedFeed {
    items: Arc<[AnnotatedItem]>,
    expires_at: Instant,
}

/// The news feed service with its single-slot TTL cache.
pub struct NewsFeed {
    primary: Option<Box<dyn NewsSource>>,
    fallback: Option<Box<dyn NewsSource>>,
    engine: TagEngine,
    policy: FeedPolicy,
    ttl: Duration,
    cache: Option<CachedFeed>,
    last_origin: Option<FeedOrigin>,
}

impl NewsFeed {
    /// Create a feed without sources; it serves samples until some are added.
    pub fn new(engine: TagEngine, policy: FeedPolicy, ttl: Duration) -> Self {
        Self {
            primary: None,
            fallback: None,
            engine,
            policy,
            ttl,
            cache: None,
            last_origin: None,
        }
    }

    /// Build the feed described by `config`.
    ///
    /// The remote source is used only when configured; the static document
    /// path is resolved against `base_dir`.
    pub fn from_config(config: &Config, base_dir: impl AsRef<Path>) -> Result<Self> {
        let engine = TagEngine::new(&config.taxonomy(), config.scoring);
        let ttl = Duration::from_secs(config.cache.ttl_minutes.min(MAX_TTL_MINUTES) * 60);
        let mut feed = Self::new(engine, FeedPolicy::from_config(config), ttl);

        if let Some(remote) = &config.sources.remote {
            feed = feed.with_primary(RemoteSource::new(remote.clone(), &config.fetch)?);
        }
        let storage = LocalStorage::new(base_dir.as_ref());
        Ok(feed.with_fallback(DocumentSource::new(storage, config.sources.fallback_path.clone())))
    }

    pub fn with_primary(mut self, source: impl NewsSource + 'static) -> Self {
        self.primary = Some(Box::new(source));
        self
    }

    pub fn with_fallback(mut self, source: impl NewsSource + 'static) -> Self {
        self.fallback = Some(Box::new(source));
        self
    }

    pub fn engine(&self) -> &TagEngine {
        &self.engine
    }

    /// Source of the items returned by the last fetch.
    pub fn last_origin(&self) -> Option<FeedOrigin> {
        self.last_origin
    }

    /// Return the cached items while fresh, otherwise fetch and annotate.
    ///
    /// Never fails and never returns an empty feed.
    pub async fn load(&mut self) -> Arc<[AnnotatedItem]> {
        if let Some(cached) = &self.cache {
            if Instant::now() < cached.expires_at {
                log::debug!("Serving {} item(s) from cache", cached.items.len());
                return Arc::clone(&cached.items);
            }
            log::debug!("Cache expired");
        }

        let (items, origin, cacheable) = self.fetch_fresh().await;
        let items: Arc<[AnnotatedItem]> = self.engine.annotate_all(items).into();
        log::info!("Loaded {} item(s) from {:?}", items.len(), origin);

        self.cache = cacheable.then(|| CachedFeed {
            items: Arc::clone(&items),
            expires_at: Instant::now() + self.ttl,
        });
        self.last_origin = Some(origin);
        items
    }

    /// Drop the cache and load again.
    pub async fn refresh(&mut self) -> Arc<[AnnotatedItem]> {
        self.invalidate();
        self.load().await
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn cache_info(&self) -> CacheInfo {
        match &self.cache {
            Some(cached) => CacheInfo {
                is_cached: true,
                time_until_expiry: cached.expires_at.saturating_duration_since(Instant::now()),
            },
            None => CacheInfo {
                is_cached: false,
                time_until_expiry: Duration::ZERO,
            },
        }
    }

    /// Walk the source chain. Returns the items, where they came from and
    /// whether they may be cached.
    async fn fetch_fresh(&self) -> (Vec<NewsItem>, FeedOrigin, bool) {
        let now = Utc::now();

        if let Some(primary) = &self.primary {
            match primary.fetch().await {
                Ok(batch) if batch.records.iter().any(|r| r.is_complete()) => {
                    return (self.policy.apply(batch, now), FeedOrigin::Primary, true);
                }
                Ok(_) => log::warn!(
                    "{} returned no usable records; trying fallback document",
                    primary.name()
                ),
                Err(e) => log::warn!("{} failed: {e}; trying fallback document", primary.name()),
            }
        }

        if let Some(fallback) = &self.fallback {
            match fallback.fetch().await {
                Ok(batch) => {
                    let last_updated = batch.last_updated.as_deref();
                    if !self.policy.is_recent(last_updated, now) {
                        log::warn!(
                            "{} is stale or undated (last updated {:?}); using samples",
                            fallback.name(),
                            last_updated
                        );
                        return (sample_items(now), FeedOrigin::Samples, true);
                    }
                    return (self.policy.apply(batch, now), FeedOrigin::Fallback, true);
                }
                Err(e) => log::warn!("{} failed: {e}; using samples", fallback.name()),
            }
        }

        (sample_items(now), FeedOrigin::Samples, false)
    }
}
