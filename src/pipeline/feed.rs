// src/pipeline/feed.rs

//! Feed listing pipeline.

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::Result;
use crate::models::{AnnotatedItem, Config, FilterState};
use crate::services::{
    FeedOrigin, FeedStats, NewsFeed, NewsFilter, available_categories, available_tags,
    balance_by_source, paginate, sort_by_relevance,
};
use crate::utils::log;

/// Order of the listed items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedOrder {
    /// As delivered by the source
    #[default]
    Feed,
    /// Highest relevance score first
    Relevance,
    /// Alternating publishers
    Balanced,
}

/// What to list and how.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub filter: FilterState,
    pub order: FeedOrder,
    /// Zero-based page index
    pub page: usize,
    pub per_page: usize,
    /// Bypass the cache
    pub refresh: bool,
    /// Print JSON instead of report lines
    pub json: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            order: FeedOrder::Feed,
            page: 0,
            per_page: 6,
            refresh: false,
            json: false,
        }
    }
}

/// One rendered page of the feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    pub origin: Option<FeedOrigin>,
    pub stats: FeedStats,
    /// Items left after filtering
    pub matches: usize,
    /// One-based page number
    pub page: usize,
    pub total_pages: usize,
    pub available_tags: Vec<String>,
    pub available_categories: Vec<String>,
    pub items: Vec<AnnotatedItem>,
}

/// Filter, order and page `items`.
pub fn build_report(
    items: &[AnnotatedItem],
    filter: &NewsFilter,
    options: &FeedOptions,
    today: NaiveDate,
) -> FeedReport {
    let mut selected = filter.filter(items, &options.filter);
    match options.order {
        FeedOrder::Feed => {}
        FeedOrder::Relevance => sort_by_relevance(&mut selected),
        FeedOrder::Balanced => selected = balance_by_source(selected),
    }

    let page = paginate(&selected, options.per_page, options.page);
    FeedReport {
        origin: None,
        stats: FeedStats::compute(items, today),
        matches: page.total_items,
        page: page.index + 1,
        total_pages: page.total_pages,
        available_tags: available_tags(items),
        available_categories: available_categories(items),
        items: page.items.iter().map(|item| (*item).clone()).collect(),
    }
}

/// Load the feed and print one page of it.
pub async fn run_feed(config: &Config, base_dir: &Path, options: &FeedOptions) -> Result<FeedReport> {
    let mut feed = NewsFeed::from_config(config, base_dir)?;
    let items = if options.refresh {
        feed.refresh().await
    } else {
        feed.load().await
    };

    let filter = NewsFilter::new(&config.synonym_clusters);
    let mut report = build_report(&items, &filter, options, Local::now().date_naive());
    report.origin = feed.last_origin();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &config.feed.line_template);
    }
    Ok(report)
}

fn print_report(report: &FeedReport, template: &str) {
    log::header(&format!(
        "ReconNews: page {}/{} ({} match(es))",
        report.page, report.total_pages, report.matches
    ));

    if report.items.is_empty() {
        log::info("No news matches the current filters");
    }
    for item in &report.items {
        log::sub_item(&item.format(template));
    }

    let origin = report
        .origin
        .map(|o| format!("{o:?}").to_lowercase())
        .unwrap_or_else(|| "unknown".to_string());
    log::summary(
        "Feed",
        &[
            ("Origin", origin),
            ("Total", report.stats.total.to_string()),
            ("Today", report.stats.today.to_string()),
            ("Sources", report.stats.sources.to_string()),
            ("Tags", report.available_tags.join(", ")),
        ],
    );
}
