// src/services/filter.rs

//! Compound filtering, ordering and paging of annotated items.

use std::collections::{BTreeSet, HashSet};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{AnnotatedItem, FilterState, SynonymCluster};
use crate::services::search::SynonymSearch;

/// Applies a [`FilterState`] to annotated items.
///
/// Stages run in a fixed order and each one only narrows the set:
/// search, tags, categories, score floor.
#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    search: SynonymSearch,
}

impl NewsFilter {
    pub fn new(clusters: &[SynonymCluster]) -> Self {
        Self {
            search: SynonymSearch::new(clusters),
        }
    }

    pub fn search(&self) -> &SynonymSearch {
        &self.search
    }

    /// Keep the items passing every active criterion, preserving order.
    pub fn filter<'a>(&self, items: &'a [AnnotatedItem], state: &FilterState) -> Vec<&'a AnnotatedItem> {
        let all: Vec<&AnnotatedItem> = items.iter().collect();
        let mut result = self.search.search(&all, &state.search_term);

        if !state.selected_tags.is_empty() {
            result.retain(|item| {
                item.auto_tags
                    .iter()
                    .any(|tag| state.selected_tags.contains(tag))
            });
        }

        if !state.selected_categories.is_empty() {
            result.retain(|item| {
                item.item
                    .category
                    .as_ref()
                    .is_some_and(|c| state.selected_categories.contains(c))
            });
        }

        if state.min_relevance_score > 0 {
            result.retain(|item| item.relevance_score >= state.min_relevance_score);
        }

        result
    }
}

/// Stable sort by descending relevance score.
pub fn sort_by_relevance(items: &mut [&AnnotatedItem]) {
    items.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
}

/// Distinct tags present in `items`, sorted.
pub fn available_tags(items: &[AnnotatedItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.auto_tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories present in `items`, sorted.
pub fn available_categories(items: &[AnnotatedItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.item.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One page of a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Zero-based index of this page
    pub index: usize,
    /// Always at least 1, even for an empty list
    pub total_pages: usize,
    pub total_items: usize,
}

/// Cut `items` into pages of `per_page` and return page `index`.
///
/// Out-of-range indices are clamped to the last page.
pub fn paginate<T>(items: &[T], per_page: usize, index: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let index = index.min(total_pages - 1);
    let start = (index * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start..end],
        index,
        total_pages,
        total_items: items.len(),
    }
}

/// Headline numbers for a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub total: usize,
    /// Items published on `today` (local calendar day)
    pub today: usize,
    /// Distinct publishers
    pub sources: usize,
}

impl FeedStats {
    pub fn compute(items: &[AnnotatedItem], today: NaiveDate) -> Self {
        let today_count = items
            .iter()
            .filter_map(|item| item.item.published_at())
            .filter(|at| at.with_timezone(&Local).date_naive() == today)
            .count();
        let sources: HashSet<&str> = items.iter().map(|item| item.item.source.as_str()).collect();

        Self {
            total: items.len(),
            today: today_count,
            sources: sources.len(),
        }
    }
}
