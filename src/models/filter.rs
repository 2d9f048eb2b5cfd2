//! User-selected filter criteria.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Current search and filter selection for a feed view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text query (blank disables search)
    pub search_term: String,

    /// Items must carry at least one selected tag
    pub selected_tags: BTreeSet<String>,

    /// Items must belong to one of the selected categories
    pub selected_categories: BTreeSet<String>,

    pub min_relevance_score: u32,
}

impl FilterState {
    /// Select `tag`, or deselect it if already selected.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.selected_tags.remove(tag) {
            self.selected_tags.insert(tag.to_string());
        }
    }

    /// Select `category`, or deselect it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_string());
        }
    }

    /// Reset every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any criterion would drop items.
    pub fn is_active(&self) -> bool {
        !self.search_term.trim().is_empty()
            || !self.selected_tags.is_empty()
            || !self.selected_categories.is_empty()
            || self.min_relevance_score > 0
    }
}
