// src/services/tagging.rs

//! Tag and relevance score extraction.
//!
//! Every news item is matched against the keyword taxonomy. A synonym found
//! in the title contributes `weight + title_bonus`, one found in the summary
//! contributes `weight + summary_bonus`. Repeated occurrences inside one
//! field count once.

use serde::Serialize;

use crate::models::{AnnotatedItem, NewsItem, ScoringConfig, Taxonomy};
use crate::utils::text::normalize;

/// Surface forms of one category found in an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedKeywords {
    pub tag: String,
    pub words: Vec<String>,
}

/// Result of scoring one title/summary pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Matched category names, in taxonomy order
    pub tags: Vec<String>,
    pub score: u32,
    #[serde(rename = "matchedKeywords")]
    pub matched_keywords: Vec<MatchedKeywords>,
}

impl Extraction {
    /// Matched surface forms across all categories, first occurrence first.
    pub fn detected_keywords(&self) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for word in self.matched_keywords.iter().flat_map(|m| &m.words) {
            if !words.contains(word) {
                words.push(word.clone());
            }
        }
        words
    }
}

#[derive(Debug, Clone)]
struct CompiledSynonym {
    surface: String,
    normalized: String,
}

#[derive(Debug, Clone)]
struct CompiledCategory {
    name: String,
    weight: u32,
    synonyms: Vec<CompiledSynonym>,
}

/// Taxonomy-driven tagger with synonyms normalized once up front.
#[derive(Debug, Clone)]
pub struct TagEngine {
    categories: Vec<CompiledCategory>,
    scoring: ScoringConfig,
}

impl TagEngine {
    pub fn new(taxonomy: &Taxonomy, scoring: ScoringConfig) -> Self {
        let categories = taxonomy
            .categories()
            .iter()
            .map(|category| CompiledCategory {
                name: category.name.clone(),
                weight: category.weight,
                synonyms: category
                    .synonyms
                    .iter()
                    .filter_map(|surface| {
                        let normalized = normalize(surface);
                        if normalized.is_empty() {
                            log::debug!(
                                "Ignoring synonym {surface:?} of '{}': empty after normalization",
                                category.name
                            );
                            return None;
                        }
                        Some(CompiledSynonym {
                            surface: surface.clone(),
                            normalized,
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            categories,
            scoring,
        }
    }

    /// Derive tags, score and matched keywords from a title and summary.
    pub fn extract_tags_and_score(&self, title: &str, summary: &str) -> Extraction {
        let title = normalize(title);
        let summary = normalize(summary);

        let mut extraction = Extraction::default();
        for category in &self.categories {
            let mut words = Vec::new();
            for synonym in &category.synonyms {
                let in_title = title.contains(&synonym.normalized);
                let in_summary = summary.contains(&synonym.normalized);

                if in_title {
                    let points = category.weight.saturating_add(self.scoring.title_bonus);
                    extraction.score = extraction.score.saturating_add(points);
                }
                if in_summary {
                    let points = category.weight.saturating_add(self.scoring.summary_bonus);
                    extraction.score = extraction.score.saturating_add(points);
                }
                if (in_title || in_summary) && !words.contains(&synonym.surface) {
                    words.push(synonym.surface.clone());
                }
            }

            if !words.is_empty() {
                extraction.tags.push(category.name.clone());
                extraction.matched_keywords.push(MatchedKeywords {
                    tag: category.name.clone(),
                    words,
                });
            }
        }

        extraction.score = clamp_unattributed(
            extraction.score,
            !extraction.tags.is_empty(),
            self.scoring.unattributed_cap,
        );
        extraction
    }

    /// Attach tags, score and detected keywords to an item.
    pub fn annotate(&self, item: NewsItem) -> AnnotatedItem {
        let extraction = self.extract_tags_and_score(&item.title, &item.summary);
        let detected_keywords = extraction.detected_keywords();
        AnnotatedItem {
            item,
            auto_tags: extraction.tags,
            relevance_score: extraction.score,
            detected_keywords,
        }
    }

    pub fn annotate_all(&self, items: impl IntoIterator<Item = NewsItem>) -> Vec<AnnotatedItem> {
        items.into_iter().map(|item| self.annotate(item)).collect()
    }
}

/// A positive score with no tag to justify it is capped.
fn clamp_unattributed(score: u32, has_tags: bool, cap: u32) -> u32 {
    if !has_tags && score > 0 {
        score.min(cap)
    } else {
        score
    }
}
