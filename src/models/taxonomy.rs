//! Keyword taxonomy and search synonym clusters.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A named topic with the surface forms that identify it in news text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCategory {
    /// Tag name attached to matching items (unique within a taxonomy)
    pub name: String,

    /// Surface forms, matched case- and accent-insensitively
    #[serde(default)]
    pub synonyms: Vec<String>,

    /// Score contribution of each matched synonym
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl KeywordCategory {
    pub fn new(name: impl Into<String>, synonyms: &[&str], weight: u32) -> Self {
        Self {
            name: name.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }
}

/// The ordered set of categories used for tagging.
///
/// Declaration order is kept: it decides the order of tags and matched
/// keywords in every extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<KeywordCategory>,
}

impl Taxonomy {
    pub fn new(categories: Vec<KeywordCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All tag names, in declaration order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Check names are unique and weights positive.
    ///
    /// Categories without synonyms are accepted; they can never match.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(AppError::validation("taxonomy category with empty name"));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate taxonomy category '{}'",
                    category.name
                )));
            }
            if category.weight == 0 {
                return Err(AppError::validation(format!(
                    "taxonomy category '{}' has weight 0",
                    category.name
                )));
            }
            if category.synonyms.is_empty() {
                log::warn!(
                    "Taxonomy category '{}' has no synonyms and will never match",
                    category.name
                );
            }
        }
        Ok(())
    }
}

impl From<Vec<KeywordCategory>> for Taxonomy {
    fn from(categories: Vec<KeywordCategory>) -> Self {
        Self::new(categories)
    }
}

/// Cross-reference cluster used to widen free-text search.
///
/// Searching for the key or any synonym finds items mentioning any member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynonymCluster {
    pub key: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl SynonymCluster {
    pub fn new(key: impl Into<String>, synonyms: &[&str]) -> Self {
        Self {
            key: key.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_keep_declaration_order() {
        let taxonomy = Taxonomy::new(vec![
            KeywordCategory::new("Israel", &["israel"], 3),
            KeywordCategory::new("Missões", &["missões"], 1),
        ]);
        assert_eq!(taxonomy.tag_names(), vec!["Israel", "Missões"]);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let taxonomy = Taxonomy::new(vec![
            KeywordCategory::new("Israel", &["israel"], 3),
            KeywordCategory::new("Israel", &["jerusalém"], 1),
        ]);
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_weight() {
        let taxonomy = Taxonomy::new(vec![KeywordCategory::new("Israel", &["israel"], 0)]);
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_empty_synonyms() {
        let taxonomy = Taxonomy::new(vec![KeywordCategory::new("Vazia", &[], 1)]);
        assert!(taxonomy.validate().is_ok());
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let category: KeywordCategory =
            toml::from_str("name = \"Família\"\nsynonyms = [\"família\"]").unwrap();
        assert_eq!(category.weight, 1);
    }
}
