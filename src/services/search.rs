// src/services/search.rs

//! Synonym-expanded free-text search.
//!
//! A query is split into normalized tokens and an item matches when any
//! token matches it. Tokens that belong to a synonym cluster also match
//! items mentioning any other member of that cluster.

use crate::models::{AnnotatedItem, SynonymCluster};
use crate::utils::text::{normalize, tokens};

/// Search over annotated items with a shared synonym cluster table.
#[derive(Debug, Clone, Default)]
pub struct SynonymSearch {
    /// Each cluster as its normalized key followed by normalized synonyms
    clusters: Vec<Vec<String>>,
}

impl SynonymSearch {
    pub fn new(clusters: &[SynonymCluster]) -> Self {
        let clusters = clusters
            .iter()
            .map(|cluster| {
                std::iter::once(&cluster.key)
                    .chain(&cluster.synonyms)
                    .map(|term| normalize(term))
                    .filter(|term| !term.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|members| !members.is_empty())
            .collect();
        Self { clusters }
    }

    /// Keep the items matching `query`, in their original order.
    ///
    /// A blank query keeps every item.
    pub fn search<'a>(&self, items: &[&'a AnnotatedItem], query: &str) -> Vec<&'a AnnotatedItem> {
        let query_tokens = tokens(query);
        if query_tokens.is_empty() {
            return items.to_vec();
        }
        items
            .iter()
            .copied()
            .filter(|item| self.matches_tokens(item, &query_tokens))
            .collect()
    }

    /// Whether a single item matches `query`.
    pub fn matches(&self, item: &AnnotatedItem, query: &str) -> bool {
        let query_tokens = tokens(query);
        query_tokens.is_empty() || self.matches_tokens(item, &query_tokens)
    }

    fn matches_tokens(&self, item: &AnnotatedItem, query_tokens: &[String]) -> bool {
        let text = searchable_text(item);
        query_tokens
            .iter()
            .any(|token| text.contains(token.as_str()) || self.cluster_matches(token, &text))
    }

    fn cluster_matches(&self, token: &str, text: &str) -> bool {
        self.clusters
            .iter()
            .filter(|members| members.iter().any(|member| member == token))
            .any(|members| members.iter().any(|member| text.contains(member.as_str())))
    }
}

fn searchable_text(item: &AnnotatedItem) -> String {
    let mut raw = format!("{} {}", item.item.title, item.item.summary);
    for keyword in &item.detected_keywords {
        raw.push(' ');
        raw.push_str(keyword);
    }
    normalize(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsItem;

    fn item(title: &str, summary: &str, keywords: &[&str]) -> AnnotatedItem {
        AnnotatedItem {
            item: NewsItem {
                title: title.to_string(),
                summary: summary.to_string(),
                url: format!("https://example.com/{}", title.len()),
                source: "Guiame".to_string(),
                date: "2025-03-10".to_string(),
                category: None,
                image_url: None,
            },
            auto_tags: Vec::new(),
            relevance_score: 0,
            detected_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn search() -> SynonymSearch {
        SynonymSearch::new(&[
            SynonymCluster::new("arqueologia", &["escavação", "sítio", "descoberta"]),
            SynonymCluster::new("egito", &["faraó", "pirâmide"]),
        ])
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let items = [item("Culto", "", &[]), item("Missões", "", &[])];
        let refs: Vec<_> = items.iter().collect();
        assert_eq!(search().search(&refs, "   ").len(), 2);
        assert_eq!(search().search(&refs, "?!").len(), 2);
    }

    #[test]
    fn test_literal_match_ignores_case_and_accents() {
        let items = [item("Nova ESCAVAÇÃO no Egito", "", &[]), item("Culto", "", &[])];
        let refs: Vec<_> = items.iter().collect();
        let found = search().search(&refs, "escavacao");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item.title, "Nova ESCAVAÇÃO no Egito");
    }

    #[test]
    fn test_cluster_key_finds_synonyms() {
        let items = [
            item("Descoberta em sítio antigo", "", &[]),
            item("Reunião de oração", "", &[]),
        ];
        let refs: Vec<_> = items.iter().collect();
        let found = search().search(&refs, "arqueologia");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item.title, "Descoberta em sítio antigo");
    }

    #[test]
    fn test_cluster_key_finds_synonym_in_summary() {
        let items = [
            item("Notícia da semana", "Equipe conclui escavação em Siquém", &[]),
            item("Culto de domingo", "Igreja reunida", &[]),
        ];
        let refs: Vec<_> = items.iter().collect();
        let found = search().search(&refs, "arqueologia");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item.title, "Notícia da semana");
    }

    #[test]
    fn test_cluster_synonym_finds_key() {
        let items = [item("Museu do Egito reabre", "", &[])];
        let refs: Vec<_> = items.iter().collect();
        assert_eq!(search().search(&refs, "faraó").len(), 1);
    }

    #[test]
    fn test_tokens_are_or_combined() {
        let items = [
            item("Conferência de missões", "", &[]),
            item("Congresso de família", "", &[]),
            item("Notícia sem relação", "", &[]),
        ];
        let refs: Vec<_> = items.iter().collect();
        let found = search().search(&refs, "missões família");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].item.title, "Conferência de missões");
    }

    #[test]
    fn test_detected_keywords_are_searchable() {
        let items = [item("Notícia", "", &["ebd"])];
        assert!(search().matches(&items[0], "EBD"));
        assert!(!search().matches(&items[0], "pirâmide"));
    }
}
