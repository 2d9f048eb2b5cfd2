// src/pipeline/score.rs

//! Ad-hoc scoring and taxonomy listing.

use crate::error::Result;
use crate::models::Config;
use crate::services::{Extraction, TagEngine};
use crate::utils::log;

/// Score a title and summary with the configured taxonomy and print the result.
pub fn run_score(config: &Config, title: &str, summary: &str, json: bool) -> Result<Extraction> {
    let engine = TagEngine::new(&config.taxonomy(), config.scoring);
    let extraction = engine.extract_tags_and_score(title, summary);

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(extraction);
    }

    log::header(&format!("Score: {title}"));
    if extraction.matched_keywords.is_empty() {
        log::info("No taxonomy category matched");
    }
    for matched in &extraction.matched_keywords {
        log::sub_item(&format!("{}: {}", matched.tag, matched.words.join(", ")));
    }
    log::summary(
        "Result",
        &[
            ("Score", extraction.score.to_string()),
            ("Tags", extraction.tags.join(", ")),
        ],
    );
    Ok(extraction)
}

/// Print the configured taxonomy.
pub fn run_tags(config: &Config) {
    let taxonomy = config.taxonomy();
    log::header(&format!("Taxonomy ({} categories)", taxonomy.len()));
    for category in taxonomy.categories() {
        log::info(&format!("{} (weight {})", category.name, category.weight));
        log::sub_item(&category.synonyms.join(", "));
    }

    log::header(&format!("Search clusters ({})", config.synonym_clusters.len()));
    for cluster in &config.synonym_clusters {
        log::sub_item(&format!("{} ⇄ {}", cluster.key, cluster.synonyms.join(", ")));
    }
}
