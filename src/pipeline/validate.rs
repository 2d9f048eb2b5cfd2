// src/pipeline/validate.rs

use std::path::Path;

use crate::config::load_validated;
use crate::error::Result;
use crate::models::Config;
use crate::utils::log;

/// Validate configuration with environment overrides applied.
pub fn run_validate(config_path: &Path) -> Result<Config> {
    log::header("Validating configuration");

    match load_validated(config_path) {
        Ok(config) => {
            log::success("Config OK");
            log::sub_item(&format!("User agent: {}", config.fetch.user_agent));
            log::sub_item(&format!("Timeout: {}s", config.fetch.timeout_secs));
            log::sub_item(&format!("Cache TTL: {} min", config.cache.ttl_minutes));
            log::sub_item(&format!(
                "Remote source: {}",
                config
                    .sources
                    .remote
                    .as_ref()
                    .map_or("not configured", |r| r.base_url.as_str())
            ));
            log::sub_item(&format!("Fallback document: {}", config.sources.fallback_path));

            log::success("Taxonomy OK");
            log::sub_item(&format!("Categories: {}", config.taxonomy.len()));
            log::sub_item(&format!("Search clusters: {}", config.synonym_clusters.len()));
            Ok(config)
        }
        Err(e) => {
            log::error(&format!("Validation failed: {e}"));
            Err(e)
        }
    }
}
