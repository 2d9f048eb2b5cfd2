//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{KeywordCategory, SynonymCluster, Taxonomy};

/// Environment variable overriding `sources.remote.base_url`.
pub const ENV_REMOTE_URL: &str = "RECONNEWS_REMOTE_URL";
/// Environment variable overriding `sources.remote.api_key`.
pub const ENV_REMOTE_KEY: &str = "RECONNEWS_REMOTE_KEY";
/// Environment variable overriding `sources.allowlist` (comma separated).
pub const ENV_SOURCES_ALLOWLIST: &str = "RECONNEWS_SOURCES_ALLOWLIST";

/// Upper bound for `cache.ttl_minutes` (one week).
pub const MAX_TTL_MINUTES: u64 = 7 * 24 * 60;
/// Upper bound for `feed.max_age_hours` (ten years).
pub const MAX_AGE_HOURS: u64 = 10 * 365 * 24;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior of the remote source
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Where news comes from and which publishers are trusted
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Post-processing applied to fetched items
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Tagging categories, in declaration order
    #[serde(default = "defaults::taxonomy")]
    pub taxonomy: Vec<KeywordCategory>,

    /// Search widening clusters
    #[serde(default = "defaults::synonym_clusters")]
    pub synonym_clusters: Vec<SynonymCluster>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_REMOTE_URL).filter(|v| !v.trim().is_empty()) {
            let remote = self.sources.remote.get_or_insert_with(RemoteConfig::default);
            remote.base_url = url.trim().to_string();
        }

        if let Some(key) = lookup(ENV_REMOTE_KEY) {
            match self.sources.remote.as_mut() {
                Some(remote) => remote.api_key = key.trim().to_string(),
                None => log::warn!(
                    "{ENV_REMOTE_KEY} is set but no remote source is configured; ignoring it"
                ),
            }
        }

        if let Some(list) = lookup(ENV_SOURCES_ALLOWLIST) {
            self.sources.allowlist = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// The configured taxonomy.
    pub fn taxonomy(&self) -> Taxonomy {
        Taxonomy::new(self.taxonomy.clone())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.retry_attempts == 0 {
            return Err(AppError::validation("fetch.retry_attempts must be > 0"));
        }
        if self.cache.ttl_minutes == 0 {
            return Err(AppError::validation("cache.ttl_minutes must be > 0"));
        }
        if self.cache.ttl_minutes > MAX_TTL_MINUTES {
            return Err(AppError::validation(format!(
                "cache.ttl_minutes must be <= {MAX_TTL_MINUTES}"
            )));
        }
        if self.feed.max_age_hours > MAX_AGE_HOURS {
            return Err(AppError::validation(format!(
                "feed.max_age_hours must be <= {MAX_AGE_HOURS}"
            )));
        }
        if self.feed.line_template.trim().is_empty() {
            return Err(AppError::validation("feed.line_template is empty"));
        }
        if let Some(remote) = &self.sources.remote {
            remote.validate()?;
        }
        if self.taxonomy.is_empty() {
            return Err(AppError::validation("No taxonomy categories defined"));
        }
        self.taxonomy().validate()?;

        for cluster in &self.synonym_clusters {
            if cluster.key.trim().is_empty() {
                return Err(AppError::validation("synonym cluster with empty key"));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            cache: CacheConfig::default(),
            sources: SourcesConfig::default(),
            feed: FeedConfig::default(),
            scoring: ScoringConfig::default(),
            taxonomy: defaults::taxonomy(),
            synonym_clusters: defaults::synonym_clusters(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Total attempts per fetch, including the first
    #[serde(default = "defaults::retry_attempts")]
    pub retry_attempts: u32,

    /// Pause between attempts in milliseconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retry_attempts: defaults::retry_attempts(),
            retry_delay_ms: defaults::retry_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long an annotated feed stays fresh
    #[serde(default = "defaults::ttl_minutes")]
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: defaults::ttl_minutes(),
        }
    }
}

/// Source chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Publishers accepted from the remote source (empty allows all)
    #[serde(default = "defaults::allowlist")]
    pub allowlist: Vec<String>,

    /// Static fallback document
    #[serde(default = "defaults::fallback_path")]
    pub fallback_path: String,

    /// Remote structured-data source; skipped when absent
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            allowlist: defaults::allowlist(),
            fallback_path: defaults::fallback_path(),
            remote: None,
        }
    }
}

/// Remote REST table holding news rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.example.co`
    pub base_url: String,

    /// Anonymous API key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "defaults::table")]
    pub table: String,

    /// Maximum rows requested per fetch
    #[serde(default = "defaults::limit")]
    pub limit: usize,
}

impl RemoteConfig {
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            AppError::validation(format!(
                "sources.remote.base_url '{}' is invalid: {e}",
                self.base_url
            ))
        })?;
        if self.table.trim().is_empty() {
            return Err(AppError::validation("sources.remote.table is empty"));
        }
        if self.limit == 0 {
            return Err(AppError::validation("sources.remote.limit must be > 0"));
        }
        Ok(())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            table: defaults::table(),
            limit: defaults::limit(),
        }
    }
}

/// Feed post-processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Remote items older than this are dropped
    #[serde(default = "defaults::max_age_hours")]
    pub max_age_hours: u64,

    /// Feeds shorter than this are topped up with samples
    #[serde(default = "defaults::min_articles")]
    pub min_articles: usize,

    /// Line format for CLI output
    ///
    /// Supported placeholders:
    /// - `{title}`, `{summary}`, `{source}`, `{date}`, `{url}`, `{category}`
    /// - `{score}`, `{tags}`
    #[serde(default = "defaults::line_template")]
    pub line_template: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_age_hours: defaults::max_age_hours(),
            min_articles: defaults::min_articles(),
            line_template: defaults::line_template(),
        }
    }
}

/// Relevance scoring constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Added to the category weight for a title match
    #[serde(default = "defaults::title_bonus")]
    pub title_bonus: u32,

    /// Added to the category weight for a summary match
    #[serde(default = "defaults::summary_bonus")]
    pub summary_bonus: u32,

    /// Ceiling for a positive score that produced no tag
    #[serde(default = "defaults::unattributed_cap")]
    pub unattributed_cap: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_bonus: defaults::title_bonus(),
            summary_bonus: defaults::summary_bonus(),
            unattributed_cap: defaults::unattributed_cap(),
        }
    }
}

mod defaults {
    use super::{KeywordCategory, SynonymCluster};

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; ReconNews/0.1)".into()
    }
    pub fn timeout() -> u64 {
        5
    }
    pub fn retry_attempts() -> u32 {
        2
    }
    pub fn retry_delay() -> u64 {
        3000
    }

    pub fn ttl_minutes() -> u64 {
        30
    }

    // Source defaults
    pub fn allowlist() -> Vec<String> {
        [
            "Gospel Prime",
            "Guiame",
            "Portas Abertas",
            "Portas Abertas - Cristãos Perseguidos",
            "Cafetorah - Notícias de Israel",
            "Folha Gospel",
            "Radio 93 - Giro Cristão",
            "CPAD News",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn fallback_path() -> String {
        "data/christian_news.json".into()
    }
    pub fn table() -> String {
        "news_articles".into()
    }
    pub fn limit() -> usize {
        20
    }

    // Feed defaults
    pub fn max_age_hours() -> u64 {
        24
    }
    pub fn min_articles() -> usize {
        6
    }
    pub fn line_template() -> String {
        "[{source}] {title} (score {score})".into()
    }

    // Scoring defaults
    pub fn title_bonus() -> u32 {
        3
    }
    pub fn summary_bonus() -> u32 {
        1
    }
    pub fn unattributed_cap() -> u32 {
        3
    }

    pub fn taxonomy() -> Vec<KeywordCategory> {
        vec![
            KeywordCategory::new(
                "Arqueologia Bíblica",
                &[
                    "arqueologia",
                    "arqueológico",
                    "escavação",
                    "sítio",
                    "ruínas",
                    "descoberta",
                    "artefato",
                    "fóssil",
                ],
                2,
            ),
            KeywordCategory::new(
                "Israel e Terra Santa",
                &["israel", "jerusalém", "galileia", "terra santa"],
                3,
            ),
            KeywordCategory::new(
                "Oriente Médio Antigo",
                &[
                    "egito",
                    "egípcio",
                    "faraó",
                    "pérsia",
                    "babilônia",
                    "babilônico",
                    "nínive",
                    "síria",
                    "crescente fértil",
                    "assírio",
                ],
                2,
            ),
            KeywordCategory::new(
                "Mundo Greco-Romano",
                &["grécia", "helênico", "romano", "roma"],
                1,
            ),
            KeywordCategory::new(
                "Criacionismo",
                &["criacionismo", "criacionista", "design inteligente"],
                2,
            ),
            KeywordCategory::new(
                "Perseguição Cristã",
                &["perseguição", "cristãos perseguidos", "martírio", "portas abertas"],
                2,
            ),
            KeywordCategory::new(
                "Teologia Reformada",
                &["reforma", "calvinismo", "solas", "sola fide", "sola scriptura", "sola gratia"],
                1,
            ),
            KeywordCategory::new(
                "Missões",
                &["missões", "missionário", "evangelização", "evangelizar", "discipulado"],
                1,
            ),
            KeywordCategory::new(
                "Igreja Local",
                &["culto", "igreja", "congregação", "pastor", "membro", "diácono"],
                1,
            ),
            KeywordCategory::new("Família", &["família", "casamento", "pais", "filhos"], 1),
            KeywordCategory::new("Crianças", &["crianças", "escolinha", "ebd"], 1),
            KeywordCategory::new(
                "Educação",
                &["seminário", "faculdade", "mackenzie", "escola", "curso"],
                1,
            ),
            KeywordCategory::new(
                "Eventos",
                &["conferência", "congresso", "evento", "agenda", "calendário"],
                1,
            ),
        ]
    }

    pub fn synonym_clusters() -> Vec<SynonymCluster> {
        vec![
            SynonymCluster::new(
                "arqueologia",
                &["arqueológico", "escavação", "sítio", "ruínas", "descoberta"],
            ),
            SynonymCluster::new("israel", &["jerusalém", "galileia", "terra santa"]),
            SynonymCluster::new("criacionismo", &["criacionista", "design inteligente"]),
            SynonymCluster::new("egito", &["egípcio", "faraó", "pirâmide"]),
            SynonymCluster::new("babilônia", &["babilônico", "nabucodonosor"]),
        ]
    }
}
