//! News sources.
//!
//! A feed is assembled from a chain of sources, tried in order:
//!
//! ```text
//! remote REST table  ──fail/empty──▶  static JSON document  ──fail──▶  built-in samples
//! ```
//!
//! Sources only deliver raw [`NewsRecord`]s; validation, recency and the
//! allowlist are applied by the feed service.

pub mod local;
pub mod remote;
pub mod samples;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::NewsRecord;

// Re-export for convenience
pub use local::{DocumentSource, LocalStorage};
pub use remote::RemoteSource;

/// Records delivered by one fetch.
#[derive(Debug, Clone, Default)]
pub struct NewsBatch {
    pub records: Vec<NewsRecord>,
    /// Generation time of the whole batch, when the source reports one
    pub last_updated: Option<String>,
}

impl NewsBatch {
    pub fn new(records: Vec<NewsRecord>) -> Self {
        Self {
            records,
            last_updated: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Trait for news source backends.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch the current records.
    async fn fetch(&self) -> Result<NewsBatch>;
}
