// src/storage/remote.rs

//! Remote REST table source.
//!
//! Rows are read with a single GET against the table endpoint:
//!
//! ```text
//! GET {base_url}/rest/v1/{table}?select=*&order=created_at.desc&limit={limit}
//! apikey: {api_key}
//! Authorization: Bearer {api_key}
//! ```

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, NewsRecord, RemoteConfig, records_from_values};
use crate::storage::{NewsBatch, NewsSource};
use crate::utils::http::{RetryPolicy, create_async_client, retry};

/// News rows served by a PostgREST-style endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: Client,
    config: RemoteConfig,
    retry: RetryPolicy,
}

impl RemoteSource {
    pub fn new(config: RemoteConfig, fetch: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(fetch)?,
            config,
            retry: RetryPolicy::from(fetch),
        })
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Endpoint URL for the configured table, newest rows first.
    pub fn endpoint(&self) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let limit = self.config.limit.to_string();
        let url = Url::parse_with_params(
            &format!("{base}/rest/v1/{}", self.config.table),
            &[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ],
        )?;
        Ok(url)
    }

    async fn fetch_once(&self) -> Result<Vec<NewsRecord>> {
        let url = self.endpoint()?;
        log::debug!("Fetching news rows from {url}");

        let response = self
            .client
            .get(url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::unavailable(self.name(), format!("HTTP {status}")));
        }

        let body = response.text().await?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&body)?;
        Ok(records_from_values(rows))
    }
}

#[async_trait]
impl NewsSource for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn fetch(&self) -> Result<NewsBatch> {
        let records = retry(self.retry, "Remote news fetch", || self.fetch_once()).await?;
        log::info!("Fetched {} row(s) from remote table {}", records.len(), self.config.table);
        Ok(NewsBatch::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn source(server: &MockServer) -> RemoteSource {
        let config = RemoteConfig {
            base_url: format!("{}/", server.uri()),
            api_key: "anon-key".to_string(),
            ..RemoteConfig::default()
        };
        RemoteSource::new(config, &FetchConfig::default())
            .unwrap()
            .with_retry(RetryPolicy::new(2, Duration::ZERO))
    }

    #[test]
    fn test_endpoint() {
        let config = RemoteConfig {
            base_url: "https://news.example.com/".to_string(),
            limit: 5,
            ..RemoteConfig::default()
        };
        let source = RemoteSource::new(config, &FetchConfig::default()).unwrap();
        let url = source.endpoint().unwrap();

        assert_eq!(url.path(), "/rest/v1/news_articles");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_keys_and_parses_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/news_articles"))
            .and(query_param("order", "created_at.desc"))
            .and(query_param("limit", "20"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id": 1, "title": "Culto de ação de graças", "summary": "",
                     "url": "https://example.com/culto", "source": "Guiame",
                     "date": "2025-03-10", "created_at": "2025-03-10T10:00:00Z"}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let batch = source(&server).fetch().await.unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].title.as_deref(), Some("Culto de ação de graças"));
        assert!(batch.last_updated.is_none());
    }

    #[tokio::test]
    async fn test_bad_row_does_not_drop_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"title": "Culto de ação de graças", "url": "https://example.com/culto",
                     "source": "Guiame", "image_url": 42},
                    17,
                    {"title": "Congresso de missões", "url": "https://example.com/congresso",
                     "source": "CPAD News"}]"#,
            ))
            .mount(&server)
            .await;

        let batch = source(&server).fetch().await.unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].image_url, None);
        assert_eq!(batch.records[1].source.as_deref(), Some("CPAD News"));
    }

    #[tokio::test]
    async fn test_server_error_is_retried_then_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let err = source(&server).fetch().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = source(&server).fetch().await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
