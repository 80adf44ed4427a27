use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ElasticsearchConfig;
use crate::error::{ExtractorError, Result};
use crate::ports::IndexQueryPort;
use crate::types::{DocumentId, IndexHit};

/// Stored document type marker filtered on by every term-batch query
const DOC_TYPE: &str = "document";

/// Elasticsearch-backed implementation of [`IndexQueryPort`].
pub struct EsClient {
    client: reqwest::Client,
    base_url: String,
}

impl EsClient {
    pub fn new(config: &ElasticsearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.host.trim_end_matches('/').to_string(),
        })
    }

    /// Wraps a term in double quotes so the engine matches multi-word
    /// skill names as a contiguous phrase rather than as independent words.
    fn quote_phrase(term: &str) -> String {
        format!("\"{}\"", term.replace('"', "\\\""))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<reqwest::Response> {
        let response = self.client.post(url).json(body).send().await?;
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: HitSource,
}

#[derive(Debug, Default, Deserialize)]
struct HitSource {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[async_trait]
impl IndexQueryPort for EsClient {
    async fn search_terms(
        &self,
        terms: &[String],
        index: &str,
        document_ids: &[DocumentId],
    ) -> Result<Vec<IndexHit>> {
        let quoted: Vec<String> = terms.iter().map(|t| Self::quote_phrase(t)).collect();
        let body = json!({
            "query": {
                "bool": {
                    "must": [
                        { "terms": { "id": document_ids } },
                        { "query_string": {
                            "default_field": "content",
                            "query": quoted.join(" OR ")
                        }}
                    ],
                    "filter": [
                        { "term": { "_type": DOC_TYPE } }
                    ]
                }
            }
        });

        let url = format!("{}/{}/_search", self.base_url, index);
        let response = self.post_json(&url, &body).await?;
        if !response.status().is_success() {
            return Err(ExtractorError::Query {
                message: format!(
                    "term search on index '{}' failed with status {}",
                    index,
                    response.status()
                ),
            });
        }

        let parsed: SearchResponse = response.json().await?;
        debug!(index, n_terms = terms.len(), n_hits = parsed.hits.hits.len(), "term search done");
        Ok(parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| IndexHit {
                id: hit.id,
                title: hit.source.title,
                content: hit.source.content,
            })
            .collect())
    }

    async fn exists_term(
        &self,
        term: &str,
        document_id: &DocumentId,
        index: &str,
    ) -> Result<bool> {
        let body = json!({
            "query": {
                "bool": {
                    "must": [
                        { "query_string": {
                            "default_field": "content",
                            "query": Self::quote_phrase(term)
                        }}
                    ],
                    "filter": [
                        { "term": { "id": document_id } }
                    ]
                }
            }
        });

        let url = format!("{}/{}/_count", self.base_url, index);
        let response = self.post_json(&url, &body).await?;
        if !response.status().is_success() {
            return Err(ExtractorError::Query {
                message: format!(
                    "count on index '{}' failed with status {}",
                    index,
                    response.status()
                ),
            });
        }

        let parsed: CountResponse = response.json().await?;
        Ok(parsed.count > 0)
    }

    async fn search_free_text(
        &self,
        query: &str,
        index: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<DocumentId>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        // Literal wildcards are escaped before wrapping the query so the
        // engine runs a substring search, not whatever the input says
        let escaped = query.replace('*', "\\*");
        let body = json!({
            "from": offset,
            "size": limit,
            "_source": ["_id"],
            "query": {
                "query_string": {
                    "query": format!("*{escaped}*"),
                    "fields": ["title", "content"]
                }
            }
        });

        let url = format!("{}/{}/_search", self.base_url, index);
        let response = self.post_json(&url, &body).await?;
        if response.status() == StatusCode::NOT_FOUND {
            // The one recoverable case: the index has not been created yet
            warn!(index, "index not found; search engine not started or index not created yet");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(ExtractorError::Query {
                message: format!(
                    "free-text search on index '{}' failed with status {}",
                    index,
                    response.status()
                ),
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.hits.hits.into_iter().map(|hit| hit.id).collect())
    }
}
