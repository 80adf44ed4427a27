use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::canonicalize::canonicalize;
use crate::catalog::{SkillCatalog, BATCH_SIZE};
use crate::error::{ExtractorError, Result};
use crate::matcher::count_occurrences;
use crate::ports::IndexQueryPort;
use crate::types::{DocumentId, IndexHit, SkillExtract, SkillNode};

/// Upper bound on term-batch queries in flight at once
const MAX_CONCURRENT_QUERIES: usize = 4;

/// Drives the end-to-end extraction flow: batch the catalog terms, query
/// the index per batch, match and canonicalize hits, then rank the
/// deduplicated result set.
pub struct SkillExtractor {
    index_client: Arc<dyn IndexQueryPort>,
    index: String,
    batch_size: usize,
}

impl SkillExtractor {
    pub fn new(index_client: Arc<dyn IndexQueryPort>, index: impl Into<String>) -> Self {
        Self {
            index_client,
            index: index.into(),
            batch_size: BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Extracts skills mentioned in a document and returns them sorted
    /// descending by occurrence count. An empty ontology, an empty
    /// document, or zero matches all return an empty list, never an error;
    /// a failed batch query aborts the whole call with no partial result.
    pub async fn extract_skills_in_document(
        &self,
        nodes: Vec<SkillNode>,
        document_id: &DocumentId,
    ) -> Result<Vec<SkillExtract>> {
        if nodes.is_empty() {
            debug!("there is no skill to query");
            return Ok(Vec::new());
        }
        let catalog = Arc::new(SkillCatalog::from_nodes(nodes));
        self.extract_with_catalog(&catalog, document_id).await
    }

    /// Same flow over a prebuilt (possibly cached) catalog.
    pub async fn extract_with_catalog(
        &self,
        catalog: &Arc<SkillCatalog>,
        document_id: &DocumentId,
    ) -> Result<Vec<SkillExtract>> {
        if catalog.is_empty() {
            debug!("there is no skill to query");
            return Ok(Vec::new());
        }

        // Batches are independent, so their queries run concurrently under
        // a semaphore; results are consumed strictly in batch order to keep
        // the aggregation deterministic.
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_QUERIES));
        let mut handles = Vec::new();
        for batch in catalog.term_batches(self.batch_size) {
            let batch: Vec<String> = batch.to_vec();
            let client = Arc::clone(&self.index_client);
            let semaphore = Arc::clone(&semaphore);
            let index = self.index.clone();
            let document_id = document_id.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                let hits = client
                    .search_terms(&batch, &index, std::slice::from_ref(&document_id))
                    .await?;
                Ok::<(Vec<String>, Vec<IndexHit>), ExtractorError>((batch, hits))
            }));
        }

        let mut extracts: Vec<SkillExtract> = Vec::new();
        let mut seen: HashSet<SkillExtract> = HashSet::new();
        for handle in handles {
            let (batch, hits) = handle.await.map_err(|e| ExtractorError::Query {
                message: format!("term-batch query task failed: {e}"),
            })??;

            // Normally one hit: the target document
            for hit in &hits {
                let content_lower = hit.content.to_lowercase();
                for term in &batch {
                    let n_match = count_occurrences(&content_lower, term)?;
                    if n_match == 0 {
                        continue;
                    }
                    for extract in canonicalize(catalog.get(term), term, n_match) {
                        if seen.insert(extract.clone()) {
                            extracts.push(extract);
                        }
                    }
                }
            }
        }

        // Stable sort keeps encounter order as the tie-break for equal counts
        extracts.sort_by(|a, b| b.n_match.cmp(&a.n_match));

        let names: HashSet<&str> = extracts.iter().map(|e| e.name.as_str()).collect();
        debug!(
            document_id = %document_id,
            n_skills = names.len(),
            skills = ?names,
            "extracted skills from document"
        );

        Ok(extracts)
    }
}
