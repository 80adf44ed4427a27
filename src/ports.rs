use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DocumentId, IndexHit, SkillNode};

/// Query seam to the full-text search engine.
///
/// Implemented by the Elasticsearch client in `infra`; tests substitute
/// in-memory fakes so the extraction flow can be exercised offline.
#[async_trait]
pub trait IndexQueryPort: Send + Sync {
    /// Searches for documents among `document_ids` containing any of
    /// `terms` as an exact phrase. Returns full hits with stored content.
    async fn search_terms(
        &self,
        terms: &[String],
        index: &str,
        document_ids: &[DocumentId],
    ) -> Result<Vec<IndexHit>>;

    /// Whether `term` occurs as an exact phrase in the given document.
    async fn exists_term(&self, term: &str, document_id: &DocumentId, index: &str)
        -> Result<bool>;

    /// Wildcard substring search over title and content, returning only
    /// document identifiers. A missing index yields an empty result.
    async fn search_free_text(
        &self,
        query: &str,
        index: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<DocumentId>>;
}

/// Source of the materialized ontology node set. Taxonomy file parsing is
/// upstream of this boundary.
#[async_trait]
pub trait OntologyPort: Send + Sync {
    async fn load_skill_nodes(&self) -> Result<Vec<SkillNode>>;
}
