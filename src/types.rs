use serde::{Deserialize, Serialize};

/// Identifier of an indexed document, passed through to the engine's `id` field
pub type DocumentId = String;

/// Distinguishes class-level skills from named individuals in the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A class-level skill, reported as itself
    Concept,
    /// A named individual belonging to one or more parent concepts,
    /// reported only via its parents
    Instance,
}

/// One skill node from the materialized ontology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillNode {
    /// Canonical concept identifier, unique within the catalog
    pub name: String,
    /// Synonym strings that also refer to this node
    #[serde(default)]
    pub labels: Vec<String>,
    pub kind: NodeKind,
    /// Parent concept names; meaningful only when `kind` is `Instance`
    #[serde(default)]
    pub parents: Vec<String>,
}

/// One reported (concept, matched literal, count) triple from an extraction.
/// Identity for deduplication is the combination of all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillExtract {
    /// Concept name to report; equals `match_str` unless the match was
    /// canonicalized up to a parent concept
    pub name: String,
    /// Literal term found in the document content
    pub match_str: String,
    /// Occurrence count of `match_str` in the content
    pub n_match: usize,
}

/// A document hit returned from a term-batch search
#[derive(Debug, Clone)]
pub struct IndexHit {
    pub id: DocumentId,
    pub title: Option<String>,
    pub content: String,
}
