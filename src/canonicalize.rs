use crate::types::{NodeKind, SkillExtract, SkillNode};

/// Maps a matched term to the extracts it should be reported as.
///
/// Concepts report themselves. Instances roll up to their parent concepts,
/// one extract per parent; an instance without parents yields nothing, so
/// the match is dropped. A term missing from the catalog is reported as-is.
pub fn canonicalize(
    node: Option<&SkillNode>,
    matched_term: &str,
    n_match: usize,
) -> Vec<SkillExtract> {
    match node {
        Some(node) if node.kind == NodeKind::Instance => node
            .parents
            .iter()
            .map(|parent| SkillExtract {
                name: parent.clone(),
                match_str: matched_term.to_string(),
                n_match,
            })
            .collect(),
        _ => vec![SkillExtract {
            name: matched_term.to_string(),
            match_str: matched_term.to_string(),
            n_match,
        }],
    }
}
