use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::SkillNode;

/// Practical ceiling on disjunctive terms per full-text query; batches of
/// this size keep round trips low without exceeding engine limits.
pub const BATCH_SIZE: usize = 100;

/// Immutable lookup over the ontology's skill nodes, keyed by canonical
/// name and by every label.
pub struct SkillCatalog {
    lookup: HashMap<String, Arc<SkillNode>>,
    terms: Vec<String>,
}

impl SkillCatalog {
    /// Builds the lookup and the searchable term list (each node's name
    /// followed by its labels, in node order). When a name or label
    /// collides across nodes the later node wins silently; a known
    /// ambiguity in the taxonomy data, preserved as-is.
    pub fn from_nodes(nodes: Vec<SkillNode>) -> Self {
        let mut lookup = HashMap::new();
        let mut terms = Vec::with_capacity(nodes.len());
        for node in nodes {
            let node = Arc::new(node);
            terms.push(node.name.clone());
            lookup.insert(node.name.clone(), Arc::clone(&node));
            for label in &node.labels {
                terms.push(label.clone());
                lookup.insert(label.clone(), Arc::clone(&node));
            }
        }
        Self { lookup, terms }
    }

    pub fn get(&self, term: &str) -> Option<&SkillNode> {
        self.lookup.get(term).map(Arc::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Every searchable term, catalog order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Fixed-size chunks of the term list for batched queries
    pub fn term_batches(&self, batch_size: usize) -> impl Iterator<Item = &[String]> {
        self.terms.chunks(batch_size.max(1))
    }
}

/// Process-wide cache slot for a catalog.
///
/// Rebuild the catalog off to the side, then `replace` it; readers always
/// observe either the previous or the fully built value, never a partial
/// one.
#[derive(Default)]
pub struct CatalogCell {
    slot: RwLock<Option<Arc<SkillCatalog>>>,
}

impl CatalogCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> Option<Arc<SkillCatalog>> {
        self.slot.read().expect("catalog cell poisoned").clone()
    }

    pub fn replace(&self, catalog: SkillCatalog) {
        *self.slot.write().expect("catalog cell poisoned") = Some(Arc::new(catalog));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    fn node(name: &str, labels: &[&str]) -> SkillNode {
        SkillNode {
            name: name.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            kind: NodeKind::Concept,
            parents: Vec::new(),
        }
    }

    #[test]
    fn lookup_resolves_names_and_labels() {
        let catalog = SkillCatalog::from_nodes(vec![
            node("Rust", &["rustlang"]),
            node("Python", &[]),
        ]);

        assert_eq!(catalog.get("Rust").unwrap().name, "Rust");
        assert_eq!(catalog.get("rustlang").unwrap().name, "Rust");
        assert_eq!(catalog.get("Python").unwrap().name, "Python");
        assert!(catalog.get("Cobol").is_none());
    }

    #[test]
    fn term_list_preserves_catalog_order() {
        let catalog = SkillCatalog::from_nodes(vec![
            node("Rust", &["rustlang", "rust-lang"]),
            node("Python", &["py"]),
        ]);

        assert_eq!(
            catalog.terms(),
            vec!["Rust", "rustlang", "rust-lang", "Python", "py"]
        );
    }

    #[test]
    fn label_collision_is_last_write_wins() {
        // Known limitation: a shared label silently resolves to the later node
        let catalog = SkillCatalog::from_nodes(vec![
            node("Golang", &["Go"]),
            node("Go Board Game", &["Go"]),
        ]);

        assert_eq!(catalog.get("Go").unwrap().name, "Go Board Game");
    }

    #[test]
    fn batches_split_on_the_term_ceiling() {
        let nodes: Vec<SkillNode> = (0..250).map(|i| node(&format!("skill-{i}"), &[])).collect();
        let catalog = SkillCatalog::from_nodes(nodes);

        let batches: Vec<&[String]> = catalog.term_batches(100).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 100);
        assert_eq!(batches[1].len(), 100);
        assert_eq!(batches[2].len(), 50);
    }

    #[test]
    fn empty_catalog_is_empty() {
        let catalog = SkillCatalog::from_nodes(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.term_batches(100).count(), 0);
    }

    #[test]
    fn cell_swaps_whole_catalogs() {
        let cell = CatalogCell::new();
        assert!(cell.load().is_none());

        cell.replace(SkillCatalog::from_nodes(vec![node("Rust", &[])]));
        let first = cell.load().unwrap();
        assert!(first.get("Rust").is_some());

        cell.replace(SkillCatalog::from_nodes(vec![node("Python", &[])]));
        let second = cell.load().unwrap();
        assert!(second.get("Rust").is_none());
        assert!(second.get("Python").is_some());
        // Readers holding the old Arc still see the old view
        assert!(first.get("Rust").is_some());
    }
}
