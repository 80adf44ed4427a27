use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::ports::OntologyPort;
use crate::types::SkillNode;

/// Ontology source backed by a directory of materialized node files.
///
/// Taxonomy parsing happens upstream; this adapter only reads the node
/// sets the loader wrote out, one JSON array of nodes per `.json` file.
/// Files are read in path order so catalog order stays deterministic.
pub struct JsonOntologySource {
    resource_dir: PathBuf,
}

impl JsonOntologySource {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
        }
    }
}

#[async_trait]
impl OntologyPort for JsonOntologySource {
    async fn load_skill_nodes(&self) -> Result<Vec<SkillNode>> {
        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.resource_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut nodes = Vec::new();
        for path in paths {
            let raw = tokio::fs::read_to_string(&path).await?;
            let mut file_nodes: Vec<SkillNode> = serde_json::from_str(&raw)?;
            debug!(file = %path.display(), n_nodes = file_nodes.len(), "loaded ontology nodes");
            nodes.append(&mut file_nodes);
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;
    use std::fs;

    #[tokio::test]
    async fn loads_nodes_from_json_files_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b_skills.json"),
            r#"[{"name": "Rust", "kind": "Concept"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("a_skills.json"),
            r#"[{"name": "Go", "labels": ["Golang"], "kind": "Instance", "parents": ["Programming"]}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not an ontology").unwrap();

        let source = JsonOntologySource::new(dir.path());
        let nodes = source.load_skill_nodes().await.unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "Go");
        assert_eq!(nodes[0].kind, NodeKind::Instance);
        assert_eq!(nodes[0].parents, ["Programming"]);
        assert_eq!(nodes[1].name, "Rust");
        assert_eq!(nodes[1].kind, NodeKind::Concept);
        assert!(nodes[1].labels.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let source = JsonOntologySource::new("/definitely/not/here");
        assert!(source.load_skill_nodes().await.is_err());
    }
}
