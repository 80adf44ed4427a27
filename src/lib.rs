pub mod canonicalize;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractor;
pub mod infra;
pub mod logging;
pub mod matcher;
pub mod ports;
pub mod types;

pub use catalog::{CatalogCell, SkillCatalog};
pub use error::{ExtractorError, Result};
pub use extractor::SkillExtractor;
pub use types::{DocumentId, NodeKind, SkillExtract, SkillNode};
