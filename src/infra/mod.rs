pub mod es_client;
pub mod json_ontology;

pub use es_client::EsClient;
pub use json_ontology::JsonOntologySource;
