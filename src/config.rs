use crate::error::{ExtractorError, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub elasticsearch: ElasticsearchConfig,
    #[serde(default)]
    pub ontology: OntologyConfig,
}

#[derive(Debug, Deserialize)]
pub struct ElasticsearchConfig {
    /// Search engine base address, e.g. "http://localhost:9200"
    pub host: String,
    /// Target index name
    pub index: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct OntologyConfig {
    /// Directory holding the materialized skill node files
    pub resource_dir: String,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            resource_dir: "resources/ontologies".to_string(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ExtractorError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))
        })?;

        let mut config: Config = toml::from_str(&config_content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// ELASTICSEARCH_HOST and ELASTICSEARCH_INDEX take precedence over the
    /// config file so deployments can retarget without editing it.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ELASTICSEARCH_HOST") {
            self.elasticsearch.host = host;
        }
        if let Ok(index) = std::env::var("ELASTICSEARCH_INDEX") {
            self.elasticsearch.index = index;
        }
    }
}
