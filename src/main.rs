use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use skills_extractor::config::Config;
use skills_extractor::infra::{EsClient, JsonOntologySource};
use skills_extractor::logging;
use skills_extractor::ports::{IndexQueryPort, OntologyPort};
use skills_extractor::SkillExtractor;

#[derive(Parser)]
#[command(name = "skills_extractor")]
#[command(about = "Extracts ontology skills mentioned in indexed documents")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the skills mentioned in a document, ranked by occurrences
    Extract {
        /// Identifier of the indexed document
        #[arg(long)]
        document_id: String,
    },
    /// Find documents whose title or content contains a substring
    Search {
        /// Free-text query
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Check whether a term occurs in a document's indexed content
    Exists {
        #[arg(long)]
        term: String,
        #[arg(long)]
        document_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let client: Arc<EsClient> = Arc::new(EsClient::new(&config.elasticsearch)?);
    let index = config.elasticsearch.index.clone();

    match cli.command {
        Commands::Extract { document_id } => {
            let ontology = JsonOntologySource::new(&config.ontology.resource_dir);
            let nodes = ontology.load_skill_nodes().await?;
            info!(n_nodes = nodes.len(), "loaded ontology");

            let extractor = SkillExtractor::new(client, &index);
            let extracts = extractor
                .extract_skills_in_document(nodes, &document_id)
                .await?;

            println!("Skills found in document {}: {}", document_id, extracts.len());
            for extract in &extracts {
                println!("   {} (matched \"{}\", {}x)", extract.name, extract.match_str, extract.n_match);
            }
        }
        Commands::Search { query, offset, limit } => {
            let ids = client.search_free_text(&query, &index, offset, limit).await?;
            println!("Matching documents: {}", ids.len());
            for id in &ids {
                println!("   {}", id);
            }
        }
        Commands::Exists { term, document_id } => {
            let found = client.exists_term(&term, &document_id, &index).await?;
            println!(
                "\"{}\" {} in document {}",
                term,
                if found { "occurs" } else { "does not occur" },
                document_id
            );
        }
    }

    Ok(())
}
