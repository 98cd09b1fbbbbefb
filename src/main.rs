// file: src/main.rs
// description: commandline entry point driving the document gateway
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use document_gateway::utils::logging::{format_error, format_status, format_success};
use document_gateway::{Config, Document, DocumentGateway, GatewayMetrics, Query};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "document-gateway")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Store, load and search documents on a remote backend", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Overrides gateway.base_url from the configuration
    #[arg(long, value_name = "URL", env = "DOCUMENT_GATEWAY_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print the metrics registry in text exposition format after the command
    #[arg(long, action = ArgAction::SetTrue)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a JSON document
    Store {
        /// JSON file holding the document, `-` for stdin
        #[arg(short, long, default_value = "-")]
        file: PathBuf,
    },

    /// Load a document by id
    Load { id: String },

    /// Search documents with a JSON query
    Search {
        /// Inline JSON query
        #[arg(short, long, conflicts_with = "file")]
        query: Option<String>,

        /// JSON file holding the query, `-` for stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    document_gateway::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    let config = match cli.base_url {
        Some(base_url) => config.with_base_url(base_url),
        None => config,
    };
    config.validate().context("Invalid configuration")?;

    let metrics = GatewayMetrics::global().context("Failed to register metrics")?;
    let gateway = DocumentGateway::new(&config.gateway, metrics.clone())
        .context("Failed to create document gateway")?;

    let outcome = match cli.command {
        Commands::Store { file } => cmd_store(&gateway, &file).await,
        Commands::Load { id } => cmd_load(&gateway, &id).await,
        Commands::Search { query, file } => {
            cmd_search(&gateway, query.as_deref(), file.as_deref()).await
        }
    };

    if cli.metrics {
        let text = document_gateway::render(prometheus::default_registry())
            .context("Failed to render metrics")?;
        print!("{}", text);
    }

    if let Err(e) = &outcome {
        eprintln!("{}", format_error(&format!("{:#}", e)));
    }
    outcome
}

async fn cmd_store(gateway: &DocumentGateway, file: &Path) -> Result<()> {
    let document = read_object(file)?;
    info!("Storing document with {} fields", document.len());

    gateway
        .store_document(&document)
        .await
        .context("Failed to store document")?;

    eprintln!("{}", format_success("Document stored"));
    Ok(())
}

async fn cmd_load(gateway: &DocumentGateway, id: &str) -> Result<()> {
    let loaded = gateway
        .load_document(id)
        .await
        .with_context(|| format!("Failed to load document {}", id))?;

    eprintln!("{}", format_status(&format!("load {}", id), loaded.status));

    println!("{}", serde_json::to_string_pretty(&loaded.document)?);
    Ok(())
}

async fn cmd_search(
    gateway: &DocumentGateway,
    query: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    let query: Query = match (query, file) {
        (Some(inline), _) => parse_object(inline).context("Invalid --query JSON")?,
        (None, Some(file)) => read_object(file)?,
        (None, None) => bail!("either --query or --file is required"),
    };

    let results = gateway
        .search_documents(&query)
        .await
        .context("Search failed")?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn read_object(file: &Path) -> Result<Document> {
    let mut text = String::new();
    if file == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
    }

    parse_object(&text).with_context(|| format!("Invalid JSON object in {}", file.display()))
}

fn parse_object(text: &str) -> Result<Document> {
    let document: Document = serde_json::from_str(text)?;
    Ok(document)
}
