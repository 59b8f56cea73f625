//! linkup-mcp binary
//!
//! Subcommands cover the three front doors: `serve` (MCP over stdio),
//! `dev` (local HTTP server), and `invoke` (event-style handler), plus a
//! one-shot `search` smoke test.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use linkup_mcp::client::LinkupClient;
use linkup_mcp::config::Config;
use linkup_mcp::{dev, format, handler, params, server};

const SAMPLE_QUERY: &str = "What is the capital of France?";

#[derive(Parser)]
#[command(name = "linkup-mcp")]
#[command(about = "Linkup web search as an MCP tool, with a local dev server and CLI harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP server on stdio
    Serve,
    /// Run the local development HTTP server
    Dev {
        /// Port to listen on (default: from config, else 3000)
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Run a single search and print the formatted result
    Search {
        /// The search query
        #[arg(default_value = SAMPLE_QUERY)]
        query: String,
        /// Search depth: standard or deep
        #[arg(long, default_value = "standard")]
        depth: String,
        /// Response shape: searchResults, sourcedAnswer or structured
        #[arg(long = "output-type", default_value = "sourcedAnswer")]
        output_type: String,
        /// Include image results
        #[arg(long)]
        include_images: bool,
        /// Only include results published after this date
        #[arg(long)]
        from_date: Option<String>,
        /// Only include results published before this date
        #[arg(long)]
        to_date: Option<String>,
        /// Comma-separated domains to restrict the search to
        #[arg(long)]
        include_domains: Option<String>,
        /// Comma-separated domains to exclude
        #[arg(long)]
        exclude_domains: Option<String>,
        /// JSON schema for structured output
        #[arg(long)]
        schema: Option<String>,
    },
    /// Invoke the event handler with a JSON envelope from a file ("-" for stdin)
    Invoke {
        /// Path to the event JSON
        #[arg(default_value = "-")]
        event: String,
    },
}

fn init_tracing() -> Result<()> {
    // stderr only; stdout is reserved for the MCP protocol
    let filter = EnvFilter::from_default_env().add_directive("linkup_mcp=info".parse()?);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Serve => server::serve(config).await,
        Commands::Dev { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            dev::serve(config).await
        }
        Commands::Search {
            query,
            depth,
            output_type,
            include_images,
            from_date,
            to_date,
            include_domains,
            exclude_domains,
            schema,
        } => {
            let mut args = Map::new();
            args.insert("query".to_string(), Value::String(query));
            args.insert("depth".to_string(), Value::String(depth));
            args.insert("outputType".to_string(), Value::String(output_type));
            if include_images {
                args.insert("includeImages".to_string(), Value::String("true".to_string()));
            }
            if let Some(from_date) = from_date {
                args.insert("fromDate".to_string(), Value::String(from_date));
            }
            if let Some(to_date) = to_date {
                args.insert("toDate".to_string(), Value::String(to_date));
            }
            if let Some(domains) = include_domains {
                args.insert("includeDomains".to_string(), Value::String(domains));
            }
            if let Some(domains) = exclude_domains {
                args.insert("excludeDomains".to_string(), Value::String(domains));
            }
            if let Some(schema) = schema {
                args.insert("structuredOutputSchema".to_string(), Value::String(schema));
            }

            let request = params::from_args(&args)?;
            let client = LinkupClient::new(&config)?;
            let outcome = client.search(&request).await?;
            println!("{}", format::render(&outcome));
            Ok(())
        }
        Commands::Invoke { event } => {
            let raw = if event == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                std::fs::read_to_string(&event)
                    .with_context(|| format!("Failed to read event file: {event}"))?
            };
            let event: handler::Event =
                serde_json::from_str(&raw).context("Event payload is not valid JSON")?;
            let response = handler::handle(event, &config).await;
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
    }
}
