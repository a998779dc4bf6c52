//! Countries MCP Server
//!
//! A Model Context Protocol (MCP) server exposing country data from the
//! REST Countries API as tools, prompts, and resources.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use countries_mcp_server_rust::config::Config;
use countries_mcp_server_rust::countries::client::CountriesClient;
use countries_mcp_server_rust::error::Result;
use countries_mcp_server_rust::mcp::server::McpServer;
use countries_mcp_server_rust::variants;

/// Countries MCP Server
#[derive(Parser)]
#[command(name = "countries-mcp-server")]
#[command(
    author,
    version,
    about = "Countries MCP Server - country data over the Model Context Protocol"
)]
struct Cli {
    #[command(subcommand)]
    variant: Option<Variant>,
}

/// Demo variant to serve
#[derive(Subcommand)]
enum Variant {
    /// Single country lookup tool
    Basic,
    /// Lookup tools plus prompts
    Prompts,
    /// Tools, prompts, and resources
    Full,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::default();
    let client = Arc::new(CountriesClient::new(&config));

    let registry = match cli.variant {
        Some(Variant::Basic) => variants::basic(client)?,
        Some(Variant::Prompts) => variants::prompts(client)?,
        Some(Variant::Full) | None => variants::full(client)?,
    };

    let mut server = McpServer::new(Arc::new(registry));
    server.run_stdio().await?;

    Ok(())
}
