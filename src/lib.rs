//! Linkup Search MCP Library
//!
//! Exposes the Linkup web-search API as an agent-callable tool, with a
//! local development HTTP server and an event-style handler for
//! serverless-like invocation.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use linkup_mcp::{config::Config, LinkupMcpServer};
//!
//! let server = LinkupMcpServer::new(Config::load()?);
//! // Serve via stdio or call the search pipeline directly
//! ```
//!
//! # Configuration
//! Set `LINKUP_API_KEY` env var or configure in `~/.linkup-mcp/config.toml`

pub mod client;
pub mod config;
pub mod dev;
pub mod error;
pub mod format;
pub mod handler;
pub mod params;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::LinkupMcpServer;

// Re-export core types for direct API usage
pub use client::LinkupClient;
pub use error::SearchError;
pub use types::{Depth, Image, OutputType, SearchOutcome, SearchQuery, Source};
