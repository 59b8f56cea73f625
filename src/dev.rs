//! Local development HTTP server
//!
//! `GET /` runs one search from query-string parameters and returns the
//! formatted text. Meant for poking at the tool from a browser or curl
//! while iterating; unlike the agent-facing path, a missing `query` is
//! filled with a sample question, and failures come back as plain 500s.

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::client::LinkupClient;
use crate::config::Config;
use crate::error::SearchError;
use crate::{format, params};

const SAMPLE_QUERY: &str = "What is the capital of France?";

/// Start the development server. Fails at startup when no API key is
/// configured rather than serving guaranteed errors.
pub async fn serve(config: Config) -> Result<()> {
    let port = config.server.port;
    let client = Arc::new(
        LinkupClient::new(&config)
            .context("LINKUP_API_KEY not set. Please set your Linkup API key.")?,
    );

    let app = Router::new()
        .route("/", get(search_handler))
        .with_state(client);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Local development server running on http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn search_handler(
    State(client): State<Arc<LinkupClient>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<String, (StatusCode, String)> {
    let raw = with_default_query(raw);
    run_search(&client, raw)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {err}")))
}

async fn run_search(
    client: &LinkupClient,
    raw: HashMap<String, String>,
) -> Result<String, SearchError> {
    let query = params::from_pairs(raw)?;
    let outcome = client.search(&query).await?;
    Ok(format::render(&outcome))
}

/// Substitute the sample question when `query` is missing or blank.
fn with_default_query(mut raw: HashMap<String, String>) -> HashMap<String, String> {
    let blank = raw
        .get("query")
        .map(|query| query.trim().is_empty())
        .unwrap_or(true);
    if blank {
        raw.insert("query".to_string(), SAMPLE_QUERY.to_string());
    }
    raw
}
