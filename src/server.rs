//! MCP server implementation
//!
//! Exposes Linkup search as a `search` tool over the MCP protocol.
//! Tool parameters mirror the loosely-typed string args that agent
//! frameworks send; the normalizer applies the coercions. All search
//! failures surface through the formatter as returned text, so the agent
//! always receives a result, never a protocol error.

use anyhow::Result;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::client::LinkupClient;
use crate::config::Config;
use crate::error::SearchError;
use crate::types::SearchOutcome;
use crate::{format, params};

/// The Linkup search MCP server
#[derive(Clone)]
pub struct LinkupMcpServer {
    /// None when no credential is configured; searches then report the
    /// configuration error as tool text without touching the network.
    client: Option<Arc<LinkupClient>>,
    config: Config,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchToolParams {
    #[schemars(description = "The search query")]
    pub query: String,

    #[schemars(description = "Search depth: \"standard\" (default) or \"deep\"")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,

    #[schemars(
        description = "Response shape: \"searchResults\", \"sourcedAnswer\" (default) or \"structured\""
    )]
    #[serde(default, rename = "outputType", skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,

    #[schemars(
        description = "JSON schema constraining the structured response (only with outputType \"structured\")"
    )]
    #[serde(
        default,
        rename = "structuredOutputSchema",
        skip_serializing_if = "Option::is_none"
    )]
    pub structured_output_schema: Option<String>,

    #[schemars(description = "Set to \"true\" or \"1\" to include image results")]
    #[serde(default, rename = "includeImages", skip_serializing_if = "Option::is_none")]
    pub include_images: Option<String>,

    #[schemars(description = "Only include results published after this date (e.g. 2024-01-01)")]
    #[serde(default, rename = "fromDate", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,

    #[schemars(description = "Only include results published before this date")]
    #[serde(default, rename = "toDate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,

    #[schemars(
        description = "Domains to restrict the search to, comma-separated or a JSON array"
    )]
    #[serde(default, rename = "includeDomains", skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<String>,

    #[schemars(description = "Domains to exclude, comma-separated or a JSON array")]
    #[serde(default, rename = "excludeDomains", skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<String>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl LinkupMcpServer {
    pub fn new(config: Config) -> Self {
        let client = match LinkupClient::new(&config) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!("Search client unavailable: {}", err);
                None
            }
        };

        Self {
            client,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the web with the Linkup API. Returns a sourced answer by default; set outputType to \"searchResults\" for a result list or \"structured\" for raw JSON."
    )]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching for: {}", params.query);

        let text = format::render_result(self.perform(params).await);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get the current search tool configuration and status.")]
    async fn get_config(&self) -> Result<CallToolResult, McpError> {
        #[derive(Serialize)]
        struct ConfigStatus {
            endpoint: String,
            api_key_configured: bool,
            version: &'static str,
        }

        let status = ConfigStatus {
            endpoint: self.config.linkup.endpoint.clone(),
            api_key_configured: self.client.is_some(),
            version: env!("CARGO_PKG_VERSION"),
        };

        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

impl LinkupMcpServer {
    /// Normalize, validate, then search. Validation runs before the
    /// credential check so a missing query is reported even when no key is
    /// configured.
    async fn perform(&self, params: SearchToolParams) -> Result<SearchOutcome, SearchError> {
        let args = tool_args(&params)?;
        let query = params::from_args(&args)?;
        let client = self.client.as_ref().ok_or(SearchError::MissingApiKey)?;
        client.search(&query).await
    }
}

/// Serialize the typed tool parameters back into the string-keyed args map
/// the normalizer consumes. Absent optionals vanish from the map.
fn tool_args(params: &SearchToolParams) -> Result<Map<String, Value>, SearchError> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SearchError::Client("tool parameters were not an object".to_string())),
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for LinkupMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Linkup Search MCP Server - searches the web through the \
                 Linkup API. The search tool returns a cited answer, a list \
                 of search results, or schema-constrained JSON depending on \
                 the requested output type. Requires LINKUP_API_KEY."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Run the MCP server over stdio until the client disconnects.
pub async fn serve(config: Config) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    tracing::info!("Starting Linkup search MCP server");
    tracing::info!("Endpoint: {}", config.linkup.endpoint);

    let server = LinkupMcpServer::new(config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_args_drops_absent_optionals() {
        let params = SearchToolParams {
            query: "rust".to_string(),
            depth: None,
            output_type: None,
            structured_output_schema: None,
            include_images: None,
            from_date: None,
            to_date: None,
            include_domains: None,
            exclude_domains: None,
        };
        let args = tool_args(&params).unwrap();
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("query"), Some(&Value::String("rust".to_string())));
    }

    #[test]
    fn test_tool_args_uses_wire_names() {
        let params = SearchToolParams {
            query: "rust".to_string(),
            depth: Some("deep".to_string()),
            output_type: Some("searchResults".to_string()),
            structured_output_schema: None,
            include_images: Some("true".to_string()),
            from_date: None,
            to_date: None,
            include_domains: Some("docs.rs,rust-lang.org".to_string()),
            exclude_domains: None,
        };
        let args = tool_args(&params).unwrap();
        assert!(args.contains_key("outputType"));
        assert!(args.contains_key("includeImages"));
        assert!(args.contains_key("includeDomains"));

        let query = params::from_args(&args).unwrap();
        assert!(query.include_images);
        assert_eq!(query.include_domains, vec!["docs.rs", "rust-lang.org"]);
    }

    #[tokio::test]
    async fn test_missing_credential_surfaces_as_tool_text() {
        let server = LinkupMcpServer::new(Config::default());
        let params = SearchToolParams {
            query: "rust".to_string(),
            depth: None,
            output_type: None,
            structured_output_schema: None,
            include_images: None,
            from_date: None,
            to_date: None,
            include_domains: None,
            exclude_domains: None,
        };
        let text = format::render_result(server.perform(params).await);
        assert_eq!(text, "Error performing search: LINKUP_API_KEY is not set");
    }
}
