//! Event-style handler
//!
//! Serverless-function envelope around the search tool: the request body
//! carries raw string args plus a secrets block, and the response mimics an
//! HTTP gateway (`statusCode` + JSON-encoded body). The envelope's
//! `LINKUP_API_KEY` secret overrides any ambient configuration for this
//! call only; nothing is written to process state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::LinkupClient;
use crate::config::Config;
use crate::error::SearchError;
use crate::{format, params};

/// Incoming event envelope.
#[derive(Debug, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub args: Map<String, Value>,
    #[serde(default)]
    pub secrets: Secrets,
}

#[derive(Debug, Default, Deserialize)]
pub struct Secrets {
    #[serde(rename = "LINKUP_API_KEY")]
    pub linkup_api_key: Option<String>,
}

/// Gateway-style response.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct EventResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded text, per the gateway contract.
    pub body: String,
}

impl EventResponse {
    fn new(status_code: u16, text: &str) -> Self {
        let body = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        Self { status_code, body }
    }
}

/// Handle one event. Never fails; every outcome is a status-coded response.
pub async fn handle(event: Event, config: &Config) -> EventResponse {
    let mut config = config.clone();
    if let Some(key) = event.secrets.linkup_api_key.filter(|key| !key.is_empty()) {
        config.linkup.api_key = Some(key);
    }

    match run_search(&event.args, &config).await {
        Ok(text) => EventResponse::new(200, &text),
        Err(SearchError::MissingQuery) => {
            EventResponse::new(400, &SearchError::MissingQuery.to_string())
        }
        Err(err) => {
            tracing::error!("Search failed: {}", err);
            EventResponse::new(500, &err.to_string())
        }
    }
}

async fn run_search(args: &Map<String, Value>, config: &Config) -> Result<String, SearchError> {
    let query = params::from_args(args)?;
    let client = LinkupClient::new(config)?;
    let outcome = client.search(&query).await?;
    Ok(format::render(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> Event {
        serde_json::from_value(value).expect("event literal")
    }

    #[tokio::test]
    async fn test_missing_query_is_a_400() {
        let response = handle(event(json!({"args": {}})), &Config::default()).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "\"Missing required parameter: query\"");
    }

    #[tokio::test]
    async fn test_missing_query_wins_over_missing_credential() {
        // No secret and no configured key: validation still reports first.
        let response = handle(event(json!({})), &Config::default()).await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_missing_credential_is_a_500() {
        let response = handle(
            event(json!({"args": {"query": "rust"}})),
            &Config::default(),
        )
        .await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "\"LINKUP_API_KEY is not set\"");
    }

    #[tokio::test]
    async fn test_blank_secret_does_not_count_as_a_credential() {
        let response = handle(
            event(json!({
                "args": {"query": "rust"},
                "secrets": {"LINKUP_API_KEY": ""}
            })),
            &Config::default(),
        )
        .await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "\"LINKUP_API_KEY is not set\"");
    }

    #[test]
    fn test_envelope_parses_string_args() {
        let event = event(json!({
            "args": {"query": "rust", "includeDomains": "[\"docs.rs\"]"},
            "secrets": {"LINKUP_API_KEY": "lk-test"}
        }));
        assert_eq!(event.secrets.linkup_api_key.as_deref(), Some("lk-test"));
        let query = params::from_args(&event.args).unwrap();
        assert_eq!(query.include_domains, vec!["docs.rs"]);
    }

    #[test]
    fn test_response_serializes_with_gateway_field_names() {
        let response = EventResponse::new(200, "ok");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"statusCode": 200, "body": "\"ok\""}));
    }
}
