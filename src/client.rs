//! Linkup search client
//!
//! Builds the outbound request body, performs the single POST to the
//! Linkup API, and maps the JSON response into a [`SearchOutcome`] matching
//! the requested output type.
//! See: https://docs.linkup.so/pages/api-reference/endpoint/post-search

use reqwest::Client;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::SearchError;
use crate::types::{Image, OutputType, SearchOutcome, SearchQuery, Source};

/// Sentinel used when the upstream response has no `results` key at all.
/// An empty results list is passed through as-is.
const NO_RESULTS: &str = "No results found";

/// Sentinel used when the upstream response has no usable `answer`.
const NO_ANSWER: &str = "No answer found";

/// Ordered fallback keys for a source's display name.
const NAME_KEYS: [&str; 2] = ["name", "title"];

/// Ordered fallback keys for a source's snippet text.
const SNIPPET_KEYS: [&str; 3] = ["snippet", "content", "description"];

/// Client for the Linkup search API.
#[derive(Debug)]
pub struct LinkupClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl LinkupClient {
    /// Create a client from configuration.
    ///
    /// Fails with [`SearchError::MissingApiKey`] when no credential is
    /// configured, before any network activity.
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let api_key = config
            .linkup
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(SearchError::MissingApiKey)?;

        let http = Client::builder()
            .user_agent(concat!("linkup-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            endpoint: config.linkup.endpoint.clone(),
        })
    }

    /// Perform one search and map the response.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        let body = build_body(query);

        tracing::debug!(
            "Searching Linkup: {} (depth: {}, output: {})",
            query.query,
            query.depth.as_str(),
            query.output_type.as_str()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Upstream { status, body });
        }

        let data: Value = response.json().await?;
        Ok(map_response(data, query.output_type))
    }
}

/// Build the outbound request body.
///
/// `q`, `depth`, and `outputType` are always present; every optional field
/// is included only when its input was present and non-empty, never as a
/// null or empty placeholder.
pub(crate) fn build_body(query: &SearchQuery) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("q".to_string(), Value::String(query.query.clone()));
    body.insert(
        "depth".to_string(),
        Value::String(query.depth.as_str().to_string()),
    );
    body.insert(
        "outputType".to_string(),
        Value::String(query.output_type.as_str().to_string()),
    );

    if let Some(schema) = &query.structured_output_schema {
        body.insert(
            "structuredOutputSchema".to_string(),
            Value::String(schema.clone()),
        );
    }
    if query.include_images {
        // The API expects a stringified boolean here
        body.insert(
            "includeImages".to_string(),
            Value::String("true".to_string()),
        );
    }
    if let Some(from_date) = &query.from_date {
        body.insert("fromDate".to_string(), Value::String(from_date.clone()));
    }
    if let Some(to_date) = &query.to_date {
        body.insert("toDate".to_string(), Value::String(to_date.clone()));
    }
    if !query.include_domains.is_empty() {
        body.insert(
            "includeDomains".to_string(),
            Value::Array(
                query
                    .include_domains
                    .iter()
                    .map(|d| Value::String(d.clone()))
                    .collect(),
            ),
        );
    }
    if !query.exclude_domains.is_empty() {
        body.insert(
            "excludeDomains".to_string(),
            Value::Array(
                query
                    .exclude_domains
                    .iter()
                    .map(|d| Value::String(d.clone()))
                    .collect(),
            ),
        );
    }

    body
}

/// Map a decoded response body onto the outcome variant for `output_type`.
pub(crate) fn map_response(data: Value, output_type: OutputType) -> SearchOutcome {
    match output_type {
        OutputType::Structured => SearchOutcome::Structured(data),
        OutputType::SearchResults => {
            let raw = data.get("results");
            let sources = raw
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(source_from_entry).collect())
                .unwrap_or_default();
            let images = map_images(&data);
            let results = match raw {
                Some(value) if !value.is_null() => value.clone(),
                _ => Value::String(NO_RESULTS.to_string()),
            };
            SearchOutcome::SearchResults {
                results,
                sources,
                images,
            }
        }
        OutputType::SourcedAnswer => {
            let answer = data
                .get("answer")
                .and_then(Value::as_str)
                .filter(|answer| !answer.is_empty())
                .unwrap_or(NO_ANSWER)
                .to_string();
            let sources = data
                .get("sources")
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(source_from_entry).collect())
                .unwrap_or_default();
            let images = map_images(&data);
            SearchOutcome::SourcedAnswer {
                answer,
                sources,
                images,
            }
        }
    }
}

/// Map one raw result/source entry via the ordered fallback chains.
fn source_from_entry(entry: &Value) -> Source {
    Source {
        name: first_string(entry, &NAME_KEYS).unwrap_or_else(|| "Unknown".to_string()),
        url: entry
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        snippet: first_string(entry, &SNIPPET_KEYS).unwrap_or_default(),
    }
}

fn map_images(data: &Value) -> Option<Vec<Image>> {
    data.get("images").and_then(Value::as_array).map(|entries| {
        entries
            .iter()
            .map(|entry| Image {
                url: entry
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                title: first_string(entry, &["title"]),
                description: first_string(entry, &["description"]),
            })
            .collect()
    })
}

/// First non-empty string among `keys`, in order.
fn first_string(entry: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| entry.get(*key))
        .filter_map(Value::as_str)
        .find(|raw| !raw.is_empty())
        .map(str::to_string)
}
