//! Common types for Linkup search requests and results
//!
//! Requests are normalized into [`SearchQuery`] before any network call,
//! and responses are mapped into the tagged [`SearchOutcome`] union so the
//! formatter can match on the shape instead of re-checking the requested
//! output type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search thoroughness hint, forwarded opaquely to the Linkup API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    #[default]
    Standard,
    Deep,
}

impl Depth {
    /// The wire name used in the request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Standard => "standard",
            Depth::Deep => "deep",
        }
    }
}

/// Which of the three result shapes the API should produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputType {
    SearchResults,
    #[default]
    SourcedAnswer,
    Structured,
}

impl OutputType {
    /// The wire name used in the request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::SearchResults => "searchResults",
            OutputType::SourcedAnswer => "sourcedAnswer",
            OutputType::Structured => "structured",
        }
    }
}

/// A fully normalized search request.
///
/// `query` is non-empty by construction; the normalizer rejects missing or
/// blank queries before a `SearchQuery` ever exists. Empty domain lists
/// mean "not requested" and are omitted from the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub depth: Depth,
    pub output_type: OutputType,
    pub structured_output_schema: Option<String>,
    pub include_images: bool,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub include_domains: Vec<String>,
    pub exclude_domains: Vec<String>,
}

impl SearchQuery {
    /// A query with all optional fields at their defaults.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            depth: Depth::default(),
            output_type: OutputType::default(),
            structured_output_schema: None,
            include_images: false,
            from_date: None,
            to_date: None,
            include_domains: Vec::new(),
            exclude_domains: Vec::new(),
        }
    }
}

/// One cited result backing an answer or result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Display name; falls back through `name` then `title`, else "Unknown".
    pub name: String,
    /// The URL of the result.
    pub url: String,
    /// Short excerpt; falls back through `snippet`, `content`, `description`.
    pub snippet: String,
}

/// An image attached to a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A mapped Linkup response, tagged by the shape that was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// List-oriented results.
    ///
    /// `results` carries the raw upstream `results` value: normally a list,
    /// but the literal string "No results found" when the key was absent
    /// from the response entirely.
    SearchResults {
        results: Value,
        sources: Vec<Source>,
        images: Option<Vec<Image>>,
    },
    /// Narrative answer with citations.
    SourcedAnswer {
        answer: String,
        sources: Vec<Source>,
        images: Option<Vec<Image>>,
    },
    /// Opaque pass-through of the decoded response body.
    Structured(Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = SearchQuery::new("rust");
        assert_eq!(query.depth, Depth::Standard);
        assert_eq!(query.output_type, OutputType::SourcedAnswer);
        assert!(!query.include_images);
        assert!(query.include_domains.is_empty());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Depth::Deep.as_str(), "deep");
        assert_eq!(OutputType::SearchResults.as_str(), "searchResults");
        assert_eq!(OutputType::SourcedAnswer.as_str(), "sourcedAnswer");
        assert_eq!(OutputType::Structured.as_str(), "structured");
    }
}
