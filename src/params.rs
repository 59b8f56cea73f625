//! Parameter normalization
//!
//! Tool invocations, event payloads, and dev-server query strings all hand
//! us loosely-typed string parameters. This module coerces them into one
//! canonical [`SearchQuery`].
//!
//! Domain lists are accepted in both wire encodings seen from callers: a
//! JSON-encoded array string is tried first, anything else is treated as a
//! comma-separated list.

use serde_json::{Map, Value};

use crate::error::SearchError;
use crate::types::{Depth, OutputType, SearchQuery};

/// Build a [`SearchQuery`] from string-keyed invocation args.
///
/// Values are usually strings; JSON booleans and arrays are accepted where
/// a caller sends them natively. A missing or blank `query` is a terminal
/// validation error, never defaulted here.
pub fn from_args(args: &Map<String, Value>) -> Result<SearchQuery, SearchError> {
    let query = string_arg(args, "query")
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or(SearchError::MissingQuery)?;

    let depth = match string_arg(args, "depth") {
        Some(raw) => parse_depth(&raw)?,
        None => Depth::default(),
    };

    let output_type = match string_arg(args, "outputType") {
        Some(raw) => parse_output_type(&raw)?,
        None => OutputType::default(),
    };

    Ok(SearchQuery {
        query,
        depth,
        output_type,
        structured_output_schema: string_arg(args, "structuredOutputSchema"),
        include_images: bool_arg(args, "includeImages"),
        from_date: string_arg(args, "fromDate"),
        to_date: string_arg(args, "toDate"),
        include_domains: domain_arg(args, "includeDomains"),
        exclude_domains: domain_arg(args, "excludeDomains"),
    })
}

/// Build a [`SearchQuery`] from string key/value pairs (URL query params).
pub fn from_pairs<I>(pairs: I) -> Result<SearchQuery, SearchError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let args: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    from_args(&args)
}

pub fn parse_depth(raw: &str) -> Result<Depth, SearchError> {
    match raw {
        "standard" => Ok(Depth::Standard),
        "deep" => Ok(Depth::Deep),
        other => Err(SearchError::InvalidParam {
            param: "depth",
            value: other.to_string(),
        }),
    }
}

pub fn parse_output_type(raw: &str) -> Result<OutputType, SearchError> {
    match raw {
        "searchResults" => Ok(OutputType::SearchResults),
        "sourcedAnswer" => Ok(OutputType::SourcedAnswer),
        "structured" => Ok(OutputType::Structured),
        other => Err(SearchError::InvalidParam {
            param: "outputType",
            value: other.to_string(),
        }),
    }
}

/// A non-empty string value for `key`, if present.
fn string_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
        .map(str::to_string)
}

/// True iff the value is the string "true" or "1", or a native JSON true.
fn bool_arg(args: &Map<String, Value>, key: &str) -> bool {
    match args.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(raw)) => matches!(raw.as_str(), "true" | "1"),
        _ => false,
    }
}

fn domain_arg(args: &Map<String, Value>, key: &str) -> Vec<String> {
    match args.get(key) {
        Some(Value::Array(items)) => collect_domains(items),
        Some(Value::String(raw)) => parse_domain_string(raw),
        _ => Vec::new(),
    }
}

/// Decode a domain list: JSON-encoded array first, comma-separated fallback.
pub fn parse_domain_string(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        return collect_domains(&items);
    }
    raw.split(',')
        .map(|domain| domain.trim().to_string())
        .filter(|domain| !domain.is_empty())
        .collect()
}

fn collect_domains(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(|domain| domain.trim().to_string())
        .filter(|domain| !domain.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn test_missing_query_is_rejected() {
        let err = from_args(&args(json!({}))).unwrap_err();
        assert!(matches!(err, SearchError::MissingQuery));
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let err = from_args(&args(json!({"query": "   "}))).unwrap_err();
        assert!(matches!(err, SearchError::MissingQuery));
    }

    #[test]
    fn test_defaults_applied() {
        let query = from_args(&args(json!({"query": "rust"}))).unwrap();
        assert_eq!(query.query, "rust");
        assert_eq!(query.depth, Depth::Standard);
        assert_eq!(query.output_type, OutputType::SourcedAnswer);
        assert!(!query.include_images);
        assert!(query.structured_output_schema.is_none());
    }

    #[test]
    fn test_query_is_trimmed() {
        let query = from_args(&args(json!({"query": "  rust  "}))).unwrap();
        assert_eq!(query.query, "rust");
    }

    #[test]
    fn test_full_parameter_set() {
        let query = from_args(&args(json!({
            "query": "rust async",
            "depth": "deep",
            "outputType": "searchResults",
            "includeImages": "true",
            "fromDate": "2024-01-01",
            "toDate": "2024-12-31",
            "includeDomains": "docs.rs, rust-lang.org",
            "excludeDomains": "reddit.com"
        })))
        .unwrap();
        assert_eq!(query.depth, Depth::Deep);
        assert_eq!(query.output_type, OutputType::SearchResults);
        assert!(query.include_images);
        assert_eq!(query.from_date.as_deref(), Some("2024-01-01"));
        assert_eq!(query.include_domains, vec!["docs.rs", "rust-lang.org"]);
        assert_eq!(query.exclude_domains, vec!["reddit.com"]);
    }

    #[test]
    fn test_include_images_coercions() {
        for (raw, expected) in [
            (json!("true"), true),
            (json!("1"), true),
            (json!(true), true),
            (json!("false"), false),
            (json!("yes"), false),
            (json!("0"), false),
        ] {
            let query =
                from_args(&args(json!({"query": "q", "includeImages": raw}))).unwrap();
            assert_eq!(query.include_images, expected);
        }
    }

    #[test]
    fn test_domains_as_json_encoded_array() {
        let query = from_args(&args(json!({
            "query": "q",
            "includeDomains": "[\"a.com\", \"b.com\"]"
        })))
        .unwrap();
        assert_eq!(query.include_domains, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_domains_as_native_array() {
        let query = from_args(&args(json!({
            "query": "q",
            "includeDomains": ["a.com", "b.com"]
        })))
        .unwrap();
        assert_eq!(query.include_domains, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_domains_comma_split_drops_empty_elements() {
        assert_eq!(
            parse_domain_string("a.com, , b.com,"),
            vec!["a.com", "b.com"]
        );
    }

    #[test]
    fn test_single_domain_is_not_mistaken_for_json() {
        assert_eq!(parse_domain_string("example.com"), vec!["example.com"]);
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        let err = from_args(&args(json!({"query": "q", "depth": "extreme"}))).unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidParam { param: "depth", .. }
        ));
    }

    #[test]
    fn test_invalid_output_type_is_rejected() {
        let err = from_args(&args(json!({"query": "q", "outputType": "xml"}))).unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidParam { param: "outputType", .. }
        ));
    }

    #[test]
    fn test_from_pairs_uses_same_coercions() {
        let query = from_pairs(vec![
            ("query".to_string(), "rust".to_string()),
            ("includeImages".to_string(), "1".to_string()),
            ("excludeDomains".to_string(), "a.com,b.com".to_string()),
        ])
        .unwrap();
        assert!(query.include_images);
        assert_eq!(query.exclude_domains, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_empty_string_optional_falls_back_to_default() {
        let query = from_args(&args(json!({"query": "q", "depth": ""}))).unwrap();
        assert_eq!(query.depth, Depth::Standard);
    }
}
