//! Response formatting
//!
//! Turns a mapped [`SearchOutcome`] into the text an agent receives.
//! [`render_result`] is the single place where upstream failures become
//! returned text instead of propagating further.

use crate::error::SearchError;
use crate::types::{Image, SearchOutcome, Source};

/// Fallback text when an error carries no message at all.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred while searching";

/// Render an outcome as agent-facing text.
pub fn render(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Structured(value) => serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| value.to_string()),
        SearchOutcome::SearchResults {
            sources, images, ..
        } => {
            let mut out = String::from("Search Results:\n\n");
            push_sources(&mut out, sources);
            push_images(&mut out, images.as_deref());
            out
        }
        SearchOutcome::SourcedAnswer {
            answer,
            sources,
            images,
        } => {
            let mut out = format!("Answer:\n\n{answer}\n\n");
            if !sources.is_empty() {
                out.push_str("Sources:\n");
                push_sources(&mut out, sources);
            }
            push_images(&mut out, images.as_deref());
            out
        }
    }
}

/// Terminal error boundary for the agent-facing path.
///
/// Errors become a returned text string, never a thrown tool error.
pub fn render_result(result: Result<SearchOutcome, SearchError>) -> String {
    match result {
        Ok(outcome) => render(&outcome),
        Err(err) => {
            let message = err.to_string();
            if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                format!("Error performing search: {message}")
            }
        }
    }
}

fn push_sources(out: &mut String, sources: &[Source]) {
    for (index, source) in sources.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, source.name));
        out.push_str(&format!("   URL: {}\n", source.url));
        if !source.snippet.is_empty() {
            out.push_str(&format!("   {}\n", source.snippet));
        }
        out.push('\n');
    }
}

fn push_images(out: &mut String, images: Option<&[Image]>) {
    let Some(images) = images else {
        return;
    };
    if images.is_empty() {
        return;
    }
    out.push_str("\nImages:\n");
    for (index, image) in images.iter().enumerate() {
        let title = image.title.as_deref().unwrap_or("Image");
        out.push_str(&format!("{}. {}\n", index + 1, title));
        out.push_str(&format!("   URL: {}\n", image.url));
        if let Some(description) = image.description.as_deref() {
            if !description.is_empty() {
                out.push_str(&format!("   {}\n", description));
            }
        }
        out.push('\n');
    }
}
