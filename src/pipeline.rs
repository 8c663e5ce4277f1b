//! Entry points for callers that hold model text or a document
//!
//! Every call is independent: a fresh scanner, parser and document are made
//! per invocation and nothing is kept between calls, so separate threads can
//! use these functions freely.
//!
//! # Usage
//!
//! ```ignore
//! use cellml_text::pipeline;
//!
//! let (text, issues) = pipeline::reformat("def model m as enddef;");
//! assert_eq!(text.as_deref(), Some("def model m as\nenddef;\n"));
//! assert!(issues.is_empty());
//! ```

use rayon::prelude::*;
use tracing::debug;

use crate::document::Document;
use crate::parser::{self, Issue};
use crate::unparse;

/// Parse model text
///
/// The document is returned even when there are errors, unless the model
/// header itself could not be read. Check the issues before trusting it.
pub fn text_to_document(text: &str) -> (Option<Document>, Vec<Issue>) {
    let parse = parser::parse(text);
    (parse.document, parse.issues)
}

/// Unparse a document to canonical model text
pub fn document_to_text(document: &Document) -> String {
    let text = unparse::to_text(document);
    debug!(
        nodes = document.len(),
        bytes = text.len(),
        "unparsed document"
    );
    text
}

/// Normalise model text by parsing it and writing it back out
///
/// Text is only produced when the input has no errors, since a document
/// built around errors would silently drop whatever was skipped.
pub fn reformat(text: &str) -> (Option<String>, Vec<Issue>) {
    let (document, issues) = text_to_document(text);
    if issues.iter().any(Issue::is_error) {
        debug!(issues = issues.len(), "not reformatting text with errors");
        return (None, issues);
    }
    (document.as_ref().map(document_to_text), issues)
}

/// Issues of a model text, without keeping its document
pub fn validate(text: &str) -> Vec<Issue> {
    text_to_document(text).1
}

/// Validate several independent texts in parallel
///
/// Results are in the order of `texts`.
pub fn validate_all(texts: &[&str]) -> Vec<Vec<Issue>> {
    let results: Vec<Vec<Issue>> = texts.par_iter().map(|text| validate(text)).collect();
    debug!(
        texts = texts.len(),
        with_errors = results
            .iter()
            .filter(|issues| issues.iter().any(Issue::is_error))
            .count(),
        "validated texts"
    );
    results
}
