//! Seam for the external SPARQL parser.

use crate::algebra::Node;

/// Query text could not be turned into an algebra tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed query: {message}")]
pub struct MalformedQuery {
    pub message: String,
}

impl MalformedQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Translates query text into an algebra tree.
///
/// `base_iri` resolves relative IRIs in the query text.
pub trait QueryParser {
    fn parse(&self, query: &str, base_iri: &str) -> Result<Node, MalformedQuery>;
}

impl<F> QueryParser for F
where
    F: Fn(&str, &str) -> Result<Node, MalformedQuery>,
{
    fn parse(&self, query: &str, base_iri: &str) -> Result<Node, MalformedQuery> {
        self(query, base_iri)
    }
}
