//! sparqlex analyzer: passes over a parsed SPARQL algebra tree.
//!
//! This crate provides the analyses used to document a corpus of example queries:
//! - `visit` - generic tree walker shared by every pass
//! - `stats` - feature usage statistics and their Markdown report
//! - `ports` - input/output ports for treating a query as a module
//! - `diagram` - Mermaid flowchart rendering
//! - `schema` - classes and predicates a query touches

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagram;
pub mod ports;
pub mod schema;
pub mod stats;
pub mod visit;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod ports_tests;
#[cfg(test)]
mod schema_tests;

pub use diagram::{Diagram, DiagramConfig, DiagramDocument, DiagramRenderer, Direction, Prefixes};
pub use ports::{Modularizer, PortConfig, Ports, extract_ports, var_as_iri};
pub use schema::SchemaUsage;
pub use stats::{Feature, FeatureCount, FeatureCounter, Statistics, StatisticsReport};
pub use visit::Visitor;

use sparqlex_core::MalformedQuery;

/// Errors raised by the analysis entry points that parse query text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The parser collaborator rejected the query text.
    #[error(transparent)]
    MalformedQuery(#[from] MalformedQuery),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
