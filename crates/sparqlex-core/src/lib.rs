#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for sparqlex.
//!
//! Three layers:
//! - **Terms**: variables and RDF values as they appear in a parsed query
//! - **Algebra**: the immutable query tree handed over by an external parser
//! - **Graph**: a small in-memory triple set used as the output target
//!
//! Parsing query text is not done here. Implement [`QueryParser`] to plug an
//! actual SPARQL parser into the analysis passes.

pub mod algebra;
pub mod graph;
pub mod term;
pub mod vocab;

mod parser;

#[cfg(test)]
mod graph_tests;

pub use algebra::{
    Aggregate, AggregateKind, Binding, Expr, Node, OrderCriterion, Path, Pattern, Predicate,
    ProjectionElem,
};
pub use graph::{Graph, Triple, TripleSink};
pub use parser::{MalformedQuery, QueryParser};
pub use term::{Resolved, Term, Value, Var};
