//! Classes and predicates a query touches.
//!
//! Used to measure how much of an endpoint's data model (as advertised by its
//! VoID description) the example corpus covers.

use indexmap::IndexSet;
use serde::Serialize;
use sparqlex_core::vocab::{RDF_TYPE, VOID_CLASS, VOID_PROPERTY};
use sparqlex_core::{Graph, Node, Pattern, Predicate, Resolved, Term, Value};

use crate::visit::Visitor;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaUsage {
    pub classes: IndexSet<String>,
    pub predicates: IndexSet<String>,
}

impl SchemaUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Usage of a single query.
    pub fn collect(tree: &Node) -> Self {
        let mut usage = Self::default();
        usage.record(tree);
        usage
    }

    /// Add the classes and predicates of `tree`.
    ///
    /// Patterns inside `SERVICE` target another endpoint and are skipped.
    /// `?x rdf:type <C>` contributes class `C`; any other pattern with a
    /// constant IRI predicate contributes the predicate.
    pub fn record(&mut self, tree: &Node) {
        let mut collector = Collector { usage: self };
        collector.visit_node(tree);
    }

    /// Keep only what the VoID description declares via `void:class` and
    /// `void:property`.
    pub fn retain_known(&mut self, void: &Graph) {
        let declared = |predicate: &str, iri: &str| {
            let value = Value::iri(iri);
            void.matching(None, Some(predicate), Some(&value))
                .next()
                .is_some()
        };
        self.classes.retain(|c| declared(VOID_CLASS, c));
        self.predicates.retain(|p| declared(VOID_PROPERTY, p));
    }

    pub fn merge(&mut self, other: &SchemaUsage) {
        self.classes.extend(other.classes.iter().cloned());
        self.predicates.extend(other.predicates.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.predicates.is_empty()
    }
}

struct Collector<'u> {
    usage: &'u mut SchemaUsage,
}

fn constant_iri(term: &Term) -> Option<&str> {
    match term.resolve() {
        Resolved::Constant(value) => value.as_iri(),
        _ => None,
    }
}

impl<'a> Visitor<'a> for Collector<'_> {
    fn visit_service(&mut self, _endpoint: &'a Term, _arg: &'a Node, _silent: bool) {}

    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        let Predicate::Term(predicate) = &pattern.predicate else {
            return;
        };
        let Some(predicate) = constant_iri(predicate) else {
            return;
        };
        match constant_iri(&pattern.object) {
            Some(class) if predicate == RDF_TYPE => {
                self.usage.classes.insert(class.to_string());
            }
            _ => {
                self.usage.predicates.insert(predicate.to_string());
            }
        }
    }
}
