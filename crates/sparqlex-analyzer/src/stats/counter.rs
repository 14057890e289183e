//! Per-query feature tally folded into running totals.

use indexmap::IndexSet;
use sparqlex_core::{Aggregate, Expr, Node, OrderCriterion, Pattern, Resolved, Term, Value, Var};

use super::{FEATURE_COUNT, Feature, Statistics};
use crate::visit::{self, Visitor};

/// Accumulates feature usage over many queries.
///
/// Holds mutable totals, so one counter serves one caller at a time. Parallel
/// workers each own a counter and [`merge`](Self::merge) them at the end.
#[derive(Debug, Clone, Default)]
pub struct FeatureCounter {
    stats: Statistics,
}

impl FeatureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk one query tree and add its features to the totals.
    ///
    /// A query without statement patterns (e.g. `DESCRIBE <x>`) is counted
    /// like any other.
    pub fn count(&mut self, tree: &Node, query_id: &str) {
        let mut tally = QueryTally::default();
        tally.visit_node(tree);

        tracing::debug!(
            query = query_id,
            patterns = tally.features[Feature::StatementPatterns.index()],
            variables = tally.variables.len(),
            constants = tally.constants.len(),
            "counted query features"
        );

        self.stats.record_query(
            &tally.features,
            tally.variables.len() as u64,
            tally.constants.len() as u64,
        );
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn into_statistics(self) -> Statistics {
        self.stats
    }

    /// Fold another counter's totals into this one.
    pub fn merge(&mut self, other: &FeatureCounter) {
        self.stats.merge(&other.stats);
    }
}

/// Counts for a single query. Variables and constants are deduplicated here,
/// before they reach the global totals.
#[derive(Default)]
struct QueryTally<'a> {
    features: [u64; FEATURE_COUNT],
    variables: IndexSet<&'a str>,
    constants: IndexSet<ConstantKey<'a>>,
}

/// Path steps carry bare IRI strings; they are the same constant as an
/// equal IRI value elsewhere in the query.
#[derive(PartialEq, Eq, Hash)]
enum ConstantKey<'a> {
    Iri(&'a str),
    Other(&'a Value),
    /// Constant marker whose value the parser did not attach.
    Unbound(&'a str),
}

impl<'a> ConstantKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Iri(iri) => ConstantKey::Iri(iri),
            other => ConstantKey::Other(other),
        }
    }
}

impl QueryTally<'_> {
    fn bump(&mut self, feature: Feature) {
        self.features[feature.index()] += 1;
    }
}

impl<'a> Visitor<'a> for QueryTally<'a> {
    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        self.bump(Feature::StatementPatterns);
        if pattern.is_property_path() {
            self.bump(Feature::PropertyPaths);
        }
        visit::walk_pattern(self, pattern);
    }

    fn visit_left_join(&mut self, left: &'a Node, right: &'a Node, condition: Option<&'a Expr>) {
        self.bump(Feature::Optionals);
        visit::walk_left_join(self, left, right, condition);
    }

    fn visit_union(&mut self, left: &'a Node, right: &'a Node) {
        self.bump(Feature::Unions);
        visit::walk_binary(self, left, right);
    }

    fn visit_minus(&mut self, left: &'a Node, right: &'a Node) {
        self.bump(Feature::Minus);
        visit::walk_binary(self, left, right);
    }

    fn visit_filter(&mut self, condition: &'a Expr, arg: &'a Node) {
        self.bump(Feature::Filters);
        visit::walk_filter(self, condition, arg);
    }

    fn visit_service(&mut self, endpoint: &'a Term, arg: &'a Node, silent: bool) {
        self.bump(Feature::Services);
        visit::walk_service(self, endpoint, arg, silent);
    }

    fn visit_group(&mut self, arg: &'a Node, group_vars: &'a [Var], aggregates: &'a [Aggregate]) {
        self.bump(Feature::Groups);
        visit::walk_group(self, arg, group_vars, aggregates);
    }

    fn visit_aggregate(&mut self, aggregate: &'a Aggregate) {
        self.bump(Feature::Aggregates);
        self.bump(aggregate.kind.into());
        visit::walk_aggregate(self, aggregate);
    }

    fn visit_order(&mut self, arg: &'a Node, criteria: &'a [OrderCriterion]) {
        self.bump(Feature::Orders);
        visit::walk_order(self, arg, criteria);
    }

    fn visit_exists(&mut self, _negated: bool, arg: &'a Node) {
        self.bump(Feature::Exists);
        self.visit_node(arg);
    }

    fn visit_path_iri(&mut self, iri: &'a str) {
        self.constants.insert(ConstantKey::Iri(iri));
    }

    fn visit_var(&mut self, var: &'a Var) {
        match var.resolve() {
            Resolved::Constant(value) => {
                self.constants.insert(ConstantKey::of(value));
            }
            Resolved::Anonymous(name) if var.is_constant => {
                self.constants.insert(ConstantKey::Unbound(name));
            }
            Resolved::Variable(name) | Resolved::Anonymous(name) => {
                self.variables.insert(name);
            }
        }
    }

    fn visit_value(&mut self, value: &'a Value) {
        self.constants.insert(ConstantKey::of(value));
    }
}
