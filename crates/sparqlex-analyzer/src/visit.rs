//! Algebra tree visitor.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct. Override `visit_*` methods to add logic.
//! Call the matching `walk_*` within your override to continue recursion (or omit it to stop).
//!
//! ```ignore
//! impl<'a> Visitor<'a> for MyPass {
//!     fn visit_service(&mut self, endpoint: &'a Term, arg: &'a Node, silent: bool) {
//!         // Pre-order logic
//!         walk_service(self, endpoint, arg, silent);
//!         // Post-order logic
//!     }
//! }
//! ```
//!
//! The `'a` lifetime lets a pass keep references into the tree it walks.
//!
//! Binding targets (extension names, aggregate targets, `VALUES` columns and
//! projected names) are names, not variable references, and are not visited as
//! variables. Children are visited left to right; a node's own operands come
//! before its condition.

use sparqlex_core::{
    Aggregate, Binding, Expr, Node, OrderCriterion, Path, Pattern, Predicate, ProjectionElem, Term,
    Value, Var,
};

pub trait Visitor<'a>: Sized {
    fn visit_node(&mut self, node: &'a Node) {
        walk_node(self, node);
    }

    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_join(&mut self, left: &'a Node, right: &'a Node) {
        walk_binary(self, left, right);
    }

    fn visit_left_join(&mut self, left: &'a Node, right: &'a Node, condition: Option<&'a Expr>) {
        walk_left_join(self, left, right, condition);
    }

    fn visit_union(&mut self, left: &'a Node, right: &'a Node) {
        walk_binary(self, left, right);
    }

    fn visit_minus(&mut self, left: &'a Node, right: &'a Node) {
        walk_binary(self, left, right);
    }

    fn visit_filter(&mut self, condition: &'a Expr, arg: &'a Node) {
        walk_filter(self, condition, arg);
    }

    fn visit_service(&mut self, endpoint: &'a Term, arg: &'a Node, silent: bool) {
        walk_service(self, endpoint, arg, silent);
    }

    fn visit_extension(&mut self, arg: &'a Node, bindings: &'a [Binding]) {
        walk_extension(self, arg, bindings);
    }

    fn visit_projection(&mut self, arg: &'a Node, _elements: &'a [ProjectionElem]) {
        self.visit_node(arg);
    }

    fn visit_group(&mut self, arg: &'a Node, group_vars: &'a [Var], aggregates: &'a [Aggregate]) {
        walk_group(self, arg, group_vars, aggregates);
    }

    fn visit_aggregate(&mut self, aggregate: &'a Aggregate) {
        walk_aggregate(self, aggregate);
    }

    fn visit_order(&mut self, arg: &'a Node, criteria: &'a [OrderCriterion]) {
        walk_order(self, arg, criteria);
    }

    fn visit_slice(&mut self, arg: &'a Node, _offset: Option<u64>, _limit: Option<u64>) {
        self.visit_node(arg);
    }

    fn visit_distinct(&mut self, arg: &'a Node) {
        self.visit_node(arg);
    }

    fn visit_reduced(&mut self, arg: &'a Node) {
        self.visit_node(arg);
    }

    fn visit_values(&mut self, variables: &'a [String], rows: &'a [Vec<Option<Value>>]) {
        walk_values(self, variables, rows);
    }

    fn visit_unit(&mut self) {
        // Leaf node
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_exists(&mut self, _negated: bool, arg: &'a Node) {
        self.visit_node(arg);
    }

    fn visit_path(&mut self, path: &'a Path) {
        walk_path(self, path);
    }

    fn visit_path_iri(&mut self, _iri: &'a str) {
        // Leaf
    }

    fn visit_term(&mut self, term: &'a Term) {
        walk_term(self, term);
    }

    fn visit_var(&mut self, _var: &'a Var) {
        // Leaf
    }

    fn visit_value(&mut self, _value: &'a Value) {
        // Leaf
    }
}

pub fn walk_node<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Node) {
    match node {
        Node::Pattern(p) => visitor.visit_pattern(p),
        Node::Join { left, right } => visitor.visit_join(left, right),
        Node::LeftJoin {
            left,
            right,
            condition,
        } => visitor.visit_left_join(left, right, condition.as_ref()),
        Node::Union { left, right } => visitor.visit_union(left, right),
        Node::Minus { left, right } => visitor.visit_minus(left, right),
        Node::Filter { condition, arg } => visitor.visit_filter(condition, arg),
        Node::Service {
            endpoint,
            arg,
            silent,
        } => visitor.visit_service(endpoint, arg, *silent),
        Node::Extension { arg, bindings } => visitor.visit_extension(arg, bindings),
        Node::Projection { arg, elements } => visitor.visit_projection(arg, elements),
        Node::Group {
            arg,
            group_vars,
            aggregates,
        } => visitor.visit_group(arg, group_vars, aggregates),
        Node::Order { arg, criteria } => visitor.visit_order(arg, criteria),
        Node::Slice { arg, offset, limit } => visitor.visit_slice(arg, *offset, *limit),
        Node::Distinct { arg } => visitor.visit_distinct(arg),
        Node::Reduced { arg } => visitor.visit_reduced(arg),
        Node::Values { variables, rows } => visitor.visit_values(variables, rows),
        Node::Unit => visitor.visit_unit(),
    }
}

pub fn walk_pattern<'a, V: Visitor<'a>>(visitor: &mut V, pattern: &'a Pattern) {
    visitor.visit_term(&pattern.subject);
    match &pattern.predicate {
        Predicate::Term(term) => visitor.visit_term(term),
        Predicate::Path(path) => visitor.visit_path(path),
    }
    visitor.visit_term(&pattern.object);
    if let Some(graph) = &pattern.graph {
        visitor.visit_term(graph);
    }
}

pub fn walk_binary<'a, V: Visitor<'a>>(visitor: &mut V, left: &'a Node, right: &'a Node) {
    visitor.visit_node(left);
    visitor.visit_node(right);
}

pub fn walk_left_join<'a, V: Visitor<'a>>(
    visitor: &mut V,
    left: &'a Node,
    right: &'a Node,
    condition: Option<&'a Expr>,
) {
    visitor.visit_node(left);
    visitor.visit_node(right);
    if let Some(condition) = condition {
        visitor.visit_expr(condition);
    }
}

pub fn walk_filter<'a, V: Visitor<'a>>(visitor: &mut V, condition: &'a Expr, arg: &'a Node) {
    visitor.visit_node(arg);
    visitor.visit_expr(condition);
}

pub fn walk_service<'a, V: Visitor<'a>>(
    visitor: &mut V,
    endpoint: &'a Term,
    arg: &'a Node,
    _silent: bool,
) {
    visitor.visit_term(endpoint);
    visitor.visit_node(arg);
}

pub fn walk_extension<'a, V: Visitor<'a>>(visitor: &mut V, arg: &'a Node, bindings: &'a [Binding]) {
    visitor.visit_node(arg);
    for binding in bindings {
        visitor.visit_expr(&binding.expr);
    }
}

pub fn walk_group<'a, V: Visitor<'a>>(
    visitor: &mut V,
    arg: &'a Node,
    group_vars: &'a [Var],
    aggregates: &'a [Aggregate],
) {
    visitor.visit_node(arg);
    for var in group_vars {
        visitor.visit_var(var);
    }
    for aggregate in aggregates {
        visitor.visit_aggregate(aggregate);
    }
}

pub fn walk_aggregate<'a, V: Visitor<'a>>(visitor: &mut V, aggregate: &'a Aggregate) {
    if let Some(expr) = &aggregate.expr {
        visitor.visit_expr(expr);
    }
}

pub fn walk_order<'a, V: Visitor<'a>>(
    visitor: &mut V,
    arg: &'a Node,
    criteria: &'a [OrderCriterion],
) {
    visitor.visit_node(arg);
    for criterion in criteria {
        visitor.visit_expr(&criterion.expr);
    }
}

pub fn walk_values<'a, V: Visitor<'a>>(
    visitor: &mut V,
    _variables: &'a [String],
    rows: &'a [Vec<Option<Value>>],
) {
    for cell in rows.iter().flatten().flatten() {
        visitor.visit_value(cell);
    }
}

pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expr) {
    match expr {
        Expr::Var(var) => visitor.visit_var(var),
        Expr::Value(value) => visitor.visit_value(value),
        Expr::Exists { negated, arg } => visitor.visit_exists(*negated, arg),
        Expr::Not(inner) => visitor.visit_expr(inner),
        Expr::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
    }
}

pub fn walk_path<'a, V: Visitor<'a>>(visitor: &mut V, path: &'a Path) {
    match path {
        Path::Link(iri) => visitor.visit_path_iri(iri),
        Path::Inverse(inner)
        | Path::ZeroOrMore(inner)
        | Path::OneOrMore(inner)
        | Path::ZeroOrOne(inner) => visitor.visit_path(inner),
        Path::Sequence(items) | Path::Alternative(items) => {
            for item in items {
                visitor.visit_path(item);
            }
        }
        Path::NegatedSet(iris) => {
            for iri in iris {
                visitor.visit_path_iri(iri);
            }
        }
    }
}

pub fn walk_term<'a, V: Visitor<'a>>(visitor: &mut V, term: &'a Term) {
    match term {
        Term::Var(var) => visitor.visit_var(var),
        Term::Value(value) => visitor.visit_value(value),
    }
}
