//! Which constants get a node of their own.

use indexmap::IndexSet;
use sparqlex_core::{Node, Pattern, Resolved, Term, Value};

use crate::visit::Visitor;

/// Constants in subject or object position of a pattern outside any
/// `SERVICE` body. A constant seen only as a predicate is drawn as an edge
/// label and never as a node.
pub(super) fn used_as_node(tree: &Node) -> IndexSet<&Value> {
    let mut pass = UsedAsNode::default();
    pass.visit_node(tree);
    pass.values
}

#[derive(Default)]
struct UsedAsNode<'t> {
    values: IndexSet<&'t Value>,
}

impl<'t> Visitor<'t> for UsedAsNode<'t> {
    fn visit_service(&mut self, _endpoint: &'t Term, _arg: &'t Node, _silent: bool) {}

    fn visit_pattern(&mut self, pattern: &'t Pattern) {
        for term in [&pattern.subject, &pattern.object] {
            if let Resolved::Constant(value) = term.resolve() {
                self.values.insert(value);
            }
        }
    }
}
