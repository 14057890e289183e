//! Mermaid flowchart emission for one query tree.

use std::collections::HashSet;

use indexmap::IndexSet;
use sparqlex_core::{Binding, Expr, Node, Path, Pattern, Predicate, Resolved, Term, Value, Var};

use super::DiagramConfig;
use super::classify::used_as_node;
use super::invariants::{assert_scope_closed, ensure_node_id};
use super::naming::Names;
use super::prefixes::Prefixes;
use crate::ports::extract_ports;
use crate::visit::{self, Visitor};

const INDENT: &str = "    ";

/// Indented line buffer.
#[derive(Debug, Default)]
pub(super) struct Lines {
    buf: String,
    indent: usize,
}

impl Lines {
    pub(super) fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub(super) fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    pub(super) fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.line("end");
    }

    pub(super) fn finish(self) -> String {
        self.buf
    }
}

/// Everything after the header line is indented one level.
pub(super) fn header(config: &DiagramConfig, out: &mut Lines) {
    out.line(&format!("graph {}", config.direction.as_str()));
    out.indent += 1;
}

pub(super) fn styles(out: &mut Lines) {
    out.line("classDef projected fill:lightgreen;");
    out.line("classDef iri fill:yellow;");
    out.line("classDef literal fill:orange;");
    out.line("classDef bnode fill:lightgrey;");
}

/// Emit node declarations followed by edges, in visiting order.
pub(super) fn emit_body(
    tree: &Node,
    prefixes: &Prefixes,
    config: &DiagramConfig,
    scope: &str,
    out: &mut Lines,
) {
    let projected = if config.mark_projected {
        extract_ports(tree).output
    } else {
        IndexSet::new()
    };

    let mut emitter = Emitter {
        names: Names::collect(tree, scope),
        labels: Labels { prefixes },
        scope,
        out,
        declared: HashSet::new(),
        optional_depth: 0,
        service_depth: 0,
        services: 0,
    };
    emitter.emit_nodes(&used_as_node(tree), &projected);
    emitter.visit_node(tree);

    assert_scope_closed(emitter.optional_depth, "OPTIONAL");
    assert_scope_closed(emitter.service_depth, "SERVICE");
}

/// Renders terms, values and paths as Mermaid label text.
pub(super) struct Labels<'p> {
    prefixes: &'p Prefixes,
}

impl Labels<'_> {
    fn iri(&self, iri: &str) -> String {
        self.prefixes
            .shorten(iri)
            .unwrap_or_else(|| iri.to_string())
    }

    fn value(&self, value: &Value) -> String {
        match value {
            Value::Iri(iri) => self.iri(iri),
            Value::Literal {
                lexical,
                language: Some(language),
                ..
            } => format!("\"{lexical}\"@{language}"),
            Value::Literal {
                lexical,
                datatype: Some(datatype),
                ..
            } => format!("\"{lexical}\"^^{}", self.iri(datatype)),
            Value::Literal { lexical, .. } => format!("\"{lexical}\""),
            Value::BlankNode(id) => format!("_:{id}"),
        }
    }

    fn term(&self, term: &Term) -> String {
        match term.resolve() {
            Resolved::Variable(name) | Resolved::Anonymous(name) => format!("?{name}"),
            Resolved::Constant(value) => self.value(value),
        }
    }

    fn predicate(&self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Term(term) => self.term(term),
            Predicate::Path(path) => self.path(path, false),
        }
    }

    fn path(&self, path: &Path, nested: bool) -> String {
        match path {
            Path::Link(iri) => self.iri(iri),
            Path::Inverse(inner) => format!("^{}", self.path(inner, true)),
            Path::ZeroOrMore(inner) => format!("{}*", self.path(inner, true)),
            Path::OneOrMore(inner) => format!("{}+", self.path(inner, true)),
            Path::ZeroOrOne(inner) => format!("{}?", self.path(inner, true)),
            Path::Sequence(items) => self.path_list(items, "/", nested),
            Path::Alternative(items) => self.path_list(items, "|", nested),
            Path::NegatedSet(iris) => {
                let members: Vec<String> = iris.iter().map(|iri| self.iri(iri)).collect();
                format!("!({})", members.join("|"))
            }
        }
    }

    fn path_list(&self, items: &[Path], separator: &str, nested: bool) -> String {
        let parts: Vec<String> = items.iter().map(|item| self.path(item, true)).collect();
        let joined = parts.join(separator);
        if nested && items.len() > 1 {
            format!("({joined})")
        } else {
            joined
        }
    }
}

fn class_of(value: &Value) -> &'static str {
    match value {
        Value::Iri(_) => "iri",
        Value::Literal { .. } => "literal",
        Value::BlankNode(_) => "bnode",
    }
}

/// Mermaid reads `"` as the end of a quoted label, and a line break would
/// end the statement.
pub(super) fn escape(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => out.push_str("#quot;"),
            '\n' => out.push_str("#10;"),
            '\r' => out.push_str("#13;"),
            c => out.push(c),
        }
    }
    out
}

struct Emitter<'t, 'o> {
    names: Names<'t>,
    labels: Labels<'t>,
    scope: &'t str,
    out: &'o mut Lines,
    /// Ids of constants that already have a node declaration.
    declared: HashSet<String>,
    optional_depth: usize,
    service_depth: usize,
    services: usize,
}

impl Emitter<'_, '_> {
    fn emit_nodes(&mut self, used_as_node: &IndexSet<&Value>, projected: &IndexSet<String>) {
        for (name, id) in self.names.variables() {
            let mut line = format!("{id}(\"{}\")", escape(&format!("?{name}")));
            if projected.contains(name) {
                line.push_str(":::projected");
            }
            self.out.line(&line);
        }
        for id in self.names.anonymous() {
            self.out.line(&format!("{id}((\" \"))"));
        }
        for (value, id) in self.names.constants() {
            if used_as_node.contains(value) {
                let line = self.constant_node(id, value);
                self.out.line(&line);
                self.declared.insert(id.to_string());
            }
        }
    }

    fn constant_node(&self, id: &str, value: &Value) -> String {
        format!(
            "{id}([\"{}\"]):::{}",
            escape(&self.labels.value(value)),
            class_of(value)
        )
    }

    /// Constants reached only inside `SERVICE` are declared where first used.
    fn declare_inline(&mut self, term: &Term) {
        if self.service_depth == 0 {
            return;
        }
        let Resolved::Constant(value) = term.resolve() else {
            return;
        };
        let id = ensure_node_id(self.names.constant_id(value), "constant").to_string();
        if self.declared.insert(id.clone()) {
            let line = self.constant_node(&id, value);
            self.out.line(&line);
        }
    }

    fn node_id(&self, term: &Term, slot: &str) -> String {
        ensure_node_id(self.names.term_id(term), slot).to_string()
    }

    fn bind_edges(&mut self, binding: &Binding) {
        let target = self.names.variable_id(&binding.name);
        let target = ensure_node_id(target, "bind target").to_string();
        let mut sources = ExprVars::default();
        sources.visit_expr(&binding.expr);
        for var in sources.vars {
            let Resolved::Variable(_) = var.resolve() else {
                continue;
            };
            let source = ensure_node_id(self.names.var_id(var), "bind source").to_string();
            self.out.line(&format!("{source} ==>|\"bind\"| {target}"));
        }
    }
}

impl<'t> Visitor<'t> for Emitter<'t, '_> {
    fn visit_pattern(&mut self, pattern: &'t Pattern) {
        self.declare_inline(&pattern.subject);
        self.declare_inline(&pattern.object);

        let subject = self.node_id(&pattern.subject, "subject");
        let object = self.node_id(&pattern.object, "object");
        let label = escape(&self.labels.predicate(&pattern.predicate));
        let arrow = if self.optional_depth > 0 {
            "-.->"
        } else {
            "-->"
        };
        self.out
            .line(&format!("{subject} {arrow}|\"{label}\"| {object}"));
    }

    fn visit_left_join(&mut self, left: &'t Node, right: &'t Node, condition: Option<&'t Expr>) {
        self.visit_node(left);
        self.optional_depth += 1;
        self.visit_node(right);
        if let Some(condition) = condition {
            self.visit_expr(condition);
        }
        self.optional_depth -= 1;
    }

    fn visit_service(&mut self, endpoint: &'t Term, arg: &'t Node, _silent: bool) {
        self.services += 1;
        let label = escape(&self.labels.term(endpoint));
        let id = format!("{}s{}", self.scope, self.services);
        self.out.open(&format!("subgraph {id}[\"{label}\"]"));
        self.service_depth += 1;
        self.visit_node(arg);
        self.service_depth -= 1;
        self.out.close();
    }

    fn visit_extension(&mut self, arg: &'t Node, bindings: &'t [Binding]) {
        visit::walk_extension(self, arg, bindings);
        for binding in bindings {
            self.bind_edges(binding);
        }
    }
}

/// Variables an expression reads, outside nested `EXISTS` patterns.
#[derive(Default)]
struct ExprVars<'t> {
    vars: IndexSet<&'t Var>,
}

impl<'t> Visitor<'t> for ExprVars<'t> {
    fn visit_exists(&mut self, _negated: bool, _arg: &'t Node) {}

    fn visit_var(&mut self, var: &'t Var) {
        self.vars.insert(var);
    }
}
