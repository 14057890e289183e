//! Input and output ports of a query.
//!
//! A port is a named variable at the boundary of a query: outputs are what the
//! outermost projection exposes, inputs are the free variables it reads. Ports
//! let a query be reused as a module of a larger one.

use indexmap::IndexSet;
use sparqlex_core::vocab::{RDF_TYPE, SIB_PORT};
use sparqlex_core::{Node, ProjectionElem, QueryParser, Triple, TripleSink, Value, Var};

use crate::Result;
use crate::visit::Visitor;

/// Port names of one query, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ports {
    pub output: IndexSet<String>,
    pub input: IndexSet<String>,
}

impl Ports {
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.input.is_empty()
    }

    /// Every distinct port name, outputs first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let mut seen = IndexSet::new();
        for name in self.output.iter().chain(&self.input) {
            seen.insert(name.as_str());
        }
        seen.into_iter()
    }
}

/// Find the ports of a query tree.
///
/// Outputs come from the first projection met in a pre-order walk; the walk
/// stops there. Inputs are every non-constant variable below that projection,
/// nested sub-selects included. Without a projection both sets are empty.
pub fn extract_ports(tree: &Node) -> Ports {
    let mut finder = FirstProjection::default();
    finder.visit_node(tree);
    let Some((arg, elements)) = finder.found else {
        return Ports::default();
    };

    let output = elements
        .iter()
        .map(|e| e.output_name().to_string())
        .collect();

    let mut inputs = FreeVars::default();
    inputs.visit_node(arg);
    let input = inputs.names.into_iter().map(str::to_string).collect();

    Ports { output, input }
}

/// IRI naming a port: `base` directly followed by `name` when it ends in
/// `#`, otherwise joined with a `#`.
pub fn var_as_iri(base: &str, name: &str) -> String {
    if base.ends_with('#') {
        format!("{base}{name}")
    } else {
        format!("{base}#{name}")
    }
}

#[derive(Default)]
struct FirstProjection<'a> {
    found: Option<(&'a Node, &'a [ProjectionElem])>,
}

impl<'a> Visitor<'a> for FirstProjection<'a> {
    fn visit_node(&mut self, node: &'a Node) {
        if self.found.is_none() {
            crate::visit::walk_node(self, node);
        }
    }

    fn visit_projection(&mut self, arg: &'a Node, elements: &'a [ProjectionElem]) {
        self.found = Some((arg, elements));
    }
}

#[derive(Default)]
struct FreeVars<'a> {
    names: IndexSet<&'a str>,
}

impl<'a> Visitor<'a> for FreeVars<'a> {
    fn visit_var(&mut self, var: &'a Var) {
        if !var.is_constant {
            self.names.insert(&var.name);
        }
    }
}

/// Configuration for port materialization.
#[derive(Clone, Debug)]
pub struct PortConfig {
    /// Class asserted for every port IRI
    pub(crate) port_class: String,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            port_class: SIB_PORT.to_string(),
        }
    }
}

impl PortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class IRI asserted for each port.
    pub fn port_class(mut self, iri: impl Into<String>) -> Self {
        self.port_class = iri.into();
        self
    }
}

/// Extracts ports and records them as typed resources in a graph.
#[derive(Clone, Debug, Default)]
pub struct Modularizer {
    config: PortConfig,
}

impl Modularizer {
    pub fn new(config: PortConfig) -> Self {
        Self { config }
    }

    /// Extract the ports of `tree` and assert `(port, rdf:type, class)` for
    /// each distinct port name.
    pub fn modularize(&self, base_iri: &str, tree: &Node, sink: &mut impl TripleSink) -> Ports {
        let ports = extract_ports(tree);
        tracing::info!(output = ?ports.output, input = ?ports.input, "query ports");
        self.materialize(base_iri, &ports, sink);
        ports
    }

    /// Parse `query` with `parser`, then [`modularize`](Self::modularize) it.
    pub fn modularize_query(
        &self,
        parser: &impl QueryParser,
        base_iri: &str,
        query: &str,
        sink: &mut impl TripleSink,
    ) -> Result<Ports> {
        let tree = parser.parse(query, base_iri)?;
        Ok(self.modularize(base_iri, &tree, sink))
    }

    /// Returns how many triples were new to the sink.
    pub fn materialize(&self, base_iri: &str, ports: &Ports, sink: &mut impl TripleSink) -> usize {
        let mut added = 0;
        for name in ports.names() {
            let triple = Triple::new(
                Value::iri(var_as_iri(base_iri, name)),
                RDF_TYPE,
                Value::iri(self.config.port_class.as_str()),
            );
            if sink.insert(triple) {
                added += 1;
            }
        }
        added
    }
}
