//! Mermaid flowchart rendering of query trees.
//!
//! Rendering runs four passes over one tree:
//! 1. prefix gathering: keep the namespace prefixes the query text mentions
//! 2. naming: assign stable node ids to variables, constants and anonymous positions
//! 3. classification: decide which constants are drawn as nodes
//! 4. emission: node declarations, then one edge per pattern
//!
//! Every triple pattern becomes an edge from its subject to its object,
//! labelled with the predicate. Patterns on the optional side of a left join
//! are dotted, `SERVICE` bodies are grouped in a subgraph, and `BIND`
//! expressions link the variables they read to the bound variable.

mod classify;
mod config;
mod emitter;
mod invariants;
mod naming;
mod prefixes;

#[cfg(test)]
mod prefixes_tests;

pub use config::{DiagramConfig, Direction};
pub use prefixes::Prefixes;

use sparqlex_core::{Node, QueryParser};

use crate::{Error, Result};
use emitter::{Lines, emit_body, escape, header, styles};

/// Outcome of rendering one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagram {
    Rendered(String),
    /// The query text could not be parsed.
    NoDiagram,
}

impl Diagram {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Diagram::Rendered(text) => Some(text),
            Diagram::NoDiagram => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Diagram::Rendered(_))
    }
}

/// Renders queries through a [`QueryParser`].
pub struct DiagramRenderer<P> {
    parser: P,
    config: DiagramConfig,
}

impl<P: QueryParser> DiagramRenderer<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            config: DiagramConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiagramConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Render `query` as a standalone flowchart.
    ///
    /// `candidates` are `(label, namespace)` prefix declarations from the
    /// surrounding metadata. `base` is the query's target endpoint; the
    /// configured fallback is used without one. A parse failure is logged and
    /// yields [`Diagram::NoDiagram`].
    pub fn render(
        &self,
        query: &str,
        candidates: &[(String, String)],
        base: Option<&str>,
    ) -> Diagram {
        self.render_named("<unnamed>", query, candidates, base)
    }

    /// Like [`render`](Self::render), with `query_id` naming the query in the
    /// log event of a failure.
    pub fn render_named(
        &self,
        query_id: &str,
        query: &str,
        candidates: &[(String, String)],
        base: Option<&str>,
    ) -> Diagram {
        match self.try_render(query, candidates, base) {
            Ok(text) => Diagram::Rendered(text),
            Err(err) => {
                log_no_diagram(query_id, &err);
                Diagram::NoDiagram
            }
        }
    }

    /// Like [`render`](Self::render), but reports the parse failure.
    pub fn try_render(
        &self,
        query: &str,
        candidates: &[(String, String)],
        base: Option<&str>,
    ) -> Result<String> {
        let (tree, prefixes) = self.parse(query, candidates, base)?;
        Ok(self.render_tree(&tree, &prefixes))
    }

    /// Render an already parsed tree.
    pub fn render_tree(&self, tree: &Node, prefixes: &Prefixes) -> String {
        let mut out = Lines::default();
        header(&self.config, &mut out);
        styles(&mut out);
        emit_body(tree, prefixes, &self.config, "", &mut out);
        out.finish()
    }

    /// Start a document holding several queries under one header.
    pub fn document(&self) -> DiagramDocument<'_, P> {
        DiagramDocument::new(self)
    }

    fn parse(
        &self,
        query: &str,
        candidates: &[(String, String)],
        base: Option<&str>,
    ) -> Result<(Node, Prefixes)> {
        let prefixes = Prefixes::gather(query, candidates);
        let base = base.unwrap_or(&self.config.fallback_base);
        let tree = self.parser.parse(&prefixes.complete_query(query), base)?;
        Ok((tree, prefixes))
    }
}

/// Several queries in one flowchart, each in its own subgraph.
///
/// Node ids are prefixed per query (`q1_v1`, `q2_c3`, ..) so queries never
/// share nodes. Queries that fail to parse are skipped.
pub struct DiagramDocument<'r, P> {
    renderer: &'r DiagramRenderer<P>,
    lines: Lines,
    queries: usize,
    skipped: usize,
}

impl<'r, P: QueryParser> DiagramDocument<'r, P> {
    pub fn new(renderer: &'r DiagramRenderer<P>) -> Self {
        let mut lines = Lines::default();
        header(&renderer.config, &mut lines);
        styles(&mut lines);
        Self {
            renderer,
            lines,
            queries: 0,
            skipped: 0,
        }
    }

    /// Add a parsed tree under the title `query_id`.
    pub fn add_tree(&mut self, query_id: &str, tree: &Node, prefixes: &Prefixes) {
        self.queries += 1;
        let id = format!("q{}", self.queries);
        let scope = format!("{id}_");
        let title = escape(query_id);
        self.lines.open(&format!("subgraph {id}[\"{title}\"]"));
        let config = &self.renderer.config;
        emit_body(tree, prefixes, config, &scope, &mut self.lines);
        self.lines.close();
    }

    /// Parse and add a query. Returns `false` if it was skipped.
    pub fn add_query(
        &mut self,
        query_id: &str,
        query: &str,
        candidates: &[(String, String)],
        base: Option<&str>,
    ) -> bool {
        match self.renderer.parse(query, candidates, base) {
            Ok((tree, prefixes)) => {
                self.add_tree(query_id, &tree, &prefixes);
                true
            }
            Err(err) => {
                log_no_diagram(query_id, &err);
                self.skipped += 1;
                false
            }
        }
    }

    pub fn rendered(&self) -> usize {
        self.queries
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> String {
        self.lines.finish()
    }
}

fn log_no_diagram(query_id: &str, err: &Error) {
    tracing::info!(
        query = query_id,
        error = %err,
        "query can not be transformed to a diagram"
    );
}
