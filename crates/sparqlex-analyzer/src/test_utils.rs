//! Test utilities: tree builders, a stub parser and log capture.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use sparqlex_core::vocab::RDF_TYPE;
use sparqlex_core::{MalformedQuery, Node, Predicate, ProjectionElem, QueryParser, Term, Value};
use tracing_subscriber::fmt::MakeWriter;

pub const EX: &str = "http://example.org/";

/// `http://example.org/{local}`
pub fn ex(local: &str) -> Value {
    Value::iri(format!("{EX}{local}"))
}

pub fn var(name: &str) -> Term {
    Term::var(name)
}

pub fn rdf_type() -> Value {
    Value::iri(RDF_TYPE)
}

pub fn triple(subject: Term, predicate: impl Into<Predicate>, object: impl Into<Term>) -> Node {
    Node::pattern(subject, predicate, object)
}

/// `SELECT ?v1 ?v2 .. WHERE { body }`
pub fn select(vars: &[&str], body: Node) -> Node {
    Node::projection(body, vars.iter().map(|v| ProjectionElem::new(*v)).collect())
}

/// Parser stand-in that maps query bodies to prepared trees.
///
/// `PREFIX` lines are stripped before lookup; the full text of every call is
/// recorded so tests can inspect what the caller handed over.
#[derive(Default)]
pub struct StubParser {
    trees: HashMap<String, Node>,
    pub seen: RefCell<Vec<(String, String)>>,
}

impl StubParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, tree: Node) -> Self {
        self.trees.insert(query.trim().to_string(), tree);
        self
    }
}

impl QueryParser for StubParser {
    fn parse(&self, query: &str, base_iri: &str) -> Result<Node, MalformedQuery> {
        self.seen
            .borrow_mut()
            .push((query.to_string(), base_iri.to_string()));
        let body: Vec<&str> = query
            .lines()
            .filter(|line| !line.starts_with("PREFIX "))
            .collect();
        let body = body.join("\n");
        let body = body.trim();
        self.trees
            .get(body)
            .cloned()
            .ok_or_else(|| MalformedQuery::new(format!("unexpected query: {body}")))
    }
}

/// Formatted `tracing` output of a scoped subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Run `f` with every event written into this buffer.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
