//! In-memory RDF graph.
//!
//! Analysis passes write their results through [`TripleSink`], so callers can
//! plug in their own store. [`Graph`] is the default: an insertion-ordered,
//! duplicate-free triple set that also answers the few lookups the passes need
//! from surrounding example metadata.

use indexmap::IndexSet;

use crate::term::Value;
use crate::vocab::{SHACL_NAMESPACE, SHACL_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Triple {
    pub subject: Value,
    pub predicate: String,
    pub object: Value,
}

impl Triple {
    pub fn new(subject: Value, predicate: impl Into<String>, object: Value) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// Destination for asserted triples.
///
/// Not synchronized: concurrent writers must serialize access themselves.
pub trait TripleSink {
    /// Assert a triple. Returns `false` if it was already present.
    fn insert(&mut self, triple: Triple) -> bool;
}

impl<T: TripleSink + ?Sized> TripleSink for &mut T {
    fn insert(&mut self, triple: Triple) -> bool {
        (**self).insert(triple)
    }
}

impl TripleSink for Vec<Triple> {
    fn insert(&mut self, triple: Triple) -> bool {
        self.push(triple);
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples matching a pattern; `None` is a wildcard.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a Value>,
        predicate: Option<&'a str>,
        object: Option<&'a Value>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| {
            subject.is_none_or(|s| &t.subject == s)
                && predicate.is_none_or(|p| t.predicate == p)
                && object.is_none_or(|o| &t.object == o)
        })
    }

    /// `(label, namespace)` pairs declared with `sh:prefix` / `sh:namespace`.
    ///
    /// A declaration without a namespace is skipped. Pairs come out in
    /// insertion order of their `sh:prefix` triples.
    pub fn prefix_declarations(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for decl in self.matching(None, Some(SHACL_PREFIX), None) {
            let label = decl.object.string_value();
            for ns in self.matching(Some(&decl.subject), Some(SHACL_NAMESPACE), None) {
                out.push((label.to_string(), ns.object.string_value().to_string()));
            }
        }
        out
    }
}

impl TripleSink for Graph {
    fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
