//! Namespace prefixes retained for one query.

use sparqlex_core::Graph;

/// `(label, namespace)` pairs whose label the query text mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefixes {
    entries: Vec<(String, String)>,
}

impl Prefixes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep each candidate whose `label:` occurs somewhere in `query`.
    ///
    /// The check is a plain substring test, so a label may be retained for a
    /// mention inside a string literal or comment.
    pub fn gather(query: &str, candidates: &[(String, String)]) -> Self {
        let mut prefixes = Self::new();
        for (label, namespace) in candidates {
            if query.contains(&format!("{label}:")) {
                prefixes.insert(label, namespace);
            }
        }
        prefixes
    }

    /// [`gather`](Self::gather) over the `sh:prefix` declarations of `graph`.
    pub fn from_graph(query: &str, graph: &Graph) -> Self {
        Self::gather(query, &graph.prefix_declarations())
    }

    pub fn insert(&mut self, label: impl Into<String>, namespace: impl Into<String>) {
        let entry = (label.into(), namespace.into());
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, namespace)| (label.as_str(), namespace.as_str()))
    }

    /// One `PREFIX label: <namespace>` line per entry.
    pub fn declarations(&self) -> String {
        let mut out = String::new();
        for (label, namespace) in self.iter() {
            out.push_str(&format!("PREFIX {label}: <{namespace}>\n"));
        }
        out
    }

    /// The query preceded by its retained declarations.
    pub fn complete_query(&self, query: &str) -> String {
        let mut out = self.declarations();
        out.push_str(query);
        out
    }

    /// `label:local` using the longest namespace `iri` starts with.
    pub fn shorten(&self, iri: &str) -> Option<String> {
        let (label, namespace) = self
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace))
            .fold(None, |best: Option<(&str, &str)>, candidate| match best {
                Some(b) if b.1.len() >= candidate.1.len() => Some(b),
                _ => Some(candidate),
            })?;
        Some(format!("{label}:{}", &iri[namespace.len()..]))
    }
}
