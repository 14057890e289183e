//! SPARQL algebra tree.
//!
//! The tree is produced by an external parser, one per query string, and is
//! only ever read by the analysis passes. Children are owned boxes, so a tree
//! cannot contain cycles.

use serde::{Deserialize, Serialize};

use crate::term::{Term, Value, Var};

/// A node of the query algebra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// A triple pattern.
    Pattern(Pattern),
    Join {
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `OPTIONAL`; `right` is the optional side.
    LeftJoin {
        left: Box<Node>,
        right: Box<Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<Expr>,
    },
    Union {
        left: Box<Node>,
        right: Box<Node>,
    },
    Minus {
        left: Box<Node>,
        right: Box<Node>,
    },
    Filter {
        condition: Expr,
        arg: Box<Node>,
    },
    /// Federated sub-query.
    Service {
        endpoint: Term,
        arg: Box<Node>,
        #[serde(default)]
        silent: bool,
    },
    /// `BIND` and `(expr AS ?x)`.
    Extension {
        arg: Box<Node>,
        bindings: Vec<Binding>,
    },
    Projection {
        arg: Box<Node>,
        elements: Vec<ProjectionElem>,
    },
    Group {
        arg: Box<Node>,
        #[serde(default)]
        group_vars: Vec<Var>,
        #[serde(default)]
        aggregates: Vec<Aggregate>,
    },
    Order {
        arg: Box<Node>,
        criteria: Vec<OrderCriterion>,
    },
    Slice {
        arg: Box<Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
    },
    Distinct {
        arg: Box<Node>,
    },
    Reduced {
        arg: Box<Node>,
    },
    /// Inline `VALUES` data. `None` cells are `UNDEF`.
    Values {
        variables: Vec<String>,
        rows: Vec<Vec<Option<Value>>>,
    },
    /// The empty group pattern `{}`.
    Unit,
}

impl Node {
    pub fn pattern(
        subject: impl Into<Term>,
        predicate: impl Into<Predicate>,
        object: impl Into<Term>,
    ) -> Self {
        Self::Pattern(Pattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: None,
        })
    }

    pub fn join(left: Node, right: Node) -> Self {
        Self::Join {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn left_join(left: Node, right: Node, condition: Option<Expr>) -> Self {
        Self::LeftJoin {
            left: Box::new(left),
            right: Box::new(right),
            condition,
        }
    }

    pub fn union(left: Node, right: Node) -> Self {
        Self::Union {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn minus(left: Node, right: Node) -> Self {
        Self::Minus {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn filter(condition: Expr, arg: Node) -> Self {
        Self::Filter {
            condition,
            arg: Box::new(arg),
        }
    }

    pub fn service(endpoint: impl Into<Term>, arg: Node, silent: bool) -> Self {
        Self::Service {
            endpoint: endpoint.into(),
            arg: Box::new(arg),
            silent,
        }
    }

    pub fn extension(arg: Node, bindings: Vec<Binding>) -> Self {
        Self::Extension {
            arg: Box::new(arg),
            bindings,
        }
    }

    pub fn projection(arg: Node, elements: Vec<ProjectionElem>) -> Self {
        Self::Projection {
            arg: Box::new(arg),
            elements,
        }
    }

    pub fn group(arg: Node, group_vars: Vec<Var>, aggregates: Vec<Aggregate>) -> Self {
        Self::Group {
            arg: Box::new(arg),
            group_vars,
            aggregates,
        }
    }

    pub fn order(arg: Node, criteria: Vec<OrderCriterion>) -> Self {
        Self::Order {
            arg: Box::new(arg),
            criteria,
        }
    }

    pub fn slice(arg: Node, offset: Option<u64>, limit: Option<u64>) -> Self {
        Self::Slice {
            arg: Box::new(arg),
            offset,
            limit,
        }
    }

    pub fn distinct(arg: Node) -> Self {
        Self::Distinct { arg: Box::new(arg) }
    }

    pub fn reduced(arg: Node) -> Self {
        Self::Reduced { arg: Box::new(arg) }
    }

    /// Join a sequence of nodes left-deep, the way parsers lower a basic graph pattern.
    ///
    /// An empty sequence yields [`Node::Unit`].
    pub fn join_all(nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().reduce(Node::join).unwrap_or(Node::Unit)
    }
}

/// A subject–predicate–object clause, optionally scoped to a named graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub subject: Term,
    pub predicate: Predicate,
    pub object: Term,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Term>,
}

impl Pattern {
    pub fn is_property_path(&self) -> bool {
        matches!(self.predicate, Predicate::Path(_))
    }
}

/// Predicate slot: a single term or a property path expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Term(Term),
    Path(Path),
}

impl From<Term> for Predicate {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl From<Var> for Predicate {
    fn from(var: Var) -> Self {
        Self::Term(Term::Var(var))
    }
}

impl From<Value> for Predicate {
    fn from(value: Value) -> Self {
        Self::Term(Term::Value(value))
    }
}

impl From<Path> for Predicate {
    fn from(path: Path) -> Self {
        Self::Path(path)
    }
}

/// Property path expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Path {
    Link(String),
    Inverse(Box<Path>),
    Sequence(Vec<Path>),
    Alternative(Vec<Path>),
    ZeroOrMore(Box<Path>),
    OneOrMore(Box<Path>),
    ZeroOrOne(Box<Path>),
    /// `!(a|^b)`; inverse members are not distinguished.
    NegatedSet(Vec<String>),
}

impl Path {
    pub fn link(iri: impl Into<String>) -> Self {
        Self::Link(iri.into())
    }

    /// Every IRI mentioned in the path, in syntactic order, duplicates included.
    pub fn iris(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_iris(&mut out);
        out
    }

    fn collect_iris<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Link(iri) => out.push(iri),
            Self::Inverse(inner)
            | Self::ZeroOrMore(inner)
            | Self::OneOrMore(inner)
            | Self::ZeroOrOne(inner) => inner.collect_iris(out),
            Self::Sequence(items) | Self::Alternative(items) => {
                for item in items {
                    item.collect_iris(out);
                }
            }
            Self::NegatedSet(iris) => out.extend(iris.iter().map(String::as_str)),
        }
    }
}

/// Value expression used in filters, bindings, ordering and aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Var(Var),
    Value(Value),
    /// `EXISTS { .. }` / `NOT EXISTS { .. }`.
    Exists {
        #[serde(default)]
        negated: bool,
        arg: Box<Node>,
    },
    Not(Box<Expr>),
    /// Operators, built-ins and IRI functions alike.
    Call {
        function: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(Var::new(name))
    }

    pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            function: function.into(),
            args,
        }
    }

    pub fn exists(arg: Node) -> Self {
        Self::Exists {
            negated: false,
            arg: Box::new(arg),
        }
    }

    pub fn not_exists(arg: Node) -> Self {
        Self::Exists {
            negated: true,
            arg: Box::new(arg),
        }
    }
}

/// One `name := expr` entry of an [`Node::Extension`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub expr: Expr,
}

impl Binding {
    pub fn new(name: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// One projected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionElem {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ProjectionElem {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alias: None,
        }
    }

    pub fn aliased(source: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alias: Some(alias.into()),
        }
    }

    /// Name visible to the caller: the alias when present.
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Sample,
    GroupConcat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub kind: AggregateKind,
    #[serde(default)]
    pub distinct: bool,
    pub target: Var,
    /// Aggregated expression; `None` for `COUNT(*)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<Expr>,
}

impl Aggregate {
    pub fn new(kind: AggregateKind, target: Var, expr: Option<Expr>) -> Self {
        Self {
            kind,
            distinct: false,
            target,
            expr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCriterion {
    pub expr: Expr,
    #[serde(default = "ascending_default")]
    pub ascending: bool,
}

fn ascending_default() -> bool {
    true
}

impl OrderCriterion {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            ascending: true,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            ascending: false,
        }
    }
}
