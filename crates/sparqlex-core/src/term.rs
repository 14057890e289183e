//! Variables and RDF values.
//!
//! Identity rules used by every analysis pass:
//! - variables compare by name within one query
//! - values compare structurally (IRI string, or lexical + datatype + language)

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RDF term bound in a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Iri(String),
    Literal {
        lexical: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    BlankNode(String),
}

impl Value {
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Plain literal without datatype or language tag.
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang_literal(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn blank_node(id: impl Into<String>) -> Self {
        Self::BlankNode(id.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// The bare lexical form: IRI string, literal text, or blank node id.
    pub fn string_value(&self) -> &str {
        match self {
            Self::Iri(iri) => iri,
            Self::Literal { lexical, .. } => lexical,
            Self::BlankNode(id) => id,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal {
                lexical,
                datatype,
                language,
            } => {
                write!(f, "\"{lexical}\"")?;
                if let Some(lang) = language {
                    write!(f, "@{lang}")
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{dt}>")
                } else {
                    Ok(())
                }
            }
            Self::BlankNode(id) => write!(f, "_:{id}"),
        }
    }
}

/// A variable slot in the algebra.
///
/// Parsers also use variables for positions holding a fixed value
/// (`is_constant`) and for blank-node syntax such as `[]` (`is_anonymous`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    #[serde(default)]
    pub is_constant: bool,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_value: Option<Value>,
}

impl Var {
    /// A free, named variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_constant: false,
            is_anonymous: false,
            bound_value: None,
        }
    }

    /// A parser-generated variable standing for a blank-node position.
    pub fn anonymous(name: impl Into<String>) -> Self {
        Self {
            is_anonymous: true,
            ..Self::new(name)
        }
    }

    /// A variable slot holding a fixed value.
    pub fn constant(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            is_constant: true,
            is_anonymous: false,
            bound_value: Some(value),
        }
    }

    /// Classify this slot. A constant is never a free variable.
    pub fn resolve(&self) -> Resolved<'_> {
        if self.is_constant {
            return match &self.bound_value {
                Some(value) => Resolved::Constant(value),
                None => Resolved::Anonymous(&self.name),
            };
        }
        if self.is_anonymous {
            Resolved::Anonymous(&self.name)
        } else {
            Resolved::Variable(&self.name)
        }
    }
}

/// A subject, object, graph or endpoint slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Var(Var),
    Value(Value),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(Var::new(name))
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Value(Value::iri(iri))
    }

    pub fn resolve(&self) -> Resolved<'_> {
        match self {
            Self::Var(var) => var.resolve(),
            Self::Value(value) => Resolved::Constant(value),
        }
    }

    /// The fixed value in this slot, if any.
    pub fn as_constant(&self) -> Option<&Value> {
        match self.resolve() {
            Resolved::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Self::Var(var) => Some(var),
            Self::Value(_) => None,
        }
    }
}

impl From<Var> for Term {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// What a slot means once constant and anonymous markers are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolved<'a> {
    /// Free variable, keyed by name.
    Variable(&'a str),
    /// Fixed value, keyed structurally.
    Constant(&'a Value),
    /// Blank-node position invented by the parser, keyed by name.
    Anonymous(&'a str),
}
