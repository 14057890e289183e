//! Node ids for variables, constants and anonymous positions.
//!
//! Ids are handed out in first-seen order of a pre-order walk, one counter per
//! kind: `v1, v2, ..` for variables, `c1, ..` for constants and `a1, ..` for
//! anonymous positions. A scope prefix keeps ids of several queries apart in
//! one document.

use indexmap::IndexMap;
use sparqlex_core::{Binding, Node, Pattern, Predicate, Resolved, Term, Value, Var};

use crate::visit::{self, Visitor};

pub(super) struct Names<'t> {
    scope: String,
    variables: IndexMap<&'t str, String>,
    constants: IndexMap<&'t Value, String>,
    anonymous: IndexMap<&'t str, String>,
}

impl<'t> Names<'t> {
    pub(super) fn collect(tree: &'t Node, scope: &str) -> Self {
        let mut names = Self {
            scope: scope.to_string(),
            variables: IndexMap::new(),
            constants: IndexMap::new(),
            anonymous: IndexMap::new(),
        };
        names.visit_node(tree);
        names
    }

    pub(super) fn var_id(&self, var: &Var) -> Option<&str> {
        let id = match var.resolve() {
            Resolved::Variable(name) => self.variables.get(name),
            Resolved::Constant(value) => self.constants.get(value),
            Resolved::Anonymous(name) => self.anonymous.get(name),
        };
        id.map(String::as_str)
    }

    pub(super) fn term_id(&self, term: &Term) -> Option<&str> {
        match term {
            Term::Var(var) => self.var_id(var),
            Term::Value(value) => self.constant_id(value),
        }
    }

    pub(super) fn variable_id(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub(super) fn constant_id(&self, value: &Value) -> Option<&str> {
        self.constants.get(value).map(String::as_str)
    }

    pub(super) fn variables(&self) -> impl Iterator<Item = (&'t str, &str)> {
        self.variables.iter().map(|(name, id)| (*name, id.as_str()))
    }

    pub(super) fn anonymous(&self) -> impl Iterator<Item = &str> {
        self.anonymous.values().map(String::as_str)
    }

    pub(super) fn constants(&self) -> impl Iterator<Item = (&'t Value, &str)> {
        self.constants
            .iter()
            .map(|(value, id)| (*value, id.as_str()))
    }

    fn name_variable(&mut self, name: &'t str) {
        if !self.variables.contains_key(name) {
            let id = format!("{}v{}", self.scope, self.variables.len() + 1);
            self.variables.insert(name, id);
        }
    }

    fn name_constant(&mut self, value: &'t Value) {
        if !self.constants.contains_key(value) {
            let id = format!("{}c{}", self.scope, self.constants.len() + 1);
            self.constants.insert(value, id);
        }
    }

    fn name_anonymous(&mut self, name: &'t str) {
        if !self.anonymous.contains_key(name) {
            let id = format!("{}a{}", self.scope, self.anonymous.len() + 1);
            self.anonymous.insert(name, id);
        }
    }

    fn name_term(&mut self, term: &'t Term) {
        match term {
            Term::Var(var) => self.visit_var(var),
            Term::Value(value) => self.name_constant(value),
        }
    }

    /// Graph names and service endpoints only get a node when they are not
    /// constant; a constant there is drawn as a label.
    fn name_label_slot(&mut self, term: &'t Term) {
        if !matches!(term.resolve(), Resolved::Constant(_)) {
            self.name_term(term);
        }
    }
}

impl<'t> Visitor<'t> for Names<'t> {
    fn visit_pattern(&mut self, pattern: &'t Pattern) {
        self.name_term(&pattern.subject);
        if let Predicate::Term(predicate) = &pattern.predicate {
            self.name_term(predicate);
        }
        self.name_term(&pattern.object);
        if let Some(graph) = &pattern.graph {
            self.name_label_slot(graph);
        }
    }

    fn visit_service(&mut self, endpoint: &'t Term, arg: &'t Node, _silent: bool) {
        self.name_label_slot(endpoint);
        self.visit_node(arg);
    }

    fn visit_extension(&mut self, arg: &'t Node, bindings: &'t [Binding]) {
        visit::walk_extension(self, arg, bindings);
        for binding in bindings {
            self.name_variable(&binding.name);
        }
    }

    fn visit_var(&mut self, var: &'t Var) {
        match var.resolve() {
            Resolved::Variable(name) => self.name_variable(name),
            Resolved::Constant(value) => self.name_constant(value),
            Resolved::Anonymous(name) => self.name_anonymous(name),
        }
    }
}
