use sparqlex_core::vocab::{RDF_TYPE, VOID_CLASS, VOID_PROPERTY};
use sparqlex_core::{Expr, Graph, Node, Path, Triple, Value, Var};

use crate::schema::SchemaUsage;
use crate::test_utils::{ex, rdf_type, select, triple, var};

fn iri(local: &str) -> String {
    format!("http://example.org/{local}")
}

#[test]
fn classes_and_predicates() {
    let organism = Var::constant("_const_p", ex("organism"));
    let tree = select(
        &["s"],
        Node::join_all([
            triple(var("s"), rdf_type(), ex("Protein")),
            triple(var("s"), ex("name"), var("n")),
            triple(var("s"), rdf_type(), var("t")),
            triple(var("s"), organism, var("o")),
        ]),
    );

    let usage = SchemaUsage::collect(&tree);
    let classes: Vec<&String> = usage.classes.iter().collect();
    assert_eq!(classes, [&iri("Protein")]);

    let predicates: Vec<&str> = usage.predicates.iter().map(String::as_str).collect();
    let (name, organism) = (iri("name"), iri("organism"));
    assert_eq!(predicates, [name.as_str(), RDF_TYPE, organism.as_str()]);
}

#[test]
fn services_paths_and_variable_predicates_ignored() {
    let path = Path::OneOrMore(Box::new(Path::link(iri("part"))));
    let remote = triple(var("s"), ex("remote"), var("r"));
    let tree = Node::join_all([
        triple(var("s"), var("p"), var("o")),
        triple(var("s"), path, var("o")),
        Node::service(ex("sparql"), remote, false),
    ]);

    assert!(SchemaUsage::collect(&tree).is_empty());
}

#[test]
fn exists_patterns_count() {
    let tree = Node::filter(
        Expr::not_exists(triple(var("s"), rdf_type(), ex("Obsolete"))),
        triple(var("s"), ex("name"), var("n")),
    );

    let usage = SchemaUsage::collect(&tree);
    assert!(usage.classes.contains(&iri("Obsolete")));
    assert!(usage.predicates.contains(&iri("name")));
}

#[test]
fn retain_known_against_void() {
    let dataset = Value::iri("http://example.org/dataset");
    let void: Graph = [
        Triple::new(dataset.clone(), VOID_CLASS, ex("Protein")),
        Triple::new(dataset, VOID_PROPERTY, ex("name")),
    ]
    .into_iter()
    .collect();

    let tree = Node::join_all([
        triple(var("s"), rdf_type(), ex("Protein")),
        triple(var("s"), rdf_type(), ex("Gene")),
        triple(var("s"), ex("name"), var("n")),
        triple(var("s"), ex("label"), var("l")),
    ]);
    let mut usage = SchemaUsage::collect(&tree);
    usage.retain_known(&void);

    assert_eq!(usage.classes.len(), 1);
    assert!(usage.classes.contains(&iri("Protein")));
    assert_eq!(usage.predicates.len(), 1);
    assert!(usage.predicates.contains(&iri("name")));
}

#[test]
fn merge_is_union() {
    let mut a = SchemaUsage::collect(&triple(var("s"), ex("p"), var("o")));
    let both = Node::join(
        triple(var("s"), ex("p"), var("o")),
        triple(var("s"), rdf_type(), ex("C")),
    );
    let b = SchemaUsage::collect(&both);

    a.merge(&b);
    assert_eq!(a.predicates.len(), 1);
    assert_eq!(a.classes.len(), 1);
}
