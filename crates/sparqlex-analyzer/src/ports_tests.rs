use indexmap::IndexSet;
use sparqlex_core::vocab::{RDF_TYPE, SIB_PORT};
use sparqlex_core::{Expr, Graph, Node, ProjectionElem, Term, Triple, Value, Var};

use crate::Error;
use crate::ports::{Modularizer, PortConfig, extract_ports, var_as_iri};
use crate::test_utils::{StubParser, ex, rdf_type, select, triple, var};

fn set(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn single_projected_var() {
    let tree = select(&["s"], triple(var("s"), rdf_type(), ex("Example")));

    let ports = extract_ports(&tree);
    assert_eq!(ports.output, set(&["s"]));
    assert_eq!(ports.input, set(&["s"]));
}

#[test]
fn alias_is_output_source_is_input() {
    let tree = Node::projection(
        triple(var("s"), rdf_type(), ex("Example")),
        vec![ProjectionElem::aliased("s", "y")],
    );

    let mut graph = Graph::new();
    let base = "https://example.org/base#";
    let ports = Modularizer::default().modularize(base, &tree, &mut graph);

    assert_eq!(ports.output, set(&["y"]));
    assert_eq!(ports.input, set(&["s"]));
    assert_eq!(graph.len(), 2);
    let port = |iri: &str| Triple::new(Value::iri(iri), RDF_TYPE, Value::iri(SIB_PORT));
    assert!(graph.contains(&port("https://example.org/base#y")));
    assert!(graph.contains(&port("https://example.org/base#s")));
}

#[test]
fn shared_name_materialized_once() {
    let tree = select(&["s", "o"], triple(var("s"), ex("p"), var("o")));
    let mut triples: Vec<Triple> = Vec::new();

    let ports = extract_ports(&tree);
    let added = Modularizer::default().materialize("x:", &ports, &mut triples);

    assert_eq!(added, 2);
    assert_eq!(triples.len(), 2);
}

#[test]
fn port_iris() {
    assert_eq!(
        var_as_iri("https://example.org/base/", "s"),
        "https://example.org/base/#s"
    );
    assert_eq!(
        var_as_iri("https://example.org/base#", "s"),
        "https://example.org/base#s"
    );
    assert_eq!(
        var_as_iri("https://example.org/base", "s"),
        "https://example.org/base#s"
    );
}

#[test]
fn no_projection_yields_empty_ports() {
    let tree = triple(var("s"), ex("p"), var("o"));

    let ports = extract_ports(&tree);
    assert!(ports.is_empty());

    let mut graph = Graph::new();
    Modularizer::default().modularize("https://example.org/", &tree, &mut graph);
    assert!(graph.is_empty());
}

#[test]
fn outputs_from_outermost_inputs_from_everything_below() {
    // SELECT ?s WHERE { ?s ex:p ?o . { SELECT ?z WHERE { ?z ex:q ?w } } }
    let inner = select(&["z"], triple(var("z"), ex("q"), var("w")));
    let outer = triple(var("s"), ex("p"), var("o"));
    let tree = select(&["s"], Node::join(outer, inner));

    let ports = extract_ports(&tree);
    assert_eq!(ports.output, set(&["s"]));
    assert_eq!(ports.input, set(&["s", "o", "z", "w"]));
}

#[test]
fn first_projection_found_below_modifiers() {
    let tree = Node::slice(
        Node::distinct(select(&["o"], triple(var("s"), ex("p"), var("o")))),
        None,
        Some(5),
    );

    assert_eq!(extract_ports(&tree).output, set(&["o"]));
}

#[test]
fn constants_are_not_inputs() {
    let one = Expr::Var(Var::constant("_c", Value::literal("1")));
    let condition = Expr::call("=", vec![Expr::var("o"), one]);
    let pattern = Node::pattern(
        var("s"),
        Var::constant("_const_p", ex("p")),
        Term::Var(Var::anonymous("_anon_o")),
    );
    let tree = select(&["s"], Node::filter(condition, pattern));

    let ports = extract_ports(&tree);
    assert_eq!(ports.input, set(&["s", "_anon_o", "o"]));
}

#[test]
fn custom_port_class() {
    let tree = select(&["s"], triple(var("s"), ex("p"), var("o")));
    let config = PortConfig::new().port_class("http://example.org/Port");
    let modularizer = Modularizer::new(config);
    let mut triples: Vec<Triple> = Vec::new();

    modularizer.modularize("http://example.org/q1", &tree, &mut triples);

    let subjects: Vec<String> = triples.iter().map(|t| t.subject.to_string()).collect();
    assert_eq!(
        subjects,
        ["<http://example.org/q1#s>", "<http://example.org/q1#o>"]
    );
    let port = Value::iri("http://example.org/Port");
    assert!(triples.iter().all(|t| t.object == port));
}

#[test]
fn modularize_query_through_parser() {
    let query = "SELECT ?s WHERE { ?s a ex:Example }";
    let tree = select(&["s"], triple(var("s"), rdf_type(), ex("Example")));
    let parser = StubParser::new().with(query, tree);
    let mut graph = Graph::new();
    let modularizer = Modularizer::default();
    let base = "https://example.org/ex1";

    let ports = modularizer
        .modularize_query(&parser, base, query, &mut graph)
        .unwrap();
    assert_eq!(ports.output, set(&["s"]));
    assert_eq!(ports.input, set(&["s"]));
    assert_eq!(graph.len(), 1);
    assert_eq!(parser.seen.borrow()[0].1, base);

    let err = modularizer
        .modularize_query(&parser, base, "SELECT nonsense", &mut graph)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedQuery(_)));
    assert_eq!(graph.len(), 1);
}
