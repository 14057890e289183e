use crate::graph::{Graph, Triple, TripleSink};
use crate::term::Value;
use crate::vocab::{RDF_TYPE, SHACL_NAMESPACE, SHACL_PREFIX, SIB_PORT, XSD_ANY_URI};

fn port(iri: &str) -> Triple {
    Triple::new(Value::iri(iri), RDF_TYPE, Value::iri(SIB_PORT))
}

#[test]
fn insert_deduplicates() {
    let mut graph = Graph::new();
    assert!(graph.insert(port("https://example.org/q#s")));
    assert!(!graph.insert(port("https://example.org/q#s")));
    assert!(graph.insert(port("https://example.org/q#o")));
    assert_eq!(graph.len(), 2);
}

#[test]
fn matching_with_wildcards() {
    let graph: Graph = [
        port("https://example.org/q#s"),
        port("https://example.org/q#o"),
        Triple::new(
            Value::iri("https://example.org/q"),
            RDF_TYPE,
            Value::iri("http://www.w3.org/ns/shacl#SPARQLExecutable"),
        ),
    ]
    .into_iter()
    .collect();

    let ports = Value::iri(SIB_PORT);
    let typed_ports = graph.matching(None, Some(RDF_TYPE), Some(&ports));
    assert_eq!(typed_ports.count(), 2);
    assert_eq!(graph.matching(None, Some(RDF_TYPE), None).count(), 3);

    let s = Value::iri("https://example.org/q#s");
    assert_eq!(graph.matching(Some(&s), None, None).count(), 1);
}

#[test]
fn prefix_declarations_pair_label_and_namespace() {
    let up = Value::blank_node("up");
    let rdfs = Value::blank_node("rdfs");
    let dangling = Value::blank_node("dangling");
    let graph: Graph = [
        Triple::new(up.clone(), SHACL_PREFIX, Value::literal("up")),
        Triple::new(
            up,
            SHACL_NAMESPACE,
            Value::typed_literal("http://purl.uniprot.org/core/", XSD_ANY_URI),
        ),
        Triple::new(rdfs.clone(), SHACL_PREFIX, Value::literal("rdfs")),
        Triple::new(
            rdfs,
            SHACL_NAMESPACE,
            Value::typed_literal("http://www.w3.org/2000/01/rdf-schema#", XSD_ANY_URI),
        ),
        Triple::new(dangling, SHACL_PREFIX, Value::literal("nothing")),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        graph.prefix_declarations(),
        vec![
            ("up".to_string(), "http://purl.uniprot.org/core/".to_string()),
            (
                "rdfs".to_string(),
                "http://www.w3.org/2000/01/rdf-schema#".to_string()
            ),
        ]
    );
}

#[test]
fn mutable_reference_is_a_sink() {
    fn assert_into<S: TripleSink>(mut sink: S) {
        sink.insert(port("https://example.org/q#x"));
    }

    let mut graph = Graph::new();
    assert_into(&mut graph);
    assert!(graph.contains(&port("https://example.org/q#x")));
}
