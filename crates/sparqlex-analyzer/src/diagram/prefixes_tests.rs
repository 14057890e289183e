use indoc::indoc;
use sparqlex_core::vocab::{SHACL_NAMESPACE, SHACL_PREFIX, XSD_ANY_URI};
use sparqlex_core::{Graph, Triple, Value};

use super::Prefixes;

fn candidates() -> Vec<(String, String)> {
    [
        ("ex", "http://example.org/"),
        ("up", "http://purl.uniprot.org/core/"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ]
    .into_iter()
    .map(|(l, n)| (l.to_string(), n.to_string()))
    .collect()
}

#[test]
fn gather_keeps_mentioned_labels() {
    let query = "SELECT ?s WHERE { ?s a up:Protein }";

    let prefixes = Prefixes::gather(query, &candidates());

    let kept: Vec<_> = prefixes.iter().collect();
    assert_eq!(kept, [("up", "http://purl.uniprot.org/core/")]);
}

#[test]
fn complete_query_prepends_declarations() {
    let query = "SELECT ?l WHERE { ?s rdfs:label ?l ; a ex:Thing }";

    let prefixes = Prefixes::gather(query, &candidates());

    insta::assert_snapshot!(prefixes.complete_query(query), @r"
    PREFIX ex: <http://example.org/>
    PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
    SELECT ?l WHERE { ?s rdfs:label ?l ; a ex:Thing }
    ");
}

#[test]
fn nothing_mentioned_leaves_query_untouched() {
    let query = indoc! {"
        SELECT * WHERE {
          ?s ?p ?o
        }
    "};

    let prefixes = Prefixes::gather(query, &candidates());

    assert!(prefixes.is_empty());
    assert_eq!(prefixes.complete_query(query), query);
}

#[test]
fn shorten_uses_longest_namespace() {
    let mut prefixes = Prefixes::new();
    prefixes.insert("ex", "http://example.org/");
    prefixes.insert("exv", "http://example.org/vocab/");

    let name = prefixes.shorten("http://example.org/vocab/name");
    assert_eq!(name.as_deref(), Some("exv:name"));
    let thing = prefixes.shorten("http://example.org/thing");
    assert_eq!(thing.as_deref(), Some("ex:thing"));
    assert_eq!(prefixes.shorten("http://other.org/thing"), None);
}

#[test]
fn insert_ignores_duplicates() {
    let mut prefixes = Prefixes::new();
    prefixes.insert("ex", "http://example.org/");
    prefixes.insert("ex", "http://example.org/");

    assert_eq!(prefixes.len(), 1);
}

#[test]
fn from_shacl_declarations() {
    let decl = Value::blank_node("ex_decl");
    let graph: Graph = [
        Triple::new(decl.clone(), SHACL_PREFIX, Value::literal("ex")),
        Triple::new(
            decl,
            SHACL_NAMESPACE,
            Value::typed_literal("http://example.org/", XSD_ANY_URI),
        ),
    ]
    .into_iter()
    .collect();

    let prefixes = Prefixes::from_graph("ASK { ex:a ex:b ex:c }", &graph);

    let declared = prefixes.declarations();
    assert_eq!(declared, "PREFIX ex: <http://example.org/>\n");
}
