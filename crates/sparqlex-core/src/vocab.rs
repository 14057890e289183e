//! IRIs of the vocabularies the analysis passes read or write.

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

pub const SHACL_NS: &str = "http://www.w3.org/ns/shacl#";
/// Links a prefix declaration to its label.
pub const SHACL_PREFIX: &str = "http://www.w3.org/ns/shacl#prefix";
/// Links a prefix declaration to its namespace IRI.
pub const SHACL_NAMESPACE: &str = "http://www.w3.org/ns/shacl#namespace";

pub const SIB_NS: &str = "https://purl.expasy.org/sparql-examples/ontology#";
/// Class of query ports.
pub const SIB_PORT: &str = "https://purl.expasy.org/sparql-examples/ontology#Port";

pub const VOID_NS: &str = "http://rdfs.org/ns/void#";
pub const VOID_CLASS: &str = "http://rdfs.org/ns/void#class";
pub const VOID_PROPERTY: &str = "http://rdfs.org/ns/void#property";
