//! Well-known namespaces and IRIs.
//!
//! Constants are full IRIs, never prefixed names.

/// The OTTR namespace.
pub const OTTR: &str = "http://ns.ottr.xyz/0.4/";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

/// IRIs of the built-in base templates.
pub mod base {
    pub const TRIPLE: &str = "http://ns.ottr.xyz/0.4/Triple";
    pub const NULLABLE_TRIPLE: &str = "http://ns.ottr.xyz/0.4/NullableTriple";
}

/// IRIs of the type vocabulary.
pub mod types {
    pub const TOP: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
    pub const BOT: &str = "http://ns.ottr.xyz/0.4/Bot";
    pub const IRI: &str = "http://ns.ottr.xyz/0.4/IRI";
    pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
    pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
    pub const NE_LIST: &str = "http://ns.ottr.xyz/0.4/NEList";
    pub const LUB: &str = "http://ns.ottr.xyz/0.4/LUB";

    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
    pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const RDF_HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";

    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
    pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";

    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const XSD_LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const XSD_SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const XSD_BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const XSD_NON_NEGATIVE_INTEGER: &str =
        "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const XSD_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const XSD_TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const XSD_NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";
    pub const XSD_TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
    pub const XSD_LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";
}

const PREFIXES: [(&str, &str); 5] = [
    ("ottr", OTTR),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("owl", OWL),
];

/// Shorten an IRI to `prefix:local` form if it falls in a well-known namespace.
///
/// Used for display only; IRIs outside the known namespaces are wrapped in `<>`.
pub fn compact(iri: &str) -> String {
    for (prefix, ns) in PREFIXES {
        if let Some(local) = iri.strip_prefix(ns) {
            return format!("{}:{}", prefix, local);
        }
    }
    format!("<{}>", iri)
}
