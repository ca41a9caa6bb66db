//! IRI constants used across the translation layer.
//!
//! Only the vocabulary the accessor actually touches: the XSD datatypes
//! that map onto Dgraph value slots, the RDF core terms, and the
//! content-type predicate used for representation metadata.

// ── XSD datatypes ─────────────────────────────────────────────────

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
pub const XSD_SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
pub const XSD_BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
pub const XSD_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
pub const XSD_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

// ── RDF core ──────────────────────────────────────────────────────

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

// ── LDP (containment vocabulary, used by callers and tests) ───────

pub const LDP_RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";
pub const LDP_CONTAINER: &str = "http://www.w3.org/ns/ldp#Container";
pub const LDP_CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";

// ── Representation metadata ───────────────────────────────────────

/// Predicate carrying a representation's content type in its metadata.
pub const CONTENT_TYPE: &str = "http://www.w3.org/ns/ma-ont#format";

/// The internal quad content-type marker. The accessor only handles
/// representations declared with this type.
pub const INTERNAL_QUADS: &str = "internal/quads";
