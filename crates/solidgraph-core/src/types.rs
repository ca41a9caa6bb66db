//! Core RDF types for the solidgraph accessor.
//!
//! A deliberately small quad model: the accessor translates between the
//! host framework's quad streams and Dgraph records, so it only needs
//! terms, quads, and the metadata wrapper the framework passes around.

use serde::{Deserialize, Serialize};

use crate::identifier::ResourceIdentifier;
use crate::vocab;

// ── Terms ─────────────────────────────────────────────────────────

/// An RDF literal: lexical value, datatype IRI, optional language tag.
///
/// The datatype is never empty; a plain literal carries `xsd:string`
/// and a language-tagged literal carries `rdf:langString`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: String,
    pub language: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// A plain `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value, vocab::XSD_STRING)
    }

    /// A language-tagged literal (`rdf:langString`).
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: vocab::RDF_LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }
}

/// One RDF term. Subjects are named or blank nodes; objects may also be
/// literals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Term {
    NamedNode(String),
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn named(iri: impl Into<String>) -> Self {
        Term::NamedNode(iri.into())
    }

    /// A blank node with an opaque label, scoped to its owning container.
    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    pub fn literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal::new(value, datatype))
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal::string(value))
    }

    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal(Literal::lang(value, language))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

/// The graph component of a quad. Writes only accept the default graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GraphName {
    #[default]
    Default,
    Named(String),
}

// ── Quads ─────────────────────────────────────────────────────────

/// A subject-predicate-object triple plus its graph label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
    pub graph: GraphName,
}

impl Quad {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term, graph: GraphName) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            graph,
        }
    }

    /// A default-graph quad.
    pub fn triple(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self::new(subject, predicate, object, GraphName::Default)
    }

    pub fn is_default_graph(&self) -> bool {
        self.graph == GraphName::Default
    }
}

// ── Representation metadata ───────────────────────────────────────

/// Metadata about one stored representation: its identifier plus the
/// metadata quads describing it. The content type, when known, is one
/// more quad (`ma:format`) on the identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepresentationMetadata {
    identifier: ResourceIdentifier,
    quads: Vec<Quad>,
}

impl RepresentationMetadata {
    pub fn new(identifier: ResourceIdentifier) -> Self {
        Self {
            identifier,
            quads: Vec::new(),
        }
    }

    pub fn with_quads(identifier: ResourceIdentifier, quads: Vec<Quad>) -> Self {
        Self { identifier, quads }
    }

    pub fn identifier(&self) -> &ResourceIdentifier {
        &self.identifier
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn add_quad(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    /// The declared content type, read from the `ma:format` quad.
    pub fn content_type(&self) -> Option<&str> {
        self.quads
            .iter()
            .filter(|quad| quad.predicate == vocab::CONTENT_TYPE)
            .find_map(|quad| quad.object.as_literal())
            .map(|lit| lit.value.as_str())
    }

    /// Declare the content type by appending an `ma:format` quad on the
    /// identifier.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.quads.push(Quad::triple(
            Term::named(self.identifier.path.clone()),
            vocab::CONTENT_TYPE,
            Term::string_literal(content_type),
        ));
    }

    /// Everything except the content-type declaration. Used on the write
    /// path, where the backend determines the stored content type itself.
    pub fn quads_without_content_type(&self) -> Vec<Quad> {
        self.quads
            .iter()
            .filter(|quad| quad.predicate != vocab::CONTENT_TYPE)
            .cloned()
            .collect()
    }
}

/// The slice of a representation the accessor needs for `can_handle`.
#[derive(Debug, Clone)]
pub struct Representation {
    pub binary: bool,
    pub metadata: RepresentationMetadata,
}
