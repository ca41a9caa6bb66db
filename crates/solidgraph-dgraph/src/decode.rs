//! Decoding Dgraph JSON query results back into RDF quads.
//!
//! A query result is a tree: the named block holds the root subject
//! nodes, whose non-reserved keys are RDF predicates pointing at nested
//! node objects. A nested object is either an entity (it carries an
//! identity key) or a literal value node (it carries exactly one value
//! slot). Anything else is malformed and ignored. The fold never
//! mutates its input and yields quads in a deterministic depth-first
//! order.

use serde_json::Value;

use solidgraph_core::types::{Literal, Quad, Term};
use solidgraph_core::vocab;

use crate::value::ValueSlot;

/// Node attributes that are storage bookkeeping, not RDF predicates.
const RESERVED_KEYS: [&str; 5] = ["uid", "uri", "blank", "container", "dgraph.type"];

/// Decode the named result block into a flat quad list.
pub fn decode_quads(response: &Value, block: &str) -> Vec<Quad> {
    let mut quads = Vec::new();
    if let Some(nodes) = response.get(block).and_then(Value::as_array) {
        for node in nodes {
            if let Some(subject) = identity(node) {
                decode_subject(&subject, node, &mut quads);
            }
        }
    }
    quads
}

/// Extract the bare identifier of every node in the result block.
/// Used for container child listings, which fetch no predicates.
pub fn decode_identifiers(response: &Value, block: &str) -> Vec<String> {
    response
        .get(block)
        .and_then(Value::as_array)
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(|node| node.get("uri").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A node's identity term: `uri` wins over the blank-node marker.
fn identity(node: &Value) -> Option<Term> {
    if let Some(uri) = node.get("uri").and_then(Value::as_str) {
        return Some(Term::named(uri));
    }
    if let Some(label) = node.get("blank").and_then(Value::as_str) {
        return Some(Term::blank(label));
    }
    None
}

fn decode_subject(subject: &Term, node: &Value, quads: &mut Vec<Quad>) {
    let Some(map) = node.as_object() else {
        return;
    };
    for (key, value) in map {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Array(items) => {
                for item in items {
                    decode_object(subject, key, item, quads);
                }
            }
            Value::Object(_) => decode_object(subject, key, value, quads),
            // Scalar values under a predicate key are not part of the
            // tree shape the data query produces.
            _ => {}
        }
    }
}

fn decode_object(subject: &Term, predicate: &str, value: &Value, quads: &mut Vec<Quad>) {
    if let Some(object) = identity(value) {
        quads.push(Quad::triple(subject.clone(), predicate, object.clone()));
        // The nested entity may carry its own predicates, one hop deeper.
        decode_subject(&object, value, quads);
        return;
    }
    if let Some(literal) = decode_literal(value) {
        quads.push(Quad::triple(
            subject.clone(),
            predicate,
            Term::Literal(literal),
        ));
    }
}

/// Rebuild a literal from a value node: lexical value from whichever
/// slot is present, language tag if non-empty, explicit datatype unless
/// it is the implicit string/langString default.
fn decode_literal(value: &Value) -> Option<Literal> {
    let map = value.as_object()?;
    let raw = ValueSlot::all()
        .iter()
        .find_map(|slot| map.get(slot.predicate()))?;
    let lexical = lexical_form(raw)?;

    if let Some(language) = map
        .get("language")
        .and_then(Value::as_str)
        .filter(|language| !language.is_empty())
    {
        return Some(Literal::lang(lexical, language));
    }

    let datatype = map
        .get("datatype")
        .and_then(Value::as_str)
        .filter(|datatype| *datatype != vocab::XSD_STRING && *datatype != vocab::RDF_LANG_STRING)
        .unwrap_or(vocab::XSD_STRING);
    Some(Literal::new(lexical, datatype))
}

fn lexical_form(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_response_yields_no_quads() {
        assert!(decode_quads(&json!({ "data": [] }), "data").is_empty());
        assert!(decode_quads(&json!({}), "data").is_empty());
    }

    #[test]
    fn string_literal_with_implicit_datatype() {
        let response = json!({
            "data": [{
                "uid": "0x1",
                "uri": "http://test.com/s",
                "dgraph.type": ["EntityData"],
                "http://example.org/name": {
                    "_value.string": "alice",
                    "language": "",
                    "datatype": vocab::XSD_STRING,
                },
            }]
        });
        let quads = decode_quads(&response, "data");
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].subject, Term::named("http://test.com/s"));
        assert_eq!(quads[0].predicate, "http://example.org/name");
        assert_eq!(quads[0].object, Term::string_literal("alice"));
    }

    #[test]
    fn typed_literals_recover_lexical_values() {
        let response = json!({
            "data": [{
                "uri": "http://test.com/s",
                "http://example.org/count": { "_value.int": 42, "language": "", "datatype": vocab::XSD_INTEGER },
                "http://example.org/score": { "_value.float": 5.5, "language": "", "datatype": vocab::XSD_DOUBLE },
                "http://example.org/flag": { "_value.bool": true, "language": "", "datatype": vocab::XSD_BOOLEAN },
                "http://example.org/when": { "_value.datetime": "2024-05-01T12:00:00Z", "language": "", "datatype": vocab::XSD_DATE_TIME },
            }]
        });
        let quads = decode_quads(&response, "data");
        let object_of = |predicate: &str| {
            quads
                .iter()
                .find(|quad| quad.predicate == predicate)
                .map(|quad| quad.object.clone())
                .unwrap()
        };
        assert_eq!(
            object_of("http://example.org/count"),
            Term::literal("42", vocab::XSD_INTEGER)
        );
        assert_eq!(
            object_of("http://example.org/score"),
            Term::literal("5.5", vocab::XSD_DOUBLE)
        );
        assert_eq!(
            object_of("http://example.org/flag"),
            Term::literal("true", vocab::XSD_BOOLEAN)
        );
        assert_eq!(
            object_of("http://example.org/when"),
            Term::literal("2024-05-01T12:00:00Z", vocab::XSD_DATE_TIME)
        );
    }

    #[test]
    fn custom_datatype_is_preserved() {
        let response = json!({
            "data": [{
                "uri": "http://test.com/s",
                "http://example.org/p": {
                    "_value.string": "payload",
                    "language": "",
                    "datatype": "http://example.org/customType",
                },
            }]
        });
        let quads = decode_quads(&response, "data");
        assert_eq!(
            quads[0].object,
            Term::literal("payload", "http://example.org/customType")
        );
    }

    #[test]
    fn non_empty_language_wins_over_datatype() {
        let response = json!({
            "data": [{
                "uri": "http://test.com/s",
                "http://example.org/p": {
                    "_value.string": "bonjour",
                    "language": "fr",
                    "datatype": vocab::RDF_LANG_STRING,
                },
            }]
        });
        let quads = decode_quads(&response, "data");
        assert_eq!(quads[0].object, Term::lang_literal("bonjour", "fr"));
    }

    #[test]
    fn arrays_produce_one_quad_per_element() {
        let response = json!({
            "data": [{
                "uri": "http://test.com/s",
                "http://example.org/p": [
                    { "_value.string": "a", "language": "", "datatype": vocab::XSD_STRING },
                    { "_value.string": "b", "language": "", "datatype": vocab::XSD_STRING },
                ],
            }]
        });
        let quads = decode_quads(&response, "data");
        assert_eq!(quads.len(), 2);
    }

    #[test]
    fn nested_entity_emits_edge_and_recurses_one_hop() {
        let response = json!({
            "data": [{
                "uri": "http://test.com/s",
                "http://example.org/knows": {
                    "uid": "0x2",
                    "uri": "http://test.com/other",
                    "dgraph.type": ["Entity"],
                    "http://example.org/name": {
                        "_value.string": "bob",
                        "language": "",
                        "datatype": vocab::XSD_STRING,
                    },
                },
            }]
        });
        let quads = decode_quads(&response, "data");
        assert_eq!(quads.len(), 2);
        assert_eq!(
            quads[0],
            Quad::triple(
                Term::named("http://test.com/s"),
                "http://example.org/knows",
                Term::named("http://test.com/other"),
            )
        );
        assert_eq!(
            quads[1],
            Quad::triple(
                Term::named("http://test.com/other"),
                "http://example.org/name",
                Term::string_literal("bob"),
            )
        );
    }

    #[test]
    fn blank_node_markers_become_blank_terms() {
        let response = json!({
            "data": [{
                "blank": "b0",
                "http://example.org/p": { "uri": "http://test.com/o" },
            }]
        });
        let quads = decode_quads(&response, "data");
        assert_eq!(quads[0].subject, Term::blank("b0"));
        assert_eq!(quads[0].object, Term::named("http://test.com/o"));
    }

    #[test]
    fn reserved_keys_and_malformed_values_are_ignored() {
        let response = json!({
            "data": [{
                "uid": "0x1",
                "uri": "http://test.com/s",
                "container": [{ "uid": "0x9" }],
                "dgraph.type": ["EntityData"],
                "http://example.org/bad": "a bare string",
                "http://example.org/junk": { "neither": "identity nor value" },
            }]
        });
        assert!(decode_quads(&response, "data").is_empty());
    }

    #[test]
    fn identifiers_from_children_block() {
        let response = json!({
            "children": [
                { "uid": "0x1", "uri": "http://test.com/a" },
                { "uid": "0x2", "uri": "http://test.com/b/" },
                { "uid": "0x3" },
            ]
        });
        let ids = decode_identifiers(&response, "children");
        assert_eq!(ids, ["http://test.com/a", "http://test.com/b/"]);
    }
}
