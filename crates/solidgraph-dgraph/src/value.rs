//! Literal value slots.
//!
//! Dgraph stores each literal in a value node with exactly one typed
//! value predicate. Datatype IRIs resolve to one of five primitive
//! slots; unrecognized datatypes go through the string slot with their
//! original datatype IRI preserved, so they survive a round trip.

use chrono::{DateTime, NaiveDate};

use solidgraph_core::vocab;

/// The five primitive storage slots for literal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSlot {
    String,
    Int,
    Float,
    Bool,
    DateTime,
}

impl ValueSlot {
    /// Resolve a datatype IRI to its storage slot. Numeric datatype
    /// families collapse onto one slot each, as in the schema.
    pub fn for_datatype(datatype: &str) -> Self {
        match datatype {
            vocab::XSD_INTEGER
            | vocab::XSD_INT
            | vocab::XSD_LONG
            | vocab::XSD_SHORT
            | vocab::XSD_BYTE
            | vocab::XSD_POSITIVE_INTEGER
            | vocab::XSD_NEGATIVE_INTEGER => ValueSlot::Int,
            vocab::XSD_FLOAT | vocab::XSD_DOUBLE => ValueSlot::Float,
            vocab::XSD_BOOLEAN => ValueSlot::Bool,
            vocab::XSD_DATE_TIME | vocab::XSD_DATE => ValueSlot::DateTime,
            _ => ValueSlot::String,
        }
    }

    /// Slot resolution for the write path. A datetime-slot literal whose
    /// lexical value is not RFC 3339 is demoted to the string slot
    /// (keeping its datatype IRI), because Dgraph would reject the whole
    /// mutation otherwise.
    pub fn for_literal(datatype: &str, value: &str) -> Self {
        match Self::for_datatype(datatype) {
            ValueSlot::DateTime if !parses_as_datetime(value) => ValueSlot::String,
            slot => slot,
        }
    }

    /// The Dgraph predicate storing this slot's value.
    pub fn predicate(&self) -> &'static str {
        match self {
            ValueSlot::String => "_value.string",
            ValueSlot::Int => "_value.int",
            ValueSlot::Float => "_value.float",
            ValueSlot::Bool => "_value.bool",
            ValueSlot::DateTime => "_value.datetime",
        }
    }

    /// All slots, in the order decoding probes them.
    pub fn all() -> [ValueSlot; 5] {
        [
            ValueSlot::String,
            ValueSlot::Int,
            ValueSlot::Float,
            ValueSlot::Bool,
            ValueSlot::DateTime,
        ]
    }
}

/// Dgraph's dateTime type accepts full RFC 3339 stamps and bare dates.
fn parses_as_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
