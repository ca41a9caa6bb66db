//! solidgraph-dgraph — Dgraph-backed resource storage.
//!
//! This crate is the translation layer between the host framework's
//! quad streams and Dgraph's node/predicate/upsert model. All reads and
//! writes flow through one `DgraphDataAccessor` to keep the containment
//! and replace-on-write semantics consistent.

pub mod accessor;
pub mod client;
pub mod decode;
pub mod init;
pub mod mutations;
pub mod queries;
pub mod upsert;
pub mod value;

pub use accessor::DgraphDataAccessor;
pub use client::{DgraphClient, DgraphTransport, DEFAULT_SCHEMA};
pub use upsert::UpsertBuilder;
