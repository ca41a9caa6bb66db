//! solidgraph-core: Shared types, configuration, and error handling for
//! the solidgraph storage adapter.
//!
//! This crate provides the foundation used by the backend crates:
//! - RDF terms, quads, and representation metadata
//! - Resource identifiers and the parent-container strategy
//! - The host framework's `DataAccessor` contract
//! - Dgraph connection configuration
//! - Common error types

pub mod accessor;
pub mod config;
pub mod error;
pub mod identifier;
pub mod types;
pub mod vocab;

pub use accessor::DataAccessor;
pub use config::DgraphConfig;
pub use error::{AccessorError, Result};
pub use identifier::{IdentifierStrategy, ResourceIdentifier, SingleRootIdentifierStrategy};
pub use types::{GraphName, Literal, Quad, Representation, RepresentationMetadata, Term};
