//! The host framework's data-accessor contract.
//!
//! Backends implement [`DataAccessor`] against their own storage; the
//! framework routes resource reads and writes through it. Implementors
//! must uphold the containment semantics: every non-root resource is
//! owned by its parent container, and writes replace a resource's data
//! and metadata atomically.

use async_trait::async_trait;

use crate::error::Result;
use crate::identifier::ResourceIdentifier;
use crate::types::{Quad, Representation, RepresentationMetadata};
use crate::vocab;

#[async_trait]
pub trait DataAccessor: Send + Sync {
    /// Whether this accessor can store the given representation.
    ///
    /// Fails with `UnsupportedMediaType` unless the representation is
    /// non-binary and declares the internal quad content type.
    fn can_handle(&self, representation: &Representation) -> Result<()>;

    /// All data quads stored for the resource.
    async fn get_data(&self, identifier: &ResourceIdentifier) -> Result<Vec<Quad>>;

    /// The resource's metadata. Fails with `NotFound` when nothing is
    /// stored: every existing resource carries at least a type triple.
    async fn get_metadata(&self, identifier: &ResourceIdentifier)
        -> Result<RepresentationMetadata>;

    /// One bare metadata entry per immediate child of the container, in
    /// database order.
    async fn get_children(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Vec<RepresentationMetadata>>;

    /// Replace the document's data and metadata.
    async fn write_document(
        &self,
        identifier: &ResourceIdentifier,
        data: Vec<Quad>,
        metadata: &RepresentationMetadata,
    ) -> Result<()>;

    /// Replace the container's metadata.
    async fn write_container(
        &self,
        identifier: &ResourceIdentifier,
        metadata: &RepresentationMetadata,
    ) -> Result<()>;

    /// Remove the resource and everything it owns.
    async fn delete_resource(&self, identifier: &ResourceIdentifier) -> Result<()>;
}

/// Shared `can_handle` check for quad-backed accessors.
pub fn supports_quads(representation: &Representation) -> bool {
    !representation.binary
        && representation.metadata.content_type() == Some(vocab::INTERNAL_QUADS)
}
