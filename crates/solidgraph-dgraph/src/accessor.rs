//! The Dgraph-backed `DataAccessor` implementation.
//!
//! Translates resource operations into the fixed queries and upsert
//! requests of this crate, and decodes raw query trees back into quads.
//! The database handle is created lazily on the first operation through
//! the initialization guard.

use std::sync::Arc;

use async_trait::async_trait;

use solidgraph_core::accessor::{supports_quads, DataAccessor};
use solidgraph_core::config::DgraphConfig;
use solidgraph_core::error::{AccessorError, Result, DEFAULT_GRAPH_MESSAGE};
use solidgraph_core::identifier::{IdentifierStrategy, ResourceIdentifier};
use solidgraph_core::types::{Quad, Representation, RepresentationMetadata};
use solidgraph_core::vocab;

use crate::client::{DgraphClient, DgraphTransport, DEFAULT_SCHEMA};
use crate::decode::{decode_identifiers, decode_quads};
use crate::init::InitGuard;
use crate::mutations::{delete_request, write_request};
use crate::queries::{
    identifier_vars, CHILDREN_BLOCK, CHILDREN_QUERY, DATA_BLOCK, DATA_QUERY, METADATA_QUERY,
};

/// DataAccessor storing resources in a Dgraph cluster.
pub struct DgraphDataAccessor<C: DgraphTransport = DgraphClient> {
    config: DgraphConfig,
    strategy: Arc<dyn IdentifierStrategy>,
    guard: InitGuard<C>,
}

impl<C: DgraphTransport> DgraphDataAccessor<C> {
    /// An accessor that connects and applies the schema on first use.
    pub fn new(config: DgraphConfig, strategy: Arc<dyn IdentifierStrategy>) -> Self {
        Self {
            config,
            strategy,
            guard: InitGuard::new(),
        }
    }

    /// An accessor over an already-initialized transport. The caller
    /// owns the connection lifecycle (and the schema).
    pub fn with_client(client: C, strategy: Arc<dyn IdentifierStrategy>) -> Self {
        Self {
            config: DgraphConfig::default(),
            strategy,
            guard: InitGuard::ready(client),
        }
    }

    async fn client(&self) -> Result<Arc<C>> {
        let config = self.config.clone();
        self.guard
            .get_or_init(|| async move {
                let client = C::connect(&config).await?;
                let schema = config.schema.as_deref().unwrap_or(DEFAULT_SCHEMA);
                client.alter_schema(schema).await?;
                Ok(client)
            })
            .await
    }

    /// The resource's own IRI plus its parent container's, if any.
    fn placement(&self, identifier: &ResourceIdentifier) -> (String, Option<String>) {
        let parent = self
            .strategy
            .parent_container(identifier)
            .map(|parent| parent.path);
        (identifier.path.clone(), parent)
    }
}

#[async_trait]
impl<C: DgraphTransport> DataAccessor for DgraphDataAccessor<C> {
    fn can_handle(&self, representation: &Representation) -> Result<()> {
        if supports_quads(representation) {
            Ok(())
        } else {
            Err(AccessorError::UnsupportedMediaType)
        }
    }

    async fn get_data(&self, identifier: &ResourceIdentifier) -> Result<Vec<Quad>> {
        let client = self.client().await?;
        let response = client
            .query_with_vars(DATA_QUERY, identifier_vars(&identifier.path))
            .await?;
        Ok(decode_quads(&response, DATA_BLOCK))
    }

    async fn get_metadata(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<RepresentationMetadata> {
        let client = self.client().await?;
        let response = client
            .query_with_vars(METADATA_QUERY, identifier_vars(&identifier.path))
            .await?;
        let quads = decode_quads(&response, DATA_BLOCK);

        // Every stored resource has at least a type triple, so an empty
        // decode means the resource does not exist.
        if quads.is_empty() {
            return Err(AccessorError::NotFound);
        }

        let mut metadata = RepresentationMetadata::with_quads(identifier.clone(), quads);
        if !identifier.is_container() {
            metadata.set_content_type(vocab::INTERNAL_QUADS);
        }
        Ok(metadata)
    }

    async fn get_children(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Vec<RepresentationMetadata>> {
        let client = self.client().await?;
        let response = client
            .query_with_vars(CHILDREN_QUERY, identifier_vars(&identifier.path))
            .await?;
        Ok(decode_identifiers(&response, CHILDREN_BLOCK)
            .into_iter()
            .map(|child| RepresentationMetadata::new(ResourceIdentifier::new(child)))
            .collect())
    }

    async fn write_document(
        &self,
        identifier: &ResourceIdentifier,
        data: Vec<Quad>,
        metadata: &RepresentationMetadata,
    ) -> Result<()> {
        if data.iter().any(|quad| !quad.is_default_graph()) {
            return Err(AccessorError::NotImplemented(DEFAULT_GRAPH_MESSAGE.to_string()));
        }

        // The stored content type is this backend's own concern, not
        // user-supplied metadata.
        let metadata_quads = metadata.quads_without_content_type();

        let (name, parent) = self.placement(identifier);
        tracing::debug!(resource = %name, quads = data.len(), "Writing document");
        let request = write_request(&name, &metadata_quads, parent.as_deref(), Some(&data));
        self.client().await?.upsert(&request).await
    }

    async fn write_container(
        &self,
        identifier: &ResourceIdentifier,
        metadata: &RepresentationMetadata,
    ) -> Result<()> {
        let metadata_quads = metadata.quads_without_content_type();
        let (name, parent) = self.placement(identifier);
        tracing::debug!(resource = %name, "Writing container");
        let request = write_request(&name, &metadata_quads, parent.as_deref(), None);
        self.client().await?.upsert(&request).await
    }

    async fn delete_resource(&self, identifier: &ResourceIdentifier) -> Result<()> {
        let (name, parent) = self.placement(identifier);
        tracing::debug!(resource = %name, "Deleting resource");
        let request = delete_request(&name, parent.as_deref());
        self.client().await?.upsert(&request).await
    }
}
