//! Dgraph connection management and transaction execution.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use dgraph_tonic::{Client, Mutate, Mutation, Operation, Query};
use serde_json::Value;

use solidgraph_core::config::DgraphConfig;
use solidgraph_core::error::{AccessorError, Result};

use crate::upsert::UpsertBuilder;

/// Total attempts per transaction, counting the first one.
const MAX_ATTEMPTS: u32 = 3;

/// Schema applied on first use unless the configuration overrides it:
/// the value-slot predicates, the exact-match `uri` index, the reversed
/// `container` edge, and the three node types.
pub const DEFAULT_SCHEMA: &str = "\
<uri>: string @index(exact) .
<blank>: string @index(exact) .
<container>: [uid] @reverse .
<language>: string @index(exact) .
<datatype>: string @index(exact) .
<_value.string>: string @index(exact) .
<_value.int>: int @index(int) .
<_value.float>: float @index(float) .
<_value.bool>: bool @index(bool) .
<_value.datetime>: dateTime @index(hour) .

type Entity {
  uri
  container
}
type EntityData {
  uri
  blank
  container
}
type Metadata {
  uri
  blank
  container
}";

/// The wire contract against the database: one administrative schema
/// alter, one parameterized read query, one auto-committing upsert.
///
/// `DgraphClient` is the production implementation; tests substitute
/// their own.
#[async_trait]
pub trait DgraphTransport: Sized + Send + Sync + 'static {
    async fn connect(config: &DgraphConfig) -> Result<Self>;

    async fn alter_schema(&self, schema: &str) -> Result<()>;

    async fn query_with_vars(&self, query: &str, vars: HashMap<String, String>) -> Result<Value>;

    async fn upsert(&self, request: &UpsertBuilder) -> Result<()>;
}

/// Thin wrapper around the Dgraph gRPC client. The inner client sits
/// behind an `Arc`, so clones share the same channel pool.
#[derive(Clone)]
pub struct DgraphClient {
    client: Arc<Client>,
}

#[async_trait]
impl DgraphTransport for DgraphClient {
    async fn connect(config: &DgraphConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let client = Client::new(endpoint.clone())
            .map_err(|e| AccessorError::Database(format!("connection setup failed: {e}")))?;
        tracing::info!(endpoint = %endpoint, "Connected to Dgraph");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    async fn alter_schema(&self, schema: &str) -> Result<()> {
        let operation = Operation {
            schema: schema.to_string(),
            ..Default::default()
        };
        self.client.alter(operation).await.map_err(classify)?;
        tracing::debug!("Applied Dgraph schema");
        Ok(())
    }

    async fn query_with_vars(&self, query: &str, vars: HashMap<String, String>) -> Result<Value> {
        with_retry("query", || {
            let vars = vars.clone();
            async move {
                // Read-only transactions hold no server-side state; the
                // drop at the end of each attempt releases them.
                let mut txn = self.client.new_read_only_txn();
                let response = txn.query_with_vars(query, vars).await.map_err(classify)?;
                serde_json::from_slice(&response.json)
                    .map_err(|e| AccessorError::Database(format!("invalid response JSON: {e}")))
            }
        })
        .await
    }

    async fn upsert(&self, request: &UpsertBuilder) -> Result<()> {
        with_retry("upsert", || async move {
            let mut mutations = Vec::new();
            if !request.delete_statements().is_empty() {
                let mut mutation = Mutation::new();
                mutation.set_delete_nquads(request.delete_nquads());
                mutations.push(mutation);
            }
            if !request.set_statements().is_empty() {
                let mut mutation = Mutation::new();
                mutation.set_set_nquads(request.set_nquads());
                mutations.push(mutation);
            }

            let txn = self.client.new_mutated_txn();
            txn.upsert_and_commit_now(request.query_block(), mutations)
                .await
                .map_err(classify)?;
            Ok(())
        })
        .await
    }
}

/// Map a driver error onto the retry taxonomy: the abort signal of the
/// optimistic-transaction conflict, the transient unavailable set, or a
/// plain database error. The driver's message is preserved verbatim.
fn classify<E: Display>(error: E) -> AccessorError {
    let message = error.to_string();
    let lower = message.to_lowercase();
    if lower.contains("aborted") {
        AccessorError::Conflict(message)
    } else if lower.contains("unavailable")
        || lower.contains("connection refused")
        || lower.contains("broken pipe")
    {
        AccessorError::Unavailable(message)
    } else {
        AccessorError::Database(message)
    }
}

/// Run one transaction attempt up to [`MAX_ATTEMPTS`] times, retrying
/// only transient errors. The final error propagates unchanged.
pub(crate) async fn with_retry<T, F, Fut>(operation: &str, mut attempt_fn: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match attempt_fn().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < MAX_ATTEMPTS && error.is_transient() => {
                tracing::warn!(operation, attempt, error = %error, "Retrying Dgraph transaction");
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
