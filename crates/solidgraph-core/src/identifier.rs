//! Resource identifiers and the parent-container strategy.

use serde::{Deserialize, Serialize};

/// An IRI identifying a stored resource. Containers end with `/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    pub path: String,
}

impl ResourceIdentifier {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn is_container(&self) -> bool {
        self.path.ends_with('/')
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Host-framework collaborator computing containment placement.
///
/// Every identifier except the root container has exactly one parent
/// container; the root has none.
pub trait IdentifierStrategy: Send + Sync {
    fn is_root_container(&self, identifier: &ResourceIdentifier) -> bool;

    /// The parent container, or `None` for the root container.
    fn parent_container(&self, identifier: &ResourceIdentifier) -> Option<ResourceIdentifier>;
}

/// Strategy for a server with a single root container.
#[derive(Debug, Clone)]
pub struct SingleRootIdentifierStrategy {
    root: String,
}

impl SingleRootIdentifierStrategy {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        Self { root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

impl IdentifierStrategy for SingleRootIdentifierStrategy {
    fn is_root_container(&self, identifier: &ResourceIdentifier) -> bool {
        identifier.path == self.root
    }

    fn parent_container(&self, identifier: &ResourceIdentifier) -> Option<ResourceIdentifier> {
        if self.is_root_container(identifier) {
            return None;
        }
        let trimmed = identifier.path.trim_end_matches('/');
        let cut = trimmed.rfind('/')?;
        Some(ResourceIdentifier::new(&identifier.path[..cut + 1]))
    }
}
