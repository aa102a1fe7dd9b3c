//! Method-reference catalog.
//!
//! The construction pipeline records every namespace node once its name is
//! fixed. Each entry keeps the node and its raw absolute path, so the
//! invocation resolver can match barewords without walking the tree again.

use indexmap::IndexMap;

use crate::config::ResolveConfig;
use crate::error::{NamespaceError, Result};
use crate::tree::{NamespaceTree, NodeId};

use super::path::raw_absolute_path;
use super::walk::WalkMode;

/// A recorded node and its raw absolute path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodRef {
    node: NodeId,
    path: Box<[u8]>,
}

impl MethodRef {
    /// The recorded node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Raw absolute path, segments only.
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Path length in bytes.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always false: empty paths are never recorded.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Entries in recording order, keyed by node.
#[derive(Clone, Debug)]
pub struct MethodCatalog {
    entries: IndexMap<NodeId, MethodRef>,
    capacity: usize,
}

impl MethodCatalog {
    /// Create an empty catalog with default scratch sizing.
    pub fn new() -> Self {
        Self::with_config(&ResolveConfig::default())
    }

    /// Create an empty catalog sized by `config`.
    pub fn with_config(config: &ResolveConfig) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: config.scratch_capacity,
        }
    }

    /// Record `node` now that its name is assigned.
    ///
    /// Scopes whose names are still pending are skipped while climbing, so
    /// this can run before the enclosing constructs are finished.
    pub fn record(&mut self, tree: &NamespaceTree, node: NodeId) -> Result<()> {
        if tree.try_node(node)?.name().is_none() {
            return Err(NamespaceError::invalid_parameter(format!(
                "cannot record {node}: no name assigned"
            )));
        }
        if self.entries.contains_key(&node) {
            return Err(NamespaceError::invalid_parameter(format!(
                "{node} is already recorded"
            )));
        }

        let path = raw_absolute_path(tree, node, WalkMode::Construction, self.capacity)
            .inspect_err(|err| tracing::debug!("[CATALOG] record {} failed: {}", node, err))?;
        if path.is_empty() {
            return Ok(());
        }

        tracing::trace!("[CATALOG] record {} ({} bytes)", node, path.len());
        self.entries.insert(
            node,
            MethodRef {
                node,
                path: path.into_boxed_slice(),
            },
        );
        Ok(())
    }

    /// Drop the entry for `node`, keeping the order of the rest.
    pub fn delete(&mut self, node: NodeId) -> Option<MethodRef> {
        self.entries.shift_remove(&node)
    }

    /// Drop every entry.
    pub fn delete_all(&mut self) {
        self.entries.clear();
    }

    /// The entry for `node`, if recorded.
    pub fn get(&self, node: NodeId) -> Option<&MethodRef> {
        self.entries.get(&node)
    }

    /// Entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodRef> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MethodCatalog {
    fn default() -> Self {
        Self::new()
    }
}
