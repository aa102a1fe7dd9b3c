//! The query façade over a built (or building) namespace.

use smol_str::SmolStr;

use crate::config::ResolveConfig;
use crate::error::Result;
use crate::hir::{self, InvocationResolver, MethodCatalog, PathInput};
use crate::tree::{NamespaceTree, NodeId};

use super::listing::{NamespaceEntry, namespace_listing};

/// Read-only view of a tree and its method catalog.
///
/// Cheap to create; make a new one whenever the tree has changed.
#[derive(Clone, Copy, Debug)]
pub struct Analysis<'a> {
    tree: &'a NamespaceTree,
    catalog: &'a MethodCatalog,
    config: ResolveConfig,
}

impl<'a> Analysis<'a> {
    /// View `tree` and `catalog` with the default configuration.
    pub fn new(tree: &'a NamespaceTree, catalog: &'a MethodCatalog) -> Self {
        Self::with_config(tree, catalog, ResolveConfig::default())
    }

    /// View `tree` and `catalog` with explicit scratch and alias limits.
    pub fn with_config(
        tree: &'a NamespaceTree,
        catalog: &'a MethodCatalog,
        config: ResolveConfig,
    ) -> Self {
        Self {
            tree,
            catalog,
            config,
        }
    }

    /// The namespace tree being queried.
    pub fn tree(&self) -> &'a NamespaceTree {
        self.tree
    }

    /// The recorded method declarations.
    pub fn catalog(&self) -> &'a MethodCatalog {
        self.catalog
    }

    /// Limits applied to every query.
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// The method `candidate` invokes when written at `parent`, or `None` when
    /// it is a plain reference.
    pub fn is_method_invocation(&self, parent: NodeId, candidate: &str) -> Result<Option<NodeId>> {
        let invocation = InvocationResolver::new(self.tree, self.catalog)
            .with_config(self.config)
            .resolve(parent, candidate)?;
        Ok(invocation.target())
    }

    /// Look up an ASL path relative to `reference`.
    pub fn find_node(&self, reference: NodeId, path: &str) -> Result<NodeId> {
        hir::find_node(
            self.tree,
            reference,
            PathInput::Asl(path),
            self.config.scratch_capacity,
        )
    }

    /// Look up an encoded name relative to `reference`.
    pub fn find_node_aml(&self, reference: NodeId, name: &[u8]) -> Result<NodeId> {
        hir::find_node(
            self.tree,
            reference,
            PathInput::Aml(name),
            self.config.scratch_capacity,
        )
    }

    /// Absolute ASL path of `node`.
    pub fn asl_path(&self, node: NodeId) -> Result<SmolStr> {
        hir::asl_path(self.tree, node, self.config.scratch_capacity)
    }

    /// Argument count of a method or external method declaration.
    pub fn method_arity(&self, node: NodeId) -> Result<u8> {
        hir::method_arity(self.tree, node)
    }

    /// Every named node with its absolute path.
    pub fn namespace_listing(&self) -> Result<Vec<NamespaceEntry>> {
        namespace_listing(self.tree, &self.config)
    }
}
