//! Namespace listing: every named node with its absolute path.
//!
//! Debug aid for the table compiler: dumps the namespace the way it would be
//! seen by a loaded table.

use std::fmt;
use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::config::ResolveConfig;
use crate::error::{NamespaceError, Result};
use crate::hir::asl_path;
use crate::tree::{NamespaceTree, NodeFlags, NodeId};

/// One line of the namespace listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub node: NodeId,
    /// Absolute ASL path
    pub path: SmolStr,
    /// Tree depth below the root
    pub depth: usize,
    /// Human-readable node kind
    pub kind: &'static str,
}

/// List the root and every named namespace node in preorder.
pub fn namespace_listing(
    tree: &NamespaceTree,
    config: &ResolveConfig,
) -> Result<Vec<NamespaceEntry>> {
    let mut entries = Vec::new();
    let failed = tree.walk(tree.root(), |node| {
        if !tree.is_root(node) && !tree.has_flags(node, NodeFlags::NAMESPACE) {
            return ControlFlow::Continue(());
        }
        match asl_path(tree, node, config.scratch_capacity) {
            Ok(path) => {
                entries.push(NamespaceEntry {
                    node,
                    path,
                    depth: tree.depth(node),
                    kind: tree.kind(node).display(),
                });
                ControlFlow::Continue(())
            }
            Err(err) => ControlFlow::Break(err),
        }
    });

    match failed {
        Some(err) => Err(err),
        None => Ok(entries),
    }
}

/// Write the listing to `out`, one indented line per node.
pub fn print_namespace(
    tree: &NamespaceTree,
    config: &ResolveConfig,
    out: &mut impl fmt::Write,
) -> Result<()> {
    for entry in namespace_listing(tree, config)? {
        writeln!(
            out,
            "{:indent$}{} [{}]",
            "",
            entry.path,
            entry.kind,
            indent = entry.depth * 2
        )
        .map_err(|_| NamespaceError::OutOfResources("namespace listing output failed".into()))?;
    }
    Ok(())
}
