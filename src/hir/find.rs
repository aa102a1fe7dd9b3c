//! Node lookup by path.
//!
//! The path is turned into a full raw absolute key, then every namespace node
//! in the tree is checked by building its own raw absolute path and comparing
//! bytes. There is no index: the tree is small and this keeps the finder
//! correct for multi-segment and parent-relative declarations without any
//! extra bookkeeping.

use std::borrow::Cow;
use std::ops::ControlFlow;

use crate::base::PathCursor;
use crate::error::{NamespaceError, Result};
use crate::syntax::{codec, text};
use crate::tree::{NamespaceTree, NodeFlags, NodeId};

use super::path::build_raw_absolute_path;
use super::walk::{self, WalkMode};

/// A path to look up, as ASL text or encoded bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathInput<'a> {
    /// ASL text, e.g. `\_SB.PCI0` or `^^CCCC`.
    Asl(&'a str),
    /// An encoded name.
    Aml(&'a [u8]),
}

impl<'a> PathInput<'a> {
    fn to_aml(self) -> Result<Cow<'a, [u8]>> {
        match self {
            PathInput::Asl(path) => text::asl_to_aml(path).map(Cow::Owned),
            PathInput::Aml(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

/// Resolve `path`, evaluated in the scope of `reference`, to the node it names.
pub fn find_node(
    tree: &NamespaceTree,
    reference: NodeId,
    path: PathInput<'_>,
    capacity: usize,
) -> Result<NodeId> {
    tree.try_node(reference)?;
    let root = tree.root_of(reference);
    if !tree.is_root(root) {
        return Err(NamespaceError::invalid_parameter(format!(
            "{reference} is not attached to a root"
        )));
    }
    let aml = path.to_aml()?;

    let mut key = PathCursor::backward(capacity)?;
    key.write(&aml)?;
    let prefix = codec::strip_prefix(&mut key)?;

    if !prefix.has_root {
        let scope = walk::enclosing_scope(tree, reference, WalkMode::Complete).ok_or_else(|| {
            NamespaceError::invalid_parameter(format!("{reference} is not inside any scope"))
        })?;
        if tree.is_root(scope) {
            if prefix.parent_levels != 0 {
                return Err(NamespaceError::invalid_parameter(format!(
                    "{path:?} climbs {} level(s) above the root",
                    prefix.parent_levels
                )));
            }
        } else {
            build_raw_absolute_path(tree, scope, prefix.parent_levels, WalkMode::Complete, &mut key)?;
        }
    }

    if key.is_empty() {
        return Ok(root);
    }

    let mut node_path = PathCursor::backward(capacity)?;
    let found = tree.walk(root, |node| {
        if node == root
            || !tree.has_flags(node, NodeFlags::NAMESPACE)
            || tree.name(node).is_none()
        {
            return ControlFlow::Continue(());
        }
        node_path.reset();
        if let Err(err) =
            build_raw_absolute_path(tree, node, 0, WalkMode::Complete, &mut node_path)
        {
            // Nodes whose own path cannot be built can never match.
            tracing::trace!("[FIND] skipping {}: {}", node, err);
            return ControlFlow::Continue(());
        }
        if node_path.as_bytes() == key.as_bytes() {
            tracing::trace!("[FIND] {:?} matched {}", path, node);
            ControlFlow::Break(node)
        } else {
            ControlFlow::Continue(())
        }
    });

    match found {
        Some(node) => Ok(node),
        None => {
            tracing::debug!("[FIND] {:?} from {} matched nothing", path, reference);
            Err(NamespaceError::not_found(format!("{path:?}")))
        }
    }
}
