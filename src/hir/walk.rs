//! Ancestor walking: climbing from a node to its enclosing scopes.
//!
//! Storage order and addressing order run opposite ways: a path reads root
//! to leaf, but the tree can only be climbed leaf to root. On top of that a
//! single scope may be declared with a multi-segment name (`AAAA.BBBB`) or a
//! parent-relative one (`^CCCC`), so one tree edge can stand for several
//! logical levels, or for a jump above the lexical parent. The climber here
//! accounts for both.

use crate::error::{NamespaceError, Result};
use crate::syntax::codec;
use crate::tree::{NamespaceTree, NodeFlags, NodeId};

/// How unnamed scope ancestors are treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WalkMode {
    /// Every scope node is a boundary; an unnamed one is an error.
    #[default]
    Complete,
    /// Scope nodes whose name is not assigned yet are skipped, as happens
    /// while the tree is still being built.
    Construction,
}

/// Where a scope climb stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScopeClimb {
    /// The node the climb stopped on.
    pub node: NodeId,
    /// The climb ended because it met an absolute name.
    pub has_root: bool,
    /// Trailing segments of `node`'s name still to be skipped.
    pub remaining: usize,
}

fn is_boundary(tree: &NamespaceTree, node: NodeId, mode: WalkMode) -> bool {
    if tree.is_root(node) {
        return true;
    }
    if !tree.has_flags(node, NodeFlags::SCOPE) {
        return false;
    }
    match mode {
        WalkMode::Complete => true,
        WalkMode::Construction => tree.name(node).is_some(),
    }
}

/// The closest ancestor that opens a scope, or the root.
///
/// Returns `None` for the root itself and for nodes cut off from any root.
pub fn nearest_scope(tree: &NamespaceTree, node: NodeId, mode: WalkMode) -> Option<NodeId> {
    if tree.is_root(node) {
        return None;
    }
    let mut current = tree.parent(node)?;
    loop {
        if is_boundary(tree, current, mode) {
            return Some(current);
        }
        current = tree.parent(current)?;
    }
}

/// The scope a reference made at `node` is evaluated in: the node itself when
/// it opens a scope, otherwise its nearest scope ancestor.
pub fn enclosing_scope(tree: &NamespaceTree, node: NodeId, mode: WalkMode) -> Option<NodeId> {
    if is_boundary(tree, node, mode) {
        Some(node)
    } else {
        nearest_scope(tree, node, mode)
    }
}

/// Climb `levels` logical scope levels above `node`.
///
/// Each visited scope's name is decoded. A name with several segments covers
/// several levels; when the climb runs out inside such a name it stops on
/// that node and reports how many of its trailing segments are left to skip.
/// A parent-relative name adds its markers back onto the climb.
pub fn climb_scopes(
    tree: &NamespaceTree,
    node: NodeId,
    levels: usize,
    mode: WalkMode,
) -> Result<ScopeClimb> {
    tree.try_node(node)?;
    let mut levels = levels;
    let mut current = node;

    loop {
        let Some(scope) = nearest_scope(tree, current, mode) else {
            tracing::debug!("[CLIMB] no scope above {} with {} level(s) left", current, levels);
            return Err(NamespaceError::invalid_parameter(format!(
                "no scope above {current} to climb {levels} level(s)"
            )));
        };

        if tree.is_root(scope) || levels == 0 {
            if levels != 0 {
                tracing::debug!("[CLIMB] {} level(s) left at the root", levels);
                return Err(NamespaceError::invalid_parameter(format!(
                    "climbed {levels} level(s) past the root"
                )));
            }
            return Ok(ScopeClimb {
                node: scope,
                has_root: false,
                remaining: 0,
            });
        }

        let name = tree.name(scope).ok_or_else(|| {
            NamespaceError::invalid_parameter(format!("scope {scope} has no name"))
        })?;
        let prefix = codec::decode(name)
            .map_err(|err| NamespaceError::invalid_parameter(format!("scope {scope}: {err}")))?;

        tracing::trace!(
            "[CLIMB] at {} levels={} segments={} parents={} root={}",
            scope,
            levels,
            prefix.segment_count,
            prefix.parent_levels,
            prefix.has_root
        );

        if prefix.has_root {
            return match levels.cmp(&prefix.segment_count) {
                std::cmp::Ordering::Less => Ok(ScopeClimb {
                    node: scope,
                    has_root: true,
                    remaining: levels,
                }),
                std::cmp::Ordering::Equal => Ok(ScopeClimb {
                    node: tree.root_of(scope),
                    has_root: true,
                    remaining: 0,
                }),
                std::cmp::Ordering::Greater => Err(NamespaceError::invalid_parameter(format!(
                    "climbed past the root through absolute scope {scope}"
                ))),
            };
        }

        if levels < prefix.segment_count {
            return Ok(ScopeClimb {
                node: scope,
                has_root: false,
                remaining: levels,
            });
        }

        // The whole name is consumed; its own parent markers lift the rest of
        // the climb above the lexical parent.
        levels = levels - prefix.segment_count + prefix.parent_levels;
        current = scope;
    }
}
