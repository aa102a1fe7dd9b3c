//! Absolute-path building: the raw root-to-leaf path of a node.
//!
//! The builder starts at the node, writes its segments into a backward
//! cursor, then climbs scope by scope, prepending each ancestor's segments.
//! The result has no prefix markers: it is the canonical comparison key used
//! by the finder and the method catalog.

use smol_str::SmolStr;

use crate::base::{NAME_SEG_SIZE, PathCursor};
use crate::error::{NamespaceError, Result};
use crate::syntax::{codec, text};
use crate::tree::{NamespaceTree, NodeId};

use super::walk::{self, WalkMode};

/// Write the raw absolute path of `node` into `out`, a backward cursor,
/// dropping the leaf-most `skip_levels` logical levels.
///
/// Anything already in `out` stays after the written path, so a relative
/// tail can be written first and its absolute head prepended here.
pub fn build_raw_absolute_path(
    tree: &NamespaceTree,
    node: NodeId,
    skip_levels: usize,
    mode: WalkMode,
    out: &mut PathCursor,
) -> Result<()> {
    tree.try_node(node)?;
    let mut node = node;
    let mut skip = skip_levels;

    while !tree.is_root(node) {
        let name = tree
            .name(node)
            .ok_or_else(|| NamespaceError::invalid_parameter(format!("{node} has no name")))?;
        let prefix = codec::decode(name)
            .map_err(|err| NamespaceError::invalid_parameter(format!("{node}: {err}")))?;
        let segments = codec::raw_segments(name)
            .map_err(|err| NamespaceError::invalid_parameter(format!("{node}: {err}")))?;

        if prefix.segment_count > skip {
            let keep = prefix.segment_count - skip;
            out.write(&segments[..keep * NAME_SEG_SIZE])?;
            skip = 0;
        } else {
            skip -= prefix.segment_count;
        }
        skip += prefix.parent_levels;

        if prefix.has_root {
            if skip != 0 {
                return Err(NamespaceError::invalid_parameter(format!(
                    "path of {node} climbs {skip} level(s) above the root"
                )));
            }
            return Ok(());
        }

        let climb = walk::climb_scopes(tree, node, skip, mode)?;
        node = climb.node;
        skip = climb.remaining;
    }

    if skip != 0 {
        return Err(NamespaceError::invalid_parameter(format!(
            "cannot skip {skip} level(s) above the root"
        )));
    }
    Ok(())
}

/// The raw absolute path of `node` as an owned buffer.
pub fn raw_absolute_path(
    tree: &NamespaceTree,
    node: NodeId,
    mode: WalkMode,
    capacity: usize,
) -> Result<Vec<u8>> {
    let mut cursor = PathCursor::backward(capacity)?;
    build_raw_absolute_path(tree, node, 0, mode, &mut cursor)?;
    Ok(cursor.to_vec())
}

/// The absolute ASL path of `node`, e.g. `\_SB.PCI0.MET0`. The root is `\`.
pub fn asl_path(tree: &NamespaceTree, node: NodeId, capacity: usize) -> Result<SmolStr> {
    let mut cursor = PathCursor::backward(capacity)?;
    build_raw_absolute_path(tree, node, 0, WalkMode::Complete, &mut cursor)?;
    codec::add_absolute_prefix(&mut cursor)?;
    text::aml_to_asl(cursor.as_bytes())
}
