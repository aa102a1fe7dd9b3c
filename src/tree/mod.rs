//! Arena-backed namespace tree.
//!
//! Nodes live in a single vector and refer to each other by [`NodeId`].
//! Children are owned by their parent's child list; the parent link is a
//! plain back-reference. The resolver layers in [`crate::hir`] only read the
//! tree; building it is the construction pipeline's job.

mod ids;
mod node;

use std::ops::ControlFlow;

pub use ids::NodeId;
pub use node::{Node, NodeFlags, NodeKind, ObjectType};

use crate::error::{NamespaceError, Result};
use crate::syntax::text::asl_to_aml;

/// A namespace tree rooted at `\`.
#[derive(Clone, Debug)]
pub struct NamespaceTree {
    nodes: Vec<Node>,
}

impl NamespaceTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None)],
        }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Add an unnamed child under `parent`.
    pub fn add_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Add a child under `parent` with an encoded name.
    pub fn add_named(&mut self, parent: NodeId, kind: NodeKind, name: &[u8]) -> NodeId {
        let id = self.add_node(parent, kind);
        self.set_name(id, name);
        id
    }

    /// Add a child under `parent` named by ASL text.
    pub fn add_asl(&mut self, parent: NodeId, kind: NodeKind, name: &str) -> Result<NodeId> {
        let encoded = asl_to_aml(name)?;
        Ok(self.add_named(parent, kind, &encoded))
    }

    /// Assign (or replace) a node's name once its defining construct is done.
    pub fn set_name(&mut self, node: NodeId, name: &[u8]) {
        self.nodes[node.index()].name = Some(name.into());
    }

    /// Add capability flags to a node.
    pub fn insert_flags(&mut self, node: NodeId, flags: NodeFlags) {
        self.nodes[node.index()].flags.insert(flags);
    }

    /// Unlink a node from its parent. The node and its subtree stay in the
    /// arena but are no longer reachable from the root.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != node);
        }
    }

    /// Look up a node.
    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    /// Look up a node passed in from outside, rejecting ids this tree never
    /// allocated.
    pub fn try_node(&self, node: NodeId) -> Result<&Node> {
        self.get(node).ok_or_else(|| {
            NamespaceError::invalid_parameter(format!("{node} does not belong to this tree"))
        })
    }

    /// Look up a node that is known to belong to this tree.
    #[inline]
    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node.index()]
    }

    /// What a node was built from.
    #[inline]
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.node(node).kind
    }

    /// Capability flags of a node.
    #[inline]
    pub fn flags(&self, node: NodeId) -> NodeFlags {
        self.node(node).flags
    }

    /// Check whether a node carries all of `flags`.
    #[inline]
    pub fn has_flags(&self, node: NodeId, flags: NodeFlags) -> bool {
        self.node(node).flags.contains(flags)
    }

    /// Check whether a node is the namespace root.
    #[inline]
    pub fn is_root(&self, node: NodeId) -> bool {
        matches!(self.node(node).kind, NodeKind::Root)
    }

    /// The current assigned name, if any.
    #[inline]
    pub fn name(&self, node: NodeId) -> Option<&[u8]> {
        self.node(node).name()
    }

    /// Parent of a node.
    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// Children of a node.
    #[inline]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// The topmost ancestor of a node: the root for attached nodes.
    pub fn root_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Number of ancestors between a node and its topmost ancestor.
    pub fn depth(&self, node: NodeId) -> usize {
        std::iter::successors(self.parent(node), |&n| self.parent(n)).count()
    }

    /// Visit `start` and every node below it in preorder, stopping early when
    /// `visit` breaks.
    pub fn walk<B>(
        &self,
        start: NodeId,
        mut visit: impl FnMut(NodeId) -> ControlFlow<B>,
    ) -> Option<B> {
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if let ControlFlow::Break(value) = visit(node) {
                return Some(value);
            }
            stack.extend(self.children(node).iter().rev());
        }
        None
    }

    /// Total number of nodes ever allocated, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}
