//! Node kinds and capability flags.

use bitflags::bitflags;
use smol_str::SmolStr;

use super::NodeId;

bitflags! {
    /// Capabilities a node carries.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Defines a namespace entry with its own name.
        const NAMESPACE = 1 << 0;
        /// Opens a lookup scope for the names nested under it.
        const SCOPE = 1 << 1;
        /// Element of a field list.
        const FIELD_MEMBER = 1 << 2;
    }
}

/// Object type operand of an `External` declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Unknown,
    Integer,
    String,
    Buffer,
    Package,
    FieldUnit,
    Device,
    Event,
    Method,
    Mutex,
    Region,
    PowerResource,
    Processor,
    ThermalZone,
    BufferField,
    DdbHandle,
}

impl ObjectType {
    /// Decode the object type byte; unrecognised values map to `Unknown`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Integer,
            2 => Self::String,
            3 => Self::Buffer,
            4 => Self::Package,
            5 => Self::FieldUnit,
            6 => Self::Device,
            7 => Self::Event,
            8 => Self::Method,
            9 => Self::Mutex,
            10 => Self::Region,
            11 => Self::PowerResource,
            12 => Self::Processor,
            13 => Self::ThermalZone,
            14 => Self::BufferField,
            15 => Self::DdbHandle,
            _ => Self::Unknown,
        }
    }
}

/// What a node was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The namespace root `\`.
    Root,
    /// A scope-opening container: `Scope`, `Device`, `Processor`,
    /// `PowerResource`, `ThermalZone`.
    Scope,
    /// A method definition. The low three bits of `flags` are its arity.
    Method { flags: u8 },
    /// A forward/external declaration.
    External { object_type: ObjectType, arg_count: u8 },
    /// An alias; `source` is the ASL path of the aliased object.
    Alias { source: SmolStr },
    /// A named data object.
    Name,
    /// A field list container (`Field`, `IndexField`, `BankField`).
    Field,
    /// A named element of a field list.
    FieldUnit,
    /// Any unnamed term: operators, references, data.
    Other,
}

impl NodeKind {
    /// Capabilities nodes of this kind start with.
    pub fn default_flags(&self) -> NodeFlags {
        match self {
            NodeKind::Root | NodeKind::Scope | NodeKind::Method { .. } => {
                NodeFlags::NAMESPACE | NodeFlags::SCOPE
            }
            NodeKind::External { .. } | NodeKind::Alias { .. } | NodeKind::Name => {
                NodeFlags::NAMESPACE
            }
            NodeKind::FieldUnit => NodeFlags::NAMESPACE | NodeFlags::FIELD_MEMBER,
            NodeKind::Field | NodeKind::Other => NodeFlags::empty(),
        }
    }

    /// Check whether this node is something that can be invoked.
    pub fn is_method(&self) -> bool {
        matches!(
            self,
            NodeKind::Method { .. }
                | NodeKind::External {
                    object_type: ObjectType::Method,
                    ..
                }
        )
    }

    /// Human-readable kind name.
    pub fn display(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Scope => "scope",
            NodeKind::Method { .. } => "method",
            NodeKind::External { .. } => "external",
            NodeKind::Alias { .. } => "alias",
            NodeKind::Name => "name",
            NodeKind::Field => "field",
            NodeKind::FieldUnit => "field unit",
            NodeKind::Other => "term",
        }
    }
}

/// A node in the namespace tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub(super) kind: NodeKind,
    pub(super) flags: NodeFlags,
    /// Encoded name; `None` until the defining construct is complete.
    pub(super) name: Option<Box<[u8]>>,
    /// Non-owning back-reference.
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    pub(super) fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            flags: kind.default_flags(),
            kind,
            name: None,
            parent,
            children: Vec::new(),
        }
    }

    /// What this node was built from.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Capability flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// The encoded name, if assigned.
    pub fn name(&self) -> Option<&[u8]> {
        self.name.as_deref()
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Owned children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
