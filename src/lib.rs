//! # aml-namespace
//!
//! Namespace path resolution for AML, the binary form of ACPI description
//! tables: decoding name prefixes, building absolute paths, finding nodes by
//! path, and deciding whether a bareword invokes a previously defined method.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Analysis façade and namespace listing
//!   ↓
//! hir     → Scope walking, path building, finder, catalog, resolver
//!   ↓
//! tree    → Arena-backed namespace tree
//!   ↓
//! syntax  → Name prefix codec and ASL text conversion
//!   ↓
//! base    → Primitives (NameSeg, PathCursor)
//! ```

/// Foundation types: name segments and path cursors
pub mod base;

/// Resolver tunables
pub mod config;

/// Error type shared by every layer
pub mod error;

/// Namespace resolution: walker, builder, finder, catalog, resolver
pub mod hir;

/// Construction-pipeline facing APIs
pub mod ide;

/// Name syntax: binary prefixes and ASL text
pub mod syntax;

/// The namespace tree the resolver reads
pub mod tree;

pub use base::{Direction, NameSeg, PathCursor};
pub use config::ResolveConfig;
pub use error::{NamespaceError, Result};
pub use hir::{Invocation, InvocationResolver, MethodCatalog, PathInput, WalkMode};
pub use ide::Analysis;
pub use tree::{NamespaceTree, NodeFlags, NodeId, NodeKind, ObjectType};
