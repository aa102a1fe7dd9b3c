//! Namespace resolution over a [`NamespaceTree`](crate::tree::NamespaceTree).
//!
//! Layers, leaves first:
//!
//! - [`walk`] - Climbing from a node to its enclosing scopes
//! - [`path`] - Building the raw absolute path of a node
//! - [`find`] - Looking a path up by full-tree comparison
//! - [`catalog`] - The method-reference catalog filled during construction
//! - [`resolve`] - Deciding whether a bareword invokes a method
//!
//! Everything here only reads the tree.

pub mod catalog;
pub mod find;
pub mod path;
pub mod resolve;
pub mod walk;

pub use catalog::{MethodCatalog, MethodRef};
pub use find::{PathInput, find_node};
pub use path::{asl_path, build_raw_absolute_path, raw_absolute_path};
pub use resolve::{Invocation, InvocationResolver, method_arity};
pub use walk::{ScopeClimb, WalkMode, climb_scopes, enclosing_scope, nearest_scope};
