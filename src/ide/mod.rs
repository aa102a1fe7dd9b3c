//! Construction-pipeline facing APIs.
//!
//! This module is the surface the table compiler talks to while it builds
//! and checks a namespace. Lower layers live in [`crate::hir`].
//!
//! ## Design Principles
//!
//! 1. **Pure queries**: Take a tree and catalog in, return data out
//! 2. **Caller-owned state**: The catalog is passed in, never global
//!
//! ## Usage
//!
//! ```
//! use amlns::hir::MethodCatalog;
//! use amlns::ide::Analysis;
//! use amlns::tree::{NamespaceTree, NodeKind};
//!
//! let mut tree = NamespaceTree::new();
//! let root = tree.root();
//! let method = tree.add_asl(root, NodeKind::Method { flags: 2 }, "MET0").unwrap();
//!
//! let mut catalog = MethodCatalog::new();
//! catalog.record(&tree, method).unwrap();
//!
//! let analysis = Analysis::new(&tree, &catalog);
//! assert_eq!(analysis.is_method_invocation(root, "MET0").unwrap(), Some(method));
//! assert_eq!(analysis.method_arity(method).unwrap(), 2);
//! ```

mod analysis;
mod listing;

pub use analysis::Analysis;
pub use listing::{NamespaceEntry, namespace_listing, print_namespace};
