//! Invocation resolution: deciding whether a bareword is a method call.
//!
//! The candidate name is turned into a search key and matched against the
//! [`MethodCatalog`]. Several entries can match a bare name (`MET0` may be
//! defined at `\MET0` and at `\AAAA.MET0`), so each match is scored by how
//! much of its scope it shares with the use site:
//!
//! 1. An entry whose scope is exactly the use-site scope wins outright.
//! 2. Otherwise the longest shared scope prefix wins.
//! 3. Equal non-zero prefixes prefer the shorter path; equal lengths are
//!    ambiguous.
//!
//! Aliases are followed from the alias's own parent until a method, a
//! non-method, or a loop is reached.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{PathCursor, common_prefix_len};
use crate::config::ResolveConfig;
use crate::error::{NamespaceError, Result};
use crate::syntax::{codec, text};
use crate::tree::{NamespaceTree, NodeFlags, NodeId, NodeKind};

use super::catalog::{MethodCatalog, MethodRef};
use super::path::{build_raw_absolute_path, raw_absolute_path};
use super::walk::{self, WalkMode};

/// Outcome of [`InvocationResolver::resolve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// The bareword calls this method.
    Target(NodeId),
    /// The bareword is a plain object reference.
    NotInvocation,
}

impl Invocation {
    /// The invoked method, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Invocation::Target(node) => Some(*node),
            Invocation::NotInvocation => None,
        }
    }

    /// Check whether the bareword is a call.
    pub fn is_invocation(&self) -> bool {
        matches!(self, Invocation::Target(_))
    }
}

/// How a search key is compared with catalog paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyMatch {
    /// Bare name: any entry ending with the key's segments.
    Suffix,
    /// Absolute or parent-relative name: the whole path must match.
    Anchored,
}

/// The best catalog entry seen so far.
struct Best<'c> {
    entry: &'c MethodRef,
    prefix_len: usize,
    ambiguous: bool,
}

/// Resolves barewords against a tree and its method catalog.
pub struct InvocationResolver<'a> {
    tree: &'a NamespaceTree,
    catalog: &'a MethodCatalog,
    config: ResolveConfig,
}

impl<'a> InvocationResolver<'a> {
    /// Create a resolver with default limits.
    pub fn new(tree: &'a NamespaceTree, catalog: &'a MethodCatalog) -> Self {
        Self {
            tree,
            catalog,
            config: ResolveConfig::default(),
        }
    }

    /// Use custom limits.
    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    /// Decide whether `candidate`, written at `use_site`, invokes a method.
    pub fn resolve(&self, use_site: NodeId, candidate: &str) -> Result<Invocation> {
        self.tree.try_node(use_site)?;
        let mut site = use_site;
        let mut name = SmolStr::new(candidate);
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();

        loop {
            if self.tree.has_flags(site, NodeFlags::FIELD_MEMBER) {
                tracing::trace!("[INVOKE] {} at field member {}", name, site);
                return Ok(Invocation::NotInvocation);
            }

            let Some(best) = self.best_match(site, &name)? else {
                tracing::trace!("[INVOKE] {} at {}: no candidate", name, site);
                return Ok(Invocation::NotInvocation);
            };
            let node = best.node();

            match self.tree.kind(node) {
                kind if kind.is_method() => {
                    tracing::debug!("[INVOKE] {} at {} calls {}", candidate, use_site, node);
                    return Ok(Invocation::Target(node));
                }
                NodeKind::Alias { source } => {
                    if !visited.insert(node) || visited.len() > self.config.max_alias_depth {
                        tracing::debug!("[INVOKE] alias chain through {} does not end", node);
                        return Err(NamespaceError::AliasCycle(format!(
                            "'{candidate}' aliases back onto {node}"
                        )));
                    }
                    site = self.tree.parent(node).ok_or_else(|| {
                        NamespaceError::invalid_parameter(format!("alias {node} is detached"))
                    })?;
                    tracing::trace!("[INVOKE] {} is an alias of {}", node, source);
                    name = source.clone();
                }
                _ => return Ok(Invocation::NotInvocation),
            }
        }
    }

    /// Pick the catalog entry `name` refers to from `site`.
    fn best_match(&self, site: NodeId, name: &str) -> Result<Option<&'a MethodRef>> {
        let capacity = self.config.scratch_capacity;
        let aml = text::asl_to_aml(name)?;

        let mut key = PathCursor::backward(capacity)?;
        key.write(&aml)?;
        let prefix = codec::strip_prefix(&mut key)?;

        let scope = walk::enclosing_scope(self.tree, site, WalkMode::Construction)
            .ok_or_else(|| NamespaceError::invalid_parameter(format!("{site} has no scope")))?;

        let mode = if prefix.is_bare() {
            KeyMatch::Suffix
        } else {
            if !prefix.has_root {
                if self.tree.is_root(scope) {
                    return Err(NamespaceError::invalid_parameter(format!(
                        "'{name}' climbs above the root"
                    )));
                }
                build_raw_absolute_path(
                    self.tree,
                    scope,
                    prefix.parent_levels,
                    WalkMode::Construction,
                    &mut key,
                )?;
            }
            KeyMatch::Anchored
        };

        let key = key.as_bytes();
        if key.is_empty() {
            return Ok(None);
        }

        let site_path = raw_absolute_path(self.tree, scope, WalkMode::Construction, capacity)?;
        let mut best: Option<Best<'a>> = None;

        for entry in self.catalog.iter() {
            let path = entry.path();
            let matched = match mode {
                KeyMatch::Suffix => path.ends_with(key),
                KeyMatch::Anchored => path == key,
            };
            if !matched {
                continue;
            }

            let entry_scope = &path[..path.len() - key.len()];
            let prefix_len = common_prefix_len(entry_scope, &site_path);
            tracing::trace!(
                "[INVOKE] {} candidate {} shares {} byte(s)",
                name,
                entry.node(),
                prefix_len
            );

            if entry_scope.len() == prefix_len && prefix_len == site_path.len() {
                return Ok(Some(entry));
            }

            let Some(current) = best.as_mut() else {
                best = Some(Best {
                    entry,
                    prefix_len,
                    ambiguous: false,
                });
                continue;
            };
            let tied = prefix_len == current.prefix_len && prefix_len != 0;
            if prefix_len > current.prefix_len || (tied && entry.len() < current.entry.len()) {
                *current = Best {
                    entry,
                    prefix_len,
                    ambiguous: false,
                };
            } else if tied && entry.len() == current.entry.len() {
                current.ambiguous = true;
            }
        }

        match best {
            Some(best) if best.ambiguous => {
                tracing::debug!("[INVOKE] '{}' at {} is ambiguous", name, site);
                Err(NamespaceError::invalid_parameter(format!(
                    "'{name}' is ambiguous at {site}"
                )))
            }
            Some(best) => Ok(Some(best.entry)),
            None => Ok(None),
        }
    }
}

/// Fixed argument count of a method or an external method declaration.
pub fn method_arity(tree: &NamespaceTree, node: NodeId) -> Result<u8> {
    match tree.try_node(node)?.kind() {
        NodeKind::Method { flags } => Ok(flags & 0x07),
        NodeKind::External { arg_count, .. } => Ok(*arg_count),
        other => Err(NamespaceError::invalid_parameter(format!(
            "{node} is a {}, not a method",
            other.display()
        ))),
    }
}
