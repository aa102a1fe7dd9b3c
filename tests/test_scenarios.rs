//! End-to-end namespace scenarios.
//!
//! Builds small ACPI-shaped namespaces, records them the way the table
//! compiler does, then checks lookups and invocation decisions.
#![allow(clippy::unwrap_used)]

use amlns::hir::{self, WalkMode};
use amlns::ide::{Analysis, namespace_listing};
use amlns::{
    Invocation, InvocationResolver, MethodCatalog, NamespaceError, NamespaceTree, NodeId, NodeKind,
    ResolveConfig,
};
use rstest::rstest;
use smol_str::SmolStr;

// ============================================================================
// HELPERS
// ============================================================================

struct Namespace {
    tree: NamespaceTree,
    catalog: MethodCatalog,
}

impl Namespace {
    fn new() -> Self {
        Self {
            tree: NamespaceTree::new(),
            catalog: MethodCatalog::new(),
        }
    }

    fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Add a node and record it, as the construction pipeline does.
    fn define(&mut self, parent: NodeId, kind: NodeKind, name: &str) -> NodeId {
        let node = self.tree.add_asl(parent, kind, name).unwrap();
        self.catalog.record(&self.tree, node).unwrap();
        node
    }

    fn scope(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.define(parent, NodeKind::Scope, name)
    }

    fn method(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.define(parent, NodeKind::Method { flags: 0 }, name)
    }

    fn alias(&mut self, parent: NodeId, source: &str, name: &str) -> NodeId {
        let kind = NodeKind::Alias {
            source: SmolStr::new(source),
        };
        self.define(parent, kind, name)
    }

    fn analysis(&self) -> Analysis<'_> {
        Analysis::new(&self.tree, &self.catalog)
    }
}

/// `\MET0`, `\AAAA`, `\AAAA.MET0`, `\AAAA.BBBB`, `\CCCC`.
struct Methods {
    ns: Namespace,
    top: NodeId,
    nested: NodeId,
    bbbb: NodeId,
    cccc: NodeId,
}

fn methods() -> Methods {
    let mut ns = Namespace::new();
    let root = ns.root();
    let top = ns.method(root, "MET0");
    let aaaa = ns.scope(root, "AAAA");
    let nested = ns.method(aaaa, "MET0");
    let bbbb = ns.scope(aaaa, "BBBB");
    let cccc = ns.scope(root, "CCCC");
    Methods {
        ns,
        top,
        nested,
        bbbb,
        cccc,
    }
}

// ============================================================================
// INVOCATION SCENARIOS
// ============================================================================

#[test]
fn test_use_site_below_nested_definition() {
    let mut m = methods();
    let term = m.ns.tree.add_node(m.bbbb, NodeKind::Other);

    let analysis = m.ns.analysis();
    assert_eq!(analysis.is_method_invocation(term, "MET0").unwrap(), Some(m.nested));
    assert_eq!(analysis.is_method_invocation(m.bbbb, "MET0").unwrap(), Some(m.nested));
}

#[test]
fn test_use_site_in_unrelated_scope() {
    let m = methods();
    assert_eq!(
        m.ns.analysis().is_method_invocation(m.cccc, "MET0").unwrap(),
        Some(m.top)
    );
}

#[rstest]
#[case("ALI1")]
#[case("\\ALI1")]
#[case("ALI0")]
fn test_alias_chain_resolves_to_method(#[case] candidate: &str) {
    let mut ns = Namespace::new();
    let root = ns.root();
    let target = ns.method(root, "MET0");
    ns.alias(root, "\\MET0", "ALI0");
    ns.alias(root, "\\ALI0", "ALI1");
    let aaaa = ns.scope(root, "AAAA");
    let bbbb = ns.scope(aaaa, "BBBB");

    for site in [root, aaaa, bbbb] {
        assert_eq!(
            ns.analysis().is_method_invocation(site, candidate).unwrap(),
            Some(target)
        );
    }
}

#[test]
fn test_alias_cycle_is_an_error() {
    let mut ns = Namespace::new();
    let root = ns.root();
    ns.alias(root, "\\ALI1", "ALI0");
    ns.alias(root, "\\ALI0", "ALI1");

    assert!(matches!(
        ns.analysis().is_method_invocation(root, "ALI0"),
        Err(NamespaceError::AliasCycle(_))
    ));
}

#[test]
fn test_resolution_is_pure() {
    let m = methods();
    let resolver = InvocationResolver::new(&m.ns.tree, &m.ns.catalog);
    let before: Vec<_> = m.ns.catalog.iter().cloned().collect();

    let first = resolver.resolve(m.bbbb, "MET0").unwrap();
    let second = resolver.resolve(m.bbbb, "MET0").unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Invocation::Target(m.nested));

    let after: Vec<_> = m.ns.catalog.iter().cloned().collect();
    assert_eq!(before, after);
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_closer_scope_beats_longer_path(#[case] near_first: bool) {
    let mut ns = Namespace::new();
    let root = ns.root();
    let xxxx = ns.scope(root, "XXXX");
    let yyyy = ns.scope(xxxx, "YYYY");
    let zzzz = ns.scope(root, "ZZZZ");
    let wwww = ns.scope(zzzz, "WWWW");

    let (near, far) = if near_first {
        let near = ns.method(xxxx, "MET0");
        (near, ns.method(wwww, "MET0"))
    } else {
        let far = ns.method(wwww, "MET0");
        (ns.method(xxxx, "MET0"), far)
    };

    let analysis = ns.analysis();
    assert_eq!(analysis.is_method_invocation(yyyy, "MET0").unwrap(), Some(near));
    assert_eq!(analysis.is_method_invocation(wwww, "MET0").unwrap(), Some(far));
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_equal_scope_prefers_shorter_path(#[case] short_first: bool) {
    let mut ns = Namespace::new();
    let root = ns.root();
    let aaaa = ns.scope(root, "AAAA");
    let bbbb = ns.scope(aaaa, "BBBB");
    let cccc = ns.scope(aaaa, "CCCC");

    let short = if short_first {
        let short = ns.method(aaaa, "MET0");
        ns.method(cccc, "MET0");
        short
    } else {
        ns.method(cccc, "MET0");
        ns.method(aaaa, "MET0")
    };

    assert_eq!(
        ns.analysis().is_method_invocation(bbbb, "MET0").unwrap(),
        Some(short)
    );
}

#[rstest]
#[case::closer_scope("BBBB")]
#[case::shorter_path("")]
fn test_later_candidate_clears_tie(#[case] winner_scope: &str) {
    let mut ns = Namespace::new();
    let root = ns.root();
    let aaaa = ns.scope(root, "AAAA");
    let bbbb = ns.scope(aaaa, "BBBB");
    let dddd = ns.scope(bbbb, "DDDD");
    let cccc = ns.scope(aaaa, "CCCC");
    let eeee = ns.scope(aaaa, "EEEE");
    ns.method(cccc, "MET0");
    ns.method(eeee, "MET0");

    assert!(matches!(
        ns.analysis().is_method_invocation(dddd, "MET0"),
        Err(NamespaceError::InvalidParameter(_))
    ));

    let parent = if winner_scope.is_empty() { aaaa } else { bbbb };
    let winner = ns.method(parent, "MET0");
    assert_eq!(
        ns.analysis().is_method_invocation(dddd, "MET0").unwrap(),
        Some(winner)
    );
}

#[test]
fn test_multi_segment_candidate() {
    let mut ns = Namespace::new();
    let root = ns.root();
    let aaaa = ns.scope(root, "AAAA");
    let bbbb = ns.scope(aaaa, "BBBB");
    let target = ns.method(bbbb, "MET0");
    let cccc = ns.scope(root, "CCCC");

    let analysis = ns.analysis();
    assert_eq!(analysis.is_method_invocation(cccc, "BBBB.MET0").unwrap(), Some(target));
    assert_eq!(analysis.is_method_invocation(cccc, "DDDD.MET0").unwrap(), None);
}

#[test]
fn test_unrecorded_method_is_not_an_invocation() {
    let mut ns = Namespace::new();
    let root = ns.root();
    ns.tree
        .add_asl(root, NodeKind::Method { flags: 0 }, "MET0")
        .unwrap();
    assert_eq!(ns.analysis().is_method_invocation(root, "MET0").unwrap(), None);
}

#[test]
fn test_deleted_entry_is_forgotten() {
    let mut m = methods();
    m.ns.catalog.delete(m.nested);
    assert_eq!(
        m.ns.analysis().is_method_invocation(m.bbbb, "MET0").unwrap(),
        Some(m.top)
    );
}

// ============================================================================
// FINDER SCENARIOS
// ============================================================================

#[rstest]
#[case::separate_scopes(&["AAAA", "BBBB"])]
#[case::relative_dual_name(&["AAAA.BBBB"])]
#[case::absolute_dual_name(&["\\AAAA.BBBB"])]
fn test_parent_relative_find_matches_absolute(#[case] chain: &[&str]) {
    let mut ns = Namespace::new();
    let root = ns.root();
    let cccc = ns.scope(root, "CCCC");
    let reference = chain
        .iter()
        .fold(root, |parent, name| ns.scope(parent, name));

    let analysis = ns.analysis();
    let relative = analysis.find_node(reference, "^^CCCC").unwrap();
    let absolute = analysis.find_node(reference, "\\CCCC").unwrap();
    assert_eq!(relative, absolute);
    assert_eq!(relative, cccc);
}

#[test]
fn test_empty_parent_name_climbs_to_root() {
    let mut ns = Namespace::new();
    let root = ns.root();
    let aaaa = ns.scope(root, "AAAA");
    let bbbb = ns.scope(aaaa, "BBBB");
    let up = ns.tree.add_asl(bbbb, NodeKind::Name, "^^").unwrap();

    let climb = hir::climb_scopes(&ns.tree, up, 2, WalkMode::Complete).unwrap();
    assert_eq!(climb.node, root);
    assert_eq!(climb.remaining, 0);
    assert!(!climb.has_root);
    assert_eq!(ns.analysis().asl_path(up).unwrap(), "\\");
}

#[test]
fn test_find_round_trips_through_asl_path() {
    let mut ns = Namespace::new();
    let root = ns.root();
    let sb = ns.scope(root, "\\_SB");
    let pci = ns.scope(sb, "PCI0");
    ns.method(pci, "_STA");
    let lpc = ns.scope(pci, "LPCB.EC0");
    ns.define(lpc, NodeKind::Name, "^^_HID");
    ns.method(lpc, "_REG");
    let term = ns.tree.add_node(lpc, NodeKind::Other);
    ns.define(term, NodeKind::Name, "BUF0");

    let analysis = ns.analysis();
    let listing = namespace_listing(&ns.tree, &ResolveConfig::default()).unwrap();
    assert_eq!(listing.len(), 8);

    for reference in [root, sb, pci, lpc] {
        for entry in &listing {
            let found = analysis.find_node(reference, &entry.path).unwrap();
            let again = analysis
                .find_node(reference, &analysis.asl_path(found).unwrap())
                .unwrap();
            assert_eq!(found, again);
        }
    }

    assert_eq!(
        analysis.find_node(lpc, "BUF0").map(|n| analysis.asl_path(n).unwrap()),
        Ok(SmolStr::new("\\_SB.PCI0.LPCB.EC0_.BUF0"))
    );
    assert_eq!(
        analysis.find_node(lpc, "^^_STA").map(|n| analysis.asl_path(n).unwrap()),
        Ok(SmolStr::new("\\_SB.PCI0._STA"))
    );
}

#[test]
fn test_find_missing_path() {
    let m = methods();
    assert!(matches!(
        m.ns.analysis().find_node(m.bbbb, "ZZZZ"),
        Err(NamespaceError::NotFound(_))
    ));
}
