//! Type Hierarchy - subtype relationships among known classes.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `QualifiedName` of every class in the source, plus every supertype
//!   they reference (unknown supertypes become leaf nodes)
//! - Edges: `Extends` (superclass) and `Implements` (interface), pointing from
//!   subtype to supertype
//!
//! Nodes are addressed by [`TypeHash`], so lookups never follow live objects and
//! malformed (cyclic) inputs cannot cause unbounded walks.

use std::collections::VecDeque;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use xmlbind_core::{QualifiedName, TypeHash};

use crate::ClassSource;

/// Edge types in the hierarchy graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupertypeEdge {
    /// Subtype extends the target class.
    Extends,
    /// Subtype implements (or, for interfaces, extends) the target interface.
    Implements,
}

/// Arena-style inheritance graph.
#[derive(Debug, Default)]
pub struct TypeHierarchy {
    graph: DiGraph<QualifiedName, SupertypeEdge>,
    index: FxHashMap<TypeHash, NodeIndex>,
}

impl TypeHierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the hierarchy for every class in a source.
    pub fn from_source<S: ClassSource>(source: &S) -> Self {
        let mut hierarchy = Self::new();
        for class in source.classes() {
            let sub = hierarchy.get_or_create(&class.name);
            if let Some(superclass) = &class.superclass {
                let sup = hierarchy.get_or_create(superclass);
                hierarchy.add_edge(sub, sup, SupertypeEdge::Extends);
            }
            for interface in &class.interfaces {
                let sup = hierarchy.get_or_create(interface);
                hierarchy.add_edge(sub, sup, SupertypeEdge::Implements);
            }
        }
        hierarchy
    }

    fn get_or_create(&mut self, name: &QualifiedName) -> NodeIndex {
        let hash = name.to_type_hash();
        if let Some(&node) = self.index.get(&hash) {
            return node;
        }
        let node = self.graph.add_node(name.clone());
        self.index.insert(hash, node);
        node
    }

    fn add_edge(&mut self, sub: NodeIndex, sup: NodeIndex, kind: SupertypeEdge) {
        if self.graph.edges(sub).any(|e| e.target() == sup) {
            return;
        }
        self.graph.add_edge(sub, sup, kind);
    }

    fn node(&self, name: &QualifiedName) -> Option<NodeIndex> {
        self.index.get(&name.to_type_hash()).copied()
    }

    /// Number of types in the graph.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check if a type is part of the graph.
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.node(name).is_some()
    }

    /// Direct supertypes of a type, in declaration order (superclass first).
    pub fn direct_supertypes(&self, name: &QualifiedName) -> Vec<&QualifiedName> {
        let Some(node) = self.node(name) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        // petgraph yields outgoing edges newest-first; restore declaration order
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, n)| &self.graph[n]).collect()
    }

    /// All transitive supertypes, nearest first (breadth-first).
    pub fn ancestors(&self, name: &QualifiedName) -> Vec<&QualifiedName> {
        let Some(start) = self.node(name) else {
            return Vec::new();
        };
        let mut seen = FxHashSet::default();
        seen.insert(start);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(node) = queue.pop_front() {
            for sup in self.direct_supertypes(&self.graph[node]) {
                let Some(sup_node) = self.node(sup) else {
                    continue;
                };
                if seen.insert(sup_node) {
                    out.push(&self.graph[sup_node]);
                    queue.push_back(sup_node);
                }
            }
        }
        out
    }

    /// Check if `sub` is `sup` or one of its transitive subtypes.
    pub fn is_subtype(&self, sub: &QualifiedName, sup: &QualifiedName) -> bool {
        sub == sup || self.ancestors(sub).into_iter().any(|a| a == sup)
    }
}
