//! Polymorphism Resolver - merged matcher sets and dispatch ordering.
//!
//! A polymorphic field lists `(xml name, concrete type)` matchers explicitly,
//! relies on the generic-type registry for its declared open type, or both.
//!
//! ## Merging
//!
//! 1. Explicit matchers are taken in declaration order. A repeated identical
//!    pair is dropped; the same name mapping two types, or the same type under
//!    two names, is an error
//! 2. Generic entries for the declared type are appended unless an explicit
//!    matcher already names the same concrete type (the explicit name wins and
//!    the generic name is dropped)
//! 3. Every concrete type must be a known, instantiable, bindable, non-private,
//!    non-protected subtype of the declared type
//!
//! ## Dispatch Order
//!
//! Write-side code tests `instanceof` in sequence, so subtypes must be tested
//! before their ancestors:
//!
//! ```text
//! matchers: polygon -> Polygon, square -> Square, rounded -> Rounded, circle -> Circle
//!
//!   Polygon ──▶ Square ──▶ Rounded        Circle
//!
//! pre-order from roots:  Polygon, Square, Rounded, Circle
//! reversed (dispatch):   Circle, Rounded, Square, Polygon
//! ```
//!
//! Edges run from every in-set ancestor to every in-set descendant, including
//! relationships through types outside the set. A node is only visited once all
//! of its in-set parents have been, which keeps the order topological when
//! interfaces form diamonds. A cycle leaves nodes unvisited; the size check
//! reports that as an internal inconsistency.

use indexmap::IndexMap;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashSet;
use xmlbind_core::{BindingError, QualifiedName, path};
use xmlbind_registry::{ClassSource, TypeHierarchy};

use crate::context::ResolveContext;
use crate::model::{FieldRef, TypeMatcher};

/// Merged matchers and their dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolymorphism {
    pub matchers: Vec<TypeMatcher>,
    pub dispatch_order: Vec<TypeMatcher>,
}

/// Resolves polymorphic fields against the type hierarchy and generic registry.
pub struct PolymorphismResolver<'a, S> {
    ctx: ResolveContext<'a, S>,
}

impl<'a, S: ClassSource> PolymorphismResolver<'a, S> {
    pub fn new(ctx: ResolveContext<'a, S>) -> Self {
        Self { ctx }
    }

    /// Merge, validate and order the matchers of one polymorphic field.
    pub fn resolve(
        &self,
        field: &FieldRef,
        declared: &QualifiedName,
        explicit: &[TypeMatcher],
    ) -> Result<ResolvedPolymorphism, BindingError> {
        let merged = self.merge(field, declared, explicit)?;
        if merged.is_empty() {
            return Err(BindingError::MissingPolymorphismResolution {
                class: field.class.clone(),
                field: field.field.clone(),
                ty: declared.clone(),
            });
        }
        for matcher in &merged {
            self.validate_type(field, declared, &matcher.concrete)?;
        }

        let dispatch_order = dispatch_order(self.ctx.hierarchy, &merged);
        if dispatch_order.len() != merged.len() {
            return Err(BindingError::DispatchOrderInconsistent {
                class: field.class.clone(),
                field: field.field.clone(),
                expected: merged.len(),
                actual: dispatch_order.len(),
            });
        }

        tracing::trace!(
            field = %field,
            matchers = merged.len(),
            "resolved polymorphic field"
        );
        Ok(ResolvedPolymorphism {
            matchers: merged,
            dispatch_order,
        })
    }

    fn merge(
        &self,
        field: &FieldRef,
        declared: &QualifiedName,
        explicit: &[TypeMatcher],
    ) -> Result<Vec<TypeMatcher>, BindingError> {
        // name -> concrete type, in insertion order
        let mut merged: IndexMap<String, QualifiedName> = IndexMap::new();

        for matcher in explicit {
            if let Some(existing) = merged.get(&matcher.xml_name) {
                if *existing == matcher.concrete {
                    continue;
                }
                return Err(BindingError::MatcherNameConflict {
                    class: field.class.clone(),
                    field: field.field.clone(),
                    name: matcher.xml_name.clone(),
                    first: existing.clone(),
                    second: matcher.concrete.clone(),
                });
            }
            if let Some((name, _)) = merged.iter().find(|(_, ty)| **ty == matcher.concrete) {
                return Err(BindingError::DuplicateMatcherType {
                    class: field.class.clone(),
                    field: field.field.clone(),
                    ty: matcher.concrete.clone(),
                    first_name: name.clone(),
                    second_name: matcher.xml_name.clone(),
                });
            }
            merged.insert(matcher.xml_name.clone(), matcher.concrete.clone());
        }

        for entry in self.ctx.registry.entries_for(declared) {
            if merged.values().any(|ty| *ty == entry.concrete) {
                continue;
            }
            if let Some(existing) = merged.get(&entry.xml_name) {
                return Err(BindingError::MatcherNameConflict {
                    class: field.class.clone(),
                    field: field.field.clone(),
                    name: entry.xml_name,
                    first: existing.clone(),
                    second: entry.concrete,
                });
            }
            path::validate_name(&entry.xml_name).map_err(|source| BindingError::InvalidPath {
                class: field.class.clone(),
                field: field.field.clone(),
                source,
            })?;
            merged.insert(entry.xml_name, entry.concrete);
        }

        Ok(merged
            .into_iter()
            .map(|(xml_name, concrete)| TypeMatcher { xml_name, concrete })
            .collect())
    }

    fn validate_type(
        &self,
        field: &FieldRef,
        declared: &QualifiedName,
        ty: &QualifiedName,
    ) -> Result<(), BindingError> {
        let invalid = |reason: String| BindingError::InvalidMatcherType {
            class: field.class.clone(),
            field: field.field.clone(),
            ty: ty.clone(),
            reason,
        };

        let Some(class) = self.ctx.class(ty) else {
            return Err(invalid("the type is not known".to_string()));
        };
        if !self.ctx.hierarchy.is_subtype(ty, declared) {
            return Err(invalid(format!("it is not a subtype of '{declared}'")));
        }
        if class.is_abstract_type() {
            return Err(invalid("it is an interface or abstract class".to_string()));
        }
        if !class.visibility.is_public_or_package() {
            return Err(invalid(format!("it is {}", class.visibility)));
        }
        if !class.is_instantiable() {
            return Err(invalid(
                "it has no accessible no-argument constructor and no fully directived constructor"
                    .to_string(),
            ));
        }
        if !class.is_bindable() {
            return Err(invalid(
                "it does not carry the class-level binding directive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Order matchers so that every subtype precedes all of its ancestors.
///
/// Returns fewer entries than `matchers` if the hierarchy among them is cyclic.
pub fn dispatch_order(hierarchy: &TypeHierarchy, matchers: &[TypeMatcher]) -> Vec<TypeMatcher> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(matchers.len(), matchers.len());
    let nodes: Vec<NodeIndex> = (0..matchers.len()).map(|i| graph.add_node(i)).collect();

    for (j, descendant) in matchers.iter().enumerate() {
        let ancestors: FxHashSet<&QualifiedName> = hierarchy
            .ancestors(&descendant.concrete)
            .into_iter()
            .collect();
        for (i, ancestor) in matchers.iter().enumerate() {
            if i != j
                && ancestor.concrete != descendant.concrete
                && ancestors.contains(&ancestor.concrete)
            {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }

    // Parents not yet visited, per node.
    let mut pending: Vec<usize> = nodes
        .iter()
        .map(|&n| graph.neighbors_directed(n, Direction::Incoming).count())
        .collect();

    let mut stack: Vec<NodeIndex> = nodes
        .iter()
        .rev()
        .filter(|n| pending[n.index()] == 0)
        .copied()
        .collect();

    let mut order: Vec<NodeIndex> = Vec::with_capacity(matchers.len());
    while let Some(node) = stack.pop() {
        order.push(node);
        let mut children: Vec<NodeIndex> = graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        children.sort();
        for child in children.into_iter().rev() {
            pending[child.index()] -= 1;
            if pending[child.index()] == 0 {
                stack.push(child);
            }
        }
    }

    order.reverse();
    order
        .into_iter()
        .map(|node| matchers[graph[node]].clone())
        .collect()
}
