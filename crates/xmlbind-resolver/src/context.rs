//! Shared read-only state for one resolution run.

use xmlbind_core::{ClassDescriptor, QualifiedName};
use xmlbind_registry::{ClassSource, GenericTypeRegistry, TypeHierarchy};

use crate::ResolverConfig;

/// Everything the per-class stages read. Nothing here is mutated while a
/// class is being resolved.
pub struct ResolveContext<'a, S> {
    pub source: &'a S,
    pub hierarchy: &'a TypeHierarchy,
    pub registry: &'a GenericTypeRegistry,
    pub config: &'a ResolverConfig,
}

impl<S> Clone for ResolveContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ResolveContext<'_, S> {}

impl<'a, S: ClassSource> ResolveContext<'a, S> {
    pub fn new(
        source: &'a S,
        hierarchy: &'a TypeHierarchy,
        registry: &'a GenericTypeRegistry,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            source,
            hierarchy,
            registry,
            config,
        }
    }

    /// Look up a class in the source.
    pub fn class(&self, name: &QualifiedName) -> Option<&'a ClassDescriptor> {
        self.source.class(name)
    }

    /// A class followed by its known supertypes, nearest first.
    pub fn lineage(&self, class: &'a ClassDescriptor) -> Vec<&'a ClassDescriptor> {
        let mut out = vec![class];
        out.extend(
            self.hierarchy
                .ancestors(&class.name)
                .into_iter()
                .filter_map(|name| self.source.class(name)),
        );
        out
    }
}
