//! Class-descriptor source.
//!
//! The resolver never touches host reflection directly. Everything it needs
//! about a class comes through [`ClassSource`], which a host satisfies with
//! reflection, a parsed syntax tree, or a precomputed descriptor set.

use xmlbind_core::{ClassDescriptor, QualifiedName};

/// Read-only access to class descriptors.
pub trait ClassSource {
    /// Look up a class by qualified name.
    fn class(&self, name: &QualifiedName) -> Option<&ClassDescriptor>;

    /// All classes known to the source, in a stable order.
    fn classes(&self) -> impl Iterator<Item = &ClassDescriptor>;

    /// Check if a class is known.
    fn contains(&self, name: &QualifiedName) -> bool {
        self.class(name).is_some()
    }

    /// Classes carrying the class-level binding directive, in source order.
    fn bindable_classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes().filter(|c| c.is_bindable())
    }
}
