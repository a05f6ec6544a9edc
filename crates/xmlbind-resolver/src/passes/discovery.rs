//! Generic Discovery Pass - register concrete subtypes of open types.
//!
//! Runs once before any class is resolved. Every bindable concrete class that
//! generated code can instantiate is registered under each of its open
//! polymorphic ancestors, keyed by the class's XML name:
//!
//! ```text
//! @Open interface Shape
//! @Xml class Circle implements Shape         Shape: circle -> Circle
//! @Xml class Square extends Polygon          Shape: square -> Square
//!      class Polygon implements Shape        (not bindable, skipped)
//! ```
//!
//! Registration is insert-if-absent, so entries a host registered up front are
//! kept and re-running the pass changes nothing.

use xmlbind_registry::{ClassSource, GenericTypeRegistry, TypeHierarchy};

/// Output of the discovery pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOutput {
    /// Concrete bindable classes considered.
    pub classes_scanned: usize,
    /// New registry entries.
    pub registrations: usize,
}

/// Generic Discovery Pass - fills the generic-type registry.
pub struct GenericDiscoveryPass<'a, S> {
    source: &'a S,
    hierarchy: &'a TypeHierarchy,
    registry: &'a mut GenericTypeRegistry,
}

impl<'a, S: ClassSource> GenericDiscoveryPass<'a, S> {
    pub fn new(
        source: &'a S,
        hierarchy: &'a TypeHierarchy,
        registry: &'a mut GenericTypeRegistry,
    ) -> Self {
        Self {
            source,
            hierarchy,
            registry,
        }
    }

    /// Run the discovery pass.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self) -> DiscoveryOutput {
        let mut output = DiscoveryOutput::default();

        for class in self.source.bindable_classes() {
            if !class.is_instantiable() || !class.visibility.is_public_or_package() {
                continue;
            }
            output.classes_scanned += 1;

            for ancestor in self.hierarchy.ancestors(&class.name) {
                let Some(open) = self.source.class(ancestor) else {
                    continue;
                };
                if !open.is_open_polymorphic() {
                    continue;
                }
                if self
                    .registry
                    .register(&open.name, class.xml_name(), &class.name)
                {
                    output.registrations += 1;
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmlbind_core::{ClassDescriptor, ClassFlags, QualifiedName, Visibility, XmlDirective};
    use xmlbind_registry::DescriptorSet;

    fn create_test_source() -> DescriptorSet {
        DescriptorSet::from_classes(vec![
            ClassDescriptor::interface("g.Shape").with_flags(ClassFlags::OPEN_POLYMORPHIC),
            ClassDescriptor::new("g.Polygon").with_interface("g.Shape"),
            ClassDescriptor::new("g.Square")
                .bindable()
                .with_superclass("g.Polygon"),
            ClassDescriptor::new("g.Circle")
                .with_xml(XmlDirective::named("round"))
                .with_interface("g.Shape"),
            ClassDescriptor::new("g.Sketch")
                .bindable()
                .with_interface("g.Shape")
                .with_flags(ClassFlags::ABSTRACT),
            ClassDescriptor::new("g.Hidden")
                .bindable()
                .with_interface("g.Shape")
                .with_visibility(Visibility::Private),
            ClassDescriptor::interface("g.Closed"),
            ClassDescriptor::new("g.Token").bindable().with_interface("g.Closed"),
        ])
        .unwrap()
    }

    fn names(registry: &GenericTypeRegistry, open: &str) -> Vec<(String, String)> {
        registry
            .entries_for(&QualifiedName::from(open))
            .into_iter()
            .map(|e| (e.xml_name, e.concrete.to_string()))
            .collect()
    }

    #[test]
    fn registers_concrete_bindable_subtypes() {
        let source = create_test_source();
        let hierarchy = TypeHierarchy::from_source(&source);
        let mut registry = GenericTypeRegistry::new();

        let output = GenericDiscoveryPass::new(&source, &hierarchy, &mut registry).run();

        assert_eq!(output.registrations, 2);
        assert_eq!(
            names(&registry, "g.Shape"),
            vec![
                ("square".to_string(), "g.Square".to_string()),
                ("round".to_string(), "g.Circle".to_string()),
            ]
        );
        assert!(!registry.has_entries(&"g.Closed".into()));
    }

    #[test]
    fn rerun_is_idempotent() {
        let source = create_test_source();
        let hierarchy = TypeHierarchy::from_source(&source);
        let mut registry = GenericTypeRegistry::new();

        GenericDiscoveryPass::new(&source, &hierarchy, &mut registry).run();
        let again = GenericDiscoveryPass::new(&source, &hierarchy, &mut registry).run();

        assert_eq!(again.registrations, 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn host_registrations_win() {
        let source = create_test_source();
        let hierarchy = TypeHierarchy::from_source(&source);
        let mut registry = GenericTypeRegistry::new();
        registry.register(&"g.Shape".into(), "box", &"g.Square".into());

        GenericDiscoveryPass::new(&source, &hierarchy, &mut registry).run();

        assert_eq!(names(&registry, "g.Shape")[0].0, "box");
    }
}
