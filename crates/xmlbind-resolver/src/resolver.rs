//! Resolver driver.
//!
//! Owns the derived state of one run (type hierarchy and generic-type
//! registry) and resolves classes against it.

use indexmap::IndexMap;
use xmlbind_core::{BindingError, QualifiedName};
use xmlbind_registry::{ClassSource, GenericTypeRegistry, TypeHierarchy};

use crate::ResolverConfig;
use crate::config::FailurePolicy;
use crate::context::ResolveContext;
use crate::model::BindingModel;
use crate::passes::{ClassResolutionPass, GenericDiscoveryPass};

/// Outcome of resolving every bindable class.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Resolved models keyed by class, in source order.
    pub models: IndexMap<QualifiedName, BindingModel>,
    /// Classes skipped under [`FailurePolicy::SkipClass`].
    pub failures: Vec<BindingError>,
}

impl ResolutionReport {
    /// Whether every bindable class resolved.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn model(&self, class: &QualifiedName) -> Option<&BindingModel> {
        self.models.get(class)
    }
}

/// Resolves binding models for the classes of one descriptor source.
pub struct Resolver<'s, S> {
    source: &'s S,
    hierarchy: TypeHierarchy,
    registry: GenericTypeRegistry,
    config: ResolverConfig,
}

impl<'s, S: ClassSource> Resolver<'s, S> {
    /// Create a resolver with the default configuration.
    pub fn new(source: &'s S) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    pub fn with_config(source: &'s S, config: ResolverConfig) -> Self {
        Self::with_registry(source, config, GenericTypeRegistry::new())
    }

    /// Create a resolver on top of host-registered generic entries.
    ///
    /// Discovered entries are added with insert-if-absent semantics, so the
    /// host's registrations win.
    pub fn with_registry(
        source: &'s S,
        config: ResolverConfig,
        mut registry: GenericTypeRegistry,
    ) -> Self {
        let hierarchy = TypeHierarchy::from_source(source);
        let discovery = GenericDiscoveryPass::new(source, &hierarchy, &mut registry).run();
        tracing::debug!(
            types = hierarchy.len(),
            scanned = discovery.classes_scanned,
            registrations = discovery.registrations,
            "resolver ready"
        );
        Self {
            source,
            hierarchy,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &GenericTypeRegistry {
        &self.registry
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Register a generic entry after construction. Returns `false` if the
    /// concrete type is already registered under that open type.
    pub fn register_generic(
        &mut self,
        open: &QualifiedName,
        xml_name: impl Into<String>,
        concrete: &QualifiedName,
    ) -> bool {
        self.registry.register(open, xml_name, concrete)
    }

    fn context(&self) -> ResolveContext<'_, S> {
        ResolveContext::new(self.source, &self.hierarchy, &self.registry, &self.config)
    }

    /// Resolve a single class.
    pub fn resolve_class(&self, class: &QualifiedName) -> Result<BindingModel, BindingError> {
        ClassResolutionPass::new(self.context(), class).run()
    }

    /// Resolve every bindable class in source order.
    ///
    /// Under [`FailurePolicy::AbortRun`] the first failure is returned. Under
    /// [`FailurePolicy::SkipClass`] failures are collected in the report.
    pub fn resolve_all(&self) -> Result<ResolutionReport, BindingError> {
        let mut report = ResolutionReport::default();

        for class in self.source.bindable_classes() {
            match self.resolve_class(&class.name) {
                Ok(model) => {
                    report.models.insert(class.name.clone(), model);
                }
                Err(err) => match self.config.failure_policy {
                    FailurePolicy::AbortRun => return Err(err),
                    FailurePolicy::SkipClass => {
                        tracing::warn!(class = %class.name, error = %err, "skipping class");
                        report.failures.push(err);
                    }
                },
            }
        }

        Ok(report)
    }
}
