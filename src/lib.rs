//! xmlbind
//!
//! Metadata-resolution front end for XML data-binding code generators. Given
//! read-only descriptors of classes, their fields, accessors, constructors and
//! binding directives, it produces one validated [`BindingModel`] per bindable
//! class for a code-emission layer to consume.
//!
//! ## Crates
//!
//! - [`xmlbind_core`]: descriptor model, path segmenter, error taxonomy
//! - [`xmlbind_registry`]: descriptor sources, type hierarchy, generic-type registry
//! - [`xmlbind_resolver`]: the resolution pipeline and its driver
//!
//! ## Example
//!
//! ```
//! let json = r#"{"classes": [{
//!     "name": "a.Item",
//!     "xml": {},
//!     "fields": [
//!         {"name": "a", "type": "string", "directives": [{"attribute": {}}]}
//!     ]
//! }]}"#;
//! let report = xmlbind::resolve_json(json).unwrap();
//! let model = report.model(&"a.Item".into()).unwrap();
//! assert!(model.root.attribute("a").is_some());
//! ```

mod error;

pub use error::{Error, Result};

pub use xmlbind_core::{
    BindingError, ClassDescriptor, ErrorKind, PathError, QualifiedName, ScanMode, TypeRef,
    XmlPath,
};
pub use xmlbind_registry::{ClassSource, DescriptorSet, GenericTypeRegistry, LoadError};
pub use xmlbind_resolver::{
    BindingModel, BindingNode, FailurePolicy, FieldKind, FieldModel, ResolutionReport, Resolver,
    ResolverConfig,
};

/// Commonly used types.
pub mod prelude {
    pub use xmlbind_core::*;
    pub use xmlbind_registry::*;
    pub use xmlbind_resolver::{
        AccessStrategy, BindingModel, BindingNode, ConstructorBinding, ElementEntry,
        FailurePolicy, FieldKind, FieldModel, FieldRef, PolymorphicField, ResolutionReport,
        Resolver, ResolverConfig, TypeMatcher,
    };
}

/// Load a JSON descriptor document and resolve every bindable class with the
/// default configuration.
pub fn resolve_json(descriptors: &str) -> Result<ResolutionReport> {
    resolve_json_with_config(descriptors, ResolverConfig::default())
}

/// Like [`resolve_json`] with an explicit configuration.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_json_with_config(
    descriptors: &str,
    config: ResolverConfig,
) -> Result<ResolutionReport> {
    let source = DescriptorSet::from_json(descriptors)?;
    let report = Resolver::with_config(&source, config).resolve_all()?;
    tracing::debug!(
        models = report.models.len(),
        failures = report.failures.len(),
        "resolved descriptor document"
    );
    Ok(report)
}

/// Parse a [`ResolverConfig`] from JSON.
pub fn config_from_json(json: &str) -> Result<ResolverConfig> {
    ResolverConfig::from_json(json).map_err(Error::Config)
}
