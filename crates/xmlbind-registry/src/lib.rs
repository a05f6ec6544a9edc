//! Descriptor sources and type registries for the xmlbind resolver.
//!
//! - [`ClassSource`]: read-only capability the host implements
//! - [`DescriptorSet`]: in-memory source, loadable from JSON
//! - [`TypeHierarchy`]: petgraph-backed subtype graph
//! - [`GenericTypeRegistry`]: append-only open-type substitutions

mod descriptor_set;
mod error;
mod generic;
mod hierarchy;
mod source;

pub use descriptor_set::DescriptorSet;
pub use error::LoadError;
pub use generic::{GenericEntry, GenericTypeRegistry};
pub use hierarchy::{SupertypeEdge, TypeHierarchy};
pub use source::ClassSource;
