//! xmlbind Resolver
//!
//! Turns class descriptors into binding models for an XML data-binding code
//! generator.
//!
//! ## Architecture
//!
//! - **Discovery**: build the type hierarchy and register concrete subtypes of
//!   open polymorphic types in the generic-type registry
//! - **Resolution**: per class, walk, classify, select access, resolve
//!   polymorphism, assemble the binding tree and validate it
//!
//! ```text
//! ClassSource ──▶ TypeHierarchy ──▶ GenericDiscoveryPass ──▶ GenericTypeRegistry
//!                                                                    │
//! class ──▶ walker ──▶ classifier ──▶ access ──▶ polymorphism ◀──────┘
//!                                        │            │
//!                                        ▼            ▼
//!                                 tree assembler ──▶ conflict validator ──▶ BindingModel
//! ```
//!
//! ## Modules
//!
//! - [`walker`]: inheritance chain, field collection, constructor selection
//! - [`classifier`]: directive validation and field-kind classification
//! - [`polymorphism`]: matcher merging, validation and dispatch ordering
//! - [`access`]: direct field, getter/setter or constructor access
//! - [`tree`]: binding tree assembly
//! - [`conflicts`]: naming-conflict validation
//! - [`model`]: the resolved binding model
//! - [`passes`]: discovery and per-class resolution passes

pub mod access;
pub mod classifier;
mod config;
pub mod conflicts;
pub mod context;
pub mod model;
pub mod passes;
pub mod polymorphism;
mod resolver;
pub mod tree;
pub mod walker;

pub use config::{FailurePolicy, ResolverConfig};
pub use context::ResolveContext;
pub use model::{
    AccessStrategy, BindingModel, BindingNode, ConstructorBinding, ElementEntry, FieldKind,
    FieldModel, FieldRef, PolymorphicField, TypeMatcher,
};
pub use passes::{ClassResolutionPass, DiscoveryOutput, GenericDiscoveryPass};
pub use polymorphism::{PolymorphismResolver, ResolvedPolymorphism, dispatch_order};
pub use resolver::{ResolutionReport, Resolver};
