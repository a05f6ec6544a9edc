//! Class-descriptor data model.
//!
//! These types are the read-only capability boundary between the host (reflection,
//! a parsed syntax tree, or a precomputed JSON document) and the resolver:
//!
//! - [`ClassDescriptor`] - a class or interface with its members and supertypes
//! - [`FieldDescriptor`], [`MethodDescriptor`], [`ConstructorDescriptor`],
//!   [`ParamDescriptor`] - members
//! - [`Directive`], [`XmlDirective`] - per-field and class-level binding directives

mod class;
mod directive;
mod member;

pub use class::{ClassDescriptor, ClassFlags, capitalize, decapitalize};
pub use directive::{
    AttributeDirective, Directive, DirectiveSet, ElementDirective, MatcherDirective,
    PropertyElementDirective, ScanMode, TextContentDirective, XmlDirective,
};
pub use member::{
    ConstructorDescriptor, FieldDescriptor, FieldFlags, MethodDescriptor, MethodFlags,
    ParamDescriptor,
};
