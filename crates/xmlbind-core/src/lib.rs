//! Core types for the xmlbind resolver.
//!
//! - [`descriptor`]: the read-only class-descriptor model supplied by the host
//! - [`path`]: the path segmenter for path directives and XML names
//! - [`error`]: the [`BindingError`] taxonomy
//! - [`QualifiedName`], [`TypeHash`], [`TypeRef`], [`Visibility`]: identity and typing

pub mod descriptor;
pub mod error;
pub mod path;
mod qualified_name;
mod type_hash;
mod type_ref;
mod visibility;

pub use descriptor::{
    AttributeDirective, ClassDescriptor, ClassFlags, ConstructorDescriptor, Directive,
    DirectiveSet, ElementDirective, FieldDescriptor, FieldFlags, MatcherDirective,
    MethodDescriptor, MethodFlags, ParamDescriptor, PropertyElementDirective, ScanMode,
    TextContentDirective, XmlDirective, capitalize, decapitalize,
};
pub use error::{BindingError, ErrorKind, PathError};
pub use path::XmlPath;
pub use qualified_name::QualifiedName;
pub use type_hash::TypeHash;
pub use type_ref::{PrimitiveKind, TypeRef};
pub use visibility::Visibility;
