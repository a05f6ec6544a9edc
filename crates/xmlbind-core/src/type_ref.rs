//! Declared-type references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

/// Host primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveKind {
    /// Host spelling of the primitive.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
        }
    }

    /// Host spelling of the nullable wrapper.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
            PrimitiveKind::Char => "Character",
        }
    }
}

/// A reference to the declared type of a field, parameter or method.
///
/// Equality is exact: accessor validation compares `TypeRef`s directly, so
/// `int` and `Integer` are different types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A primitive value type.
    Primitive(PrimitiveKind),
    /// The nullable wrapper of a primitive.
    Boxed(PrimitiveKind),
    /// The host string type.
    String,
    /// A class or interface, resolved through the descriptor source.
    Class(QualifiedName),
    /// An ordered sequence of items.
    List(Box<TypeRef>),
}

impl TypeRef {
    /// Shorthand for `TypeRef::Class`.
    pub fn class(name: impl Into<QualifiedName>) -> Self {
        TypeRef::Class(name.into())
    }

    /// Shorthand for `TypeRef::List`.
    pub fn list_of(item: TypeRef) -> Self {
        TypeRef::List(Box::new(item))
    }

    /// Check if this is the host string type.
    pub fn is_string(&self) -> bool {
        matches!(self, TypeRef::String)
    }

    /// Check if this is a primitive, boxed primitive or string.
    ///
    /// Such types can be written as attribute or property-element text without a
    /// converter.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeRef::Primitive(_) | TypeRef::Boxed(_) | TypeRef::String
        )
    }

    /// Check if this is `boolean` or `Boolean`.
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            TypeRef::Primitive(PrimitiveKind::Boolean) | TypeRef::Boxed(PrimitiveKind::Boolean)
        )
    }

    /// Check if this is a list type.
    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }

    /// The list item type, if this is a list.
    pub fn item_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::List(item) => Some(item),
            _ => None,
        }
    }

    /// The class name of this type, or of the list item type for lists.
    pub fn element_class(&self) -> Option<&QualifiedName> {
        match self {
            TypeRef::Class(name) => Some(name),
            TypeRef::List(item) => item.element_class(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => write!(f, "{}", kind.as_str()),
            TypeRef::Boxed(kind) => write!(f, "{}", kind.boxed_name()),
            TypeRef::String => write!(f, "String"),
            TypeRef::Class(name) => write!(f, "{name}"),
            TypeRef::List(item) => write!(f, "List<{item}>"),
        }
    }
}
