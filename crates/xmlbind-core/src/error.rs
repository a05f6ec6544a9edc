//! Error types for binding-model resolution.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BindingError (one variant per failure, grouped by ErrorKind)
//! ├── Configuration      - missing/unusable constructor, bad visibility, unknown types
//! ├── DirectiveConflict  - multiple or contradictory per-field directives
//! ├── Path               - malformed path strings (wraps PathError)
//! ├── NamingConflict     - sibling or inherited name collisions
//! ├── Polymorphism       - invalid matchers, dispatch-order inconsistencies
//! └── Accessor           - missing or ill-shaped getters and setters
//! ```
//!
//! Every variant names the offending class and, where applicable, the field or
//! constructor. All errors are fatal for the class being resolved.

use std::fmt;

use thiserror::Error;

use crate::QualifiedName;

// ============================================================================
// Path Errors
// ============================================================================

/// Errors produced by the path segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path '{0}' starts with a separator")]
    LeadingSeparator(String),

    #[error("path '{0}' ends with a separator")]
    TrailingSeparator(String),

    #[error("path '{path}' has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },

    #[error("segment '{0}' contains whitespace")]
    Whitespace(String),

    #[error("segment '{segment}' contains invalid character '{ch}'")]
    InvalidCharacter { segment: String, ch: char },
}

// ============================================================================
// Binding Errors
// ============================================================================

/// The failure taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    DirectiveConflict,
    Path,
    NamingConflict,
    Polymorphism,
    Accessor,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::DirectiveConflict => "directive conflict",
            ErrorKind::Path => "path error",
            ErrorKind::NamingConflict => "naming conflict",
            ErrorKind::Polymorphism => "polymorphism error",
            ErrorKind::Accessor => "accessor error",
        };
        f.write_str(s)
    }
}

/// Errors that abort resolution of a class.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    // === Configuration ===
    /// The class is not known to the descriptor source.
    #[error("class '{class}' is not known to the descriptor source")]
    UnknownClass { class: QualifiedName },

    /// The root class lacks the class-level binding directive.
    #[error("class '{class}' does not carry the class-level binding directive")]
    NotBindable { class: QualifiedName },

    /// The class cannot be instantiated by generated code.
    #[error(
        "class '{class}' has no usable constructor: {reason}; provide a non-private no-argument constructor or one whose parameters all carry binding directives"
    )]
    NoUsableConstructor { class: QualifiedName, reason: String },

    /// A field's declared type refers to a class the source does not know.
    #[error("field '{field}' in '{class}' refers to unknown type '{ty}'")]
    UnknownFieldType {
        class: QualifiedName,
        field: String,
        ty: QualifiedName,
    },

    /// A converter reference is not usable.
    #[error("converter '{converter}' on field '{field}' in '{class}' is not usable: {reason}")]
    InvalidConverter {
        class: QualifiedName,
        field: String,
        converter: QualifiedName,
        reason: String,
    },

    /// A constructor mixes directived and plain parameters.
    #[error(
        "constructor '{constructor}' in '{class}' is partially annotated: parameters {plain} carry no binding directive; either all or none of its parameters must be directived"
    )]
    PartiallyAnnotatedConstructor {
        class: QualifiedName,
        constructor: String,
        /// Names of the parameters lacking a directive.
        plain: String,
    },

    /// More than one constructor carries directived parameters.
    #[error("class '{class}' has multiple annotated constructors: {constructors}")]
    MultipleAnnotatedConstructors {
        class: QualifiedName,
        constructors: String,
    },

    /// Field-level directives combined with a directived constructor.
    #[error(
        "class '{class}' binds through constructor '{constructor}' but field '{field}' (declared in '{declaring_class}') also carries a binding directive"
    )]
    MixedFieldAndConstructorBinding {
        class: QualifiedName,
        constructor: String,
        field: String,
        declaring_class: QualifiedName,
    },

    // === Directive conflicts ===
    /// More than one mutually exclusive binding directive on one field.
    #[error("field '{field}' in '{class}' carries conflicting directives: {}", directives.join(", "))]
    MultipleDirectives {
        class: QualifiedName,
        field: String,
        directives: Vec<&'static str>,
    },

    /// A directive is applied to a type it cannot bind.
    #[error("field '{field}' in '{class}': {directive} cannot bind type '{ty}': {reason}")]
    InvalidTargetType {
        class: QualifiedName,
        field: String,
        directive: &'static str,
        ty: String,
        reason: String,
    },

    /// A path directive on a text-content field.
    #[error("field '{field}' in '{class}': a path directive cannot be combined with text-content")]
    PathOnTextContent { class: QualifiedName, field: String },

    /// A path directive on a field that has no binding directive.
    #[error("field '{field}' in '{class}' has a path directive but no binding directive")]
    PathWithoutBinding { class: QualifiedName, field: String },

    // === Paths ===
    /// A malformed path or XML name.
    #[error("field '{field}' in '{class}': invalid path or name: {source}")]
    InvalidPath {
        class: QualifiedName,
        field: String,
        #[source]
        source: crate::PathError,
    },

    // === Naming conflicts ===
    /// Two attributes in one node share a name.
    #[error(
        "conflict in '{class}': attribute '{name}' at '{path}' is mapped by both '{existing}' and '{new}'"
    )]
    DuplicateAttribute {
        class: QualifiedName,
        name: String,
        path: String,
        existing: String,
        new: String,
    },

    /// Two elements in one node share a name.
    #[error(
        "conflict in '{class}': element '{name}' at '{path}' is mapped by both '{existing}' and '{new}'"
    )]
    DuplicateElement {
        class: QualifiedName,
        name: String,
        path: String,
        existing: String,
        new: String,
    },

    /// More than one text-content field.
    #[error("conflict in '{class}': text content is mapped by both '{existing}' and '{new}'")]
    DuplicateTextContent {
        class: QualifiedName,
        existing: String,
        new: String,
    },

    /// A field's path lands inside (or on) an element field's exclusive sub-tree.
    #[error(
        "conflict in '{class}': '{conflicting_field}' at '{path}' lies inside the sub-tree owned by element field '{element_field}'"
    )]
    ElementAttributePathConflict {
        class: QualifiedName,
        element_field: String,
        conflicting_field: String,
        path: String,
    },

    /// A descendant and an ancestor field resolve to the same node and name.
    #[error(
        "inherited conflict: {namespace} '{name}' at '{path}' is mapped by '{descendant_field}' in '{descendant_class}' and by '{ancestor_field}' in ancestor '{ancestor_class}'"
    )]
    InheritedNameConflict {
        namespace: &'static str,
        name: String,
        path: String,
        descendant_class: QualifiedName,
        descendant_field: String,
        ancestor_class: QualifiedName,
        ancestor_field: String,
    },

    // === Polymorphism ===
    /// An abstract declared type without matchers or generic registrations.
    #[error(
        "field '{field}' in '{class}' has abstract type '{ty}' but no type matchers and no generic registrations"
    )]
    MissingPolymorphismResolution {
        class: QualifiedName,
        field: String,
        ty: QualifiedName,
    },

    /// Two matchers share an XML name but target different types.
    #[error(
        "field '{field}' in '{class}': matcher name '{name}' maps to both '{first}' and '{second}'"
    )]
    MatcherNameConflict {
        class: QualifiedName,
        field: String,
        name: String,
        first: QualifiedName,
        second: QualifiedName,
    },

    /// Two explicit matchers target the same type under different names.
    #[error(
        "field '{field}' in '{class}': type '{ty}' is matched by both '{first_name}' and '{second_name}'"
    )]
    DuplicateMatcherType {
        class: QualifiedName,
        field: String,
        ty: QualifiedName,
        first_name: String,
        second_name: String,
    },

    /// A matcher's concrete type is not usable.
    #[error("field '{field}' in '{class}': matcher type '{ty}' is invalid: {reason}")]
    InvalidMatcherType {
        class: QualifiedName,
        field: String,
        ty: QualifiedName,
        reason: String,
    },

    /// Internal consistency failure in dispatch ordering.
    #[error(
        "internal error: dispatch order for field '{field}' in '{class}' has {actual} entries, expected {expected}"
    )]
    DispatchOrderInconsistent {
        class: QualifiedName,
        field: String,
        expected: usize,
        actual: usize,
    },

    // === Accessors ===
    #[error(
        "field '{field}' in '{class}' is not directly accessible and has no getter; expected one of: {}",
        expected.join(", ")
    )]
    NoGetterFound {
        class: QualifiedName,
        field: String,
        expected: Vec<String>,
    },

    #[error(
        "field '{field}' in '{class}' is not directly writable and has no setter; expected one of: {}",
        expected.join(", ")
    )]
    NoSetterFound {
        class: QualifiedName,
        field: String,
        expected: Vec<String>,
    },

    #[error(
        "getter '{method}' for field '{field}' in '{class}' must take no parameters and return '{expected}'"
    )]
    WrongGetterSignature {
        class: QualifiedName,
        field: String,
        method: String,
        expected: String,
    },

    #[error(
        "setter '{method}' for field '{field}' in '{class}' must take exactly one parameter of type '{expected}'"
    )]
    WrongSetterSignature {
        class: QualifiedName,
        field: String,
        method: String,
        expected: String,
    },

    #[error(
        "method '{method}' for field '{field}' in '{class}' is {visibility}; it must be at least package-private"
    )]
    InsufficientVisibility {
        class: QualifiedName,
        field: String,
        method: String,
        visibility: crate::Visibility,
    },
}

impl BindingError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        use BindingError::*;
        match self {
            UnknownClass { .. }
            | NotBindable { .. }
            | NoUsableConstructor { .. }
            | UnknownFieldType { .. }
            | InvalidConverter { .. }
            | PartiallyAnnotatedConstructor { .. }
            | MultipleAnnotatedConstructors { .. }
            | MixedFieldAndConstructorBinding { .. } => ErrorKind::Configuration,

            MultipleDirectives { .. }
            | InvalidTargetType { .. }
            | PathOnTextContent { .. }
            | PathWithoutBinding { .. } => ErrorKind::DirectiveConflict,

            InvalidPath { .. } => ErrorKind::Path,

            DuplicateAttribute { .. }
            | DuplicateElement { .. }
            | DuplicateTextContent { .. }
            | ElementAttributePathConflict { .. }
            | InheritedNameConflict { .. } => ErrorKind::NamingConflict,

            MissingPolymorphismResolution { .. }
            | MatcherNameConflict { .. }
            | DuplicateMatcherType { .. }
            | InvalidMatcherType { .. }
            | DispatchOrderInconsistent { .. } => ErrorKind::Polymorphism,

            NoGetterFound { .. }
            | NoSetterFound { .. }
            | WrongGetterSignature { .. }
            | WrongSetterSignature { .. }
            | InsufficientVisibility { .. } => ErrorKind::Accessor,
        }
    }

    /// Whether this error indicates a resolver defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, BindingError::DispatchOrderInconsistent { .. })
    }

    /// Whether this is a name collision, including matcher-name collisions.
    pub fn is_naming_conflict(&self) -> bool {
        self.kind() == ErrorKind::NamingConflict
            || matches!(self, BindingError::MatcherNameConflict { .. })
    }

    /// The class whose resolution failed, if the error names one directly.
    pub fn class(&self) -> Option<&QualifiedName> {
        use BindingError::*;
        match self {
            UnknownClass { class }
            | NotBindable { class }
            | NoUsableConstructor { class, .. }
            | UnknownFieldType { class, .. }
            | InvalidConverter { class, .. }
            | PartiallyAnnotatedConstructor { class, .. }
            | MultipleAnnotatedConstructors { class, .. }
            | MixedFieldAndConstructorBinding { class, .. }
            | MultipleDirectives { class, .. }
            | InvalidTargetType { class, .. }
            | PathOnTextContent { class, .. }
            | PathWithoutBinding { class, .. }
            | InvalidPath { class, .. }
            | DuplicateAttribute { class, .. }
            | DuplicateElement { class, .. }
            | DuplicateTextContent { class, .. }
            | ElementAttributePathConflict { class, .. }
            | MissingPolymorphismResolution { class, .. }
            | MatcherNameConflict { class, .. }
            | DuplicateMatcherType { class, .. }
            | InvalidMatcherType { class, .. }
            | DispatchOrderInconsistent { class, .. }
            | NoGetterFound { class, .. }
            | NoSetterFound { class, .. }
            | WrongGetterSignature { class, .. }
            | WrongSetterSignature { class, .. }
            | InsufficientVisibility { class, .. } => Some(class),
            InheritedNameConflict { descendant_class, .. } => Some(descendant_class),
        }
    }
}
