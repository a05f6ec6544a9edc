//! Resolved binding model.
//!
//! The output of resolution and the sole input of code emission:
//!
//! ```text
//! BindingModel
//! ├── root: BindingNode
//! │   ├── attributes: name -> FieldModel        (Attribute only)
//! │   ├── elements:   name -> ElementEntry
//! │   │                       ├── Field(FieldModel)
//! │   │                       └── Container(BindingNode)   synthetic, from paths
//! │   └── text_content: Option<FieldModel>
//! ├── polymorphic_fields: placeholder + merged matchers + dispatch order
//! └── constructor: Option<ConstructorBinding>
//! ```
//!
//! A model is immutable once the conflict validator accepts it. Rebuilding is
//! the only way to change it.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use xmlbind_core::{QualifiedName, TypeRef, XmlPath};

/// Identifies a field (or constructor parameter) by its declaring class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldRef {
    pub class: QualifiedName,
    pub field: String,
}

impl FieldRef {
    pub fn new(class: &QualifiedName, field: impl Into<String>) -> Self {
        Self {
            class: class.clone(),
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.field)
    }
}

/// An `(xml element name, concrete type)` polymorphic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeMatcher {
    pub xml_name: String,
    pub concrete: QualifiedName,
}

impl TypeMatcher {
    pub fn new(xml_name: impl Into<String>, concrete: impl Into<QualifiedName>) -> Self {
        Self {
            xml_name: xml_name.into(),
            concrete: concrete.into(),
        }
    }
}

/// What a field binds to. Every bound field carries exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Attribute {
        name: String,
        required: bool,
        converter: Option<QualifiedName>,
    },
    PropertyElement {
        name: String,
        required: bool,
        write_as_cdata: bool,
        converter: Option<QualifiedName>,
    },
    /// A single nested object.
    Element {
        name: String,
        required: bool,
        target: QualifiedName,
    },
    /// An ordered sequence of nested objects.
    ElementList {
        name: String,
        item_type: QualifiedName,
        required: bool,
    },
    /// Placeholder for a polymorphic field; never placed in the tree.
    PolymorphicElement {
        placeholder: String,
        matchers: Vec<TypeMatcher>,
    },
    /// Placeholder for a polymorphic list; never placed in the tree.
    PolymorphicElementList {
        placeholder: String,
        matchers: Vec<TypeMatcher>,
        item_type: QualifiedName,
    },
    /// One concrete alternative of a polymorphic field.
    PolymorphicSubstitution {
        name: String,
        concrete: QualifiedName,
        /// The placeholder field this substitution was generated from.
        original: FieldRef,
        list: bool,
    },
    TextContent {
        write_as_cdata: bool,
    },
}

impl FieldKind {
    /// The XML name the field is keyed under, `None` for text content.
    pub fn xml_name(&self) -> Option<&str> {
        match self {
            FieldKind::Attribute { name, .. }
            | FieldKind::PropertyElement { name, .. }
            | FieldKind::Element { name, .. }
            | FieldKind::ElementList { name, .. }
            | FieldKind::PolymorphicSubstitution { name, .. } => Some(name),
            FieldKind::PolymorphicElement { placeholder, .. }
            | FieldKind::PolymorphicElementList { placeholder, .. } => Some(placeholder),
            FieldKind::TextContent { .. } => None,
        }
    }

    /// Short label used in logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Attribute { .. } => "attribute",
            FieldKind::PropertyElement { .. } => "property-element",
            FieldKind::Element { .. } => "element",
            FieldKind::ElementList { .. } => "element-list",
            FieldKind::PolymorphicElement { .. } => "polymorphic-element",
            FieldKind::PolymorphicElementList { .. } => "polymorphic-element-list",
            FieldKind::PolymorphicSubstitution { .. } => "polymorphic-substitution",
            FieldKind::TextContent { .. } => "text-content",
        }
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, FieldKind::Attribute { .. })
    }

    pub fn is_text_content(&self) -> bool {
        matches!(self, FieldKind::TextContent { .. })
    }

    pub fn is_polymorphic(&self) -> bool {
        matches!(
            self,
            FieldKind::PolymorphicElement { .. } | FieldKind::PolymorphicElementList { .. }
        )
    }

    /// Explicit matchers of a polymorphic placeholder.
    pub fn matchers(&self) -> &[TypeMatcher] {
        match self {
            FieldKind::PolymorphicElement { matchers, .. }
            | FieldKind::PolymorphicElementList { matchers, .. } => matchers,
            _ => &[],
        }
    }
}

/// How generated code reads and writes a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AccessStrategy {
    DirectField,
    GetterSetter { getter: String, setter: String },
    /// Written through the bound constructor, read through a getter.
    ConstructorParamWithGetter { getter: String },
}

impl AccessStrategy {
    pub fn is_constructor_param(&self) -> bool {
        matches!(self, AccessStrategy::ConstructorParamWithGetter { .. })
    }
}

/// A classified field with its access strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldModel {
    pub source: FieldRef,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub kind: FieldKind,
    pub access: AccessStrategy,
    /// Container path below the class element; root when no path directive.
    pub path: XmlPath,
}

impl FieldModel {
    /// Full path of the field's own element or attribute.
    pub fn full_path(&self) -> XmlPath {
        match self.kind.xml_name() {
            Some(name) => self.path.child(name),
            None => self.path.clone(),
        }
    }
}

/// An entry in a node's element map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementEntry {
    Field(FieldModel),
    /// Synthetic node created for a path segment; bound to no field.
    Container(BindingNode),
}

impl ElementEntry {
    pub fn as_field(&self) -> Option<&FieldModel> {
        match self {
            ElementEntry::Field(field) => Some(field),
            ElementEntry::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&BindingNode> {
        match self {
            ElementEntry::Container(node) => Some(node),
            ElementEntry::Field(_) => None,
        }
    }
}

/// One XML element level of a binding tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingNode {
    pub attributes: IndexMap<String, FieldModel>,
    pub elements: IndexMap<String, ElementEntry>,
    pub text_content: Option<FieldModel>,
}

impl BindingNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<&FieldModel> {
        self.attributes.get(name)
    }

    /// A field-bound element entry.
    pub fn element(&self, name: &str) -> Option<&FieldModel> {
        self.elements.get(name).and_then(ElementEntry::as_field)
    }

    /// A synthetic container entry.
    pub fn child(&self, name: &str) -> Option<&BindingNode> {
        self.elements.get(name).and_then(ElementEntry::as_container)
    }

    /// Follow a path of container entries.
    pub fn node_at(&self, path: &XmlPath) -> Option<&BindingNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.elements.is_empty() && self.text_content.is_none()
    }

    /// Every field in the tree, depth-first in insertion order.
    pub fn fields(&self) -> Vec<&FieldModel> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldModel>) {
        out.extend(self.attributes.values());
        for entry in self.elements.values() {
            match entry {
                ElementEntry::Field(field) => out.push(field),
                ElementEntry::Container(node) => node.collect_fields(out),
            }
        }
        out.extend(self.text_content.iter());
    }
}

/// A polymorphic field after matcher merging and dispatch ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolymorphicField {
    /// The placeholder model (not placed in the tree).
    pub field: FieldModel,
    /// Merged matchers: explicit first, then generic registrations.
    pub matchers: Vec<TypeMatcher>,
    /// Write-side type-check order, most specific type first.
    pub dispatch_order: Vec<TypeMatcher>,
}

/// The constructor generated code calls when fields bind through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorBinding {
    pub signature: String,
    /// Parameter names in call order.
    pub params: Vec<String>,
}

/// The validated binding model of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingModel {
    pub class: QualifiedName,
    pub xml_name: String,
    pub root: BindingNode,
    pub polymorphic_fields: Vec<PolymorphicField>,
    pub constructor: Option<ConstructorBinding>,
}

impl BindingModel {
    /// Serialize the model for an out-of-process emitter.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn polymorphic_field(&self, field: &str) -> Option<&PolymorphicField> {
        self.polymorphic_fields
            .iter()
            .find(|p| p.field.source.field == field)
    }
}
