//! Class descriptor.
//!
//! This module provides [`ClassDescriptor`], the read-only view of a host class
//! the resolver works from: fields, methods, constructors, supertypes and the
//! class-level binding directive.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::{ConstructorDescriptor, FieldDescriptor, MethodDescriptor, XmlDirective};
use crate::{QualifiedName, TypeHash, Visibility};

bitflags! {
    /// Class modifiers reported by the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ClassFlags: u8 {
        const ABSTRACT = 1 << 0;
        const INTERFACE = 1 << 1;
        /// The type accepts subtypes registered in the generic-type registry.
        const OPEN_POLYMORPHIC = 1 << 2;
    }
}

/// Descriptor for a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully qualified name.
    pub name: QualifiedName,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub flags: ClassFlags,

    // === Inheritance ===
    /// Direct superclass.
    #[serde(default)]
    pub superclass: Option<QualifiedName>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    #[serde(default)]
    pub interfaces: Vec<QualifiedName>,

    // === Members ===
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Declared constructors. Empty means an implicit public no-arg constructor.
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,

    /// Class-level binding directive.
    #[serde(default)]
    pub xml: Option<XmlDirective>,
}

impl ClassDescriptor {
    /// Create a public concrete class with no members.
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            flags: ClassFlags::empty(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            xml: None,
        }
    }

    /// Create a public interface.
    pub fn interface(name: impl Into<QualifiedName>) -> Self {
        Self::new(name).with_flags(ClassFlags::INTERFACE)
    }

    // === Builder Methods ===

    /// Attach the class-level binding directive with defaults.
    pub fn bindable(self) -> Self {
        self.with_xml(XmlDirective::default())
    }

    pub fn with_xml(mut self, xml: XmlDirective) -> Self {
        self.xml = Some(xml);
        self
    }

    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_superclass(mut self, superclass: impl Into<QualifiedName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<QualifiedName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, ctor: ConstructorDescriptor) -> Self {
        self.constructors.push(ctor);
        self
    }

    // === Query Methods ===

    pub fn type_hash(&self) -> TypeHash {
        self.name.to_type_hash()
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
    }

    /// Interfaces and abstract classes cannot be instantiated.
    pub fn is_abstract_type(&self) -> bool {
        self.is_interface() || self.is_abstract()
    }

    pub fn is_open_polymorphic(&self) -> bool {
        self.flags.contains(ClassFlags::OPEN_POLYMORPHIC)
    }

    /// Whether the class carries the class-level binding directive.
    pub fn is_bindable(&self) -> bool {
        self.xml.is_some()
    }

    /// Whether ancestors contribute fields.
    pub fn inherits(&self) -> bool {
        self.xml.as_ref().is_some_and(|x| x.inherit)
    }

    /// The XML element name of the class.
    ///
    /// Uses the directive's name override, else the simple name with its first
    /// letter lower-cased.
    pub fn xml_name(&self) -> String {
        match self.xml.as_ref().and_then(|x| x.name.as_ref()) {
            Some(name) => name.clone(),
            None => decapitalize(self.name.simple_name()),
        }
    }

    /// Direct supertypes: the superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &QualifiedName> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    /// Find all methods with the given name.
    pub fn find_methods<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDescriptor> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// Find a field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Constructors that carry at least one directived parameter.
    pub fn directived_constructors(&self) -> impl Iterator<Item = &ConstructorDescriptor> {
        self.constructors
            .iter()
            .filter(|c| c.directived_param_count() > 0)
    }

    /// Whether generated code can instantiate this class.
    ///
    /// Requires a concrete, non-private class with an implicit constructor, an
    /// accessible no-arg constructor, or an accessible fully directived one.
    pub fn is_instantiable(&self) -> bool {
        if self.is_abstract_type() || !self.visibility.is_package_accessible() {
            return false;
        }
        if self.constructors.is_empty() {
            return true;
        }
        self.constructors.iter().any(|c| {
            c.visibility.is_package_accessible() && (c.is_no_arg() || c.is_fully_directived())
        })
    }
}

/// Lower-case the first character of a name.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character of a name.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
