//! Field, method and constructor descriptors.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::directive::{Directive, DirectiveSet};
use crate::{QualifiedName, TypeRef, Visibility};

bitflags! {
    /// Field modifiers reported by the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FieldFlags: u8 {
        const STATIC = 1 << 0;
        const TRANSIENT = 1 << 1;
        const FINAL = 1 << 2;
    }
}

bitflags! {
    /// Method modifiers reported by the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MethodFlags: u8 {
        const STATIC = 1 << 0;
        const ABSTRACT = 1 << 1;
    }
}

/// A declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub flags: FieldFlags,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl FieldDescriptor {
    /// Create a public, undirected field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            flags: FieldFlags::empty(),
            directives: Vec::new(),
        }
    }

    // === Builder Methods ===

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    // === Query Methods ===

    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldFlags::STATIC)
    }

    pub fn is_transient(&self) -> bool {
        self.flags.contains(FieldFlags::TRANSIENT)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(FieldFlags::FINAL)
    }
}

impl DirectiveSet for FieldDescriptor {
    fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

/// A declared method. `return_type` is `None` for `void`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub flags: MethodFlags,
}

impl MethodDescriptor {
    /// Create a public `void name()` method.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            visibility: Visibility::Public,
            flags: MethodFlags::empty(),
        }
    }

    /// A public getter `name(): ty`.
    pub fn getter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name).returning(ty)
    }

    /// A public setter `void name(ty)`.
    pub fn setter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name).with_param(ty)
    }

    pub fn with_param(mut self, ty: TypeRef) -> Self {
        self.params.push(ty);
        self
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }
}

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

impl DirectiveSet for ParamDescriptor {
    fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

/// A declared constructor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

impl ConstructorDescriptor {
    /// A public no-argument constructor.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_no_arg(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters carrying a binding directive.
    pub fn directived_param_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| p.has_binding_directive())
            .count()
    }

    /// Whether every parameter carries a binding directive (and there is at least one).
    pub fn is_fully_directived(&self) -> bool {
        !self.params.is_empty() && self.directived_param_count() == self.params.len()
    }

    /// Human-readable signature, e.g. `Item(String, int)`.
    pub fn signature(&self, owner: &QualifiedName) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", owner.simple_name(), params.join(", "))
    }
}
