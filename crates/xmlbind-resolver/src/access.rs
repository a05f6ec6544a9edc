//! Access Strategy Selector - how generated code reads and writes a field.
//!
//! A field visible from the declaring package and not `final` is accessed
//! directly. Otherwise it needs a getter and a setter. Constructor parameters
//! are written by the constructor and read through a getter.
//!
//! ## Accessor Names
//!
//! ```text
//! field        getter candidates                 setter candidates
//! name         getName                           setName
//! active: bool isActive, getActive               setActive
//! mName        getMName, getName, getmName       setMName, setName, setmName
//! ```
//!
//! The Hungarian fallbacks (`mName`) are only tried when enabled in the
//! configuration. Candidates are searched in the declaring class first, then
//! its supertypes nearest first. Static methods never count.
//!
//! Getters take no parameters and return exactly the field's declared type.
//! Setters take exactly one parameter of that type. Both must be visible from
//! the declaring package.

use rustc_hash::FxHashSet;
use xmlbind_core::{
    BindingError, ClassDescriptor, FieldDescriptor, MethodDescriptor, ParamDescriptor, TypeRef,
    capitalize,
};
use xmlbind_registry::ClassSource;

use crate::context::ResolveContext;
use crate::model::AccessStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorKind {
    Getter,
    Setter,
}

/// Selects and validates access strategies.
pub struct AccessSelector<'a, S> {
    ctx: ResolveContext<'a, S>,
}

impl<'a, S: ClassSource> AccessSelector<'a, S> {
    pub fn new(ctx: ResolveContext<'a, S>) -> Self {
        Self { ctx }
    }

    /// Strategy for a field bound by field-level directives.
    pub fn select_field(
        &self,
        declaring: &'a ClassDescriptor,
        field: &FieldDescriptor,
    ) -> Result<AccessStrategy, BindingError> {
        if field.visibility.is_package_accessible() && !field.is_final() {
            return Ok(AccessStrategy::DirectField);
        }
        let getter = self.find_getter(declaring, &field.name, &field.ty)?;
        let setter = self.find_setter(declaring, &field.name, &field.ty)?;
        Ok(AccessStrategy::GetterSetter { getter, setter })
    }

    /// Strategy for a directived constructor parameter.
    pub fn select_constructor_param(
        &self,
        class: &'a ClassDescriptor,
        param: &ParamDescriptor,
    ) -> Result<AccessStrategy, BindingError> {
        let getter = self.find_getter(class, &param.name, &param.ty)?;
        Ok(AccessStrategy::ConstructorParamWithGetter { getter })
    }

    pub fn find_getter(
        &self,
        class: &'a ClassDescriptor,
        field: &str,
        ty: &TypeRef,
    ) -> Result<String, BindingError> {
        let candidates = getter_names(field, ty, self.ctx.config.hungarian_notation);
        self.find_accessor(class, field, ty, &candidates, AccessorKind::Getter)
    }

    pub fn find_setter(
        &self,
        class: &'a ClassDescriptor,
        field: &str,
        ty: &TypeRef,
    ) -> Result<String, BindingError> {
        let candidates = setter_names(field, self.ctx.config.hungarian_notation);
        self.find_accessor(class, field, ty, &candidates, AccessorKind::Setter)
    }

    fn find_accessor(
        &self,
        class: &'a ClassDescriptor,
        field: &str,
        ty: &TypeRef,
        candidates: &[String],
        kind: AccessorKind,
    ) -> Result<String, BindingError> {
        let lineage = self.ctx.lineage(class);
        let mut wrong_signature: Option<&MethodDescriptor> = None;
        let mut hidden: Option<&MethodDescriptor> = None;

        for name in candidates {
            for owner in lineage.iter().copied() {
                for method in owner.find_methods(name).filter(|m| !m.is_static()) {
                    if !has_signature(method, ty, kind) {
                        wrong_signature.get_or_insert(method);
                    } else if !method.visibility.is_package_accessible() {
                        hidden.get_or_insert(method);
                    } else {
                        return Ok(method.name.clone());
                    }
                }
            }
        }

        let class_name = class.name.clone();
        let field = field.to_string();
        if let Some(method) = hidden {
            return Err(BindingError::InsufficientVisibility {
                class: class_name,
                field,
                method: method.name.clone(),
                visibility: method.visibility,
            });
        }
        if let Some(method) = wrong_signature {
            let method = method.name.clone();
            let expected = ty.to_string();
            return Err(match kind {
                AccessorKind::Getter => BindingError::WrongGetterSignature {
                    class: class_name,
                    field,
                    method,
                    expected,
                },
                AccessorKind::Setter => BindingError::WrongSetterSignature {
                    class: class_name,
                    field,
                    method,
                    expected,
                },
            });
        }
        let expected = candidates.to_vec();
        Err(match kind {
            AccessorKind::Getter => BindingError::NoGetterFound {
                class: class_name,
                field,
                expected,
            },
            AccessorKind::Setter => BindingError::NoSetterFound {
                class: class_name,
                field,
                expected,
            },
        })
    }
}

fn has_signature(method: &MethodDescriptor, ty: &TypeRef, kind: AccessorKind) -> bool {
    match kind {
        AccessorKind::Getter => method.params.is_empty() && method.return_type.as_ref() == Some(ty),
        AccessorKind::Setter => method.params.len() == 1 && method.params[0] == *ty,
    }
}

/// `mName` -> `Name`.
fn strip_hungarian(name: &str) -> Option<&str> {
    let rest = name.strip_prefix('m')?;
    rest.chars()
        .next()
        .filter(|c| c.is_uppercase())
        .map(|_| rest)
}

fn accessor_names(prefixes: &[&str], field: &str, hungarian: bool) -> Vec<String> {
    let mut names: Vec<String> = prefixes
        .iter()
        .map(|p| format!("{p}{}", capitalize(field)))
        .collect();
    if hungarian {
        if let Some(stripped) = strip_hungarian(field) {
            names.extend(prefixes.iter().map(|p| format!("{p}{stripped}")));
            names.extend(prefixes.iter().map(|p| format!("{p}{field}")));
        }
    }
    let mut seen = FxHashSet::default();
    names.retain(|n| seen.insert(n.clone()));
    names
}

/// Getter names to try for a field, in order.
pub fn getter_names(field: &str, ty: &TypeRef, hungarian: bool) -> Vec<String> {
    if ty.is_boolean() {
        accessor_names(&["is", "get"], field, hungarian)
    } else {
        accessor_names(&["get"], field, hungarian)
    }
}

/// Setter names to try for a field, in order.
pub fn setter_names(field: &str, hungarian: bool) -> Vec<String> {
    accessor_names(&["set"], field, hungarian)
}
