//! Field Classifier - turns directives into typed field kinds.
//!
//! ## Algorithm
//!
//! 1. Static fields and fields carrying `Ignore` are skipped (`Ignore` next to
//!    a binding directive is a conflict)
//! 2. Count the mutually exclusive binding directives
//!    (attribute, property-element, element, text-content):
//!    - none: skip, or in common-case scan mode bind implicitly
//!      (scalars as property elements, bindable or registry-resolvable
//!      classes and lists of them as elements, anything else skipped)
//!    - more than one: `MultipleDirectives`
//! 3. Dispatch on the single directive, defaulting and validating XML names
//! 4. Parse the path directive, if any, into the container path
//!
//! Element targets whose declared (or list item) type is abstract, or which
//! list explicit matchers, become polymorphic placeholders. The generic-type
//! registry is only read here.

use xmlbind_core::{
    BindingError, ClassDescriptor, Directive, DirectiveSet, ElementDirective, FieldDescriptor,
    ParamDescriptor, QualifiedName, ScanMode, TypeRef, XmlPath, path,
};
use xmlbind_registry::ClassSource;

use crate::context::ResolveContext;
use crate::model::{FieldKind, FieldRef, TypeMatcher};
use crate::walker::WalkedField;

const TEXT_WITHOUT_CONVERTER: &str =
    "only primitives, boxed primitives and strings can be written as text without a converter";

/// A field or constructor parameter presented to the classifier.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    pub declaring: &'a ClassDescriptor,
    pub name: &'a str,
    pub ty: &'a TypeRef,
    pub directives: &'a [Directive],
    pub depth: usize,
    /// Whether an undirected member is bound implicitly.
    pub implicit: bool,
}

impl<'a> Member<'a> {
    pub fn from_field(walked: &WalkedField<'a>, scan_mode: ScanMode) -> Self {
        let field: &'a FieldDescriptor = walked.field;
        Self {
            declaring: walked.declaring,
            name: &field.name,
            ty: &field.ty,
            directives: &field.directives,
            depth: walked.depth,
            implicit: scan_mode == ScanMode::CommonCase && !field.is_transient(),
        }
    }

    pub fn from_param(declaring: &'a ClassDescriptor, param: &'a ParamDescriptor) -> Self {
        Self {
            declaring,
            name: &param.name,
            ty: &param.ty,
            directives: &param.directives,
            depth: 0,
            implicit: false,
        }
    }

    fn field_ref(&self) -> FieldRef {
        FieldRef::new(&self.declaring.name, self.name)
    }
}

impl DirectiveSet for Member<'_> {
    fn directives(&self) -> &[Directive] {
        self.directives
    }
}

/// A classified member, before access selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    pub source: FieldRef,
    pub depth: usize,
    pub ty: TypeRef,
    pub kind: FieldKind,
    /// Container path from the path directive; root when absent.
    pub path: XmlPath,
    /// Declared (or list item) type of a polymorphic placeholder.
    pub polymorphic_type: Option<QualifiedName>,
}

/// Classifies members against the descriptor source and generic registry.
pub struct FieldClassifier<'a, S> {
    ctx: ResolveContext<'a, S>,
}

impl<'a, S: ClassSource> FieldClassifier<'a, S> {
    pub fn new(ctx: ResolveContext<'a, S>) -> Self {
        Self { ctx }
    }

    /// Classify a walked field. Static fields are never bound.
    pub fn classify_field(
        &self,
        walked: &WalkedField<'a>,
        scan_mode: ScanMode,
    ) -> Result<Option<ClassifiedField>, BindingError> {
        if walked.field.is_static() {
            tracing::trace!(
                class = %walked.declaring.name,
                field = %walked.field.name,
                "skipping static field"
            );
            return Ok(None);
        }
        self.classify(&Member::from_field(walked, scan_mode))
    }

    /// Classify one member.
    pub fn classify(&self, member: &Member<'_>) -> Result<Option<ClassifiedField>, BindingError> {
        let binding = member.binding_directives();

        if member.is_ignored() {
            if binding.is_empty() {
                return Ok(None);
            }
            return Err(self.multiple_directives(member));
        }

        let implicit;
        let directive = match binding.as_slice() {
            [] if member.implicit => match self.implicit_directive(member.ty) {
                Some(directive) => {
                    implicit = directive;
                    &implicit
                }
                None => {
                    tracing::trace!(
                        class = %member.declaring.name,
                        field = member.name,
                        ty = %member.ty,
                        "no implicit binding for field type"
                    );
                    return Ok(None);
                }
            },
            [] => {
                if member.path_directive().is_some() {
                    return Err(BindingError::PathWithoutBinding {
                        class: member.declaring.name.clone(),
                        field: member.name.to_string(),
                    });
                }
                return Ok(None);
            }
            [single] => *single,
            _ => return Err(self.multiple_directives(member)),
        };

        let mut polymorphic_type = None;
        let kind = match directive {
            Directive::Attribute(d) => {
                self.check_text_type(member, "attribute", d.converter.as_ref())?;
                FieldKind::Attribute {
                    name: self.checked_name(member, d.name.as_deref().unwrap_or(member.name))?,
                    required: d.required,
                    converter: d.converter.clone(),
                }
            }
            Directive::PropertyElement(d) => {
                self.check_text_type(member, "property-element", d.converter.as_ref())?;
                FieldKind::PropertyElement {
                    name: self.checked_name(member, d.name.as_deref().unwrap_or(member.name))?,
                    required: d.required,
                    write_as_cdata: d.write_as_cdata,
                    converter: d.converter.clone(),
                }
            }
            Directive::TextContent(d) => {
                if member.path_directive().is_some() {
                    return Err(BindingError::PathOnTextContent {
                        class: member.declaring.name.clone(),
                        field: member.name.to_string(),
                    });
                }
                if !member.ty.is_string() {
                    return Err(self.invalid_target(
                        member,
                        "text-content",
                        "text content must be a string",
                    ));
                }
                FieldKind::TextContent {
                    write_as_cdata: d.write_as_cdata,
                }
            }
            Directive::Element(d) => {
                let (kind, declared) = self.classify_element(member, d)?;
                polymorphic_type = declared;
                kind
            }
            Directive::Path(_) | Directive::Ignore => {
                return Err(self.multiple_directives(member));
            }
        };

        let path = match member.path_directive() {
            Some(raw) => path::segment(raw).map_err(|source| self.invalid_path(member, source))?,
            None => XmlPath::root(),
        };

        tracing::trace!(
            class = %member.declaring.name,
            field = member.name,
            kind = kind.label(),
            path = %path,
            "classified field"
        );

        Ok(Some(ClassifiedField {
            source: member.field_ref(),
            depth: member.depth,
            ty: member.ty.clone(),
            kind,
            path,
            polymorphic_type,
        }))
    }

    fn classify_element(
        &self,
        member: &Member<'_>,
        directive: &ElementDirective,
    ) -> Result<(FieldKind, Option<QualifiedName>), BindingError> {
        let (item, is_list) = match member.ty {
            TypeRef::List(item) => (item.as_ref(), true),
            other => (other, false),
        };
        let TypeRef::Class(target_name) = item else {
            return Err(self.invalid_target(
                member,
                "element",
                "elements bind classes or lists of classes",
            ));
        };
        let Some(target) = self.ctx.class(target_name) else {
            return Err(BindingError::UnknownFieldType {
                class: member.declaring.name.clone(),
                field: member.name.to_string(),
                ty: target_name.clone(),
            });
        };

        if target.is_abstract_type() || !directive.matchers.is_empty() {
            if directive.matchers.is_empty() && !self.ctx.registry.has_entries(target_name) {
                return Err(BindingError::MissingPolymorphismResolution {
                    class: member.declaring.name.clone(),
                    field: member.name.to_string(),
                    ty: target_name.clone(),
                });
            }
            let placeholder =
                self.checked_name(member, directive.name.as_deref().unwrap_or(member.name))?;
            let matchers = directive
                .matchers
                .iter()
                .map(|m| {
                    Ok(TypeMatcher {
                        xml_name: self.checked_name(member, &m.name)?,
                        concrete: m.ty.clone(),
                    })
                })
                .collect::<Result<Vec<_>, BindingError>>()?;

            let kind = if is_list {
                FieldKind::PolymorphicElementList {
                    placeholder,
                    matchers,
                    item_type: target_name.clone(),
                }
            } else {
                FieldKind::PolymorphicElement {
                    placeholder,
                    matchers,
                }
            };
            return Ok((kind, Some(target_name.clone())));
        }

        if !target.is_bindable() {
            return Err(self.invalid_target(
                member,
                "element",
                &format!("class '{target_name}' does not carry the class-level binding directive"),
            ));
        }

        let name = match &directive.name {
            Some(name) => self.checked_name(member, name)?,
            None => self.checked_name(member, &target.xml_name())?,
        };
        let kind = if is_list {
            FieldKind::ElementList {
                name,
                item_type: target_name.clone(),
                required: directive.required,
            }
        } else {
            FieldKind::Element {
                name,
                required: directive.required,
                target: target_name.clone(),
            }
        };
        Ok((kind, None))
    }

    /// Attribute and property-element values are written as text.
    fn check_text_type(
        &self,
        member: &Member<'_>,
        directive: &'static str,
        converter: Option<&QualifiedName>,
    ) -> Result<(), BindingError> {
        match converter {
            Some(converter) => self.check_converter(member, converter),
            None if member.ty.is_scalar() => Ok(()),
            None => Err(self.invalid_target(member, directive, TEXT_WITHOUT_CONVERTER)),
        }
    }

    fn check_converter(
        &self,
        member: &Member<'_>,
        converter: &QualifiedName,
    ) -> Result<(), BindingError> {
        // Converters the source does not describe are trusted as-is.
        let Some(class) = self.ctx.class(converter) else {
            return Ok(());
        };
        let reason = if class.is_abstract_type() {
            "it is an interface or abstract class"
        } else if !class.constructors.is_empty()
            && !class
                .constructors
                .iter()
                .any(|c| c.is_no_arg() && c.visibility.is_package_accessible())
        {
            "it has no accessible no-argument constructor"
        } else {
            return Ok(());
        };
        Err(BindingError::InvalidConverter {
            class: member.declaring.name.clone(),
            field: member.name.to_string(),
            converter: converter.clone(),
            reason: reason.to_string(),
        })
    }

    fn checked_name(&self, member: &Member<'_>, name: &str) -> Result<String, BindingError> {
        path::validate_name(name).map_err(|source| self.invalid_path(member, source))?;
        Ok(name.to_string())
    }

    fn invalid_path(&self, member: &Member<'_>, source: xmlbind_core::PathError) -> BindingError {
        BindingError::InvalidPath {
            class: member.declaring.name.clone(),
            field: member.name.to_string(),
            source,
        }
    }

    fn invalid_target(
        &self,
        member: &Member<'_>,
        directive: &'static str,
        reason: &str,
    ) -> BindingError {
        BindingError::InvalidTargetType {
            class: member.declaring.name.clone(),
            field: member.name.to_string(),
            directive,
            ty: member.ty.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The directive an undirected member gets in common-case scan mode.
    ///
    /// Scalars become property elements. Classes and lists of classes become
    /// elements only when the target is bindable, or abstract with registered
    /// implementations. Anything else is left unbound.
    fn implicit_directive(&self, ty: &TypeRef) -> Option<Directive> {
        if ty.is_scalar() {
            return Some(Directive::property_element());
        }
        let item = match ty {
            TypeRef::List(item) => item.as_ref(),
            other => other,
        };
        let TypeRef::Class(name) = item else {
            return None;
        };
        let target = self.ctx.class(name)?;
        let bindable = if target.is_abstract_type() {
            self.ctx.registry.has_entries(name)
        } else {
            target.is_bindable()
        };
        bindable.then(Directive::element)
    }

    fn multiple_directives(&self, member: &Member<'_>) -> BindingError {
        BindingError::MultipleDirectives {
            class: member.declaring.name.clone(),
            field: member.name.to_string(),
            directives: member
                .directives
                .iter()
                .filter(|d| d.is_binding() || matches!(d, Directive::Ignore))
                .map(Directive::label)
                .collect(),
        }
    }
}
