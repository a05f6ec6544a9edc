//! Class Resolution Pass - build the binding model of one class.
//!
//! ## Pipeline
//!
//! ```text
//! walker ──▶ classifier ──┬──▶ access selector ──┐
//!                         └──▶ polymorphism ─────┴──▶ tree assembler ──▶ conflict validator
//! ```
//!
//! Every per-field check (directives, access, matchers) completes before the
//! tree is assembled, and the first failure aborts the class. Nothing is
//! written to shared state, so resolving the same class twice yields the same
//! model.

use xmlbind_core::{BindingError, DirectiveSet, QualifiedName};
use xmlbind_registry::ClassSource;

use crate::access::AccessSelector;
use crate::classifier::{ClassifiedField, FieldClassifier, Member};
use crate::conflicts;
use crate::context::ResolveContext;
use crate::model::{
    AccessStrategy, BindingModel, ConstructorBinding, FieldModel, PolymorphicField,
};
use crate::polymorphism::PolymorphismResolver;
use crate::tree::{self, TreeAssembler};
use crate::walker::{self, ClassWalk};

/// Class Resolution Pass - resolves a single class.
pub struct ClassResolutionPass<'a, S> {
    ctx: ResolveContext<'a, S>,
    class: &'a QualifiedName,
}

impl<'a, S: ClassSource> ClassResolutionPass<'a, S> {
    pub fn new(ctx: ResolveContext<'a, S>, class: &'a QualifiedName) -> Self {
        Self { ctx, class }
    }

    /// Run the resolution pass.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self) -> Result<BindingModel, BindingError> {
        let class = self
            .ctx
            .class(self.class)
            .ok_or_else(|| BindingError::UnknownClass {
                class: self.class.clone(),
            })?;
        if !class.is_bindable() {
            return Err(BindingError::NotBindable {
                class: class.name.clone(),
            });
        }

        let walk = walker::walk(self.ctx.source, class)?;
        let (fields, constructor) = match walk.constructor {
            Some(_) => self.constructor_fields(&walk)?,
            None => (self.directived_fields(&walk)?, None),
        };

        let polymorphism = PolymorphismResolver::new(self.ctx);
        let mut assembler = TreeAssembler::new();
        let mut polymorphic_fields = Vec::new();

        for (classified, access) in fields {
            let depth = classified.depth;
            let declared = classified.polymorphic_type.clone();
            let model = FieldModel {
                source: classified.source,
                ty: classified.ty,
                kind: classified.kind,
                access,
                path: classified.path,
            };

            let Some(declared) = declared else {
                assembler.insert(model, depth);
                continue;
            };
            let resolved = polymorphism.resolve(&model.source, &declared, model.kind.matchers())?;
            for substitution in tree::substitutions(&model, &resolved.matchers) {
                assembler.insert(substitution, depth);
            }
            polymorphic_fields.push(PolymorphicField {
                field: model,
                matchers: resolved.matchers,
                dispatch_order: resolved.dispatch_order,
            });
        }

        let assembly = assembler.finish();
        conflicts::validate(&class.name, &assembly)?;

        tracing::debug!(
            class = %class.name,
            fields = assembly.placements.len(),
            polymorphic = polymorphic_fields.len(),
            ancestors = walk.chain.len() - 1,
            "resolved binding model"
        );

        Ok(BindingModel {
            class: class.name.clone(),
            xml_name: class.xml_name(),
            root: assembly.root,
            polymorphic_fields,
            constructor,
        })
    }

    /// Fields bound by field-level directives (or implicitly by scan mode).
    fn directived_fields(
        &self,
        walk: &ClassWalk<'a>,
    ) -> Result<Vec<(ClassifiedField, AccessStrategy)>, BindingError> {
        let scan_mode = walk
            .root
            .xml
            .as_ref()
            .and_then(|xml| xml.scan_mode)
            .unwrap_or(self.ctx.config.default_scan_mode);
        let classifier = FieldClassifier::new(self.ctx);
        let access = AccessSelector::new(self.ctx);

        let mut out = Vec::new();
        for walked in &walk.fields {
            let Some(classified) = classifier.classify_field(walked, scan_mode)? else {
                continue;
            };
            let strategy = access.select_field(walked.declaring, walked.field)?;
            out.push((classified, strategy));
        }
        Ok(out)
    }

    /// Constructor parameters bound through the directived constructor.
    fn constructor_fields(
        &self,
        walk: &ClassWalk<'a>,
    ) -> Result<(Vec<(ClassifiedField, AccessStrategy)>, Option<ConstructorBinding>), BindingError>
    {
        let root = walk.root;
        let Some(ctor) = walk.constructor else {
            return Ok((Vec::new(), None));
        };
        let signature = ctor.signature(&root.name);

        let mixed = walk
            .fields
            .iter()
            .find(|w| !w.field.is_static() && w.field.has_binding_directive());
        if let Some(walked) = mixed {
            return Err(BindingError::MixedFieldAndConstructorBinding {
                class: root.name.clone(),
                constructor: signature,
                field: walked.field.name.clone(),
                declaring_class: walked.declaring.name.clone(),
            });
        }

        let classifier = FieldClassifier::new(self.ctx);
        let access = AccessSelector::new(self.ctx);
        let mut out = Vec::with_capacity(ctor.params.len());
        for param in &ctor.params {
            let Some(classified) = classifier.classify(&Member::from_param(root, param))? else {
                continue;
            };
            let strategy = access.select_constructor_param(root, param)?;
            out.push((classified, strategy));
        }

        let binding = ConstructorBinding {
            signature,
            params: ctor.params.iter().map(|p| p.name.clone()).collect(),
        };
        Ok((out, Some(binding)))
    }
}
