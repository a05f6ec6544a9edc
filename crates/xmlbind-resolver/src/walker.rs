//! Class Descriptor Walker - collects the fields a class binds.
//!
//! ## Algorithm
//!
//! 1. Check the constructor shape of the root class: at most one constructor
//!    may carry directived parameters, and that constructor must be fully
//!    directived
//! 2. Check the root class is instantiable
//! 3. Walk the superclass chain while inheritance is enabled and each ancestor
//!    carries the class-level directive, stopping at the first that does not
//! 4. Emit fields declaring class first, then ancestors outward
//!
//! ```text
//! @Xml class Base { @Attribute id }          depth 1
//! @Xml class Item extends Base { @Attribute a, @Attribute b }   depth 0
//!
//! walk(Item) = [Item.a, Item.b, Base.id]
//! ```
//!
//! Interfaces contribute no fields and are never walked. An ancestor whose own
//! directive disables inheritance ends the chain after itself.

use rustc_hash::FxHashSet;
use xmlbind_core::{
    BindingError, ClassDescriptor, ConstructorDescriptor, DirectiveSet, FieldDescriptor, TypeHash,
};
use xmlbind_registry::ClassSource;

/// A field together with the class that declares it.
#[derive(Debug, Clone, Copy)]
pub struct WalkedField<'a> {
    pub declaring: &'a ClassDescriptor,
    pub field: &'a FieldDescriptor,
    /// 0 for the root class, 1 for its superclass, and so on.
    pub depth: usize,
}

/// Result of walking one class.
#[derive(Debug)]
pub struct ClassWalk<'a> {
    pub root: &'a ClassDescriptor,
    /// Root first, then contributing ancestors outward.
    pub chain: Vec<&'a ClassDescriptor>,
    pub fields: Vec<WalkedField<'a>>,
    /// The constructor fields bind through, if any.
    pub constructor: Option<&'a ConstructorDescriptor>,
}

/// Walk a bindable class and its contributing ancestors.
pub fn walk<'a, S: ClassSource>(
    source: &'a S,
    root: &'a ClassDescriptor,
) -> Result<ClassWalk<'a>, BindingError> {
    let constructor = select_constructor(root)?;
    check_instantiable(root)?;

    let chain = inheritance_chain(source, root);
    let fields = chain
        .iter()
        .copied()
        .enumerate()
        .flat_map(|(depth, class)| {
            class.fields.iter().map(move |field| WalkedField {
                declaring: class,
                field,
                depth,
            })
        })
        .collect();

    Ok(ClassWalk {
        root,
        chain,
        fields,
        constructor,
    })
}

/// The root class and every ancestor that contributes fields.
pub fn inheritance_chain<'a, S: ClassSource>(
    source: &'a S,
    root: &'a ClassDescriptor,
) -> Vec<&'a ClassDescriptor> {
    let mut chain = vec![root];
    let mut visited: FxHashSet<TypeHash> = FxHashSet::default();
    visited.insert(root.type_hash());

    let mut current = root;
    while current.inherits() {
        let Some(parent) = current
            .superclass
            .as_ref()
            .and_then(|name| source.class(name))
        else {
            break;
        };
        if !parent.is_bindable() || !visited.insert(parent.type_hash()) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain
}

/// Find the constructor whose parameters carry binding directives.
///
/// Returns `None` when no constructor is directived. The selected constructor
/// must be callable from generated code.
pub fn select_constructor(
    class: &ClassDescriptor,
) -> Result<Option<&ConstructorDescriptor>, BindingError> {
    for ctor in &class.constructors {
        let directived = ctor.directived_param_count();
        if directived > 0 && directived < ctor.params.len() {
            let plain: Vec<&str> = ctor
                .params
                .iter()
                .filter(|p| !p.has_binding_directive())
                .map(|p| p.name.as_str())
                .collect();
            return Err(BindingError::PartiallyAnnotatedConstructor {
                class: class.name.clone(),
                constructor: ctor.signature(&class.name),
                plain: plain.join(", "),
            });
        }
    }

    let directived: Vec<&ConstructorDescriptor> = class.directived_constructors().collect();
    if directived.len() > 1 {
        let signatures: Vec<String> = directived
            .iter()
            .map(|c| c.signature(&class.name))
            .collect();
        return Err(BindingError::MultipleAnnotatedConstructors {
            class: class.name.clone(),
            constructors: signatures.join(", "),
        });
    }

    let selected = directived.first().copied();
    if let Some(ctor) = selected.filter(|c| !c.visibility.is_package_accessible()) {
        return Err(BindingError::NoUsableConstructor {
            class: class.name.clone(),
            reason: format!(
                "its directived constructor '{}' is private",
                ctor.signature(&class.name)
            ),
        });
    }
    Ok(selected)
}

/// Check that generated code can instantiate the class.
pub fn check_instantiable(class: &ClassDescriptor) -> Result<(), BindingError> {
    if class.is_instantiable() {
        return Ok(());
    }
    let reason = if class.is_interface() {
        "it is an interface"
    } else if class.is_abstract() {
        "it is abstract"
    } else if !class.visibility.is_package_accessible() {
        "the class is private"
    } else if class
        .constructors
        .iter()
        .all(|c| !c.visibility.is_package_accessible())
    {
        "all of its constructors are private"
    } else {
        "it has no accessible no-argument constructor and no fully directived constructor"
    };
    Err(BindingError::NoUsableConstructor {
        class: class.name.clone(),
        reason: reason.to_string(),
    })
}
