//! Conflict Validator - uniqueness rules over an assembled tree.
//!
//! Checks run in a fixed order so the reported conflict depends only on the
//! input, never on hash iteration:
//!
//! 1. Sibling names: two fields of one class in the same slot
//!    (`DuplicateAttribute` / `DuplicateElement`)
//! 2. More than one text-content field
//! 3. Element sub-trees: an element field owns everything below its path, so
//!    no other field may live at or under it (`ElementAttributePathConflict`)
//! 4. Inherited names: a descendant field and an ancestor field in the same
//!    slot (`InheritedNameConflict`)
//!
//! Attributes and elements occupy separate name spaces and may share a name.

use xmlbind_core::{BindingError, QualifiedName};

use crate::tree::{Assembly, Namespace, Placement};

/// Validate an assembly for the class being resolved.
pub fn validate(class: &QualifiedName, assembly: &Assembly) -> Result<(), BindingError> {
    check_siblings(assembly)?;
    check_text_content(class, assembly)?;
    check_element_subtrees(class, assembly)?;
    check_inherited(assembly)?;
    Ok(())
}

fn check_siblings(assembly: &Assembly) -> Result<(), BindingError> {
    for (slot, indices) in &assembly.occupants {
        for (i, &first) in indices.iter().enumerate() {
            let existing = &assembly.placements[first];
            let Some(new) = indices[i + 1..]
                .iter()
                .map(|&j| &assembly.placements[j])
                .find(|p| p.field.class == existing.field.class)
            else {
                continue;
            };
            let class = existing.field.class.clone();
            let name = slot.name.clone();
            let path = slot.node.to_string();
            let existing = existing.field.field.clone();
            let new = new.field.field.clone();
            return Err(match slot.namespace {
                Namespace::Attribute => BindingError::DuplicateAttribute {
                    class,
                    name,
                    path,
                    existing,
                    new,
                },
                _ => BindingError::DuplicateElement {
                    class,
                    name,
                    path,
                    existing,
                    new,
                },
            });
        }
    }
    Ok(())
}

fn check_text_content(class: &QualifiedName, assembly: &Assembly) -> Result<(), BindingError> {
    if let [first, second, ..] = assembly.text_content.as_slice() {
        return Err(BindingError::DuplicateTextContent {
            class: class.clone(),
            existing: assembly.placements[*first].field.to_string(),
            new: assembly.placements[*second].field.to_string(),
        });
    }
    Ok(())
}

fn check_element_subtrees(class: &QualifiedName, assembly: &Assembly) -> Result<(), BindingError> {
    let elements = assembly
        .placements
        .iter()
        .enumerate()
        .filter(|(_, p)| p.namespace == Namespace::Element);

    for (i, element) in elements {
        let owned = element.full_path();
        let conflict = assembly
            .placements
            .iter()
            .enumerate()
            .find(|(j, other)| *j != i && other.node.starts_with(&owned));
        if let Some((_, other)) = conflict {
            return Err(BindingError::ElementAttributePathConflict {
                class: class.clone(),
                element_field: element.field.field.clone(),
                conflicting_field: other.field.field.clone(),
                path: other.full_path().to_string(),
            });
        }
    }
    Ok(())
}

fn check_inherited(assembly: &Assembly) -> Result<(), BindingError> {
    for (slot, indices) in &assembly.occupants {
        let mut occupants: Vec<&Placement> =
            indices.iter().map(|&i| &assembly.placements[i]).collect();
        if occupants.len() < 2 {
            continue;
        }
        occupants.sort_by_key(|p| p.depth);
        let descendant = occupants[0];
        let Some(ancestor) = occupants[1..]
            .iter()
            .find(|p| p.field.class != descendant.field.class)
        else {
            continue;
        };
        return Err(BindingError::InheritedNameConflict {
            namespace: slot.namespace.as_str(),
            name: slot.name.clone(),
            path: slot.node.to_string(),
            descendant_class: descendant.field.class.clone(),
            descendant_field: descendant.field.field.clone(),
            ancestor_class: ancestor.field.class.clone(),
            ancestor_field: ancestor.field.field.clone(),
        });
    }
    Ok(())
}
