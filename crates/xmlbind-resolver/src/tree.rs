//! Binding Tree Assembler - places field models into nested nodes.
//!
//! Each field lands at its container path (synthetic nodes are created for
//! every path segment) under its own XML name:
//!
//! ```text
//! @Attribute id                        root.attributes["id"]
//! @Path("meta/info") @Attribute rev    root.elements["meta"] > ["info"] .attributes["rev"]
//! @Element shape: Shape {circle, sq}   root.elements["circle"], root.elements["sq"]
//! ```
//!
//! Polymorphic placeholders are never placed; their substitutions are. The
//! assembler is first-wins and never fails: every placement is recorded
//! together with the occupants of each named slot, and the conflict validator
//! decides whether the result is acceptable.

use indexmap::IndexMap;
use xmlbind_core::XmlPath;

use crate::model::{BindingNode, ElementEntry, FieldKind, FieldModel, FieldRef, TypeMatcher};

/// Name space within a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Attribute,
    Element,
    TextContent,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Attribute => "attribute",
            Namespace::Element => "element",
            Namespace::TextContent => "text-content",
        }
    }

    fn of(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Attribute { .. } => Namespace::Attribute,
            FieldKind::TextContent { .. } => Namespace::TextContent,
            _ => Namespace::Element,
        }
    }
}

/// Where one field model was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub field: FieldRef,
    /// Inheritance depth of the declaring class (0 for the resolved class).
    pub depth: usize,
    /// Node the entry lives in.
    pub node: XmlPath,
    pub namespace: Namespace,
    pub name: Option<String>,
}

impl Placement {
    /// Path of the entry itself: the node path plus the entry's name.
    pub fn full_path(&self) -> XmlPath {
        match &self.name {
            Some(name) => self.node.child(name),
            None => self.node.clone(),
        }
    }
}

/// A named slot: one name in one name space of one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub node: XmlPath,
    pub namespace: Namespace,
    pub name: String,
}

/// The assembled tree plus everything the validator needs.
#[derive(Debug, Default)]
pub struct Assembly {
    pub root: BindingNode,
    pub placements: Vec<Placement>,
    /// Placement indices per slot, in insertion order.
    pub occupants: IndexMap<Slot, Vec<usize>>,
    /// Placement indices of text-content fields.
    pub text_content: Vec<usize>,
}

/// Builds one class's binding tree.
#[derive(Debug, Default)]
pub struct TreeAssembler {
    assembly: Assembly,
}

impl TreeAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a field model. Placeholders must be expanded with
    /// [`substitutions`] first.
    pub fn insert(&mut self, field: FieldModel, depth: usize) {
        let namespace = Namespace::of(&field.kind);
        let name = field.kind.xml_name().map(str::to_string);
        let index = self.assembly.placements.len();
        self.assembly.placements.push(Placement {
            field: field.source.clone(),
            depth,
            node: field.path.clone(),
            namespace,
            name: name.clone(),
        });

        match (namespace, name) {
            (Namespace::TextContent, _) | (_, None) => {
                self.assembly.text_content.push(index);
                if self.assembly.root.text_content.is_none() {
                    self.assembly.root.text_content = Some(field);
                }
            }
            (namespace, Some(name)) => {
                let slot = Slot {
                    node: field.path.clone(),
                    namespace,
                    name: name.clone(),
                };
                self.assembly.occupants.entry(slot).or_default().push(index);

                // A path running through a field element is left for the validator.
                let Some(node) = node_mut(&mut self.assembly.root, &field.path) else {
                    return;
                };
                if namespace == Namespace::Attribute {
                    node.attributes.entry(name).or_insert(field);
                } else {
                    node.elements
                        .entry(name)
                        .or_insert(ElementEntry::Field(field));
                }
            }
        }
    }

    pub fn finish(self) -> Assembly {
        self.assembly
    }
}

/// Walk to (creating) the container node at `path`.
///
/// Returns `None` if a segment is occupied by a field element.
fn node_mut<'t>(root: &'t mut BindingNode, path: &XmlPath) -> Option<&'t mut BindingNode> {
    let mut node = root;
    for segment in path.segments() {
        let entry = node
            .elements
            .entry(segment.clone())
            .or_insert_with(|| ElementEntry::Container(BindingNode::new()));
        match entry {
            ElementEntry::Container(child) => node = child,
            ElementEntry::Field(_) => return None,
        }
    }
    Some(node)
}

/// Expand a polymorphic placeholder into one substitution per matcher.
pub fn substitutions(placeholder: &FieldModel, matchers: &[TypeMatcher]) -> Vec<FieldModel> {
    let list = matches!(placeholder.kind, FieldKind::PolymorphicElementList { .. });
    matchers
        .iter()
        .map(|m| FieldModel {
            source: placeholder.source.clone(),
            ty: placeholder.ty.clone(),
            kind: FieldKind::PolymorphicSubstitution {
                name: m.xml_name.clone(),
                concrete: m.concrete.clone(),
                original: placeholder.source.clone(),
                list,
            },
            access: placeholder.access.clone(),
            path: placeholder.path.clone(),
        })
        .collect()
}
