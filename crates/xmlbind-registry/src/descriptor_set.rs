//! DescriptorSet - in-memory class-descriptor source.
//!
//! [`DescriptorSet`] stores class descriptors by [`QualifiedName`], preserving
//! registration order so resolution over the whole set is deterministic.
//!
//! # Thread Safety
//!
//! A `DescriptorSet` is populated once (from host metadata or a JSON document)
//! and only read afterwards, so it can be shared across threads by reference.
//!
//! # Example
//!
//! ```
//! use xmlbind_registry::{ClassSource, DescriptorSet};
//! use xmlbind_core::{ClassDescriptor, QualifiedName};
//!
//! let mut set = DescriptorSet::new();
//! set.register(ClassDescriptor::new("com.example.Item").bindable()).unwrap();
//!
//! assert!(set.contains(&QualifiedName::from("com.example.Item")));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xmlbind_core::{ClassDescriptor, QualifiedName};

use crate::{ClassSource, LoadError};

/// On-disk shape of a descriptor document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DescriptorDocument {
    #[serde(default)]
    classes: Vec<ClassDescriptor>,
}

/// In-memory [`ClassSource`].
#[derive(Debug, Default, Clone)]
pub struct DescriptorSet {
    classes: IndexMap<QualifiedName, ClassDescriptor>,
}

impl DescriptorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from descriptors, rejecting duplicate names.
    pub fn from_classes(
        classes: impl IntoIterator<Item = ClassDescriptor>,
    ) -> Result<Self, LoadError> {
        let mut set = Self::new();
        for class in classes {
            set.register(class)?;
        }
        Ok(set)
    }

    /// Parse a JSON document of the form `{"classes": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let document: DescriptorDocument = serde_json::from_str(json)?;
        Self::from_classes(document.classes)
    }

    /// Serialize the set back to a JSON document.
    pub fn to_json(&self) -> Result<String, LoadError> {
        let document = DescriptorDocument {
            classes: self.classes.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Register a class descriptor.
    pub fn register(&mut self, class: ClassDescriptor) -> Result<(), LoadError> {
        if self.classes.contains_key(&class.name) {
            return Err(LoadError::DuplicateClass(class.name.to_string()));
        }
        tracing::trace!(class = %class.name, "registered class descriptor");
        self.classes.insert(class.name.clone(), class);
        Ok(())
    }

    /// Replace (or add) a class descriptor, returning the previous one.
    ///
    /// Used when a host re-scans a class whose declarations changed.
    pub fn replace(&mut self, class: ClassDescriptor) -> Option<ClassDescriptor> {
        self.classes.insert(class.name.clone(), class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassSource for DescriptorSet {
    fn class(&self, name: &QualifiedName) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }

    fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut set = DescriptorSet::new();
        set.register(ClassDescriptor::new("a.Item").bindable()).unwrap();
        set.register(ClassDescriptor::new("a.Other")).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.class(&"a.Item".into()).is_some());
        assert!(set.class(&"a.Missing".into()).is_none());

        let bindable: Vec<String> = set.bindable_classes().map(|c| c.name.to_string()).collect();
        assert_eq!(bindable, vec!["a.Item"]);
    }

    #[test]
    fn duplicate_registration() {
        let mut set = DescriptorSet::new();
        set.register(ClassDescriptor::new("a.Item")).unwrap();
        let result = set.register(ClassDescriptor::new("a.Item"));
        match result {
            Err(LoadError::DuplicateClass(name)) => assert_eq!(name, "a.Item"),
            other => panic!("Expected DuplicateClass error, got {:?}", other),
        }
    }

    #[test]
    fn order_is_preserved() {
        let set = DescriptorSet::from_classes(vec![
            ClassDescriptor::new("z.Last"),
            ClassDescriptor::new("a.First"),
        ])
        .unwrap();
        let names: Vec<String> = set.classes().map(|c| c.name.to_string()).collect();
        assert_eq!(names, vec!["z.Last", "a.First"]);
    }

    #[test]
    fn json_round_trip() {
        let json = r#"{
            "classes": [
                {
                    "name": "com.example.Item",
                    "xml": {"name": "item"},
                    "fields": [
                        {"name": "a", "type": "string", "directives": [{"attribute": {}}]}
                    ]
                }
            ]
        }"#;
        let set = DescriptorSet::from_json(json).unwrap();
        let item = set.class(&"com.example.Item".into()).unwrap();
        assert_eq!(item.xml_name(), "item");
        assert_eq!(item.fields.len(), 1);

        let again = DescriptorSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(again.class(&"com.example.Item".into()), Some(item));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            DescriptorSet::from_json("{\"classes\": 3}"),
            Err(LoadError::Json(_))
        ));
    }
}
