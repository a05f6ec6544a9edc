use std::fmt;

use serde::{Deserialize, Serialize};

/// Package-qualified class name.
///
/// Used as the primary key for class lookup. [`TypeHash`](crate::TypeHash) is
/// computed from it when a stable graph id is needed.
///
/// # Examples
///
/// ```
/// use xmlbind_core::QualifiedName;
///
/// // Default package
/// let item = QualifiedName::simple("Item");
/// assert_eq!(item.to_string(), "Item");
///
/// // With package
/// let shape = QualifiedName::new("Shape", vec!["com".into(), "example".into()]);
/// assert_eq!(shape.to_string(), "com.example.Shape");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    /// Simple name (e.g., "Item", "Shape")
    pub name: String,
    /// Package path (e.g., ["com", "example"])
    /// Empty for the default package
    pub package: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with a package.
    pub fn new(name: impl Into<String>, package: Vec<String>) -> Self {
        Self {
            name: name.into(),
            package,
        }
    }

    /// Create a qualified name in the default package.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: Vec::new(),
        }
    }

    /// Create from a dotted string (e.g., "com.example.Item").
    ///
    /// The last segment is the name, the rest is the package. Empty segments
    /// are dropped, so ".Item" == "Item".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                package: parts,
            },
            None => Self::simple(""),
        }
    }

    /// Check if this is in the default package.
    pub fn is_default_package(&self) -> bool {
        self.package.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the package path.
    pub fn package_path(&self) -> &[String] {
        &self.package
    }

    /// Get the package as a dotted string.
    pub fn package_string(&self) -> String {
        self.package.join(".")
    }

    /// Check whether both names live in the same package.
    pub fn same_package(&self, other: &QualifiedName) -> bool {
        self.package == other.package
    }

    /// Compute the [`TypeHash`](crate::TypeHash) for this name.
    pub fn to_type_hash(&self) -> crate::TypeHash {
        crate::TypeHash::from_name(&self.to_string())
    }

    /// Create a sibling name in the same package.
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: self.package.clone(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_package_name() {
        let name = QualifiedName::simple("Item");
        assert_eq!(name.name, "Item");
        assert!(name.is_default_package());
        assert_eq!(name.to_string(), "Item");
    }

    #[test]
    fn from_dotted_string() {
        let name = QualifiedName::from_qualified_string("com.example.Item");
        assert_eq!(name.simple_name(), "Item");
        assert_eq!(name.package_path(), &["com".to_string(), "example".to_string()]);
        assert_eq!(name.package_string(), "com.example");
    }

    #[test]
    fn leading_dot_is_ignored() {
        assert_eq!(
            QualifiedName::from(".com.Item"),
            QualifiedName::from("com.Item")
        );
    }

    #[test]
    fn same_package_and_sibling() {
        let a = QualifiedName::from("com.example.A");
        let b = a.sibling("B");
        assert_eq!(b.to_string(), "com.example.B");
        assert!(a.same_package(&b));
        assert!(!a.same_package(&QualifiedName::from("org.B")));
    }

    #[test]
    fn serde_as_string() {
        let name = QualifiedName::from("com.example.Item");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"com.example.Item\"");
        let back: QualifiedName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn hash_is_stable() {
        let a = QualifiedName::from("com.example.Item");
        let b = QualifiedName::new("Item", vec!["com".into(), "example".into()]);
        assert_eq!(a.to_type_hash(), b.to_type_hash());
    }
}
