use std::fmt;

use serde::{Deserialize, Serialize};

/// Visibility of a class, field, method or constructor as reported by the host.
///
/// Generated binding code lives in the bound class's package, so anything
/// other than `Private` is reachable from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// Whether code generated into the declaring package can reach this member.
    pub fn is_package_accessible(self) -> bool {
        !matches!(self, Visibility::Private)
    }

    /// Whether this is `Public` or `Package`.
    ///
    /// Matcher target types are instantiated by generated adapters and must not
    /// be private or protected.
    pub fn is_public_or_package(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Package)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package-private"),
            Visibility::Private => write!(f, "private"),
        }
    }
}
