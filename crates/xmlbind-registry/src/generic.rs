//! Generic-type registry.
//!
//! Open polymorphic types (interfaces or abstract classes flagged
//! `OPEN_POLYMORPHIC`) accept any registered concrete subtype without per-field
//! matchers. The registry maps each open type to the concrete types discovered
//! for it, in discovery order.
//!
//! # Write discipline
//!
//! The registry is append-only with insert-if-absent semantics keyed by
//! `(open type, concrete type)`: the first registration wins and later ones are
//! ignored. It is populated sequentially before resolution and only read while
//! classes are resolved, so no synchronization is needed. If classes are ever
//! resolved in parallel, discovery must still complete first.

use indexmap::IndexMap;
use serde::Serialize;
use xmlbind_core::QualifiedName;

/// One registered `(xml name, concrete type)` pair under an open type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenericEntry {
    pub xml_name: String,
    pub concrete: QualifiedName,
}

/// Append-only store of open-type substitutions.
#[derive(Debug, Default, Clone)]
pub struct GenericTypeRegistry {
    /// open type -> (concrete type -> xml name)
    entries: IndexMap<QualifiedName, IndexMap<QualifiedName, String>>,
}

impl GenericTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `concrete` under `open` with the given XML name.
    ///
    /// Returns `false` (and leaves the registry unchanged) if `concrete` is
    /// already registered under `open`.
    pub fn register(
        &mut self,
        open: &QualifiedName,
        xml_name: impl Into<String>,
        concrete: &QualifiedName,
    ) -> bool {
        let slot = self.entries.entry(open.clone()).or_default();
        if slot.contains_key(concrete) {
            return false;
        }
        let xml_name = xml_name.into();
        tracing::debug!(open = %open, concrete = %concrete, xml_name = %xml_name, "registered generic substitution");
        slot.insert(concrete.clone(), xml_name);
        true
    }

    /// Entries registered under an open type, in discovery order.
    pub fn entries_for(&self, open: &QualifiedName) -> Vec<GenericEntry> {
        self.entries
            .get(open)
            .map(|slot| {
                slot.iter()
                    .map(|(concrete, xml_name)| GenericEntry {
                        xml_name: xml_name.clone(),
                        concrete: concrete.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether any entry is registered under `open`.
    pub fn has_entries(&self, open: &QualifiedName) -> bool {
        self.entries.get(open).is_some_and(|slot| !slot.is_empty())
    }

    /// Open types with at least one registration.
    pub fn open_types(&self) -> impl Iterator<Item = &QualifiedName> {
        self.entries
            .iter()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(open, _)| open)
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.entries.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
