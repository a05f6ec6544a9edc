//! Resolver configuration.
//!
//! ```
//! use xmlbind_resolver::{FailurePolicy, ResolverConfig};
//! use xmlbind_core::ScanMode;
//!
//! let config = ResolverConfig::from_json(r#"{"failure_policy": "skip_class"}"#).unwrap();
//! assert_eq!(config.failure_policy, FailurePolicy::SkipClass);
//! assert_eq!(config.default_scan_mode, ScanMode::DirectivesOnly);
//! assert!(config.hungarian_notation);
//! ```

use serde::{Deserialize, Serialize};
use xmlbind_core::ScanMode;

/// What the driver does when one class fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing class.
    #[default]
    AbortRun,
    /// Record the failure and continue with the remaining classes.
    SkipClass,
}

/// Resolver-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Scan mode for classes whose directive does not choose one.
    pub default_scan_mode: ScanMode,
    pub failure_policy: FailurePolicy,
    /// Strip a leading `m` prefix (`mName`) when looking up accessors.
    pub hungarian_notation: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_scan_mode: ScanMode::DirectivesOnly,
            failure_policy: FailurePolicy::AbortRun,
            hungarian_notation: true,
        }
    }
}

impl ResolverConfig {
    /// Parse a configuration document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.default_scan_mode = mode;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_hungarian_notation(mut self, enabled: bool) -> Self {
        self.hungarian_notation = enabled;
        self
    }
}
