//! Resolver passes.
//!
//! - [`discovery`]: populate the generic-type registry from the descriptor source
//! - [`resolution`]: build and validate the binding model of one class

pub mod discovery;
pub mod resolution;

pub use discovery::{DiscoveryOutput, GenericDiscoveryPass};
pub use resolution::ClassResolutionPass;
