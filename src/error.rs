use thiserror::Error;
use xmlbind_core::BindingError;
use xmlbind_registry::LoadError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the one-call JSON entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// The descriptor document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The resolver configuration is not valid JSON.
    #[error("invalid resolver configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// A class failed to resolve.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl Error {
    /// The binding failure, if this is one.
    pub fn as_binding_error(&self) -> Option<&BindingError> {
        match self {
            Error::Binding(err) => Some(err),
            _ => None,
        }
    }
}
