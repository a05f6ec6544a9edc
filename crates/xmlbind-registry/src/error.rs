use thiserror::Error;

/// Errors raised while building a descriptor source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The descriptor document is not valid JSON or has the wrong shape.
    #[error("invalid descriptor document: {0}")]
    Json(#[from] serde_json::Error),

    /// A class with this name was already registered.
    #[error("duplicate class descriptor: {0}")]
    DuplicateClass(String),
}
