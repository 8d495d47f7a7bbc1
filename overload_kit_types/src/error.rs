//! Error types for the type layer.

use thiserror::Error;

/// Errors raised while building type keys or declaring classes.
///
/// All variants represent programmer errors (malformed keys, bad
/// declarations) and are surfaced to the caller immediately; nothing
/// here is retried or recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A type key was constructed from a malformed tag.
    #[error("InvalidKeyError: {detail}")]
    InvalidKey { detail: String },

    /// A type key names a class that was never declared.
    #[error("InvalidKeyError: type key names undeclared class `{class}`")]
    UndeclaredClass { class: String },

    /// A class was declared twice.
    #[error("class `{class}` is already declared")]
    ClassRedefined { class: String },

    /// A class declaration names a parent that does not exist yet.
    /// Parents must be declared before their subclasses, which also
    /// rules out cycles in the class graph.
    #[error("class `{class}` declares unknown parent `{parent}`")]
    UnknownParent { class: String, parent: String },
}

impl TypeError {
    /// Create an invalid-key error.
    pub fn invalid_key<S: Into<String>>(detail: S) -> Self {
        TypeError::InvalidKey {
            detail: detail.into(),
        }
    }

    /// Create an undeclared-class error.
    pub fn undeclared_class<S: Into<String>>(class: S) -> Self {
        TypeError::UndeclaredClass {
            class: class.into(),
        }
    }
}

/// Result type alias for type-layer operations.
pub type TypeResult<T> = Result<T, TypeError>;
