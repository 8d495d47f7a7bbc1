//! Error types for registry operations.
//!
//! Every variant represents a misconfigured dispatch table or a bad
//! lookup — programmer errors, surfaced synchronously to the caller and
//! never retried or recovered internally.

use std::fmt;

use thiserror::Error;

use overload_kit_types::{TypeError, TypeKey};

/// Candidate keys rendered for ambiguity diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKeys(pub Vec<TypeKey>);

impl fmt::Display for CandidateKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", rendered.join(" | "))
    }
}

/// Errors raised by the dispatch and instance registries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Key construction or class declaration failure from the type layer.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The named class has never been declared.
    #[error("UnknownClassError: class `{class}` is not declared")]
    UnknownClass { class: String },

    /// An identical (class, function, key) triple was registered twice.
    /// Rejected rather than silently overwritten, so an accidental
    /// redefinition is caught at registration time.
    #[error("DuplicateOverloadError: `{class}.{function}` already has an overload for {key}")]
    DuplicateOverload {
        class: String,
        function: String,
        key: TypeKey,
    },

    /// Registration was attempted after the class definition completed.
    #[error("RegistryFrozenError: class `{class}` is frozen; registration is no longer accepted")]
    RegistryFrozen { class: String },

    /// No registered key matches the argument types.
    #[error(
        "NoMatchingOverloadError: no overload of `{class}.{function}` matching {argument_types}"
    )]
    NoMatchingOverload {
        class: String,
        function: String,
        argument_types: TypeKey,
    },

    /// Several registered keys match and none is strictly most specific.
    #[error(
        "AmbiguousDispatchError: `{class}.{function}` with {argument_types} is ambiguous; candidates: {candidates}"
    )]
    AmbiguousDispatch {
        class: String,
        function: String,
        argument_types: TypeKey,
        candidates: CandidateKeys,
    },

    /// Indexed instance lookup out of bounds.
    #[error(
        "IndexOutOfRangeError: index {index} out of range for {count} tracked instance(s) of `{class}`"
    )]
    IndexOutOfRange {
        class: String,
        index: i64,
        count: usize,
    },

    /// Failure raised inside a user implementation.
    #[error("{0}")]
    Custom(String),
}

impl RegistryError {
    /// Create an unknown-class error.
    pub fn unknown_class<S: Into<String>>(class: S) -> Self {
        RegistryError::UnknownClass {
            class: class.into(),
        }
    }

    /// Create a custom error for use inside implementations.
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        RegistryError::Custom(msg.into())
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
