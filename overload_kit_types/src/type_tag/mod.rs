//! Type descriptors for dispatch matching.
//!
//! The builtin hierarchy is deliberately small:
//!
//! ```text
//! Any
//!  ├── Number
//!  │    ├── Int
//!  │    │    └── Bool (concrete; usable wherever an Int is accepted)
//!  │    └── Float
//!  ├── Str, List, Map, Nil (concrete)
//!  └── Class(name) — user-declared, positioned by ClassGraph
//! ```
//!
//! User classes form their own hierarchy through declared parents; the
//! subtype relation for them is answered by [`crate::ClassGraph`].
//!
//! # Sub-modules
//!
//! - `comparison`: subtype checking against a class graph
//! - `display`: display names and `fmt::Display`

mod comparison;
mod display;

use serde::{Deserialize, Serialize};

/// A single type descriptor, one position of a [`crate::TypeKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Top of the hierarchy; every tag is a subtype of `Any`.
    Any,
    /// Abstract numeric tag covering `Int`, `Float`, and `Bool`.
    Number,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Boolean. A subtype of `Int`, so an overload declared for `Int`
    /// also accepts `Bool` arguments.
    Bool,
    /// String.
    Str,
    /// Ordered sequence of values.
    List,
    /// String-keyed mapping of values.
    Map,
    /// The unit value.
    Nil,
    /// A user-declared class, identified by name. Its place in the
    /// hierarchy comes from the declared parents in the class graph.
    Class(String),
}

impl TypeTag {
    /// Shorthand for a class tag.
    pub fn class<S: Into<String>>(name: S) -> Self {
        TypeTag::Class(name.into())
    }

    /// True for tags that only exist to group others (`Any`, `Number`).
    /// No value ever carries an abstract tag directly.
    pub fn is_abstract(&self) -> bool {
        matches!(self, TypeTag::Any | TypeTag::Number)
    }

    /// True for tags a value can carry at runtime.
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract()
    }
}
