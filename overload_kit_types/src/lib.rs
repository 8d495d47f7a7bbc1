//! Type descriptors and dispatch keys for overload_kit.
//!
//! This crate holds the data model the dispatch core is built on:
//!
//! - [`TypeTag`]: a type descriptor with a small builtin hierarchy plus
//!   user-declared classes
//! - [`ClassGraph`]: declared parent relationships between classes,
//!   used for subtype walks
//! - [`TypeKey`]: an immutable, ordered, hashable sequence of tags —
//!   the key overloads are registered and resolved under
//! - [`Value`]: the dynamic representation of arguments and tracked
//!   instances
//!
//! # Module Organization
//!
//! - `type_tag/`: TypeTag enum, subtype checking, display
//! - `class_graph.rs`: ClassGraph for user-declared class ancestry
//! - `type_key.rs`: TypeKey construction, matching, specificity
//! - `value.rs`: Value and Instance
//! - `error.rs`: TypeError for key and declaration failures

pub mod class_graph;
pub mod error;
pub mod type_key;
pub mod type_tag;
pub mod value;


pub use class_graph::ClassGraph;
pub use error::{TypeError, TypeResult};
pub use type_key::TypeKey;
pub use type_tag::TypeTag;
pub use value::{Instance, Value};
