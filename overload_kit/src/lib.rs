//! Runtime overload dispatch and instance tracking.
//!
//! Two independent, composable mechanisms:
//!
//! - [`DispatchRegistry`]: per-class tables mapping an operation name
//!   and a [`TypeKey`](overload_kit_types::TypeKey) to an
//!   implementation, resolved at call time against the runtime types of
//!   the arguments. Most-specific match wins; ties are a hard error.
//! - [`InstanceRegistry`]: an ordered, per-class record of every
//!   constructed instance, supporting counting, indexed access, and
//!   snapshot iteration — the backing store for enum-like and
//!   singleton-like class behavior.
//!
//! A class may use either mechanism, both, or neither. Both registries
//! serialize mutation and allow concurrent reads behind reader-writer
//! locks; user implementations never run while a registry lock is held.
//!
//! # Example
//! ```
//! use overload_kit::prelude::*;
//!
//! let dispatch = DispatchRegistry::new();
//! let instances = InstanceRegistry::new();
//!
//! ClassSpec::new("Greeter")
//!     .overload(
//!         "greet",
//!         TypeKey::new([TypeTag::Str]).unwrap(),
//!         |args| Ok(Value::Str(format!("hello, {}", args[0]))),
//!     )
//!     .overload(
//!         "greet",
//!         TypeKey::new([TypeTag::Int]).unwrap(),
//!         |args| Ok(Value::Str(format!("hello, #{}", args[0]))),
//!     )
//!     .install(&dispatch, &instances)
//!     .unwrap();
//!
//! let out = dispatch
//!     .call("Greeter", "greet", &[Value::Int(7)])
//!     .unwrap();
//! assert_eq!(out, Value::Str("hello, #7".to_string()));
//! ```

pub mod dispatch;
pub mod error;
pub mod instances;

pub use dispatch::{ClassSpec, DispatchRegistry, Overload};
pub use error::{RegistryError, RegistryResult};
pub use instances::{InstanceIter, InstanceRegistry};

// Re-export the type layer so callers need only one dependency.
pub use overload_kit_types as types;
pub use overload_kit_types::{ClassGraph, Instance, TypeError, TypeKey, TypeTag, Value};

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use overload_kit::prelude::*;
/// ```
pub mod prelude {
    pub use super::dispatch::{ClassSpec, DispatchRegistry, Overload};
    pub use super::error::{RegistryError, RegistryResult};
    pub use super::instances::{InstanceIter, InstanceRegistry};
    pub use overload_kit_types::{ClassGraph, Instance, TypeKey, TypeTag, Value};
}
