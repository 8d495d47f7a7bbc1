//! Multiple dispatch: per-class tables of type-keyed overloads.
//!
//! # Module Organization
//!
//! - `table.rs`: DispatchTable — overloads for one operation name,
//!   most-specific resolution
//! - `registry.rs`: DispatchRegistry — per-class lifecycle, parent-chain
//!   name inheritance, the process-wide instance
//! - `class_spec.rs`: ClassSpec — declarative one-shot class definition

mod class_spec;
mod registry;
mod table;

pub use class_spec::ClassSpec;
pub use registry::{global, DispatchRegistry};
pub use table::Overload;
