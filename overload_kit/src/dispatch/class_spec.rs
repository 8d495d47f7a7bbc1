//! Declarative one-shot class definition.

use std::fmt;
use std::sync::Arc;

use overload_kit_types::{Instance, TypeKey, Value};

use crate::error::RegistryResult;
use crate::instances::InstanceRegistry;

use super::registry::DispatchRegistry;
use super::table::Overload;

/// Collected definition of one class: parents, overloads, and named
/// members. [`ClassSpec::install`] performs declare -> register ->
/// freeze in a single step, the explicit replacement for a
/// class-creation interception hook: everything the class registers is
/// stated up front and the dispatch table is frozen the moment the
/// definition completes.
pub struct ClassSpec {
    name: String,
    parents: Vec<String>,
    overloads: Vec<(String, TypeKey, Overload)>,
    members: Vec<String>,
}

impl fmt::Debug for ClassSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSpec")
            .field("name", &self.name)
            .field("parents", &self.parents)
            .field("overloads", &self.overloads.len())
            .field("members", &self.members)
            .finish()
    }
}

impl ClassSpec {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            overloads: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Add a declared parent. Order matters: it is the order the parent
    /// chain is walked during name inheritance.
    pub fn parent<S: Into<String>>(mut self, name: S) -> Self {
        self.parents.push(name.into());
        self
    }

    /// Add one overload of `function` under `key`.
    pub fn overload<F>(mut self, function: &str, key: TypeKey, implementation: F) -> Self
    where
        F: Fn(&[Value]) -> RegistryResult<Value> + Send + Sync + 'static,
    {
        self.overloads
            .push((function.to_string(), key, Arc::new(implementation)));
        self
    }

    /// Add a named, field-less member constructed and tracked at
    /// install time — enum-like semantics.
    pub fn member<S: Into<String>>(mut self, name: S) -> Self {
        self.members.push(name.into());
        self
    }

    /// Declare the class, register every collected overload, freeze the
    /// dispatch table, then construct and track the named members.
    /// Returns the member instances in declaration order.
    ///
    /// All-or-nothing: a registration failure rolls the declaration
    /// back, so no half-defined class is left resolvable and the name
    /// stays free for a corrected definition.
    pub fn install(
        self,
        dispatch: &DispatchRegistry,
        instances: &InstanceRegistry,
    ) -> RegistryResult<Vec<Value>> {
        let parents: Vec<&str> = self.parents.iter().map(String::as_str).collect();
        dispatch.declare(&self.name, &parents)?;
        for (function, key, implementation) in self.overloads {
            if let Err(err) = dispatch.register(&self.name, &function, key, implementation) {
                dispatch.undeclare(&self.name);
                return Err(err);
            }
        }
        dispatch.freeze(&self.name)?;

        let mut created = Vec::with_capacity(self.members.len());
        for member in self.members {
            let value = Value::instance(Instance::named(&self.name, member));
            instances.track(&self.name, value.clone());
            created.push(value);
        }
        Ok(created)
    }
}
