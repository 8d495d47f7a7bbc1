//! Per-class dispatch registry with a build/freeze lifecycle.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use overload_kit_types::{ClassGraph, TypeKey, Value};

use crate::error::{RegistryError, RegistryResult};

use super::table::{DispatchTable, Overload};

/// Registration lifecycle of one class. A class that was never declared
/// is implicitly in the EMPTY state and has no entry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassState {
    /// Declared; registrations accepted.
    Building,
    /// Definition complete; registrations rejected, resolution accepted.
    Frozen,
}

#[derive(Debug)]
struct ClassEntry {
    state: ClassState,
    /// Operation name -> dispatch table.
    tables: HashMap<String, DispatchTable>,
}

#[derive(Debug, Default)]
struct Inner {
    graph: ClassGraph,
    classes: HashMap<String, ClassEntry>,
}

/// Maps (class, operation name, type key) to implementations and
/// resolves calls to the most specific registered overload.
///
/// Mutation (`declare`, `register`, `freeze`) takes the write lock;
/// resolution takes the read lock and clones the winning handle out
/// before returning, so implementations never run under the lock.
#[derive(Debug, Default)]
pub struct DispatchRegistry {
    inner: RwLock<Inner>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class and begin collecting its overloads
    /// (EMPTY -> BUILDING). Parents must already be declared.
    pub fn declare(&self, class: &str, parents: &[&str]) -> RegistryResult<()> {
        let mut inner = self.inner.write();
        inner.graph.declare(class, parents)?;
        inner.classes.insert(
            class.to_string(),
            ClassEntry {
                state: ClassState::Building,
                tables: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Register one overload of `function` on `class`.
    ///
    /// Only accepted while the class is BUILDING. The key must not
    /// duplicate an existing registration and may only name declared
    /// classes.
    pub fn register(
        &self,
        class: &str,
        function: &str,
        key: TypeKey,
        implementation: Overload,
    ) -> RegistryResult<()> {
        let mut inner = self.inner.write();
        key.validate_against(&inner.graph)?;
        let entry = inner
            .classes
            .get_mut(class)
            .ok_or_else(|| RegistryError::unknown_class(class))?;
        if entry.state == ClassState::Frozen {
            return Err(RegistryError::RegistryFrozen {
                class: class.to_string(),
            });
        }
        entry
            .tables
            .entry(function.to_string())
            .or_insert_with(|| DispatchTable::new(function))
            .add(class, key, implementation)
    }

    /// Withdraw a declaration, dropping the class entry and its graph
    /// node. Rollback path for a class definition that failed partway;
    /// the name becomes declarable again.
    pub(crate) fn undeclare(&self, class: &str) {
        let mut inner = self.inner.write();
        inner.classes.remove(class);
        inner.graph.remove(class);
    }

    /// End of class definition (BUILDING -> FROZEN). Idempotent on an
    /// already frozen class.
    pub fn freeze(&self, class: &str) -> RegistryResult<()> {
        let mut inner = self.inner.write();
        let entry = inner
            .classes
            .get_mut(class)
            .ok_or_else(|| RegistryError::unknown_class(class))?;
        entry.state = ClassState::Frozen;
        Ok(())
    }

    /// True once `class` has been frozen.
    pub fn is_frozen(&self, class: &str) -> bool {
        self.inner
            .read()
            .classes
            .get(class)
            .is_some_and(|entry| entry.state == ClassState::Frozen)
    }

    /// Resolve a call to the implementation whose key best matches the
    /// argument types.
    ///
    /// When `function` is not registered on `class` itself, the declared
    /// parent chain is walked most-derived first and the first class
    /// with a table for that name owns the call; a subclass redefining
    /// the name therefore shadows the parent's table entirely.
    pub fn resolve(
        &self,
        class: &str,
        function: &str,
        args: &[Value],
    ) -> RegistryResult<Overload> {
        let inner = self.inner.read();
        if !inner.classes.contains_key(class) {
            return Err(RegistryError::unknown_class(class));
        }

        let mut table = inner
            .classes
            .get(class)
            .and_then(|entry| entry.tables.get(function));
        if table.is_none() {
            for ancestor in inner.graph.parent_chain(class) {
                if let Some(found) = inner
                    .classes
                    .get(&ancestor)
                    .and_then(|entry| entry.tables.get(function))
                {
                    table = Some(found);
                    break;
                }
            }
        }

        let Some(table) = table else {
            return Err(RegistryError::NoMatchingOverload {
                class: class.to_string(),
                function: function.to_string(),
                argument_types: TypeKey::of_values(args),
            });
        };

        table.resolve(class, args, &inner.graph)
    }

    /// Resolve and invoke in one step.
    pub fn call(&self, class: &str, function: &str, args: &[Value]) -> RegistryResult<Value> {
        let implementation = self.resolve(class, function, args)?;
        implementation(args)
    }

    /// Drop every class, table, and declaration. The only supported
    /// reset path, intended for test harnesses and teardown hooks.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.graph = ClassGraph::new();
        inner.classes.clear();
    }
}

static GLOBAL: Lazy<DispatchRegistry> = Lazy::new(DispatchRegistry::default);

/// The process-wide dispatch registry.
pub fn global() -> &'static DispatchRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use overload_kit_types::TypeTag;

    fn noop() -> Overload {
        Arc::new(|_| Ok(Value::Nil))
    }

    #[test]
    fn test_register_after_freeze_rejected() {
        let registry = DispatchRegistry::new();
        registry.declare("Widget", &[]).unwrap();
        registry
            .register("Widget", "paint", TypeKey::new([TypeTag::Int]).unwrap(), noop())
            .unwrap();
        registry.freeze("Widget").unwrap();
        assert!(registry.is_frozen("Widget"));

        let err = registry
            .register("Widget", "paint", TypeKey::new([TypeTag::Str]).unwrap(), noop())
            .unwrap_err();
        assert!(matches!(err, RegistryError::RegistryFrozen { .. }));

        // Resolution still works after freeze.
        assert!(registry.resolve("Widget", "paint", &[Value::Int(1)]).is_ok());
    }

    #[test]
    fn test_register_on_undeclared_class_rejected() {
        let registry = DispatchRegistry::new();
        let err = registry
            .register("Ghost", "paint", TypeKey::new([TypeTag::Int]).unwrap(), noop())
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownClass { .. }));
    }

    #[test]
    fn test_key_naming_undeclared_class_rejected() {
        let registry = DispatchRegistry::new();
        registry.declare("Widget", &[]).unwrap();
        let key = TypeKey::new([TypeTag::class("Ghost")]).unwrap();
        let err = registry.register("Widget", "paint", key, noop()).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Type(overload_kit_types::TypeError::UndeclaredClass { .. })
        ));
    }

    #[test]
    fn test_subclass_inherits_parent_table() {
        let registry = DispatchRegistry::new();
        registry.declare("Widget", &[]).unwrap();
        registry
            .register(
                "Widget",
                "describe",
                TypeKey::new([]).unwrap(),
                Arc::new(|_| Ok(Value::Str("widget".to_string()))),
            )
            .unwrap();
        registry.freeze("Widget").unwrap();

        registry.declare("Button", &["Widget"]).unwrap();
        registry.freeze("Button").unwrap();

        let out = registry.call("Button", "describe", &[]).unwrap();
        assert_eq!(out, Value::Str("widget".to_string()));
    }

    #[test]
    fn test_redefining_name_shadows_parent_table() {
        let registry = DispatchRegistry::new();
        registry.declare("Widget", &[]).unwrap();
        registry
            .register(
                "Widget",
                "describe",
                TypeKey::new([TypeTag::Int]).unwrap(),
                Arc::new(|_| Ok(Value::Str("widget".to_string()))),
            )
            .unwrap();
        registry.freeze("Widget").unwrap();

        registry.declare("Button", &["Widget"]).unwrap();
        registry
            .register(
                "Button",
                "describe",
                TypeKey::new([TypeTag::Str]).unwrap(),
                Arc::new(|_| Ok(Value::Str("button".to_string()))),
            )
            .unwrap();
        registry.freeze("Button").unwrap();

        // The child's table owns the name: the parent's (Int) overload
        // is not consulted for calls on Button.
        let err = registry
            .call("Button", "describe", &[Value::Int(1)])
            .unwrap_err();
        assert!(matches!(err, RegistryError::NoMatchingOverload { .. }));

        let out = registry
            .call("Button", "describe", &[Value::Str("x".to_string())])
            .unwrap();
        assert_eq!(out, Value::Str("button".to_string()));
    }
}
