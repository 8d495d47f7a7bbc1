//! Ordered per-class record of constructed instances.
//!
//! Every tracked instance stays enumerable for the life of the process;
//! there is no removal during normal operation, only the explicit
//! [`InstanceRegistry::clear`] reset path for test harnesses. Iteration
//! works on a snapshot taken when the pass begins, so an in-progress
//! pass never observes later `track` calls and two passes never share a
//! cursor.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use overload_kit_types::Value;

use crate::error::{RegistryError, RegistryResult};

/// Per-class, insertion-ordered instance store.
///
/// `track` takes the write lock; `count`, `at`, `iter`, and `find` take
/// the read lock. Scope is exact-class: constructing a subclass instance
/// does not appear in the parent's sequence.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    inner: RwLock<HashMap<String, Vec<Value>>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance to the class's sequence. Construction-time
    /// hook; insertion order is preserved and nothing is deduplicated.
    pub fn track(&self, class: &str, instance: Value) {
        self.inner
            .write()
            .entry(class.to_string())
            .or_default()
            .push(instance);
    }

    /// Number of instances tracked for `class` (0 when never tracked).
    pub fn count(&self, class: &str) -> usize {
        self.inner.read().get(class).map_or(0, Vec::len)
    }

    /// Instance at `index`, counting from the end for negative indices.
    /// Fails with `IndexOutOfRangeError` when `|index| >= count`.
    pub fn at(&self, class: &str, index: i64) -> RegistryResult<Value> {
        let inner = self.inner.read();
        let items = inner.get(class).map_or(&[][..], Vec::as_slice);
        let count = items.len();
        if index.unsigned_abs() >= count as u64 {
            return Err(RegistryError::IndexOutOfRange {
                class: class.to_string(),
                index,
                count,
            });
        }
        let position = if index < 0 {
            count - index.unsigned_abs() as usize
        } else {
            index as usize
        };
        Ok(items[position].clone())
    }

    /// Iterate the instances of `class` in construction order over a
    /// snapshot taken now. Restartable: call again for a fresh pass.
    pub fn iter(&self, class: &str) -> InstanceIter {
        let snapshot: Vec<Value> = self
            .inner
            .read()
            .get(class)
            .cloned()
            .unwrap_or_default();
        InstanceIter {
            items: snapshot.into_iter(),
        }
    }

    /// First tracked instance of `class` satisfying the predicate.
    /// Supports return-existing-instead-of-construct call sites.
    pub fn find<P>(&self, class: &str, mut predicate: P) -> Option<Value>
    where
        P: FnMut(&Value) -> bool,
    {
        self.inner
            .read()
            .get(class)
            .and_then(|items| items.iter().find(|v| predicate(v)).cloned())
    }

    /// Look up a named member instance of `class` (enum-like access).
    pub fn member(&self, class: &str, name: &str) -> Option<Value> {
        self.find(class, |value| {
            value
                .as_instance()
                .and_then(|instance| instance.name())
                .is_some_and(|n| n == name)
        })
    }

    /// Drop every instance tracked for `class`. Test-harness reset path.
    pub fn clear(&self, class: &str) {
        self.inner.write().remove(class);
    }

    /// Drop every tracked instance of every class.
    pub fn clear_all(&self) {
        self.inner.write().clear();
    }
}

/// Snapshot iterator over one class's tracked instances.
#[derive(Debug, Clone)]
pub struct InstanceIter {
    items: std::vec::IntoIter<Value>,
}

impl Iterator for InstanceIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for InstanceIter {}

static GLOBAL: Lazy<InstanceRegistry> = Lazy::new(InstanceRegistry::default);

/// The process-wide instance registry.
pub fn global() -> &'static InstanceRegistry {
    &GLOBAL
}
