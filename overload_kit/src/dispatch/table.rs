//! Dispatch table for a single named operation.

use std::fmt;
use std::sync::Arc;

use overload_kit_types::{ClassGraph, TypeKey, Value};

use crate::error::{CandidateKeys, RegistryError, RegistryResult};

/// Implementation handle stored under a type key and invoked when that
/// key wins resolution.
pub type Overload = Arc<dyn Fn(&[Value]) -> RegistryResult<Value> + Send + Sync>;

/// Overloads registered under one operation name on one class.
pub(crate) struct DispatchTable {
    name: String,
    overloads: Vec<(TypeKey, Overload)>,
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.overloads.iter().map(|(k, _)| k.to_string()).collect();
        f.debug_struct("DispatchTable")
            .field("name", &self.name)
            .field("keys", &keys)
            .finish()
    }
}

impl DispatchTable {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            overloads: Vec::new(),
        }
    }

    /// Add an overload. An identical key is rejected, never replaced.
    pub(crate) fn add(&mut self, class: &str, key: TypeKey, imp: Overload) -> RegistryResult<()> {
        if self.overloads.iter().any(|(existing, _)| *existing == key) {
            return Err(RegistryError::DuplicateOverload {
                class: class.to_string(),
                function: self.name.clone(),
                key,
            });
        }
        self.overloads.push((key, imp));
        Ok(())
    }

    /// Find the implementation whose key matches the arguments.
    ///
    /// Among all matching keys the unique one that is pointwise at least
    /// as specific as every other match wins. No match raises
    /// `NoMatchingOverloadError`; no unique winner raises
    /// `AmbiguousDispatchError` naming the maximal candidates. `class`
    /// is the receiver class the call was made on, used for diagnostics.
    pub(crate) fn resolve(
        &self,
        class: &str,
        args: &[Value],
        graph: &ClassGraph,
    ) -> RegistryResult<Overload> {
        let matching: Vec<&(TypeKey, Overload)> = self
            .overloads
            .iter()
            .filter(|(key, _)| key.matches(args, graph))
            .collect();

        if matching.is_empty() {
            return Err(RegistryError::NoMatchingOverload {
                class: class.to_string(),
                function: self.name.clone(),
                argument_types: TypeKey::of_values(args),
            });
        }

        // Most-specific match: dominant over every other matching key.
        let dominant: Vec<&&(TypeKey, Overload)> = matching
            .iter()
            .filter(|(key, _)| {
                matching
                    .iter()
                    .all(|(other, _)| key.is_at_least_as_specific(other, graph))
            })
            .collect();

        if dominant.len() == 1 {
            return Ok(dominant[0].1.clone());
        }

        // No unique winner. Report the maximal candidates: matches not
        // strictly dominated by another match.
        let candidates: Vec<TypeKey> = matching
            .iter()
            .filter(|(key, _)| {
                !matching.iter().any(|(other, _)| {
                    other != key
                        && other.is_at_least_as_specific(key, graph)
                        && !key.is_at_least_as_specific(other, graph)
                })
            })
            .map(|(key, _)| key.clone())
            .collect();

        Err(RegistryError::AmbiguousDispatch {
            class: class.to_string(),
            function: self.name.clone(),
            argument_types: TypeKey::of_values(args),
            candidates: CandidateKeys(candidates),
        })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.overloads.len()
    }
}
