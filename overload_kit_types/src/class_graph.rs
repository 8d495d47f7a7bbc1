//! Declared parent relationships between user classes.
//!
//! Every class is declared once, naming its parents; parents must be
//! declared first, so the graph is acyclic by construction. Multiple
//! parents are permitted (mixin-style), which is what makes ambiguous
//! dispatch across unrelated declared types reachable at all.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// The declared class hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassGraph {
    parents: HashMap<String, Vec<String>>,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class with its parents.
    ///
    /// Fails with `ClassRedefined` if `name` is already declared and
    /// `UnknownParent` if any parent has not been declared yet.
    pub fn declare(&mut self, name: &str, parents: &[&str]) -> TypeResult<()> {
        if self.parents.contains_key(name) {
            return Err(TypeError::ClassRedefined {
                class: name.to_string(),
            });
        }
        for parent in parents {
            if !self.parents.contains_key(*parent) {
                return Err(TypeError::UnknownParent {
                    class: name.to_string(),
                    parent: (*parent).to_string(),
                });
            }
        }
        self.parents.insert(
            name.to_string(),
            parents.iter().map(|p| (*p).to_string()).collect(),
        );
        Ok(())
    }

    /// Remove a declaration, returning true if it was present.
    ///
    /// Intended for rolling back a declaration that failed to complete;
    /// the caller must ensure no other class has named `name` as a
    /// parent in the meantime.
    pub fn remove(&mut self, name: &str) -> bool {
        self.parents.remove(name).is_some()
    }

    /// True if `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.parents.contains_key(name)
    }

    /// Check if `child` is `parent` or inherits from it, directly or
    /// transitively. Unknown names are subclasses of nothing but
    /// themselves.
    pub fn is_subclass_of(&self, child: &str, parent: &str) -> bool {
        if child == parent {
            return true;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![child];
        while let Some(current) = stack.pop() {
            let Some(parents) = self.parents.get(current) else {
                continue;
            };
            for p in parents {
                if p == parent {
                    return true;
                }
                if seen.insert(p) {
                    stack.push(p);
                }
            }
        }
        false
    }

    /// Declared ancestry of `name`, most-derived first: direct parents
    /// in declaration order, each followed by its own ancestry, every
    /// class visited at most once. `name` itself is not included.
    pub fn parent_chain(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        self.walk_parents(name, &mut chain, &mut seen);
        chain
    }

    fn walk_parents<'a>(
        &'a self,
        name: &str,
        chain: &mut Vec<String>,
        seen: &mut HashSet<&'a str>,
    ) {
        let Some(parents) = self.parents.get(name) else {
            return;
        };
        for parent in parents {
            if seen.insert(parent) {
                chain.push(parent.clone());
                self.walk_parents(parent, chain, seen);
            }
        }
    }
}
