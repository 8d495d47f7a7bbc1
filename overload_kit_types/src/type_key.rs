//! Dispatch keys: immutable, ordered, hashable sequences of type tags.
//!
//! A `TypeKey` is created twice per dispatch-enabled operation: once at
//! registration time from the declared parameter tags, and once per call
//! from the runtime tags of the actual arguments. Matching is positional
//! and exact-arity; there is no variadic or default-filling support, so
//! an operation accepting several arities registers one key per arity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class_graph::ClassGraph;
use crate::error::{TypeError, TypeResult};
use crate::type_tag::TypeTag;
use crate::value::Value;

/// An ordered sequence of type descriptors, one per argument position.
///
/// Equality and hashing are structural over the tag sequence; keys of
/// different length are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeKey {
    tags: Vec<TypeTag>,
}

impl TypeKey {
    /// Build a key from declared parameter tags.
    ///
    /// Fails with `InvalidKeyError` if any class tag carries an empty
    /// or blank name.
    pub fn new<I>(tags: I) -> TypeResult<Self>
    where
        I: IntoIterator<Item = TypeTag>,
    {
        let tags: Vec<TypeTag> = tags.into_iter().collect();
        for tag in &tags {
            if let TypeTag::Class(name) = tag {
                if name.trim().is_empty() {
                    return Err(TypeError::invalid_key("class tag with empty name"));
                }
            }
        }
        Ok(Self { tags })
    }

    /// Build a key from the runtime tags of actual argument values.
    /// This is the call-time path and cannot fail: every value carries
    /// a well-formed tag.
    pub fn of_values(values: &[Value]) -> Self {
        Self {
            tags: values.iter().map(Value::type_tag).collect(),
        }
    }

    /// Number of argument positions.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The ordered tags.
    pub fn tags(&self) -> &[TypeTag] {
        &self.tags
    }

    /// Check that the arguments satisfy this key: the arity matches
    /// exactly and every argument's runtime tag is the declared tag at
    /// that position or a subtype of it.
    pub fn matches(&self, values: &[Value], graph: &ClassGraph) -> bool {
        values.len() == self.tags.len()
            && values
                .iter()
                .zip(&self.tags)
                .all(|(value, tag)| value.type_tag().is_subtype_of(tag, graph))
    }

    /// Pointwise dominance: true when every position of `self` is a
    /// subtype of (or equal to) the corresponding position of `other`.
    /// Used to pick the most specific key among several matches.
    pub fn is_at_least_as_specific(&self, other: &TypeKey, graph: &ClassGraph) -> bool {
        self.tags.len() == other.tags.len()
            && self
                .tags
                .iter()
                .zip(&other.tags)
                .all(|(mine, theirs)| mine.is_subtype_of(theirs, graph))
    }

    /// Verify that every class tag in this key has been declared.
    /// Registration-time check; keys built from values never fail it.
    pub fn validate_against(&self, graph: &ClassGraph) -> TypeResult<()> {
        for tag in &self.tags {
            if let TypeTag::Class(name) = tag {
                if !graph.contains(name) {
                    return Err(TypeError::undeclared_class(name.clone()));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.tags.iter().map(|t| t.name().into_owned()).collect();
        write!(f, "({})", names.join(", "))
    }
}
