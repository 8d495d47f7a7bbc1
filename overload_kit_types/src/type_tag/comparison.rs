//! Subtype checking for TypeTag.

use super::TypeTag;
use crate::class_graph::ClassGraph;

impl TypeTag {
    /// Check if `self` is a subtype of `other` (`self <: other`).
    ///
    /// Reflexive for every tag. Builtins follow the fixed hierarchy
    /// (`Bool <: Int <: Number`, `Float <: Number`, everything `<: Any`);
    /// class tags are answered by the declared parent graph.
    ///
    /// # Examples
    /// ```
    /// use overload_kit_types::{ClassGraph, TypeTag};
    ///
    /// let graph = ClassGraph::new();
    /// assert!(TypeTag::Int.is_subtype_of(&TypeTag::Number, &graph));
    /// assert!(TypeTag::Bool.is_subtype_of(&TypeTag::Int, &graph));
    /// assert!(TypeTag::Str.is_subtype_of(&TypeTag::Any, &graph));
    /// assert!(!TypeTag::Int.is_subtype_of(&TypeTag::Float, &graph));
    /// ```
    pub fn is_subtype_of(&self, other: &TypeTag, graph: &ClassGraph) -> bool {
        if self == other {
            return true;
        }
        match other {
            TypeTag::Any => true,
            TypeTag::Number => matches!(self, TypeTag::Int | TypeTag::Float | TypeTag::Bool),
            TypeTag::Int => matches!(self, TypeTag::Bool),
            TypeTag::Class(parent) => {
                if let TypeTag::Class(child) = self {
                    graph.is_subclass_of(child, parent)
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}
