//! Display names for TypeTag.

use std::borrow::Cow;
use std::fmt;

use super::TypeTag;

impl TypeTag {
    /// Get the display name for this tag.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            TypeTag::Any => "Any".into(),
            TypeTag::Number => "Number".into(),
            TypeTag::Int => "Int".into(),
            TypeTag::Float => "Float".into(),
            TypeTag::Bool => "Bool".into(),
            TypeTag::Str => "Str".into(),
            TypeTag::List => "List".into(),
            TypeTag::Map => "Map".into(),
            TypeTag::Nil => "Nil".into(),
            TypeTag::Class(name) => name.clone().into(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
