//! Dynamic values passed to dispatch-enabled operations.
//!
//! `Value` is the argument and instance representation the registries
//! work with when static type information is unavailable: the call-time
//! key is built from each argument's [`Value::type_tag`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::type_tag::TypeTag;

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The unit value.
    Nil,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String.
    Str(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// String-keyed mapping of values.
    Map(Arc<HashMap<String, Value>>),
    /// Instance of a user-declared class. Shared by handle: clones of
    /// this value refer to the same instance.
    Instance(Arc<Instance>),
}

/// An instance of a user-declared class.
///
/// Named, field-less instances serve as enum-like members; field-bearing
/// instances are ordinary constructed objects.
#[derive(Debug, Clone)]
pub struct Instance {
    class: String,
    name: Option<String>,
    fields: HashMap<String, Value>,
}

impl Instance {
    /// Construct an instance with field values.
    pub fn new<S: Into<String>>(class: S, fields: HashMap<String, Value>) -> Self {
        Self {
            class: class.into(),
            name: None,
            fields,
        }
    }

    /// Construct a named, field-less instance (an enum-like member).
    pub fn named<C: Into<String>, N: Into<String>>(class: C, name: N) -> Self {
        Self {
            class: class.into(),
            name: Some(name.into()),
            fields: HashMap::new(),
        }
    }

    /// The class this instance belongs to.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The member name, for named instances.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up a field value.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl Value {
    /// Shorthand for wrapping an instance.
    pub fn instance(instance: Instance) -> Self {
        Value::Instance(Arc::new(instance))
    }

    /// The runtime type tag of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Nil,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::Str,
            Value::List(_) => TypeTag::List,
            Value::Map(_) => TypeTag::Map,
            Value::Instance(instance) => TypeTag::Class(instance.class.clone()),
        }
    }

    /// Display name of the runtime type.
    pub fn type_name(&self) -> String {
        self.type_tag().to_string()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Try to extract as i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Try to extract as f64; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to extract as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Try to extract as an instance handle.
    pub fn as_instance(&self) -> Option<&Arc<Instance>> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }
}

/// Equality is structural for primitives and containers, but identity
/// (shared handle) for instances: two separately constructed instances
/// with equal fields are distinct registry entries.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Map(entries) => write!(f, "Map({} entries)", entries.len()),
            Value::Instance(instance) => match instance.name() {
                Some(name) => write!(f, "{}.{}", instance.class(), name),
                None => write!(f, "{}(...)", instance.class()),
            },
        }
    }
}
