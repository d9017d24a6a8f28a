//! Typed key/value attributes attached to nodes and edges.

pub mod types;

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

pub use types::{PropertyType, TypeRegistry};

/// A property value. `Null` stands for an absent or unparsable value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Byte(i8),
    Char(char),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl Value {
    /// The registry type name of this value; `Object` for `Null`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Object",
            Value::Byte(_) => "Byte",
            Value::Char(_) => "Char",
            Value::Short(_) => "Short",
            Value::Integer(_) => "Integer",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        })*
    };
}

value_from!(
    i8 => Byte,
    char => Char,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    String => String,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// A mutable, insertion-ordered property list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyList {
    entries: IndexMap<String, Value>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Set `key`, returning the previous value if there was one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_read_only(self) -> ReadOnlyPropertyList {
        ReadOnlyPropertyList(self)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PropertyList {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = PropertyList::new();
        for (k, v) in iter {
            list.set(k, v);
        }
        list
    }
}

/// A property list whose values are fixed once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadOnlyPropertyList(PropertyList);

impl ReadOnlyPropertyList {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.has(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A mutable copy of the values.
    pub fn to_mutable(&self) -> PropertyList {
        self.0.clone()
    }
}

/// Properties handed to a factory. The variant decides which built-in
/// class a node or edge gets when no class is registered for its label.
#[derive(Clone, Debug, PartialEq)]
pub enum Properties {
    ReadWrite(PropertyList),
    ReadOnly(ReadOnlyPropertyList),
}

impl Properties {
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Properties::ReadWrite(list) => list.get(key),
            Properties::ReadOnly(list) => list.get(key),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self {
            Properties::ReadWrite(list) => Box::new(list.iter()),
            Properties::ReadOnly(list) => Box::new(list.iter()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Properties::ReadWrite(list) => list.len(),
            Properties::ReadOnly(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<PropertyList> for Properties {
    fn from(list: PropertyList) -> Self {
        Properties::ReadWrite(list)
    }
}

impl From<ReadOnlyPropertyList> for Properties {
    fn from(list: ReadOnlyPropertyList) -> Self {
        Properties::ReadOnly(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_list_keeps_insertion_order() {
        let mut list = PropertyList::new();
        list.set("b", 2);
        list.set("a", "x");
        assert_eq!(list.set("b", 3), Some(Value::Integer(2)));
        assert_eq!(list.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(list.get("a"), Some(&Value::String("x".to_string())));
        assert_eq!(list.remove("b"), Some(Value::Integer(3)));
        assert!(!list.has("b"));
    }

    #[test]
    fn test_read_only_copy_is_independent() {
        let list: PropertyList = [("k", 1)].into_iter().collect();
        let frozen = list.clone().into_read_only();
        let mut copy = frozen.to_mutable();
        copy.set("k", 2);
        assert_eq!(frozen.get("k"), Some(&Value::Integer(1)));
    }
}
