//! The registry mapping property type names to defaults and text parsers.
//!
//! One registry is built per configuration and passed to the parsers
//! and exporters that need it.

use std::{fmt::Debug, str::FromStr};

use indexmap::IndexMap;

use super::Value;
use crate::error::PropertyError;

/// Converts the text between the parentheses of `Type(value)` into a value.
pub type ParseFn = fn(&str) -> Result<Value, String>;

/// A named property type.
#[derive(Clone, Debug)]
pub struct PropertyType {
    name: String,
    default: Value,
    parse: ParseFn,
}

impl PropertyType {
    pub fn new(name: impl Into<String>, default: Value, parse: ParseFn) -> Self {
        Self {
            name: name.into(),
            default,
            parse,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: IndexMap<String, PropertyType>,
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

fn parse_number<T: FromStr>(text: &str) -> Result<T, String>
where
    T::Err: Debug,
{
    text.parse::<T>().map_err(|e| format!("{e:?}"))
}

fn parse_char(text: &str) -> Result<Value, String> {
    let mut chars = unquote(text).chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Char(c)),
        _ => Err("expected exactly one character".to_string()),
    }
}

fn parse_boolean(text: &str) -> Result<Value, String> {
    match text.to_ascii_lowercase().as_str() {
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        _ => Err("expected true or false".to_string()),
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PropertyType::new("Byte", Value::Byte(0), |t| {
            parse_number(t).map(Value::Byte)
        }));
        registry.register(PropertyType::new("Char", Value::Char('\0'), parse_char));
        registry.register(PropertyType::new("Short", Value::Short(0), |t| {
            parse_number(t).map(Value::Short)
        }));
        registry.register(PropertyType::new("Integer", Value::Integer(0), |t| {
            parse_number(t).map(Value::Integer)
        }));
        registry.register(PropertyType::new("Long", Value::Long(0), |t| {
            parse_number(t).map(Value::Long)
        }));
        registry.register(PropertyType::new("Float", Value::Float(0.0), |t| {
            parse_number(t).map(Value::Float)
        }));
        registry.register(PropertyType::new("Double", Value::Double(0.0), |t| {
            parse_number(t).map(Value::Double)
        }));
        registry.register(PropertyType::new(
            "Boolean",
            Value::Boolean(false),
            parse_boolean,
        ));
        registry.register(PropertyType::new(
            "String",
            Value::String(String::new()),
            |t| Ok(Value::String(unquote(t).to_string())),
        ));
        registry.register(PropertyType::new("Object", Value::Null, |_| {
            Err("Object values can only be null".to_string())
        }));
        registry
    }
}

impl TypeRegistry {
    /// A registry without any types.
    pub fn empty() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Add or replace a type.
    pub fn register(&mut self, ty: PropertyType) {
        self.types.insert(ty.name.clone(), ty);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn default_value(&self, name: &str) -> Result<Value, PropertyError> {
        self.get(name)
            .map(|ty| ty.default.clone())
            .ok_or_else(|| PropertyError::UnknownType(name.to_string()))
    }

    /// Parse `text` as a value of type `name`. The literal `null` is
    /// accepted for every type.
    pub fn parse(&self, name: &str, text: &str) -> Result<Value, PropertyError> {
        let ty = self
            .get(name)
            .ok_or_else(|| PropertyError::UnknownType(name.to_string()))?;
        let text = text.trim();
        if text == "null" {
            return Ok(Value::Null);
        }
        (ty.parse)(text).map_err(|reason| PropertyError::InvalidValue {
            type_name: name.to_string(),
            text: text.to_string(),
            reason,
        })
    }

    /// The `(type name, value text)` pair that [`TypeRegistry::parse`]
    /// reads back into `value`.
    pub fn format(&self, value: &Value) -> (&'static str, String) {
        let text = match value {
            Value::String(s) => format!("\"{s}\""),
            Value::Char(c) => format!("\"{c}\""),
            other => other.to_string(),
        };
        (value.type_name(), text)
    }
}
