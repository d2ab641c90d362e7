//! Value model for everything that crosses the boundary
//!
//! A [`Value`] is the loosely typed form of a boundary value. It is what the
//! conformance suite compares, what dynamic dispatch consumes, and what the
//! CLI prints. [`Marshal`] converts between native Rust values and their
//! [`Value`] form without loss.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::surface;

/// The category of a boundary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    /// No value; the result of a void call
    Unit,
    /// Signed 32-bit two's-complement integer
    Int32,
    /// Logical true/false
    Bool,
    /// Owned UTF-8 string
    String,
    /// Struct passed by value, identified by its type name
    Struct(&'static str),
}

impl ValueKind {
    /// Whether values of this kind are passed as plain machine values
    pub fn is_primitive(self) -> bool {
        matches!(self, ValueKind::Int32 | ValueKind::Bool)
    }

    /// Name of the type as written in the surface table
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Unit => "none",
            ValueKind::Int32 => "Int32",
            ValueKind::Bool => "Bool",
            ValueKind::String => "String",
            ValueKind::Struct(name) => name,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A boundary value in loosely typed form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Result of a void call
    Unit,
    /// 32-bit signed integer
    Int32(i32),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    String(String),
    /// A struct with its fields in declaration order
    Struct {
        name: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Kind of this value
    ///
    /// Struct values whose name is not part of the surface report as
    /// `Struct("?")`.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unit => ValueKind::Unit,
            Value::Int32(_) => ValueKind::Int32,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Struct { name, .. } => surface::struct_kind(name).unwrap_or(ValueKind::Struct("?")),
        }
    }

    /// Look up a struct field by name
    pub fn field(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Struct { fields, .. } => fields
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Take a struct field out of a struct value, failing if it is absent
    pub(crate) fn take_field(fields: &mut Vec<(String, Value)>, owner: &str, field: &str) -> Result<Value> {
        let position = fields
            .iter()
            .position(|(name, _)| name == field)
            .ok_or_else(|| Error::MissingField {
                owner: owner.to_string(),
                field: field.to_string(),
            })?;
        Ok(fields.remove(position).1)
    }

    /// Parse a JSON document as a value of the requested kind
    ///
    /// Struct kinds take a JSON object keyed by field name; every field
    /// the struct declares must be present.
    pub fn from_json(kind: ValueKind, json: &serde_json::Value) -> Result<Value> {
        use serde_json::Value as Json;

        match (kind, json) {
            (ValueKind::Unit, Json::Null) => Ok(Value::Unit),
            (ValueKind::Int32, Json::Number(n)) => {
                let wide = n.as_i64().ok_or_else(|| Error::type_mismatch(kind, json_kind(json)))?;
                i32::try_from(wide)
                    .map(Value::Int32)
                    .map_err(|_| Error::type_mismatch(kind, json_kind(json)))
            }
            (ValueKind::Bool, Json::Bool(b)) => Ok(Value::Bool(*b)),
            (ValueKind::String, Json::String(s)) => Ok(Value::String(s.clone())),
            (ValueKind::Struct(name), Json::Object(map)) => {
                let schema = surface::struct_schema(name)
                    .ok_or_else(|| Error::type_mismatch(kind, ValueKind::Struct("?")))?;
                let mut fields = Vec::with_capacity(schema.len());
                for (field, field_kind) in schema {
                    let raw = map.get(field).ok_or_else(|| Error::MissingField {
                        owner: name.to_string(),
                        field: field.to_string(),
                    })?;
                    fields.push((field.to_string(), Value::from_json(field_kind, raw)?));
                }
                Ok(Value::Struct {
                    name: name.to_string(),
                    fields,
                })
            }
            _ => Err(Error::type_mismatch(kind, json_kind(json))),
        }
    }

    /// Render this value as plain JSON (no kind tags)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Unit => serde_json::Value::Null,
            Value::Int32(i) => serde_json::Value::from(*i),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Struct { fields, .. } => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Closest boundary kind for a JSON value, used in mismatch reports
fn json_kind(json: &serde_json::Value) -> ValueKind {
    use serde_json::Value as Json;

    match json {
        Json::Null => ValueKind::Unit,
        Json::Bool(_) => ValueKind::Bool,
        Json::Number(_) => ValueKind::Int32,
        Json::String(_) => ValueKind::String,
        Json::Array(_) | Json::Object(_) => ValueKind::Struct("?"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Int32(i) => write!(f, "Int32({})", i),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Struct { name, fields } => {
                write!(f, "{} {{ ", name)?;
                for (i, (field, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field, value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// Lossless conversion between a native value and its [`Value`] form
///
/// Implementations must satisfy `T::from_value(x.to_value()) == x`.
pub trait Marshal: Sized {
    /// Kind every value of this type marshals to
    fn kind() -> ValueKind;

    /// Copy this value out into its loosely typed form
    fn to_value(&self) -> Value;

    /// Convert a loosely typed value back, checking its kind
    fn from_value(value: Value) -> Result<Self>;
}

impl Marshal for () {
    fn kind() -> ValueKind {
        ValueKind::Unit
    }

    fn to_value(&self) -> Value {
        Value::Unit
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Unit => Ok(()),
            other => Err(Error::type_mismatch(ValueKind::Unit, other.kind())),
        }
    }
}

impl Marshal for i32 {
    fn kind() -> ValueKind {
        ValueKind::Int32
    }

    fn to_value(&self) -> Value {
        Value::Int32(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int32(i) => Ok(i),
            other => Err(Error::type_mismatch(ValueKind::Int32, other.kind())),
        }
    }
}

impl Marshal for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch(ValueKind::Bool, other.kind())),
        }
    }
}

impl Marshal for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(ValueKind::String, other.kind())),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_kinds() {
        assert!(ValueKind::Int32.is_primitive());
        assert!(ValueKind::Bool.is_primitive());
        assert!(!ValueKind::String.is_primitive());
        assert!(!ValueKind::Struct("StructB").is_primitive());
    }

    #[test]
    fn test_marshal_rejects_wrong_kind() {
        let err = i32::from_value(Value::Bool(true)).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: ValueKind::Int32,
                found: ValueKind::Bool
            }
        ));

        assert!(bool::from_value(Value::Int32(1)).is_err());
        assert!(String::from_value(Value::Unit).is_err());
    }

    #[test]
    fn test_bool_is_not_numeric() {
        assert!(Value::from_json(ValueKind::Bool, &json!(1)).is_err());
        assert!(Value::from_json(ValueKind::Int32, &json!(true)).is_err());
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            Value::from_json(ValueKind::Int32, &json!(-7)).unwrap(),
            Value::Int32(-7)
        );
        assert_eq!(
            Value::from_json(ValueKind::String, &json!("héllo")).unwrap(),
            Value::String("héllo".to_string())
        );
        assert_eq!(
            Value::from_json(ValueKind::Unit, &json!(null)).unwrap(),
            Value::Unit
        );
    }

    #[test]
    fn test_from_json_rejects_out_of_range_int() {
        let too_big = json!(i64::from(i32::MAX) + 1);
        assert!(Value::from_json(ValueKind::Int32, &too_big).is_err());
        assert!(Value::from_json(ValueKind::Int32, &json!(1.5)).is_err());
    }

    #[test]
    fn test_from_json_struct() {
        let value = Value::from_json(ValueKind::Struct("StructB"), &json!({"i32_field": 44})).unwrap();
        assert_eq!(value.field("i32_field"), Some(&Value::Int32(44)));
        assert_eq!(value.kind(), ValueKind::Struct("StructB"));

        let missing = Value::from_json(ValueKind::Struct("StructB"), &json!({}));
        assert!(matches!(missing, Err(Error::MissingField { .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int32(42).to_string(), "Int32(42)");
        assert_eq!(Value::from("hi").to_string(), "String(\"hi\")");
        assert_eq!(Value::Unit.to_string(), "()");

        let nested = Value::Struct {
            name: "StructB".to_string(),
            fields: vec![("i32_field".to_string(), Value::Int32(3))],
        };
        assert_eq!(nested.to_string(), "StructB { i32_field: Int32(3) }");
    }

    #[test]
    fn test_to_json_is_untagged() {
        let nested = Value::Struct {
            name: "StructB".to_string(),
            fields: vec![("i32_field".to_string(), Value::Int32(3))],
        };
        assert_eq!(nested.to_json(), json!({"i32_field": 3}));
        assert_eq!(Value::Unit.to_json(), json!(null));
    }
}
