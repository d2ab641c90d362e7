//! Struct types of the reference surface
//!
//! Both structs are plain value types. Fields are private so that the only
//! way in or out is through the accessors, which always copy: a getter hands
//! back an independent value, a setter stores its own copy of the argument.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::{Marshal, Value, ValueKind};

/// Outer struct with primitive, string and nested struct fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructA {
    i32_field: i32,
    bool_field: bool,
    string_field: String,
    struct_field: StructB,
}

/// Nested struct held by value inside [`StructA`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructB {
    i32_field: i32,
}

impl StructA {
    /// Type name as it appears on the surface
    pub const NAME: &'static str = "StructA";

    /// Default-constructed instance: `0`, `false`, `""`, default [`StructB`]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_i32_field(&self) -> i32 {
        self.i32_field
    }

    pub fn set_i32_field(&mut self, value: i32) {
        self.i32_field = value;
    }

    /// Read-only; there is no setter for this field
    pub fn get_bool_field(&self) -> bool {
        self.bool_field
    }

    /// Returns a fresh owned copy of the string
    pub fn get_string_field(&self) -> String {
        self.string_field.clone()
    }

    /// Stores a copy of `value`
    ///
    /// Accepts literals, borrowed strings and owned strings alike; the
    /// caller's value is only read.
    pub fn set_string_field(&mut self, value: impl AsRef<str>) {
        let value = value.as_ref();
        self.string_field.clear();
        self.string_field.push_str(value);
    }

    /// Returns a copy of the nested struct
    ///
    /// Mutating the returned value never affects `self`.
    pub fn get_struct_field(&self) -> StructB {
        self.struct_field.clone()
    }

    /// Replaces the nested struct with a copy of `value`
    pub fn set_struct_field(&mut self, value: &StructB) {
        self.struct_field = value.clone();
    }
}

impl StructB {
    /// Type name as it appears on the surface
    pub const NAME: &'static str = "StructB";

    /// Default-constructed instance with `i32_field == 0`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_i32_field(&self) -> i32 {
        self.i32_field
    }

    pub fn set_i32_field(&mut self, value: i32) {
        self.i32_field = value;
    }
}

impl Marshal for StructB {
    fn kind() -> ValueKind {
        ValueKind::Struct(Self::NAME)
    }

    fn to_value(&self) -> Value {
        Value::Struct {
            name: Self::NAME.to_string(),
            fields: vec![("i32_field".to_string(), self.i32_field.to_value())],
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Struct { name, mut fields } if name == Self::NAME => Ok(Self {
                i32_field: i32::from_value(Value::take_field(&mut fields, Self::NAME, "i32_field")?)?,
            }),
            other => Err(Error::type_mismatch(Self::kind(), other.kind())),
        }
    }
}

impl Marshal for StructA {
    fn kind() -> ValueKind {
        ValueKind::Struct(Self::NAME)
    }

    fn to_value(&self) -> Value {
        Value::Struct {
            name: Self::NAME.to_string(),
            fields: vec![
                ("i32_field".to_string(), self.i32_field.to_value()),
                ("bool_field".to_string(), self.bool_field.to_value()),
                ("string_field".to_string(), self.string_field.to_value()),
                ("struct_field".to_string(), self.struct_field.to_value()),
            ],
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Struct { name, mut fields } if name == Self::NAME => {
                let mut take = |field: &str| Value::take_field(&mut fields, Self::NAME, field);
                Ok(Self {
                    i32_field: i32::from_value(take("i32_field")?)?,
                    bool_field: bool::from_value(take("bool_field")?)?,
                    string_field: String::from_value(take("string_field")?)?,
                    struct_field: StructB::from_value(take("struct_field")?)?,
                })
            }
            other => Err(Error::type_mismatch(Self::kind(), other.kind())),
        }
    }
}
