//! The boundary surface described as data
//!
//! The tables here list every free function and struct accessor the surface
//! exposes, the kinds of their parameters and results, and the C symbols the
//! FFI layer exports them under. [`invoke`] uses the same tables to dispatch
//! a call by name through any [`Boundary`].

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::boundary::Boundary;
use crate::error::{Error, Result};
use crate::types::{StructA, StructB};
use crate::value::{Value, ValueKind};

/// Prefix shared by every exported C symbol
pub const SYMBOL_PREFIX: &str = "bridgetest_";

/// A named, typed parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub kind: ValueKind,
}

/// Signature of a free function on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    pub name: &'static str,
    pub params: &'static [Param],
    /// [`ValueKind::Unit`] for void functions
    pub returns: ValueKind,
}

/// A struct field and which accessors it exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldAccessor {
    pub field: &'static str,
    pub kind: ValueKind,
    pub getter: bool,
    pub setter: bool,
}

/// A struct type on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    pub name: &'static str,
    /// Snake-case stem used in C symbol names
    pub stem: &'static str,
    pub fields: &'static [FieldAccessor],
}

/// The whole surface
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Surface {
    pub functions: &'static [FunctionSignature],
    pub structs: &'static [StructDescriptor],
}

const fn param(name: &'static str, kind: ValueKind) -> Param {
    Param { name, kind }
}

const fn accessor(field: &'static str, kind: ValueKind, getter: bool, setter: bool) -> FieldAccessor {
    FieldAccessor {
        field,
        kind,
        getter,
        setter,
    }
}

static FUNCTIONS: &[FunctionSignature] = &[
    FunctionSignature {
        name: "simple_function",
        params: &[],
        returns: ValueKind::Unit,
    },
    FunctionSignature {
        name: "function_with_primitive_args",
        params: &[param("i", ValueKind::Int32), param("b", ValueKind::Bool)],
        returns: ValueKind::Unit,
    },
    FunctionSignature {
        name: "function_with_string_arg",
        params: &[param("s", ValueKind::String)],
        returns: ValueKind::Unit,
    },
    FunctionSignature {
        name: "function_with_primitive_and_string_arg",
        params: &[
            param("i", ValueKind::Int32),
            param("b", ValueKind::Bool),
            param("s", ValueKind::String),
        ],
        returns: ValueKind::Unit,
    },
    FunctionSignature {
        name: "function_return_primitive",
        params: &[],
        returns: ValueKind::Int32,
    },
    FunctionSignature {
        name: "function_return_string",
        params: &[],
        returns: ValueKind::String,
    },
    FunctionSignature {
        name: "combo_function",
        params: &[
            param("str1", ValueKind::String),
            param("str2", ValueKind::String),
            param("b", ValueKind::Bool),
        ],
        returns: ValueKind::String,
    },
];

static STRUCTS: &[StructDescriptor] = &[
    StructDescriptor {
        name: StructA::NAME,
        stem: "struct_a",
        fields: &[
            accessor("i32_field", ValueKind::Int32, true, true),
            accessor("bool_field", ValueKind::Bool, true, false),
            accessor("string_field", ValueKind::String, true, true),
            accessor("struct_field", ValueKind::Struct(StructB::NAME), true, true),
        ],
    },
    StructDescriptor {
        name: StructB::NAME,
        stem: "struct_b",
        fields: &[accessor("i32_field", ValueKind::Int32, true, true)],
    },
];

/// The full boundary surface
pub fn surface() -> Surface {
    Surface {
        functions: FUNCTIONS,
        structs: STRUCTS,
    }
}

/// Look up a free function by name
pub fn function(name: &str) -> Option<&'static FunctionSignature> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Look up a struct by type name
pub fn struct_descriptor(name: &str) -> Option<&'static StructDescriptor> {
    STRUCTS.iter().find(|s| s.name == name)
}

pub(crate) fn struct_kind(name: &str) -> Option<ValueKind> {
    struct_descriptor(name).map(|s| ValueKind::Struct(s.name))
}

/// Field names and kinds of a struct, in declaration order
pub(crate) fn struct_schema(name: &str) -> Option<Vec<(&'static str, ValueKind)>> {
    struct_descriptor(name).map(|s| s.fields.iter().map(|f| (f.field, f.kind)).collect())
}

impl FunctionSignature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Exported C symbol
    pub fn symbol(&self) -> String {
        format!("{}{}", SYMBOL_PREFIX, self.name)
    }

    /// Check argument count and kinds, left to right
    pub fn check_args(&self, args: &[Value]) -> Result<()> {
        if args.len() != self.arity() {
            return Err(Error::ArityMismatch {
                function: self.name.to_string(),
                expected: self.arity(),
                found: args.len(),
            });
        }

        for (param, arg) in self.params.iter().zip(args) {
            let found = arg.kind();
            if found != param.kind {
                return Err(Error::type_mismatch(param.kind, found));
            }
        }

        Ok(())
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", p.name, p.kind)?;
        }
        write!(f, ")")?;
        if self.returns != ValueKind::Unit {
            write!(f, " -> {}", self.returns)?;
        }
        Ok(())
    }
}

impl StructDescriptor {
    pub fn default_symbol(&self) -> String {
        format!("{}{}_default", SYMBOL_PREFIX, self.stem)
    }

    pub fn clone_symbol(&self) -> String {
        format!("{}{}_clone", SYMBOL_PREFIX, self.stem)
    }

    pub fn free_symbol(&self) -> String {
        format!("{}{}_free", SYMBOL_PREFIX, self.stem)
    }

    /// Getter symbol, if the field exposes a getter
    pub fn getter_symbol(&self, field: &FieldAccessor) -> Option<String> {
        field
            .getter
            .then(|| format!("{}{}_get_{}", SYMBOL_PREFIX, self.stem, field.field))
    }

    /// Setter symbol, if the field exposes a setter
    pub fn setter_symbol(&self, field: &FieldAccessor) -> Option<String> {
        field
            .setter
            .then(|| format!("{}{}_set_{}", SYMBOL_PREFIX, self.stem, field.field))
    }

    /// Every symbol exported for this struct
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols = vec![self.default_symbol(), self.clone_symbol(), self.free_symbol()];
        for field in self.fields {
            symbols.extend(self.getter_symbol(field));
            symbols.extend(self.setter_symbol(field));
        }
        symbols
    }
}

impl Surface {
    /// Every symbol the surface is exported under, functions first
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.functions.iter().map(|f| f.symbol()).collect();
        for s in self.structs {
            symbols.extend(s.symbols());
        }
        symbols
    }
}

/// Call a free function by name through `boundary`
///
/// Arguments are checked against the function's signature before the call
/// is made. Void functions yield [`Value::Unit`].
pub fn invoke<B: Boundary>(boundary: &B, name: &str, args: &[Value]) -> Result<Value> {
    let signature = function(name).ok_or_else(|| Error::UnknownFunction {
        name: name.to_string(),
    })?;
    signature.check_args(args)?;

    debug!(function = name, backend = boundary.name(), "Invoking surface function");

    let result = match (signature.name, args) {
        ("simple_function", []) => {
            boundary.simple_function();
            Value::Unit
        }
        ("function_with_primitive_args", [Value::Int32(i), Value::Bool(b)]) => {
            boundary.function_with_primitive_args(*i, *b);
            Value::Unit
        }
        ("function_with_string_arg", [Value::String(s)]) => {
            boundary.function_with_string_arg(s);
            Value::Unit
        }
        ("function_with_primitive_and_string_arg", [Value::Int32(i), Value::Bool(b), Value::String(s)]) => {
            boundary.function_with_primitive_and_string_arg(*i, *b, s);
            Value::Unit
        }
        ("function_return_primitive", []) => Value::Int32(boundary.function_return_primitive()),
        ("function_return_string", []) => Value::String(boundary.function_return_string()),
        ("combo_function", [Value::String(str1), Value::String(str2), Value::Bool(b)]) => {
            Value::String(boundary.combo_function(str1, str2, *b))
        }
        _ => {
            return Err(Error::UnknownFunction {
                name: name.to_string(),
            })
        }
    };

    Ok(result)
}
