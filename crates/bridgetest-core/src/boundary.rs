//! The call surface as a trait
//!
//! A [`Boundary`] is anything that can serve the surface: the native Rust
//! implementation in this crate, or a caller that reaches the same
//! functions through the C ABI. The conformance suite and dynamic dispatch
//! are written against this trait only.

use crate::functions;
use crate::types::{StructA, StructB};

/// Accessors of the nested struct
pub trait InnerAccess {
    fn get_i32_field(&self) -> i32;
    fn set_i32_field(&mut self, value: i32);
}

/// Accessors of the outer struct
pub trait OuterAccess {
    /// The nested struct type handed out by [`OuterAccess::get_struct_field`]
    type Inner: InnerAccess;

    fn get_i32_field(&self) -> i32;
    fn set_i32_field(&mut self, value: i32);
    fn get_bool_field(&self) -> bool;
    fn get_string_field(&self) -> String;
    fn set_string_field(&mut self, value: &str);
    /// Must return an independent copy
    fn get_struct_field(&self) -> Self::Inner;
    /// Must store a copy; the caller keeps `value`
    fn set_struct_field(&mut self, value: &Self::Inner);
}

/// A complete implementation of the boundary surface
pub trait Boundary {
    type Inner: InnerAccess;
    type Outer: OuterAccess<Inner = Self::Inner>;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Default-constructed outer struct
    fn new_outer(&self) -> Self::Outer;

    /// Default-constructed nested struct
    fn new_inner(&self) -> Self::Inner;

    fn simple_function(&self);
    fn function_with_primitive_args(&self, i: i32, b: bool);
    fn function_with_string_arg(&self, s: &str);
    fn function_with_primitive_and_string_arg(&self, i: i32, b: bool, s: &str);
    fn function_return_primitive(&self) -> i32;
    fn function_return_string(&self) -> String;
    fn combo_function(&self, str1: &str, str2: &str, b: bool) -> String;
}

/// The surface served directly by the Rust implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBoundary;

impl InnerAccess for StructB {
    fn get_i32_field(&self) -> i32 {
        StructB::get_i32_field(self)
    }

    fn set_i32_field(&mut self, value: i32) {
        StructB::set_i32_field(self, value)
    }
}

impl OuterAccess for StructA {
    type Inner = StructB;

    fn get_i32_field(&self) -> i32 {
        StructA::get_i32_field(self)
    }

    fn set_i32_field(&mut self, value: i32) {
        StructA::set_i32_field(self, value)
    }

    fn get_bool_field(&self) -> bool {
        StructA::get_bool_field(self)
    }

    fn get_string_field(&self) -> String {
        StructA::get_string_field(self)
    }

    fn set_string_field(&mut self, value: &str) {
        StructA::set_string_field(self, value)
    }

    fn get_struct_field(&self) -> StructB {
        StructA::get_struct_field(self)
    }

    fn set_struct_field(&mut self, value: &StructB) {
        StructA::set_struct_field(self, value)
    }
}

impl Boundary for NativeBoundary {
    type Inner = StructB;
    type Outer = StructA;

    fn name(&self) -> &'static str {
        "native"
    }

    fn new_outer(&self) -> StructA {
        StructA::new()
    }

    fn new_inner(&self) -> StructB {
        StructB::new()
    }

    fn simple_function(&self) {
        functions::simple_function()
    }

    fn function_with_primitive_args(&self, i: i32, b: bool) {
        functions::function_with_primitive_args(i, b)
    }

    fn function_with_string_arg(&self, s: &str) {
        functions::function_with_string_arg(s)
    }

    fn function_with_primitive_and_string_arg(&self, i: i32, b: bool, s: &str) {
        functions::function_with_primitive_and_string_arg(i, b, s)
    }

    fn function_return_primitive(&self) -> i32 {
        functions::function_return_primitive()
    }

    fn function_return_string(&self) -> String {
        functions::function_return_string()
    }

    fn combo_function(&self, str1: &str, str2: &str, b: bool) -> String {
        functions::combo_function(str1, str2, b)
    }
}
