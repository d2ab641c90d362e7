//! The surface reached through the exported C ABI
//!
//! [`FfiBoundary`] drives the `extern "C"` functions of this crate exactly
//! as a foreign caller would, so the conformance suite in
//! `bridgetest_core` can be pointed at the ABI as well as at the native
//! types. [`FfiStructA`] and [`FfiStructB`] own one handle each and free it
//! on drop.

use std::ptr;

use bridgetest_core::{Boundary, InnerAccess, OuterAccess};

use crate::api::*;
use crate::memory::{bridgetest_rust_string_data, bridgetest_rust_string_free, bridgetest_rust_string_len};
use crate::structs::*;
use crate::types::{FfiSlice, RustString, StructAHandle, StructBHandle};

/// Calls every surface function through its C symbol
#[derive(Debug, Clone, Copy, Default)]
pub struct FfiBoundary;

/// Owning wrapper over a `StructA` handle
#[derive(Debug)]
pub struct FfiStructA {
    raw: *mut StructAHandle,
}

/// Owning wrapper over a `StructB` handle
#[derive(Debug)]
pub struct FfiStructB {
    raw: *mut StructBHandle,
}

/// Copy an owned string handle into a `String` and free the handle
///
/// A null handle reads as the empty string.
fn take_rust_string(s: *mut RustString) -> String {
    if s.is_null() {
        return String::new();
    }

    unsafe {
        let data = bridgetest_rust_string_data(s) as *const u8;
        let len = bridgetest_rust_string_len(s);
        let text = if data.is_null() || len == 0 {
            String::new()
        } else {
            String::from_utf8_lossy(std::slice::from_raw_parts(data, len)).into_owned()
        };
        bridgetest_rust_string_free(s);
        text
    }
}

impl Clone for FfiStructA {
    fn clone(&self) -> Self {
        Self {
            raw: unsafe { bridgetest_struct_a_clone(self.raw) },
        }
    }
}

impl Clone for FfiStructB {
    fn clone(&self) -> Self {
        Self {
            raw: unsafe { bridgetest_struct_b_clone(self.raw) },
        }
    }
}

impl Drop for FfiStructA {
    fn drop(&mut self) {
        unsafe { bridgetest_struct_a_free(self.raw) };
        self.raw = ptr::null_mut();
    }
}

impl Drop for FfiStructB {
    fn drop(&mut self) {
        unsafe { bridgetest_struct_b_free(self.raw) };
        self.raw = ptr::null_mut();
    }
}

impl InnerAccess for FfiStructB {
    fn get_i32_field(&self) -> i32 {
        unsafe { bridgetest_struct_b_get_i32_field(self.raw) }
    }

    fn set_i32_field(&mut self, value: i32) {
        unsafe { bridgetest_struct_b_set_i32_field(self.raw, value) }
    }
}

impl OuterAccess for FfiStructA {
    type Inner = FfiStructB;

    fn get_i32_field(&self) -> i32 {
        unsafe { bridgetest_struct_a_get_i32_field(self.raw) }
    }

    fn set_i32_field(&mut self, value: i32) {
        unsafe { bridgetest_struct_a_set_i32_field(self.raw, value) }
    }

    fn get_bool_field(&self) -> bool {
        unsafe { bridgetest_struct_a_get_bool_field(self.raw) }
    }

    fn get_string_field(&self) -> String {
        take_rust_string(unsafe { bridgetest_struct_a_get_string_field(self.raw) })
    }

    fn set_string_field(&mut self, value: &str) {
        unsafe { bridgetest_struct_a_set_string_field(self.raw, FfiSlice::borrowed(value)) }
    }

    fn get_struct_field(&self) -> FfiStructB {
        FfiStructB {
            raw: unsafe { bridgetest_struct_a_get_struct_field(self.raw) },
        }
    }

    fn set_struct_field(&mut self, value: &FfiStructB) {
        unsafe { bridgetest_struct_a_set_struct_field(self.raw, value.raw) }
    }
}

impl Boundary for FfiBoundary {
    type Inner = FfiStructB;
    type Outer = FfiStructA;

    fn name(&self) -> &'static str {
        "ffi"
    }

    fn new_outer(&self) -> FfiStructA {
        FfiStructA {
            raw: bridgetest_struct_a_default(),
        }
    }

    fn new_inner(&self) -> FfiStructB {
        FfiStructB {
            raw: bridgetest_struct_b_default(),
        }
    }

    fn simple_function(&self) {
        bridgetest_simple_function()
    }

    fn function_with_primitive_args(&self, i: i32, b: bool) {
        bridgetest_function_with_primitive_args(i, b)
    }

    fn function_with_string_arg(&self, s: &str) {
        unsafe { bridgetest_function_with_string_arg(FfiSlice::borrowed(s)) }
    }

    fn function_with_primitive_and_string_arg(&self, i: i32, b: bool, s: &str) {
        unsafe { bridgetest_function_with_primitive_and_string_arg(i, b, FfiSlice::borrowed(s)) }
    }

    fn function_return_primitive(&self) -> i32 {
        bridgetest_function_return_primitive()
    }

    fn function_return_string(&self) -> String {
        take_rust_string(unsafe { bridgetest_function_return_string() })
    }

    fn combo_function(&self, str1: &str, str2: &str, b: bool) -> String {
        take_rust_string(unsafe {
            bridgetest_combo_function(FfiSlice::borrowed(str1), FfiSlice::borrowed(str2), b)
        })
    }
}
