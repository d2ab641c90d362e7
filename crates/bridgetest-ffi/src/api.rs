//! FFI API function definitions
//!
//! The free functions of the surface, exported with the C ABI. String
//! arguments are [`FfiSlice`] views borrowed for the duration of the call,
//! so they may hold any UTF-8 including NUL; string results are owned
//! [`RustString`] handles.

use std::os::raw::c_char;

use bridgetest_core::functions;

use crate::memory::{allocate_rust_string, slice_to_str};
use crate::types::{FfiSlice, RustString};

/// Get the library version
///
/// # Safety
/// The returned string is static and must not be freed
#[no_mangle]
pub extern "C" fn bridgetest_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Takes nothing, returns nothing
#[no_mangle]
pub extern "C" fn bridgetest_simple_function() {
    ffi_boundary!((), {
        functions::simple_function();
        Ok(())
    })
}

/// Accepts an integer and a boolean
#[no_mangle]
pub extern "C" fn bridgetest_function_with_primitive_args(i: i32, b: bool) {
    ffi_boundary!((), {
        functions::function_with_primitive_args(i, b);
        Ok(())
    })
}

/// Accepts a string
///
/// # Safety
/// `s` must view `len` readable bytes
#[no_mangle]
pub unsafe extern "C" fn bridgetest_function_with_string_arg(s: FfiSlice) {
    ffi_boundary!((), {
        let s = slice_to_str(s, "s")?;
        functions::function_with_string_arg(s);
        Ok(())
    })
}

/// Accepts an integer, a boolean and a string
///
/// # Safety
/// `s` must view `len` readable bytes
#[no_mangle]
pub unsafe extern "C" fn bridgetest_function_with_primitive_and_string_arg(
    i: i32,
    b: bool,
    s: FfiSlice,
) {
    ffi_boundary!((), {
        let s = slice_to_str(s, "s")?;
        functions::function_with_primitive_and_string_arg(i, b, s);
        Ok(())
    })
}

/// Always 42
#[no_mangle]
pub extern "C" fn bridgetest_function_return_primitive() -> i32 {
    ffi_boundary!(0, Ok(functions::function_return_primitive()))
}

/// Returns a fixed string
///
/// # Safety
/// The result must be released with `bridgetest_rust_string_free`
#[no_mangle]
pub unsafe extern "C" fn bridgetest_function_return_string() -> *mut RustString {
    ffi_boundary!(std::ptr::null_mut(), {
        Ok(allocate_rust_string(functions::function_return_string()))
    })
}

/// Returns a copy of `str1` when `b` is true, of `str2` otherwise
///
/// Both strings are validated whichever one is selected. Returns null and
/// sets the last error if either is not UTF-8, or has a null pointer with a
/// non-zero length.
///
/// # Safety
/// - `str1` and `str2` must view `len` readable bytes each
/// - The result must be released with `bridgetest_rust_string_free`
#[no_mangle]
pub unsafe extern "C" fn bridgetest_combo_function(
    str1: FfiSlice,
    str2: FfiSlice,
    b: bool,
) -> *mut RustString {
    ffi_boundary!(std::ptr::null_mut(), {
        let str1 = slice_to_str(str1, "str1")?;
        let str2 = slice_to_str(str2, "str2")?;
        Ok(allocate_rust_string(functions::combo_function(str1, str2, b)))
    })
}
