//! Free functions of the reference surface
//!
//! String parameters are borrowed views; string results are freshly owned.
//! Void functions have no effect beyond a debug event recording what they
//! received.

use tracing::debug;

/// Fixed result of [`function_return_primitive`]
pub const RETURN_PRIMITIVE: i32 = 42;

/// Fixed result of [`function_return_string`]
pub const RETURN_STRING: &str = "String returned from Rust";

pub fn simple_function() {
    debug!(function = "simple_function", "called");
}

pub fn function_with_primitive_args(i: i32, b: bool) {
    debug!(function = "function_with_primitive_args", i, b, "called");
}

pub fn function_with_string_arg(s: &str) {
    debug!(function = "function_with_string_arg", s, "called");
}

pub fn function_with_primitive_and_string_arg(i: i32, b: bool, s: &str) {
    debug!(
        function = "function_with_primitive_and_string_arg",
        i, b, s, "called"
    );
}

pub fn function_return_primitive() -> i32 {
    RETURN_PRIMITIVE
}

pub fn function_return_string() -> String {
    RETURN_STRING.to_string()
}

/// Selects one of two strings: `str1` when `b` is true, otherwise `str2`
///
/// The selected argument is returned unchanged, including when it is empty
/// or equal to the other one.
pub fn combo_function(str1: &str, str2: &str, b: bool) -> String {
    if b {
        str1.to_string()
    } else {
        str2.to_string()
    }
}
