//! FFI-safe type definitions
//!
//! All types in this module are designed to be safely passed across
//! the FFI boundary with C ABI compatibility.

use std::ptr;

/// Result codes reported through the last-error slot
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeResult {
    /// Operation completed successfully
    Success = 0,
    /// Null pointer provided
    NullPointer = -2,
    /// Invalid UTF-8 string
    Utf8Error = -3,
    /// Internal error, including caught panics
    InternalError = -9,
}

/// Opaque handle for a `StructA` instance
#[repr(C)]
pub struct StructAHandle {
    _private: [u8; 0],
}

/// Opaque handle for a `StructB` instance
#[repr(C)]
pub struct StructBHandle {
    _private: [u8; 0],
}

/// Opaque handle for a string owned by this library
///
/// Read it with `bridgetest_rust_string_data` and
/// `bridgetest_rust_string_len`, release it with
/// `bridgetest_rust_string_free`.
#[repr(C)]
pub struct RustString {
    _private: [u8; 0],
}

/// Borrowed, length-delimited UTF-8 view
///
/// The bytes stay owned by the caller and need not be NUL-terminated.
/// The callee copies them before returning.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfiSlice {
    /// Pointer to the first byte; may be null when `len` is 0
    pub ptr: *const u8,
    /// Length in bytes
    pub len: usize,
}

impl FfiSlice {
    /// View over a Rust string, valid as long as `s` is
    pub fn borrowed(s: &str) -> Self {
        Self {
            ptr: s.as_ptr(),
            len: s.len(),
        }
    }

    /// The empty view
    pub fn empty() -> Self {
        Self {
            ptr: ptr::null(),
            len: 0,
        }
    }
}

impl BridgeResult {
    /// Check if the result indicates success
    pub fn is_success(self) -> bool {
        self == BridgeResult::Success
    }

    /// Get a human-readable error message
    pub fn error_message(self) -> &'static str {
        match self {
            BridgeResult::Success => "Success",
            BridgeResult::NullPointer => "Null pointer provided",
            BridgeResult::Utf8Error => "Invalid UTF-8 string",
            BridgeResult::InternalError => "Internal error",
        }
    }
}
