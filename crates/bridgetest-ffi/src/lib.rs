//! bridgetest FFI - the boundary surface exported with the C ABI
//!
//! This crate exports every function and struct accessor of
//! `bridgetest_core` as an `extern "C"` symbol, generates the matching C
//! header at build time, and provides [`FfiBoundary`], a Rust caller that
//! drives those symbols so the conformance suite can run through the ABI.
//!
//! # Safety
//!
//! The exported functions deal with raw pointers. Callers must ensure:
//! - Every handle is released exactly once with its `_free` function
//! - String arguments are `FfiSlice` views of valid UTF-8; they need no
//!   terminator and may contain NUL
//! - Handles are not used after they are freed
//! - A handle is not mutated from two threads at once
//!
//! Null handles and invalid UTF-8 never cause undefined behavior: the call
//! records the problem in the thread's last error and returns 0, `false` or
//! null.

#![warn(missing_docs)]

#[macro_use]
mod error;
mod api;
mod boundary;
mod memory;
mod structs;
mod types;

// Re-export public API
pub use api::*;
pub use boundary::{FfiBoundary, FfiStructA, FfiStructB};
pub use memory::{
    bridgetest_clear_error, bridgetest_get_last_error, bridgetest_last_error_code,
    bridgetest_live_allocations, bridgetest_rust_string_data, bridgetest_rust_string_free,
    bridgetest_rust_string_len, live_allocations,
};
pub use structs::*;
pub use types::{BridgeResult, FfiSlice, RustString, StructAHandle, StructBHandle};
