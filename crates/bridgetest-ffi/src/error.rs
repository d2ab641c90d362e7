//! Error handling for FFI boundary
//!
//! Nothing crosses the ABI as a Rust error or a panic. Failures are recorded
//! in the thread's last-error slot and the exported function returns a
//! neutral value (0, `false` or null).

use std::any::Any;
use std::panic;

use crate::memory::set_last_error;
use crate::types::BridgeResult;

/// Safely execute a closure that might panic
///
/// A panic is turned into `InternalError` with the panic message stored as
/// the last error.
pub fn catch_panic<F, R>(f: F) -> Result<R, BridgeResult>
where
    F: FnOnce() -> Result<R, BridgeResult> + panic::UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(result) => result,
        Err(panic_info) => {
            let msg = get_panic_message(&panic_info);
            set_last_error(
                BridgeResult::InternalError,
                format!("Panic occurred: {}", msg),
            );
            Err(BridgeResult::InternalError)
        }
    }
}

/// Extract a message from panic info
fn get_panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

/// Run an exported function body, returning `$fallback` on any failure
///
/// The body evaluates to `Result<T, BridgeResult>`. The last error is
/// cleared on entry so that a successful call leaves the slot empty.
macro_rules! ffi_boundary {
    ($fallback:expr, $body:expr) => {{
        $crate::memory::clear_last_error();
        match $crate::error::catch_panic(|| $body) {
            Ok(result) => result,
            Err(_) => return $fallback,
        }
    }};
}

/// Validate that a pointer is not null
pub fn validate_ptr<T>(ptr: *const T, name: &str) -> Result<(), BridgeResult> {
    if ptr.is_null() {
        set_last_error(BridgeResult::NullPointer, format!("{} is null", name));
        Err(BridgeResult::NullPointer)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{clear_last_error, last_error_code};

    #[test]
    fn test_catch_panic_success() {
        let result = catch_panic(|| Ok::<i32, BridgeResult>(42));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_catch_panic_with_panic() {
        let result: Result<(), BridgeResult> = catch_panic(|| panic!("Test panic"));
        assert_eq!(result, Err(BridgeResult::InternalError));
        assert_eq!(last_error_code(), BridgeResult::InternalError);
        clear_last_error();
    }

    #[test]
    fn test_validate_ptr() {
        let value = 42;
        assert!(validate_ptr(&value as *const i32, "test").is_ok());
        assert_eq!(
            validate_ptr(std::ptr::null::<i32>(), "test"),
            Err(BridgeResult::NullPointer)
        );
        clear_last_error();
    }

    #[test]
    fn test_boundary_macro_returns_fallback() {
        fn guarded(fail: bool) -> i32 {
            ffi_boundary!(-1, {
                if fail {
                    Err(BridgeResult::Utf8Error)
                } else {
                    Ok(7)
                }
            })
        }

        assert_eq!(guarded(false), 7);
        assert_eq!(guarded(true), -1);
    }
}
