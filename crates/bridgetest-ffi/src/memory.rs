//! Memory management utilities for FFI
//!
//! Every object this library hands across the boundary is a boxed Rust
//! value behind an opaque pointer. This module owns the conversions between
//! the two, the owned-string handle, the per-thread last error, and a
//! process-wide count of handles that have not been freed yet.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::validate_ptr;
use crate::types::{BridgeResult, FfiSlice, RustString};

struct LastError {
    code: BridgeResult,
    message: CString,
}

// Thread-local storage for last error
thread_local! {
    static LAST_ERROR: RefCell<Option<LastError>> = const { RefCell::new(None) };
}

/// Handles handed out and not yet freed, across all threads
static LIVE_ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

/// Set the last error for the current thread
pub fn set_last_error<S: Into<String>>(code: BridgeResult, err: S) {
    let message = CString::new(err.into()).unwrap_or_else(|_| {
        CString::new("Error message contained null byte").unwrap_or_default()
    });

    tracing::warn!(code = ?code, message = %message.to_string_lossy(), "FFI call failed");

    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(LastError { code, message });
    });
}

/// Clear the last error for the current thread
pub fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Code of the last error on this thread, `Success` if there is none
pub fn last_error_code() -> BridgeResult {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|err| err.code)
            .unwrap_or(BridgeResult::Success)
    })
}

/// Number of handles currently live
pub fn live_allocations() -> usize {
    LIVE_ALLOCATIONS.load(Ordering::SeqCst)
}

/// Move `value` to the heap and return it as an opaque handle
///
/// The caller must release it with [`free_handle`] using the same `T`.
pub fn into_handle<T, H>(value: T) -> *mut H {
    LIVE_ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
    Box::into_raw(Box::new(value)) as *mut H
}

/// Release a handle created by [`into_handle`]; null is a no-op
///
/// # Safety
/// `handle` must be null or come from `into_handle::<T, H>` and not have
/// been freed already.
pub unsafe fn free_handle<T, H>(handle: *mut H) {
    if handle.is_null() {
        return;
    }

    drop(Box::from_raw(handle as *mut T));
    LIVE_ALLOCATIONS.fetch_sub(1, Ordering::SeqCst);
}

/// Borrow the value behind a handle
///
/// # Safety
/// `handle` must be null or a live handle wrapping a `T`.
pub unsafe fn handle_ref<'a, T, H>(handle: *const H, name: &str) -> Result<&'a T, BridgeResult> {
    validate_ptr(handle, name)?;
    Ok(&*(handle as *const T))
}

/// Mutably borrow the value behind a handle
///
/// # Safety
/// `handle` must be null or a live handle wrapping a `T`, with no other
/// borrow of it active.
pub unsafe fn handle_mut<'a, T, H>(handle: *mut H, name: &str) -> Result<&'a mut T, BridgeResult> {
    validate_ptr(handle, name)?;
    Ok(&mut *(handle as *mut T))
}

/// Hand an owned string to the caller
pub fn allocate_rust_string(s: String) -> *mut RustString {
    into_handle::<String, RustString>(s)
}

/// Pointer to the UTF-8 bytes of an owned string handle
///
/// The bytes are not NUL-terminated; pair this with
/// `bridgetest_rust_string_len`. Returns null for a null handle.
///
/// # Safety
/// `s` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn bridgetest_rust_string_data(s: *const RustString) -> *const c_char {
    ffi_boundary!(ptr::null(), {
        Ok(handle_ref::<String, _>(s, "string")?.as_ptr() as *const c_char)
    })
}

/// Length in bytes of an owned string handle, 0 for a null handle
///
/// # Safety
/// `s` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn bridgetest_rust_string_len(s: *const RustString) -> usize {
    ffi_boundary!(0, Ok(handle_ref::<String, _>(s, "string")?.len()))
}

/// Free an owned string handle
///
/// # Safety
/// The pointer must be null or have been returned by this library, and must
/// not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn bridgetest_rust_string_free(s: *mut RustString) {
    ffi_boundary!((), {
        free_handle::<String, _>(s);
        Ok(())
    })
}

/// Borrow the bytes of a string argument as `&str`
///
/// An empty view is always valid, even with a null pointer. Interior NULs
/// are ordinary characters here.
///
/// # Safety
/// `slice.ptr` must point to `slice.len` readable bytes that outlive `'a`.
pub unsafe fn slice_to_str<'a>(slice: FfiSlice, name: &str) -> Result<&'a str, BridgeResult> {
    if slice.len == 0 {
        return Ok("");
    }
    validate_ptr(slice.ptr, name)?;

    let bytes = std::slice::from_raw_parts(slice.ptr, slice.len);
    std::str::from_utf8(bytes).map_err(|_| {
        set_last_error(
            BridgeResult::Utf8Error,
            format!("Invalid UTF-8 in {}", name),
        );
        BridgeResult::Utf8Error
    })
}

/// Get the last error message
///
/// # Safety
/// Returns a pointer that should NOT be freed by the caller. It stays valid
/// until the next call into this library on the same thread.
#[no_mangle]
pub unsafe extern "C" fn bridgetest_get_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(err) => err.message.as_ptr(),
        None => ptr::null(),
    })
}

/// Code of the last error on this thread
#[no_mangle]
pub extern "C" fn bridgetest_last_error_code() -> BridgeResult {
    last_error_code()
}

/// Clear the last error message
#[no_mangle]
pub extern "C" fn bridgetest_clear_error() {
    clear_last_error();
}

/// Number of handles handed out and not yet freed
#[no_mangle]
pub extern "C" fn bridgetest_live_allocations() -> usize {
    live_allocations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_error_handling() {
        set_last_error(BridgeResult::Utf8Error, "Test error");
        unsafe {
            let error = bridgetest_get_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert_eq!(error_str, "Test error");
        }
        assert_eq!(bridgetest_last_error_code(), BridgeResult::Utf8Error);

        clear_last_error();
        unsafe {
            let error = bridgetest_get_last_error();
            assert!(error.is_null());
        }
        assert_eq!(bridgetest_last_error_code(), BridgeResult::Success);
    }

    #[test]
    fn test_rust_string_handle() {
        unsafe {
            let s = allocate_rust_string("Hello, FFI!".to_string());
            assert!(!s.is_null());

            let data = bridgetest_rust_string_data(s) as *const u8;
            let len = bridgetest_rust_string_len(s);
            let bytes = std::slice::from_raw_parts(data, len);
            assert_eq!(std::str::from_utf8(bytes).unwrap(), "Hello, FFI!");

            bridgetest_rust_string_free(s);
            bridgetest_rust_string_free(ptr::null_mut());
        }
    }

    #[test]
    fn test_null_string_handle() {
        unsafe {
            assert!(bridgetest_rust_string_data(ptr::null()).is_null());
            assert_eq!(bridgetest_rust_string_len(ptr::null()), 0);
        }
        assert_eq!(last_error_code(), BridgeResult::NullPointer);
        clear_last_error();
    }

    #[test]
    fn test_string_handle_calls_clear_error() {
        set_last_error(BridgeResult::NullPointer, "stale");
        unsafe {
            let s = allocate_rust_string("fresh".to_string());
            assert_eq!(bridgetest_rust_string_len(s), 5);
            assert_eq!(last_error_code(), BridgeResult::Success);

            set_last_error(BridgeResult::NullPointer, "stale");
            bridgetest_rust_string_free(s);
        }
        assert_eq!(last_error_code(), BridgeResult::Success);
    }

    #[test]
    fn test_slice_conversion() {
        let text = "Grüße\0tail";
        assert_eq!(
            unsafe { slice_to_str(FfiSlice::borrowed(text), "arg") },
            Ok("Grüße\0tail")
        );
        assert_eq!(unsafe { slice_to_str(FfiSlice::empty(), "arg") }, Ok(""));

        let invalid = [0xFFu8, 0xFE];
        let view = FfiSlice {
            ptr: invalid.as_ptr(),
            len: invalid.len(),
        };
        assert_eq!(unsafe { slice_to_str(view, "arg") }, Err(BridgeResult::Utf8Error));
        assert_eq!(last_error_code(), BridgeResult::Utf8Error);

        let dangling = FfiSlice {
            ptr: ptr::null(),
            len: 3,
        };
        assert_eq!(unsafe { slice_to_str(dangling, "arg") }, Err(BridgeResult::NullPointer));
        clear_last_error();
    }
}
