//! Exported constructors, destructors and accessors of the surface structs
//!
//! Every handle returned here is owned by the caller and must be released
//! with the matching `_free` function. Getters of nested structs and strings
//! return fresh copies; setters copy what they are given.

use bridgetest_core::{StructA, StructB};

use crate::memory::{
    allocate_rust_string, free_handle, handle_mut, handle_ref, into_handle, slice_to_str,
};
use crate::types::{FfiSlice, RustString, StructAHandle, StructBHandle};

// StructA

/// Default-constructed `StructA`
#[no_mangle]
pub extern "C" fn bridgetest_struct_a_default() -> *mut StructAHandle {
    ffi_boundary!(std::ptr::null_mut(), {
        Ok(into_handle::<StructA, StructAHandle>(StructA::new()))
    })
}

/// Independent copy of a `StructA`, null if `this` is null
///
/// # Safety
/// `this` must be null or a live `StructA` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_clone(this: *const StructAHandle) -> *mut StructAHandle {
    ffi_boundary!(std::ptr::null_mut(), {
        let a = handle_ref::<StructA, _>(this, "this")?;
        Ok(into_handle::<StructA, StructAHandle>(a.clone()))
    })
}

/// Release a `StructA`; null is a no-op
///
/// # Safety
/// `this` must be null or a live `StructA` handle, unused afterwards
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_free(this: *mut StructAHandle) {
    ffi_boundary!((), {
        free_handle::<StructA, _>(this);
        Ok(())
    })
}

/// # Safety
/// `this` must be null or a live `StructA` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_get_i32_field(this: *const StructAHandle) -> i32 {
    ffi_boundary!(0, {
        Ok(handle_ref::<StructA, _>(this, "this")?.get_i32_field())
    })
}

/// # Safety
/// `this` must be null or a live `StructA` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_set_i32_field(this: *mut StructAHandle, value: i32) {
    ffi_boundary!((), {
        handle_mut::<StructA, _>(this, "this")?.set_i32_field(value);
        Ok(())
    })
}

/// Read-only field
///
/// # Safety
/// `this` must be null or a live `StructA` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_get_bool_field(this: *const StructAHandle) -> bool {
    ffi_boundary!(false, {
        Ok(handle_ref::<StructA, _>(this, "this")?.get_bool_field())
    })
}

/// Owned copy of the string field
///
/// # Safety
/// - `this` must be null or a live `StructA` handle
/// - The result must be released with `bridgetest_rust_string_free`
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_get_string_field(
    this: *const StructAHandle,
) -> *mut RustString {
    ffi_boundary!(std::ptr::null_mut(), {
        let a = handle_ref::<StructA, _>(this, "this")?;
        Ok(allocate_rust_string(a.get_string_field()))
    })
}

/// Copy `value` into the string field
///
/// The field is left unchanged when `value` is not valid UTF-8.
///
/// # Safety
/// - `this` must be null or a live `StructA` handle
/// - `value` must view `len` readable bytes
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_set_string_field(
    this: *mut StructAHandle,
    value: FfiSlice,
) {
    ffi_boundary!((), {
        let a = handle_mut::<StructA, _>(this, "this")?;
        let value = slice_to_str(value, "value")?;
        a.set_string_field(value);
        Ok(())
    })
}

/// Independent copy of the nested struct
///
/// # Safety
/// - `this` must be null or a live `StructA` handle
/// - The result must be released with `bridgetest_struct_b_free`
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_get_struct_field(
    this: *const StructAHandle,
) -> *mut StructBHandle {
    ffi_boundary!(std::ptr::null_mut(), {
        let a = handle_ref::<StructA, _>(this, "this")?;
        Ok(into_handle::<StructB, StructBHandle>(a.get_struct_field()))
    })
}

/// Copy `value` into the nested struct; the caller keeps `value`
///
/// # Safety
/// `this` and `value` must be null or live handles of their types
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_a_set_struct_field(
    this: *mut StructAHandle,
    value: *const StructBHandle,
) {
    ffi_boundary!((), {
        let a = handle_mut::<StructA, _>(this, "this")?;
        let b = handle_ref::<StructB, _>(value, "value")?;
        a.set_struct_field(b);
        Ok(())
    })
}

// StructB

/// Default-constructed `StructB`
#[no_mangle]
pub extern "C" fn bridgetest_struct_b_default() -> *mut StructBHandle {
    ffi_boundary!(std::ptr::null_mut(), {
        Ok(into_handle::<StructB, StructBHandle>(StructB::new()))
    })
}

/// Independent copy of a `StructB`, null if `this` is null
///
/// # Safety
/// `this` must be null or a live `StructB` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_b_clone(this: *const StructBHandle) -> *mut StructBHandle {
    ffi_boundary!(std::ptr::null_mut(), {
        let b = handle_ref::<StructB, _>(this, "this")?;
        Ok(into_handle::<StructB, StructBHandle>(b.clone()))
    })
}

/// Release a `StructB`; null is a no-op
///
/// # Safety
/// `this` must be null or a live `StructB` handle, unused afterwards
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_b_free(this: *mut StructBHandle) {
    ffi_boundary!((), {
        free_handle::<StructB, _>(this);
        Ok(())
    })
}

/// # Safety
/// `this` must be null or a live `StructB` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_b_get_i32_field(this: *const StructBHandle) -> i32 {
    ffi_boundary!(0, {
        Ok(handle_ref::<StructB, _>(this, "this")?.get_i32_field())
    })
}

/// # Safety
/// `this` must be null or a live `StructB` handle
#[no_mangle]
pub unsafe extern "C" fn bridgetest_struct_b_set_i32_field(this: *mut StructBHandle, value: i32) {
    ffi_boundary!((), {
        handle_mut::<StructB, _>(this, "this")?.set_i32_field(value);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_nested_struct_is_copied_out() {
        unsafe {
            let a = bridgetest_struct_a_default();
            let b = bridgetest_struct_a_get_struct_field(a);
            bridgetest_struct_b_set_i32_field(b, 43);

            let again = bridgetest_struct_a_get_struct_field(a);
            assert_eq!(bridgetest_struct_b_get_i32_field(again), 0);
            assert_eq!(bridgetest_struct_b_get_i32_field(b), 43);

            bridgetest_struct_a_set_struct_field(a, b);
            bridgetest_struct_b_set_i32_field(b, 45);
            let stored = bridgetest_struct_a_get_struct_field(a);
            assert_eq!(bridgetest_struct_b_get_i32_field(stored), 43);

            bridgetest_struct_b_free(stored);
            bridgetest_struct_b_free(again);
            bridgetest_struct_b_free(b);
            bridgetest_struct_a_free(a);
        }
    }

    #[test]
    fn test_invalid_slice_leaves_field_unchanged() {
        unsafe {
            let a = bridgetest_struct_a_default();
            bridgetest_struct_a_set_string_field(a, FfiSlice::borrowed("kept"));

            let bad = [0xC3u8, 0x28];
            bridgetest_struct_a_set_string_field(
                a,
                FfiSlice {
                    ptr: bad.as_ptr(),
                    len: bad.len(),
                },
            );

            let a_ref = handle_ref::<StructA, StructAHandle>(a, "a").unwrap();
            assert_eq!(a_ref.get_string_field(), "kept");

            bridgetest_struct_a_free(a);
            bridgetest_struct_a_free(ptr::null_mut());
        }
    }
}
