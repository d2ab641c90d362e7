//! Property-based agreement between the C ABI and the native surface
//!
//! Strings are drawn from the full `String` space, so interior NULs and
//! multi-byte characters cross the boundary alongside plain ASCII.

use bridgetest_core::{invoke, Boundary, NativeBoundary, OuterAccess, Value};
use bridgetest_ffi::{bridgetest_last_error_code, BridgeResult, FfiBoundary};
use proptest::prelude::*;

proptest! {
    /// Property: the ABI selects exactly the string the native surface does
    #[test]
    fn prop_combo_matches_native(s1 in any::<String>(), s2 in any::<String>(), b in any::<bool>()) {
        prop_assert_eq!(
            FfiBoundary.combo_function(&s1, &s2, b),
            NativeBoundary.combo_function(&s1, &s2, b)
        );
    }

    /// Property: `invoke` through the ABI agrees with `invoke` on the native surface
    #[test]
    fn prop_invoke_matches_native(s1 in any::<String>(), s2 in any::<String>(), b in any::<bool>()) {
        let args = [Value::from(s1.as_str()), Value::from(s2.as_str()), Value::from(b)];
        let through_abi = invoke(&FfiBoundary, "combo_function", &args).unwrap();
        let native = invoke(&NativeBoundary, "combo_function", &args).unwrap();
        prop_assert_eq!(through_abi, native);
    }

    /// Property: a string field set through the ABI reads back byte for byte
    #[test]
    fn prop_string_field_round_trip(s in any::<String>()) {
        let mut a = FfiBoundary.new_outer();
        a.set_string_field(&s);
        prop_assert_eq!(a.get_string_field(), s);
    }

    /// Property: void string calls accept every string without recording an error
    #[test]
    fn prop_string_args_accepted(i in any::<i32>(), b in any::<bool>(), s in any::<String>()) {
        FfiBoundary.function_with_string_arg(&s);
        FfiBoundary.function_with_primitive_and_string_arg(i, b, &s);
        prop_assert_eq!(bridgetest_last_error_code(), BridgeResult::Success);
    }
}
