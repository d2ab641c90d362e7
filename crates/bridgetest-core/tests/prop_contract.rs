//! Property-based tests for the accessor, selector and marshaling laws
//!
//! These hold for every input, not just the literals the conformance
//! suite uses.

use bridgetest_core::functions::combo_function;
use bridgetest_core::{invoke, Marshal, NativeBoundary, StructA, StructB, Value};
use proptest::prelude::*;

/// Strategy for arbitrary `StructB` values
fn struct_b_strategy() -> impl Strategy<Value = StructB> {
    any::<i32>().prop_map(|v| {
        let mut b = StructB::new();
        b.set_i32_field(v);
        b
    })
}

/// Strategy for arbitrary `StructA` values reachable through the accessors
fn struct_a_strategy() -> impl Strategy<Value = StructA> {
    (any::<i32>(), any::<String>(), struct_b_strategy()).prop_map(|(i, s, b)| {
        let mut a = StructA::new();
        a.set_i32_field(i);
        a.set_string_field(&s);
        a.set_struct_field(&b);
        a
    })
}

proptest! {
    /// Property: set then get returns the value, any number of times
    #[test]
    fn prop_i32_round_trip(v in any::<i32>(), reads in 1usize..5) {
        let mut a = StructA::new();
        a.set_i32_field(v);
        for _ in 0..reads {
            prop_assert_eq!(a.get_i32_field(), v);
        }
    }

    /// Property: any UTF-8 string survives the string accessor pair
    #[test]
    fn prop_string_round_trip(s in any::<String>()) {
        let mut a = StructA::new();
        a.set_string_field(&s);
        prop_assert_eq!(a.get_string_field(), s);
    }

    /// Property: mutating a copy of struct_field never reaches the original
    #[test]
    fn prop_struct_field_copy_out(initial in any::<i32>(), mutated in any::<i32>()) {
        let mut a = StructA::new();
        let mut b = StructB::new();
        b.set_i32_field(initial);
        a.set_struct_field(&b);

        let mut copy = a.get_struct_field();
        copy.set_i32_field(mutated);

        prop_assert_eq!(copy.get_i32_field(), mutated);
        prop_assert_eq!(a.get_struct_field().get_i32_field(), initial);
    }

    /// Property: the selector returns exactly one of its inputs
    #[test]
    fn prop_combo_selects(s1 in any::<String>(), s2 in any::<String>()) {
        prop_assert_eq!(combo_function(&s1, &s2, true), s1.clone());
        prop_assert_eq!(combo_function(&s1, &s2, false), s2.clone());
        prop_assert_eq!(combo_function(&s1, &s1, false), s1);
    }

    /// Property: dynamic dispatch agrees with the direct call
    #[test]
    fn prop_invoke_matches_direct_call(s1 in ".*", s2 in ".*", b in any::<bool>()) {
        let args = [Value::from(s1.as_str()), Value::from(s2.as_str()), Value::from(b)];
        let via_invoke = invoke(&NativeBoundary, "combo_function", &args).unwrap();
        prop_assert_eq!(via_invoke, Value::String(combo_function(&s1, &s2, b)));
    }

    /// Property: marshaling is lossless for every marshalable type
    #[test]
    fn prop_marshal_lossless(
        i in any::<i32>(),
        flag in any::<bool>(),
        s in any::<String>(),
        a in struct_a_strategy(),
    ) {
        prop_assert_eq!(i32::from_value(i.to_value()).unwrap(), i);
        prop_assert_eq!(bool::from_value(flag.to_value()).unwrap(), flag);
        prop_assert_eq!(String::from_value(s.to_value()).unwrap(), s);

        let b = a.get_struct_field();
        prop_assert_eq!(StructB::from_value(b.to_value()).unwrap(), b);
        prop_assert_eq!(StructA::from_value(a.to_value()).unwrap(), a);
    }
}
