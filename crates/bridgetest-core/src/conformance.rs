//! Conformance suite for the boundary contract
//!
//! [`run_suite`] drives any [`Boundary`] through the default-value,
//! round-trip, copy-out, fixed-result and selector properties of the
//! contract and records each observation as a [`Check`].
//!
//! There is a single suite with two tiers. [`Tier::Asserted`] treats a
//! mismatch as a failure; [`Tier::Smoke`] makes the same calls, records what
//! was observed and only warns.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::boundary::{Boundary, InnerAccess, OuterAccess};
use crate::error::{Error, Result};
use crate::functions::{RETURN_PRIMITIVE, RETURN_STRING};
use crate::value::Value;

/// How mismatches are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Every mismatch fails the run
    #[default]
    Asserted,
    /// Mismatches are reported as warnings
    Smoke,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Asserted => write!(f, "asserted"),
            Tier::Smoke => write!(f, "smoke"),
        }
    }
}

/// One observed call and its expected result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    /// Property group and case, e.g. `copy_out.original_unchanged`
    pub name: String,
    /// The call that produced `actual`
    pub call: String,
    pub expected: Value,
    pub actual: Value,
    pub passed: bool,
}

impl Check {
    /// Human-readable mismatch description, `None` if the check passed
    pub fn failure_message(&self) -> Option<String> {
        (!self.passed).then(|| {
            format!(
                "{}: {} expected {}, got {}",
                self.name, self.call, self.expected, self.actual
            )
        })
    }
}

/// Outcome of a suite run
#[derive(Debug, Clone, Serialize)]
pub struct ConformanceReport {
    pub backend: String,
    pub tier: Tier,
    pub checks: Vec<Check>,
}

impl ConformanceReport {
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Checks that did not hold
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Whether the run counts as successful for its tier
    pub fn is_success(&self) -> bool {
        self.tier == Tier::Smoke || self.failed() == 0
    }

    /// Turn an unsuccessful asserted run into an error
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Conformance {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }
}

struct Recorder {
    report: ConformanceReport,
}

impl Recorder {
    fn new(backend: &str, tier: Tier) -> Self {
        Self {
            report: ConformanceReport {
                backend: backend.to_string(),
                tier,
                checks: Vec::new(),
            },
        }
    }

    fn check(&mut self, name: impl Into<String>, call: impl Into<String>, expected: impl Into<Value>, actual: impl Into<Value>) {
        let expected = expected.into();
        let actual = actual.into();
        let check = Check {
            name: name.into(),
            call: call.into(),
            passed: expected == actual,
            expected,
            actual,
        };

        match check.failure_message() {
            None => debug!(check = %check.name, call = %check.call, "Check passed"),
            Some(message) if self.report.tier == Tier::Smoke => warn!(%message, "Smoke check mismatch"),
            Some(message) => warn!(%message, "Check failed"),
        }

        self.report.checks.push(check);
    }

    fn finish(self) -> ConformanceReport {
        self.report
    }
}

/// Integers exercised by the round-trip checks
const I32_SAMPLES: &[i32] = &[42, 0, -1, i32::MIN, i32::MAX];

/// Strings exercised by the round-trip checks, in call order
const STRING_SAMPLES: &[&str] = &["Hello, World!", "Hello, Rust!", "", "Grüße, 世界 🌍"];

/// Argument pairs for the selector checks
const COMBO_SAMPLES: &[(&str, &str)] = &[
    ("Combo function!", "Don't print me"),
    ("", ""),
    ("same", "same"),
    ("", "non-empty"),
    ("ünïcode", "ascii"),
];

/// Run the whole suite against `boundary`
pub fn run_suite<B: Boundary>(boundary: &B, tier: Tier) -> ConformanceReport {
    info!(backend = boundary.name(), %tier, "Running conformance suite");

    let mut rec = Recorder::new(boundary.name(), tier);
    check_defaults(boundary, &mut rec);
    check_i32_round_trip(boundary, &mut rec);
    check_string_round_trip(boundary, &mut rec);
    check_struct_copy_out(boundary, &mut rec);
    check_void_functions(boundary, &mut rec);
    check_fixed_returns(boundary, &mut rec);
    check_combo(boundary, &mut rec);

    let report = rec.finish();
    info!(
        backend = boundary.name(),
        total = report.total(),
        failed = report.failed(),
        "Conformance suite finished"
    );
    report
}

fn check_defaults<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    let a = boundary.new_outer();
    rec.check("defaults.i32_field", "StructA.get_i32_field()", 0, a.get_i32_field());
    rec.check("defaults.bool_field", "StructA.get_bool_field()", false, a.get_bool_field());
    rec.check("defaults.string_field", "StructA.get_string_field()", "", a.get_string_field());
    rec.check(
        "defaults.struct_field",
        "StructA.get_struct_field().get_i32_field()",
        0,
        a.get_struct_field().get_i32_field(),
    );
    rec.check(
        "defaults.struct_b",
        "StructB.get_i32_field()",
        0,
        boundary.new_inner().get_i32_field(),
    );
}

fn check_i32_round_trip<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    let mut a = boundary.new_outer();
    for &v in I32_SAMPLES {
        a.set_i32_field(v);
        let call = format!("StructA.set_i32_field({}); StructA.get_i32_field()", v);
        rec.check(format!("i32_round_trip.{}", v), call.clone(), v, a.get_i32_field());
        rec.check(format!("i32_round_trip.{}.repeat", v), call, v, a.get_i32_field());
    }

    let mut b = boundary.new_inner();
    b.set_i32_field(-42);
    rec.check(
        "i32_round_trip.struct_b",
        "StructB.set_i32_field(-42); StructB.get_i32_field()",
        -42,
        b.get_i32_field(),
    );
}

fn check_string_round_trip<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    let mut a = boundary.new_outer();
    for (i, &s) in STRING_SAMPLES.iter().enumerate() {
        a.set_string_field(s);
        rec.check(
            format!("string_round_trip.{}", i),
            format!("StructA.set_string_field({:?}); StructA.get_string_field()", s),
            s,
            a.get_string_field(),
        );
    }

    let owned = String::from("Hello, C++!");
    a.set_string_field(&owned);
    rec.check(
        "string_round_trip.from_variable",
        "StructA.set_string_field(&owned); StructA.get_string_field()",
        "Hello, C++!",
        a.get_string_field(),
    );
    rec.check(
        "string_round_trip.caller_keeps_variable",
        "owned after StructA.set_string_field(&owned)",
        "Hello, C++!",
        owned,
    );
}

fn check_struct_copy_out<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    let mut a = boundary.new_outer();
    a.set_i32_field(42);

    let mut copy = a.get_struct_field();
    copy.set_i32_field(43);
    rec.check(
        "copy_out.copy_mutated",
        "copy.set_i32_field(43); copy.get_i32_field()",
        43,
        copy.get_i32_field(),
    );
    rec.check(
        "copy_out.original_unchanged",
        "StructA.get_struct_field().get_i32_field()",
        0,
        a.get_struct_field().get_i32_field(),
    );

    let mut other = boundary.new_inner();
    other.set_i32_field(44);
    a.set_struct_field(&other);
    rec.check(
        "copy_out.after_set",
        "StructA.set_struct_field(b44); StructA.get_struct_field().get_i32_field()",
        44,
        a.get_struct_field().get_i32_field(),
    );

    other.set_i32_field(45);
    rec.check(
        "copy_out.setter_copied",
        "b44.set_i32_field(45); StructA.get_struct_field().get_i32_field()",
        44,
        a.get_struct_field().get_i32_field(),
    );
    rec.check(
        "copy_out.caller_keeps_argument",
        "b44.get_i32_field()",
        45,
        other.get_i32_field(),
    );
    rec.check(
        "copy_out.siblings_untouched",
        "StructA.get_i32_field()",
        42,
        a.get_i32_field(),
    );
}

fn check_void_functions<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    boundary.simple_function();
    rec.check("void.simple_function", "simple_function()", Value::Unit, Value::Unit);

    boundary.function_with_primitive_args(3, true);
    rec.check(
        "void.function_with_primitive_args",
        "function_with_primitive_args(3, true)",
        Value::Unit,
        Value::Unit,
    );

    boundary.function_with_string_arg("Hello, World!");
    rec.check(
        "void.function_with_string_arg",
        "function_with_string_arg(\"Hello, World!\")",
        Value::Unit,
        Value::Unit,
    );

    boundary.function_with_primitive_and_string_arg(42, false, "Complex function!");
    rec.check(
        "void.function_with_primitive_and_string_arg",
        "function_with_primitive_and_string_arg(42, false, \"Complex function!\")",
        Value::Unit,
        Value::Unit,
    );
}

fn check_fixed_returns<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    rec.check(
        "returns.primitive",
        "function_return_primitive()",
        RETURN_PRIMITIVE,
        boundary.function_return_primitive(),
    );
    rec.check(
        "returns.string",
        "function_return_string()",
        RETURN_STRING,
        boundary.function_return_string(),
    );
}

fn check_combo<B: Boundary>(boundary: &B, rec: &mut Recorder) {
    for (i, &(s1, s2)) in COMBO_SAMPLES.iter().enumerate() {
        for b in [true, false] {
            let expected = if b { s1 } else { s2 };
            rec.check(
                format!("combo.{}.{}", i, b),
                format!("combo_function({:?}, {:?}, {})", s1, s2, b),
                expected,
                boundary.combo_function(s1, s2, b),
            );
        }
    }
}
