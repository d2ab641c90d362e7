// Tests for report and surface formatting
//
// These run the real suite against the native backend and check the
// rendered text and documents.

use super::*;
use bridgetest_core::{run_suite, surface, Check, NativeBoundary, Tier, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Writer that keeps everything written to it
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, 0, Box::new(buffer.clone()));
    (writer, buffer)
}

fn failing_report() -> ConformanceReport {
    let mut report = run_suite(&NativeBoundary, Tier::Asserted);
    report.checks.push(Check {
        name: "fixed.return_primitive".to_string(),
        call: "function_return_primitive()".to_string(),
        expected: Value::Int32(42),
        actual: Value::Int32(0),
        passed: false,
    });
    report
}

#[test]
fn test_report_human() {
    let report = run_suite(&NativeBoundary, Tier::Asserted);
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.report(&report, false).unwrap();

    let text = buffer.contents();
    assert!(text.contains("Conformance: native (asserted)"));
    assert!(text.contains("✓ defaults.i32_field"));
    assert!(text.contains(&format!("✓ {}/{} checks passed", report.total(), report.total())));
    assert!(!text.contains('✗'));
}

#[test]
fn test_report_failures_only() {
    let report = failing_report();
    let text = format_report_human(&report, true);

    assert_eq!(text.matches('✓').count(), 0);
    assert!(text.contains("✗ fixed.return_primitive"));
    assert!(text.contains("expected Int32(42), got Int32(0)"));
}

#[test]
fn test_report_json_document() {
    let report = failing_report();
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.report(&report, false).unwrap();

    let text = buffer.contents();
    assert_eq!(text.lines().count(), 1);

    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["backend"], "native");
    assert_eq!(document["tier"], "asserted");
    assert_eq!(document["success"], false);
    assert_eq!(document["failed"], 1);
    assert_eq!(document["total"], report.total());
}

#[test]
fn test_surface_human_with_symbols() {
    let text = format_surface_human(&surface(), true);

    assert!(text.contains("combo_function(str1: String, str2: String, b: Bool) -> String"));
    assert!(text.contains("bridgetest_combo_function"));
    assert!(text.contains("bool_field: Bool [get]"));
    assert!(text.contains("bridgetest_struct_b_set_i32_field"));
    assert!(!text.contains("bridgetest_struct_a_set_bool_field"));
}

#[test]
fn test_surface_yaml_lists_symbols_on_request() {
    let without = OutputFormat::Yaml.format_surface(&surface(), false).unwrap();
    assert!(!without.contains("symbols:"));

    let with = OutputFormat::Yaml.format_surface(&surface(), true).unwrap();
    assert!(with.contains("symbols:"));
    assert!(with.contains("bridgetest_struct_a_default"));
}

#[test]
fn test_quiet_suppresses_messages_but_not_data() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("hidden").unwrap();
    output.success("hidden").unwrap();
    output.section("hidden").unwrap();
    output.warning("shown").unwrap();
    output.data(&json!({"k": 1})).unwrap();

    let text = buffer.contents();
    assert!(!text.contains("hidden"));
    assert!(text.contains("WARNING: shown"));
    assert!(text.contains("\"k\": 1"));
}

#[test]
fn test_machine_formats_skip_messages() {
    let (mut output, buffer) = writer(OutputFormat::JsonPretty, false);
    output.info("note").unwrap();
    output.warning("careful").unwrap();
    output.data(&json!({"k": 1})).unwrap();

    assert_eq!(buffer.contents(), "{\n  \"k\": 1\n}\n");
}
