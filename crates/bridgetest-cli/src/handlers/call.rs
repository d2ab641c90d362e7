//! Call command handler

use crate::cli::{Backend, CallArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use bridgetest_core::surface::{self, FunctionSignature};
use bridgetest_core::{invoke, NativeBoundary, Value, ValueKind};
use bridgetest_ffi::FfiBoundary;
use serde_json::json;
use tracing::{debug, instrument};

/// Handle the call command
#[instrument(skip(config, output))]
pub fn handle_call(args: CallArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let backend = args.backend.unwrap_or(config.suite.backend);
    let signature = surface::function(&args.function).ok_or_else(|| {
        bridgetest_core::Error::UnknownFunction {
            name: args.function.clone(),
        }
    })?;

    let values = parse_args(signature, &args.args)?;
    debug!(function = signature.name, ?backend, "Calling surface function");

    let result = call_with_backend(backend, signature.name, &values)?;

    let rendered_args: Vec<String> = values.iter().map(ToString::to_string).collect();
    output.info(&format!(
        "{}({}) via {:?}",
        signature.name,
        rendered_args.join(", "),
        backend
    ))?;

    output.data(&json!({
        "function": signature.name,
        "backend": backend,
        "args": values.iter().map(Value::to_json).collect::<Vec<_>>(),
        "returns": signature.returns,
        "result": result.to_json(),
    }))
}

/// Dispatch one call through `backend`
pub fn call_with_backend(backend: Backend, name: &str, args: &[Value]) -> Result<Value> {
    let value = match backend {
        Backend::Native => invoke(&NativeBoundary, name, args)?,
        Backend::Ffi => invoke(&FfiBoundary, name, args)?,
    };
    Ok(value)
}

/// Convert command-line literals into typed arguments
///
/// Each literal is parsed as JSON. A literal that is not valid JSON is
/// taken verbatim when the parameter is a string, so `hello` and
/// `'"hello"'` are equivalent.
pub fn parse_args(signature: &FunctionSignature, raw: &[String]) -> Result<Vec<Value>> {
    if raw.len() != signature.arity() {
        return Err(bridgetest_core::Error::ArityMismatch {
            function: signature.name.to_string(),
            expected: signature.arity(),
            found: raw.len(),
        }
        .into());
    }

    signature
        .params
        .iter()
        .zip(raw)
        .map(|(param, literal)| {
            let json = match serde_json::from_str::<serde_json::Value>(literal) {
                Ok(json) => json,
                Err(_) if param.kind == ValueKind::String => serde_json::Value::String(literal.clone()),
                Err(e) => {
                    return Err(Error::invalid_args(format!(
                        "argument '{}' is not a JSON literal: {}",
                        param.name, e
                    )))
                }
            };
            Ok(Value::from_json(param.kind, &json)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn combo() -> &'static FunctionSignature {
        surface::function("combo_function").unwrap()
    }

    #[test]
    fn test_parse_json_and_bare_strings() {
        let raw = vec!["\"left\"".to_string(), "right".to_string(), "true".to_string()];
        let values = parse_args(combo(), &raw).unwrap();
        assert_eq!(
            values,
            vec![Value::from("left"), Value::from("right"), Value::Bool(true)]
        );
    }

    #[test]
    fn test_parse_rejects_wrong_arity_and_kind() {
        let err = parse_args(combo(), &["\"only\"".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(bridgetest_core::Error::ArityMismatch { expected: 3, found: 1, .. })
        ));

        let primitive = surface::function("function_with_primitive_args").unwrap();
        let err = parse_args(primitive, &["1".to_string(), "yes".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));

        let err = parse_args(primitive, &["\"1\"".to_string(), "true".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(bridgetest_core::Error::TypeMismatch { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_call_through_both_backends() {
        let args = [Value::from("a"), Value::from("b"), Value::Bool(false)];
        for backend in [Backend::Native, Backend::Ffi] {
            assert_eq!(
                call_with_backend(backend, "combo_function", &args).unwrap(),
                Value::from("b")
            );
            assert_eq!(
                call_with_backend(backend, "simple_function", &[]).unwrap(),
                Value::Unit
            );
        }
    }
}
