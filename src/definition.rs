//! Service definitions and their shapes
//!
//! A declared definition is kept as raw data until the service is first
//! requested, then classified:
//!
//! - `"@other"` is an alias sharing `other`'s instance
//! - `{"class": ..., "arguments"?: ..., "calls"?: ...}` is built through the registry
//! - any other value (number, boolean, plain string, list, null) is used as-is

use crate::arguments::Instance;
use crate::errors::{WireError, describe};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Prefix marking a service reference
pub const SERVICE_PREFIX: char = '@';

/// Marks a literal `@...` string; one `@` is consumed
pub const ESCAPED_PREFIX: &str = "@@";

#[derive(Clone)]
pub enum Definition {
    /// A pre-built value used as-is
    Instance(Instance),
    /// Raw definition data, classified on first `get`
    Declared(Value),
}

impl Definition {
    pub fn instance<T>(value: T) -> Self
    where
        T: std::any::Any + Send + Sync,
    {
        Definition::Instance(Arc::new(value))
    }

    pub fn declared(value: Value) -> Self {
        Definition::Declared(value)
    }
}

impl From<Value> for Definition {
    fn from(value: Value) -> Self {
        Definition::Declared(value)
    }
}

impl std::fmt::Debug for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Definition::Instance(_) => f.write_str("Instance(..)"),
            Definition::Declared(value) => f.debug_tuple("Declared").field(value).finish(),
        }
    }
}

/// Classified form of a declared definition
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'d> {
    Alias(&'d str),
    Class(ClassDefinition<'d>),
    Literal(&'d Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinition<'d> {
    pub class: &'d str,
    /// `None` when absent or null
    pub arguments: Option<&'d Value>,
    pub calls: Vec<Call<'d>>,
}

/// A post-construction method call
#[derive(Debug, Clone, PartialEq)]
pub struct Call<'d> {
    pub method: &'d str,
    pub arguments: Option<&'d Value>,
}

/// The referenced id when `text` is `@id` (and not the escaped `@@...` form)
pub fn service_reference(text: &str) -> Option<&str> {
    if text.starts_with(ESCAPED_PREFIX) {
        return None;
    }
    text.strip_prefix(SERVICE_PREFIX)
}

/// Whether `value` is an acceptable argument block
pub fn is_argument_block(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Classify a declared definition, validating its structure
pub fn classify<'d>(id: &str, value: &'d Value) -> Result<Shape<'d>, WireError> {
    match value {
        Value::String(text) => match service_reference(text) {
            Some(target) if target.is_empty() => Err(WireError::malformed_definition(
                id,
                "alias must name a service after '@'",
            )),
            Some(target) => Ok(Shape::Alias(target)),
            None => Ok(Shape::Literal(value)),
        },
        Value::Object(map) => parse_class(id, map).map(Shape::Class),
        _ => Ok(Shape::Literal(value)),
    }
}

fn parse_class<'d>(id: &str, map: &'d Map<String, Value>) -> Result<ClassDefinition<'d>, WireError> {
    let class = match map.get("class") {
        Some(Value::String(class)) => class.as_str(),
        Some(other) => {
            return Err(WireError::malformed_definition(
                id,
                format!("'class' must be a string, got {}", describe(other)),
            ));
        }
        None => {
            return Err(WireError::malformed_definition(
                id,
                "a mapping definition requires a 'class' key",
            ));
        }
    };

    let arguments = match map.get("arguments") {
        None | Some(Value::Null) => None,
        Some(block) if is_argument_block(block) => Some(block),
        Some(other) => {
            return Err(WireError::MalformedArguments {
                id: id.to_string(),
                found: describe(other),
            });
        }
    };

    let calls = match map.get("calls") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| parse_call(id, entry))
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(WireError::malformed_call(
                id,
                format!("'calls' must be a list, got {}", describe(other)),
            ));
        }
    };

    Ok(ClassDefinition {
        class,
        arguments,
        calls,
    })
}

/// Parse `"method"` or `["method", arguments]`
pub fn parse_call<'d>(id: &str, entry: &'d Value) -> Result<Call<'d>, WireError> {
    match entry {
        Value::String(method) => Ok(Call {
            method,
            arguments: None,
        }),
        Value::Array(pair) => match pair.as_slice() {
            [Value::String(method)] => Ok(Call {
                method,
                arguments: None,
            }),
            [Value::String(method), arguments] if is_argument_block(arguments) => Ok(Call {
                method,
                arguments: Some(arguments),
            }),
            [Value::String(method), other] => Err(WireError::malformed_call(
                id,
                format!(
                    "arguments of '{method}' must be a list or a mapping, got {}",
                    describe(other)
                ),
            )),
            _ => Err(WireError::malformed_call(
                id,
                "a call must be a method name or a [name, arguments] pair",
            )),
        },
        other => Err(WireError::malformed_call(
            id,
            format!(
                "a call must be a method name or a [name, arguments] pair, got {}",
                describe(other)
            ),
        )),
    }
}
