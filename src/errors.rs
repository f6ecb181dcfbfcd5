//! Error taxonomy shared by the parameter store and the container

use crate::arguments::ArgumentError;
use thiserror::Error;

/// Cause code carried by every [`WireError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownService,
    MalformedDefinition,
    MalformedArguments,
    MalformedCall,
    TypeResolution,
    MethodNotFound,
    ParameterNotFound,
    KeyNotFound,
    CyclicDependency,
    DepthExceeded,
    CyclicParameter,
    ArgumentBinding,
    TypeMismatch,
    MalformedDocument,
}

/// Errors raised while resolving parameters or building services.
///
/// Any of these aborts the in-progress `get` immediately; nothing built
/// during the failed resolution is cached.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("Service '{id}' is not defined")]
    UnknownService { id: String },

    #[error("Malformed definition for service '{id}': {reason}")]
    MalformedDefinition { id: String, reason: String },

    #[error("Malformed arguments for service '{id}': expected a list or a mapping, got {found}")]
    MalformedArguments { id: String, found: String },

    #[error("Malformed call in service '{id}': {reason}")]
    MalformedCall { id: String, reason: String },

    #[error("Cannot resolve type '{name}': {reason}")]
    TypeResolution { name: String, reason: String },

    #[error("Service '{id}' of type '{class}' has no method '{method}'")]
    MethodNotFound {
        id: String,
        class: String,
        method: String,
    },

    #[error("Parameter '{name}' referenced in '{template}' is not defined")]
    ParameterNotFound { name: String, template: String },

    #[error("Parameter '{name}' not found")]
    KeyNotFound { name: String },

    #[error("Circular service reference: {}", chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    #[error("Service nesting exceeds {limit} levels: {}", chain.join(" -> "))]
    DepthExceeded { limit: usize, chain: Vec<String> },

    #[error("Circular parameter reference: {}", chain.join(" -> "))]
    CyclicParameter { chain: Vec<String> },

    #[error("Service '{id}' rejected its arguments")]
    ArgumentBinding {
        id: String,
        #[source]
        source: ArgumentError,
    },

    #[error("Service '{id}' is not a {expected}")]
    TypeMismatch { id: String, expected: &'static str },

    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },
}

impl WireError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownService { .. } => ErrorKind::UnknownService,
            Self::MalformedDefinition { .. } => ErrorKind::MalformedDefinition,
            Self::MalformedArguments { .. } => ErrorKind::MalformedArguments,
            Self::MalformedCall { .. } => ErrorKind::MalformedCall,
            Self::TypeResolution { .. } => ErrorKind::TypeResolution,
            Self::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            Self::ParameterNotFound { .. } => ErrorKind::ParameterNotFound,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::CyclicDependency { .. } => ErrorKind::CyclicDependency,
            Self::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            Self::CyclicParameter { .. } => ErrorKind::CyclicParameter,
            Self::ArgumentBinding { .. } => ErrorKind::ArgumentBinding,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::MalformedDocument { .. } => ErrorKind::MalformedDocument,
        }
    }

    pub fn unknown_service(id: impl Into<String>) -> Self {
        Self::UnknownService { id: id.into() }
    }

    pub fn malformed_definition(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_call(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCall {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn type_resolution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeResolution {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_document(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }
}

/// Short description of a JSON value's shape for error messages
pub(crate) fn describe(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string '{s}'"),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "a mapping".to_string(),
    }
}
