//! Resolved argument values handed to factories and methods
//!
//! By the time a factory sees its [`Arguments`], every `@service` reference
//! has been replaced by the constructed instance and every template string
//! has been rendered. The shape chosen in the definition is preserved:
//! a list yields [`Arguments::Positional`], a mapping [`Arguments::Named`].

use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// A constructed service, shared by every id that resolves to it
pub type Instance = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("Missing argument '{name}' (position {position})")]
    Missing { position: usize, name: String },

    #[error("Argument '{name}' has the wrong type: expected {expected}")]
    WrongType { name: String, expected: String },

    #[error("Argument '{name}' could not be parsed: {reason}")]
    Unparsable { name: String, reason: String },
}

/// A single resolved value
#[derive(Clone)]
pub enum Argument {
    Value(Value),
    Service(Instance),
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Argument::Service(_) => f.write_str("Service(..)"),
        }
    }
}

impl Argument {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Argument::Value(value) => Some(value),
            Argument::Service(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_service(&self) -> Option<&Instance> {
        match self {
            Argument::Service(instance) => Some(instance),
            Argument::Value(_) => None,
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

#[derive(Debug, Clone)]
pub enum Arguments {
    Positional(Vec<Argument>),
    Named(BTreeMap<String, Argument>),
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments::Positional(Vec::new())
    }
}

impl Arguments {
    pub fn len(&self) -> usize {
        match self {
            Arguments::Positional(list) => list.len(),
            Arguments::Named(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Arguments::Named(_))
    }

    /// Bind a parameter by position for lists and by name for mappings
    pub fn lookup(&self, position: usize, name: &str) -> Option<&Argument> {
        match self {
            Arguments::Positional(list) => list.get(position),
            Arguments::Named(map) => map.get(name),
        }
    }

    pub fn get(&self, position: usize, name: &str) -> Result<&Argument, ArgumentError> {
        self.lookup(position, name).ok_or_else(|| ArgumentError::Missing {
            position,
            name: name.to_string(),
        })
    }

    pub fn value(&self, position: usize, name: &str) -> Result<&Value, ArgumentError> {
        self.get(position, name)?
            .as_value()
            .ok_or_else(|| wrong_type(name, "a plain value"))
    }

    pub fn string(&self, position: usize, name: &str) -> Result<String, ArgumentError> {
        self.value(position, name)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| wrong_type(name, "a string"))
    }

    pub fn optional_string(
        &self,
        position: usize,
        name: &str,
    ) -> Result<Option<String>, ArgumentError> {
        match self.lookup(position, name) {
            None => Ok(None),
            Some(_) => self.string(position, name).map(Some),
        }
    }

    /// Parse a scalar argument; strings produced by templates are parsed as text
    pub fn parse<T>(&self, position: usize, name: &str) -> Result<T, ArgumentError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let text = crate::template::to_text(self.value(position, name)?);
        text.parse::<T>().map_err(|e| ArgumentError::Unparsable {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Downcast a service argument to its concrete type
    pub fn service<T>(&self, position: usize, name: &str) -> Result<Arc<T>, ArgumentError>
    where
        T: Any + Send + Sync,
    {
        let instance = self
            .get(position, name)?
            .as_service()
            .ok_or_else(|| wrong_type(name, "a service reference"))?;
        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| wrong_type(name, std::any::type_name::<T>()))
    }
}

fn wrong_type(name: &str, expected: &str) -> ArgumentError {
    ArgumentError::WrongType {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}
