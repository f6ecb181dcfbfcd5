//! Parameter store
//!
//! Named configuration values. String values may reference other parameters
//! with `{{ name }}` placeholders; [`Parameters::get`] resolves them against
//! the store itself, transitively, and fails on circular references.

use crate::errors::{WireError, describe};
use crate::template;
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON object
    pub fn from_value(value: Value) -> Result<Self, WireError> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(WireError::malformed_document(format!(
                "parameters must be a mapping, got {}",
                describe(&other)
            ))),
        }
    }

    /// Get a parameter with its placeholders resolved
    pub fn get(&self, name: &str) -> Result<Value, WireError> {
        let mut chain = Vec::new();
        self.resolve(name, &mut chain)
    }

    /// Like [`get`](Self::get), but returns `default` untouched when `name` is absent
    pub fn get_or(&self, name: &str, default: Value) -> Result<Value, WireError> {
        if self.has(name) {
            self.get(name)
        } else {
            Ok(default)
        }
    }

    /// Substitute placeholders in an arbitrary string against this store
    pub fn render(&self, text: &str) -> Result<String, WireError> {
        let mut chain = Vec::new();
        self.render_in(text, &mut chain)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Snapshot of every raw, unsubstituted value
    pub fn all(&self) -> BTreeMap<String, Value> {
        self.values.clone()
    }

    /// Upsert every entry; later keys overwrite existing ones
    pub fn add<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in entries {
            self.set(name, value);
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Raw value without substitution
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn resolve(&self, name: &str, chain: &mut Vec<String>) -> Result<Value, WireError> {
        let raw = self.values.get(name).ok_or_else(|| WireError::KeyNotFound {
            name: name.to_string(),
        })?;

        let Value::String(text) = raw else {
            return Ok(raw.clone());
        };

        if chain.iter().any(|seen| seen == name) {
            let mut cycle = chain.clone();
            cycle.push(name.to_string());
            return Err(WireError::CyclicParameter { chain: cycle });
        }

        chain.push(name.to_string());
        let rendered = self.render_in(text, chain);
        chain.pop();

        rendered.map(Value::String)
    }

    fn render_in(&self, text: &str, chain: &mut Vec<String>) -> Result<String, WireError> {
        template::render(text, |reference| {
            if !self.has(reference) {
                return Err(WireError::ParameterNotFound {
                    name: reference.to_string(),
                    template: text.to_string(),
                });
            }
            self.resolve(reference, chain)
                .map(|value| template::to_text(&value))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Self::new();
        parameters.add(iter);
        parameters
    }
}
