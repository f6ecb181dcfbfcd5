//! Individual lint checks and the definition walking they share

use crate::definition::{ClassDefinition, ESCAPED_PREFIX, Shape, classify, service_reference};
use crate::document::Document;
use crate::template;
use serde_json::Value;

pub mod cycles;
pub mod references;
pub mod shape;

/// A service whose definition classified cleanly
pub(crate) struct ServiceShape<'d> {
    pub id: &'d str,
    pub shape: Shape<'d>,
}

/// Services that classify without error; malformed ones are the shape check's concern
pub(crate) fn well_formed(document: &Document) -> Vec<ServiceShape<'_>> {
    document
        .services
        .iter()
        .filter_map(|(id, value)| {
            classify(id, value)
                .ok()
                .map(|shape| ServiceShape { id, shape })
        })
        .collect()
}

/// Top-level argument strings of a class definition, constructor and calls alike
pub(crate) fn argument_strings<'d>(definition: &ClassDefinition<'d>) -> Vec<&'d str> {
    std::iter::once(definition.arguments)
        .chain(definition.calls.iter().map(|call| call.arguments))
        .flatten()
        .flat_map(block_strings)
        .collect()
}

fn block_strings(block: &Value) -> Vec<&str> {
    match block {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::Object(map) => map.values().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// Services a definition depends on
pub(crate) fn service_dependencies<'d>(shape: &Shape<'d>) -> Vec<&'d str> {
    match shape {
        Shape::Alias(target) => vec![*target],
        Shape::Class(definition) => argument_strings(definition)
            .into_iter()
            .filter_map(service_reference)
            .collect(),
        Shape::Literal(_) => Vec::new(),
    }
}

/// Parameters a definition's arguments render
pub(crate) fn parameter_dependencies(shape: &Shape<'_>) -> Vec<String> {
    match shape {
        Shape::Class(definition) => argument_strings(definition)
            .into_iter()
            .flat_map(string_parameters)
            .collect(),
        _ => Vec::new(),
    }
}

/// Placeholders an argument string renders; `@id` references render none
fn string_parameters(text: &str) -> Vec<String> {
    if let Some(rest) = text.strip_prefix(ESCAPED_PREFIX) {
        return template::placeholders(rest);
    }
    if service_reference(text).is_some() {
        return Vec::new();
    }
    template::placeholders(text)
}
