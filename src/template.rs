//! `{{ name }}` placeholder substitution
//!
//! A placeholder is two opening braces, optional whitespace, a name made of
//! anything except whitespace and braces, optional whitespace and two closing
//! braces. A backslash before a single brace (`\{` or `\}`) renders that brace
//! literally, so `\{\{ name \}\}` is output as `{{ name }}` untouched.

use crate::errors::WireError;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\{|\\\}|\{\{\s*([^\s{}]+)\s*\}\}").expect("Invalid regex")
});

/// Substitute every placeholder in `template` with `lookup(name)`
pub fn render<F>(template: &str, mut lookup: F) -> Result<String, WireError>
where
    F: FnMut(&str) -> Result<String, WireError>,
{
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for caps in TOKEN.captures_iter(template) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        output.push_str(&template[last..whole.start]);
        match token(&caps) {
            Token::Brace(brace) => output.push(brace),
            Token::Placeholder(name) => output.push_str(&lookup(name)?),
        }
        last = whole.end;
    }

    output.push_str(&template[last..]);
    log::trace!("Rendered template '{}' as '{}'", template, output);
    Ok(output)
}

/// Names referenced by `template`, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    TOKEN
        .captures_iter(template)
        .filter_map(|caps| match token(&caps) {
            Token::Placeholder(name) => Some(name.to_string()),
            Token::Brace(_) => None,
        })
        .collect()
}

pub fn has_placeholders(template: &str) -> bool {
    !placeholders(template).is_empty()
}

/// Text spliced into a template for a parameter value
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

enum Token<'t> {
    Brace(char),
    Placeholder(&'t str),
}

fn token<'t>(caps: &Captures<'t>) -> Token<'t> {
    match caps.get(1) {
        Some(name) => Token::Placeholder(name.as_str()),
        None if caps.get(0).is_some_and(|m| m.as_str() == r"\{") => Token::Brace('{'),
        None => Token::Brace('}'),
    }
}
