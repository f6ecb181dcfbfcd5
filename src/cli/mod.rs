//! Command implementations for the `graphwire` binary
//!
//! Each command writes its report to the given writer so it can be exercised
//! without a terminal.

use crate::definition::{Shape, classify};
use crate::document::Document;
use crate::lint::{self, LintResult};
use crate::template;
use std::io::Write;

/// Lint a document and print every issue; returns the result for exit-code decisions
pub fn run_check(document: &Document, out: &mut impl Write) -> anyhow::Result<LintResult> {
    let result = lint::lint(document);

    for issue in &result.issues {
        writeln!(
            out,
            "{}[{}] {}: {}",
            issue.level, issue.category, issue.subject, issue.message
        )?;
    }
    writeln!(
        out,
        "{} services, {} parameters: {} errors, {} warnings, {} info",
        document.services.len(),
        document.parameters.len(),
        result.error_count,
        result.warning_count,
        result.info_count
    )?;

    Ok(result)
}

/// Print resolved parameters, or a single one when `name` is given
pub fn run_params(
    document: &Document,
    name: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let parameters = document.parameters();

    match name {
        Some(name) => {
            let value = parameters.get(name)?;
            writeln!(out, "{}", template::to_text(&value))?;
        }
        None => {
            for key in parameters.keys() {
                let value = parameters.get(&key)?;
                writeln!(out, "{} = {}", key, value)?;
            }
        }
    }

    Ok(())
}

/// List service ids with the shape of their definitions
pub fn run_services(document: &Document, out: &mut impl Write) -> anyhow::Result<()> {
    for (id, value) in &document.services {
        let description = match classify(id, value) {
            Ok(Shape::Alias(target)) => format!("alias of '{target}'"),
            Ok(Shape::Class(definition)) => match definition.calls.len() {
                0 => format!("class {}", definition.class),
                calls => format!("class {} ({} calls)", definition.class, calls),
            },
            Ok(Shape::Literal(literal)) => format!("value {literal}"),
            Err(error) => format!("malformed: {error}"),
        };
        writeln!(out, "{id}: {description}")?;
    }
    Ok(())
}
