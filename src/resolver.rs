//! Argument resolution
//!
//! Turns raw argument data into [`Arguments`]. Strings are interpreted in
//! this order:
//!
//! 1. `@@text` is the literal `@text`, with `text` still rendered as a template
//! 2. `@id` is the service `id`, built on demand through the locator
//! 3. anything else is rendered against the parameters (`{{ name }}`,
//!    `\{` / `\}` escapes); strings without placeholders come out unchanged
//!
//! Non-string values are passed through untouched.

use crate::arguments::{Argument, Arguments, Instance};
use crate::definition::{ESCAPED_PREFIX, SERVICE_PREFIX, service_reference};
use crate::errors::{WireError, describe};
use crate::parameters::Parameters;
use serde_json::Value;

/// What argument resolution needs from its surroundings
pub trait ServiceLocator {
    fn parameters(&self) -> &Parameters;

    /// Fetch (building if needed) the service `id`
    fn locate(&mut self, id: &str) -> Result<Instance, WireError>;
}

/// Resolve a single raw value
pub fn resolve_value<L>(raw: &Value, locator: &mut L) -> Result<Argument, WireError>
where
    L: ServiceLocator + ?Sized,
{
    let Value::String(text) = raw else {
        return Ok(Argument::Value(raw.clone()));
    };

    if let Some(rest) = text.strip_prefix(ESCAPED_PREFIX) {
        let rendered = locator.parameters().render(rest)?;
        return Ok(Argument::Value(Value::String(format!(
            "{SERVICE_PREFIX}{rendered}"
        ))));
    }

    if let Some(id) = service_reference(text) {
        log::trace!("Resolving service reference '{}'", id);
        return locator.locate(id).map(Argument::Service);
    }

    let rendered = locator.parameters().render(text)?;
    Ok(Argument::Value(Value::String(rendered)))
}

/// Resolve an argument block for service `id`, keeping its list or mapping shape
pub fn resolve_arguments<L>(
    id: &str,
    raw: Option<&Value>,
    locator: &mut L,
) -> Result<Arguments, WireError>
where
    L: ServiceLocator + ?Sized,
{
    match raw {
        None | Some(Value::Null) => Ok(Arguments::default()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| resolve_value(item, locator))
            .collect::<Result<Vec<_>, _>>()
            .map(Arguments::Positional),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, item)| Ok((name.clone(), resolve_value(item, locator)?)))
            .collect::<Result<_, WireError>>()
            .map(Arguments::Named),
        Some(other) => Err(WireError::MalformedArguments {
            id: id.to_string(),
            found: describe(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Fixture {
        parameters: Parameters,
        services: HashMap<String, Instance>,
        located: Vec<String>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut services: HashMap<String, Instance> = HashMap::new();
            services.insert("driver".to_string(), Arc::new(String::from("Felix")));
            Self {
                parameters: Parameters::from_iter([("surname", "Carmona"), ("name", "Felix")]),
                services,
                located: Vec::new(),
            }
        }
    }

    impl ServiceLocator for Fixture {
        fn parameters(&self) -> &Parameters {
            &self.parameters
        }

        fn locate(&mut self, id: &str) -> Result<Instance, WireError> {
            self.located.push(id.to_string());
            self.services
                .get(id)
                .cloned()
                .ok_or_else(|| WireError::unknown_service(id))
        }
    }

    #[test]
    fn plain_and_templated_strings() {
        let mut fixture = Fixture::new();
        let plain = resolve_value(&json!("abc"), &mut fixture).unwrap();
        assert_eq!(plain.as_str(), Some("abc"));

        let templated = resolve_value(&json!("{{ surname }}xxx"), &mut fixture).unwrap();
        assert_eq!(templated.as_str(), Some("Carmonaxxx"));
    }

    #[test]
    fn escaped_service_prefix_is_literal() {
        let mut fixture = Fixture::new();
        let value = resolve_value(&json!("@@foo"), &mut fixture).unwrap();
        assert_eq!(value.as_str(), Some("@foo"));

        let value = resolve_value(&json!("@@{{ name }}"), &mut fixture).unwrap();
        assert_eq!(value.as_str(), Some("@Felix"));
        assert!(fixture.located.is_empty());
    }

    #[test]
    fn escaped_braces_are_not_substituted() {
        let mut fixture = Fixture::new();
        let value = resolve_value(&json!(r"\{\{ foo \}\} {{ surname }}"), &mut fixture).unwrap();
        assert_eq!(value.as_str(), Some("{{ foo }} Carmona"));
    }

    #[test]
    fn service_reference_goes_through_locator() {
        let mut fixture = Fixture::new();
        let value = resolve_value(&json!("@driver"), &mut fixture).unwrap();
        let driver = value.as_service().unwrap().clone().downcast::<String>().unwrap();
        assert_eq!(driver.as_str(), "Felix");
        assert_eq!(fixture.located, vec!["driver"]);

        let error = resolve_value(&json!("@nobody"), &mut fixture).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownService);
    }

    #[test]
    fn non_strings_pass_through() {
        let mut fixture = Fixture::new();
        for raw in [json!(3), json!(true), json!(null), json!(["{{ name }}"])] {
            let value = resolve_value(&raw, &mut fixture).unwrap();
            assert_eq!(value.as_value(), Some(&raw));
        }
    }

    #[test]
    fn argument_blocks_keep_their_shape() {
        let mut fixture = Fixture::new();

        let list = resolve_arguments("s", Some(&json!(["{{ name }}", 2])), &mut fixture).unwrap();
        assert!(!list.is_named());
        assert_eq!(list.string(0, "name").unwrap(), "Felix");

        let map = resolve_arguments("s", Some(&json!({"name": "{{ name }}"})), &mut fixture).unwrap();
        assert!(map.is_named());
        assert_eq!(map.string(0, "name").unwrap(), "Felix");

        let empty = resolve_arguments("s", None, &mut fixture).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn scalar_block_is_malformed() {
        let mut fixture = Fixture::new();
        let error = resolve_arguments("s", Some(&json!("Felix")), &mut fixture).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedArguments);
    }

    #[test]
    fn missing_parameter_fails() {
        let mut fixture = Fixture::new();
        let error = resolve_value(&json!("{{ age }}"), &mut fixture).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ParameterNotFound);
    }
}
