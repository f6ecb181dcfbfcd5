//! Type registry: constructible classes and their callable methods
//!
//! Definitions name their class by a dotted path such as `app.mail.Mailer`.
//! Instead of looking types up reflectively, applications register each
//! class once under that path together with a constructor and the methods
//! definitions may invoke through `calls`.
//!
//! ```rust
//! use graphwire::registry::Registry;
//!
//! struct Greeter { name: String }
//!
//! let mut registry = Registry::new();
//! registry
//!     .class("app.Greeter", |args| Ok(Greeter { name: args.string(0, "name")? }))
//!     .method("rename", |greeter: &mut Greeter, args| {
//!         greeter.name = args.string(0, "name")?;
//!         Ok(())
//!     });
//!
//! assert!(registry.resolve("app.Greeter").is_ok());
//! assert!(registry.resolve("app.Missing").is_err());
//! ```

use crate::arguments::{ArgumentError, Arguments};
use crate::errors::WireError;
use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::marker::PhantomData;
use std::sync::Arc;

type Object = Box<dyn Any + Send + Sync>;
type FactoryFn = Arc<dyn Fn(&Arguments) -> Result<Object, ArgumentError> + Send + Sync>;
type MethodFn = Arc<dyn Fn(&mut Object, &Arguments) -> Result<(), ArgumentError> + Send + Sync>;

/// A registered class: how to build it and which methods it exposes
pub struct Class {
    name: String,
    type_name: &'static str,
    factory: FactoryFn,
    methods: HashMap<String, MethodFn>,
}

impl Class {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type produced by the constructor
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    pub fn methods(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn construct(
        &self,
        arguments: &Arguments,
    ) -> Result<Box<dyn Any + Send + Sync>, ArgumentError> {
        (self.factory)(arguments)
    }

    /// Invoke `method`; `None` when the class exposes no such method
    pub(crate) fn invoke(
        &self,
        object: &mut Box<dyn Any + Send + Sync>,
        method: &str,
        arguments: &Arguments,
    ) -> Option<Result<(), ArgumentError>> {
        self.methods
            .get(method)
            .map(|invoker| invoker(object, arguments))
    }
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("methods", &self.methods())
            .finish()
    }
}

/// Chained registration of methods for one class
pub struct ClassBuilder<'r, T> {
    class: &'r mut Class,
    _marker: PhantomData<fn(T)>,
}

impl<T> ClassBuilder<'_, T>
where
    T: Any + Send + Sync,
{
    pub fn method<F>(self, name: impl Into<String>, invoker: F) -> Self
    where
        F: Fn(&mut T, &Arguments) -> Result<(), ArgumentError> + Send + Sync + 'static,
    {
        let type_name = self.class.type_name;
        let method: MethodFn = Arc::new(move |object: &mut Object, arguments: &Arguments| {
            // The constructor registered alongside always yields a T
            match object.downcast_mut::<T>() {
                Some(target) => invoker(target, arguments),
                None => Err(ArgumentError::WrongType {
                    name: "self".to_string(),
                    expected: type_name.to_string(),
                }),
            }
        });
        self.class.methods.insert(name.into(), method);
        self
    }
}

#[derive(Default)]
pub struct Registry {
    classes: HashMap<String, Class>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class under its fully qualified name, replacing any earlier one
    pub fn class<T, F>(&mut self, name: impl Into<String>, factory: F) -> ClassBuilder<'_, T>
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<T, ArgumentError> + Send + Sync + 'static,
    {
        let name = name.into();
        let factory: FactoryFn = Arc::new(move |arguments: &Arguments| {
            factory(arguments).map(|object| Box::new(object) as Object)
        });
        let class = Class {
            name: name.clone(),
            type_name: std::any::type_name::<T>(),
            factory,
            methods: HashMap::new(),
        };

        let class = match self.classes.entry(name) {
            Entry::Occupied(mut entry) => {
                log::debug!("Class '{}' re-registered", entry.key());
                entry.insert(class);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(class),
        };
        ClassBuilder {
            class,
            _marker: PhantomData,
        }
    }

    /// Locate a class by its fully qualified dotted name
    pub fn resolve(&self, name: &str) -> Result<&Class, WireError> {
        let (namespace, type_name) = split_name(name)?;

        if let Some(class) = self.classes.get(name) {
            return Ok(class);
        }

        let prefix = format!("{namespace}.");
        let namespace_known = namespace.is_empty()
            || self.classes.keys().any(|known| known.starts_with(&prefix));

        let reason = if namespace_known {
            format!("type '{type_name}' not found in namespace '{namespace}'")
        } else {
            format!("namespace '{namespace}' is not registered")
        };
        Err(WireError::type_resolution(name, reason))
    }

    pub fn has(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("classes", &self.names())
            .finish()
    }
}

/// Split `a.b.Type` into (`a.b`, `Type`); a bare `Type` has an empty namespace
fn split_name(name: &str) -> Result<(&str, &str), WireError> {
    if name.is_empty() {
        return Err(WireError::type_resolution(name, "empty type name"));
    }
    if name.split('.').any(str::is_empty) {
        return Err(WireError::type_resolution(name, "empty path segment"));
    }
    Ok(name.rsplit_once('.').unwrap_or(("", name)))
}
