//! Service container
//!
//! Holds service definitions and the singleton cache. Services are built
//! lazily on the first [`Container::get`]: constructor arguments are resolved
//! (recursing into `get` for `@id` references), the class is looked up in the
//! [`Registry`], the instance is constructed, configured `calls` are applied
//! and the finished instance is cached under its id. Aliases own no cache
//! entry of their own; they always follow their target.
//!
//! ```rust
//! use graphwire::{Container, Parameters, Registry};
//! use serde_json::json;
//!
//! struct Driver { name: String }
//!
//! let mut registry = Registry::new();
//! registry.class("app.Driver", |args| Ok(Driver { name: args.string(0, "name")? }));
//!
//! let mut container = Container::new(registry)
//!     .with_parameters(Parameters::from_iter([("driver_name", "Felix")]));
//! container.add_definitions(
//!     json!({"driver": {"class": "app.Driver", "arguments": ["{{ driver_name }}"]}})
//!         .as_object()
//!         .cloned()
//!         .unwrap_or_default(),
//! );
//!
//! let driver = container.get_as::<Driver>("driver")?;
//! assert_eq!(driver.name, "Felix");
//! # Ok::<(), graphwire::WireError>(())
//! ```

use crate::arguments::{Arguments, Instance};
use crate::definition::{ClassDefinition, Definition, Shape, classify, service_reference};
use crate::errors::WireError;
use crate::parameters::Parameters;
use crate::registry::Registry;
use crate::resolver::{ServiceLocator, resolve_arguments};
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

pub mod config;

pub use config::ContainerConfig;


pub struct Container {
    registry: Arc<Registry>,
    parameters: Parameters,
    config: ContainerConfig,
    definitions: HashMap<String, Definition>,
    instances: HashMap<String, Instance>,
    /// Ids currently being built, outermost first
    resolving: Vec<String>,
}

impl Container {
    pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
        Self {
            registry: registry.into(),
            parameters: Parameters::new(),
            config: ContainerConfig::default(),
            definitions: HashMap::new(),
            instances: HashMap::new(),
            resolving: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Container with every parameter and service of `document` installed,
    /// configured by its `container` section when present
    pub fn from_document(
        registry: impl Into<Arc<Registry>>,
        document: &crate::document::Document,
    ) -> Self {
        let mut container = Self::new(registry)
            .with_parameters(document.parameters())
            .with_config(document.container.clone().unwrap_or_default());
        container.add_definitions(document.services.clone());
        container
    }

    /// Fetch the service `id`, building and caching it on first use
    pub fn get(&mut self, id: &str) -> Result<Instance, WireError> {
        if let Some(instance) = self.instances.get(id) {
            log::trace!("Service '{}' served from cache", id);
            return Ok(Arc::clone(instance));
        }

        let definition = self
            .definitions
            .get(id)
            .cloned()
            .ok_or_else(|| WireError::unknown_service(id))?;

        let alias = self.alias_target(id).is_some();

        self.enter(id)?;
        let built = self.build(id, definition);
        self.resolving.pop();

        let instance = built?;
        if !alias {
            self.instances.insert(id.to_string(), Arc::clone(&instance));
        }
        Ok(instance)
    }

    /// Fetch the service `id` as its concrete type
    pub fn get_as<T>(&mut self, id: &str) -> Result<Arc<T>, WireError>
    where
        T: Any + Send + Sync,
    {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| WireError::TypeMismatch {
                id: id.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Register a pre-built instance under `id`, replacing any definition and cached value.
    ///
    /// An [`Instance`] is stored as-is rather than wrapped a second time.
    pub fn set<T>(&mut self, id: impl Into<String>, instance: T)
    where
        T: Any + Send + Sync,
    {
        let boxed: Box<dyn Any + Send + Sync> = Box::new(instance);
        let instance: Instance = match boxed.downcast::<Instance>() {
            Ok(erased) => *erased,
            Err(boxed) => Arc::from(boxed),
        };
        self.set_instance(id, instance);
    }

    /// Like [`set`](Self::set) for an already type-erased instance
    pub fn set_instance(&mut self, id: impl Into<String>, instance: Instance) {
        self.set_definition(id, Definition::Instance(instance));
    }

    pub fn set_definition(&mut self, id: impl Into<String>, definition: Definition) {
        let id = id.into();
        if self.instances.remove(&id).is_some() {
            log::warn!("Service '{}' replaced after it was built", id);
        }
        self.definitions.insert(id, definition);
    }

    /// Whether `id` is defined, built or not
    pub fn has(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Whether `id`, or the service it aliases, has been built
    pub fn is_resolved(&self, id: &str) -> bool {
        self.instances.contains_key(self.canonical(id))
    }

    /// Forget the definition and any cached instance of `id`
    pub fn remove(&mut self, id: &str) {
        self.definitions.remove(id);
        self.instances.remove(id);
    }

    pub fn add<I, K>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = (K, Definition)>,
        K: Into<String>,
    {
        for (id, definition) in definitions {
            self.set_definition(id, definition);
        }
    }

    /// Install raw definition data, one entry per service id
    pub fn add_definitions(&mut self, definitions: Map<String, Value>) {
        self.add(
            definitions
                .into_iter()
                .map(|(id, value)| (id, Definition::Declared(value))),
        );
    }

    /// Every known id, defined or already built
    pub fn keys(&self) -> Vec<String> {
        self.definitions
            .keys()
            .chain(self.instances.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// The target of `id` when it is declared as an alias
    fn alias_target(&self, id: &str) -> Option<&str> {
        match self.definitions.get(id)? {
            Definition::Declared(Value::String(text)) => {
                service_reference(text).filter(|target| !target.is_empty())
            }
            _ => None,
        }
    }

    /// The id owning the cache entry `id` shares, following alias chains
    fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        let mut current = id;
        for _ in 0..=self.definitions.len() {
            match self.alias_target(current) {
                Some(target) => current = target,
                None => break,
            }
        }
        current
    }

    fn enter(&mut self, id: &str) -> Result<(), WireError> {
        let chain = || {
            let mut chain = self.resolving.clone();
            chain.push(id.to_string());
            chain
        };

        if self.config.detect_cycles {
            if self.resolving.iter().any(|open| open == id) {
                return Err(WireError::CyclicDependency { chain: chain() });
            }
        } else if self.resolving.len() >= self.config.max_depth {
            return Err(WireError::DepthExceeded {
                limit: self.config.max_depth,
                chain: chain(),
            });
        }

        self.resolving.push(id.to_string());
        Ok(())
    }

    fn build(&mut self, id: &str, definition: Definition) -> Result<Instance, WireError> {
        let value = match definition {
            Definition::Instance(instance) => return Ok(instance),
            Definition::Declared(value) => value,
        };

        match classify(id, &value)? {
            Shape::Alias(target) => {
                log::debug!("Service '{}' is an alias of '{}'", id, target);
                self.get(target)
            }
            Shape::Literal(literal) => {
                let instance: Instance = Arc::new(literal.clone());
                Ok(instance)
            }
            Shape::Class(definition) => self.construct(id, &definition),
        }
    }

    fn construct(&mut self, id: &str, definition: &ClassDefinition<'_>) -> Result<Instance, WireError> {
        log::debug!("Building service '{}' ({})", id, definition.class);

        let arguments = resolve_arguments(id, definition.arguments, self)?;
        let registry = Arc::clone(&self.registry);
        let class = registry.resolve(definition.class)?;

        let binding = |source| WireError::ArgumentBinding {
            id: id.to_string(),
            source,
        };
        let mut object = class.construct(&arguments).map_err(binding)?;

        for call in &definition.calls {
            let call_arguments: Arguments = resolve_arguments(id, call.arguments, self)?;
            log::trace!("Calling '{}' on service '{}'", call.method, id);
            class
                .invoke(&mut object, call.method, &call_arguments)
                .ok_or_else(|| WireError::MethodNotFound {
                    id: id.to_string(),
                    class: definition.class.to_string(),
                    method: call.method.to_string(),
                })?
                .map_err(binding)?;
        }

        Ok(Arc::from(object))
    }
}

impl ServiceLocator for Container {
    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn locate(&mut self, id: &str) -> Result<Instance, WireError> {
        self.get(id)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.keys())
            .field("resolved", &self.instances.len())
            .field("parameters", &self.parameters.count())
            .finish()
    }
}
