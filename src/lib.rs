//! # graphwire
//!
//! A declarative object-graph builder. Services are described as data
//! (a class name, constructor arguments and post-construction calls),
//! parameters are named values usable as `{{ name }}` templates, and the
//! [`Container`] builds each service lazily, once, on first request.
//!
//! ## Quick Start
//!
//! ```rust
//! use graphwire::{Container, Document, Registry};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! struct Driver { name: String }
//! struct Car { driver: Arc<Driver> }
//!
//! // Classes are registered once under the names definitions use
//! let mut registry = Registry::new();
//! registry.class("app.Driver", |args| Ok(Driver { name: args.string(0, "name")? }));
//! registry.class("app.Car", |args| Ok(Car { driver: args.service(0, "driver")? }));
//!
//! let document: Document = r#"{
//!     "parameters": {"driver_name": "Felix"},
//!     "services": {
//!         "car": {"class": "app.Car", "arguments": ["@driver"]},
//!         "driver": {"class": "app.Driver", "arguments": ["{{ driver_name }}"]}
//!     }
//! }"#.parse()?;
//!
//! let mut container = Container::from_document(registry, &document);
//! let car = container.get_as::<Car>("car")?;
//! assert_eq!(car.driver.name, "Felix");
//!
//! // Singletons: the same instance every time
//! assert!(Arc::ptr_eq(&car, &container.get_as::<Car>("car")?));
//! # Ok(())
//! # }
//! ```
//!
//! ## Argument strings
//!
//! - `@id` references the service `id`
//! - `@@text` is the literal `@text`
//! - `{{ name }}` is replaced by the parameter `name`; `\{` and `\}` are literal braces
//!
//! Circular service or parameter references fail with
//! [`ErrorKind::CyclicDependency`] or [`ErrorKind::CyclicParameter`].

pub mod arguments;
pub mod cli;
pub mod container;
pub mod definition;
pub mod document;
pub mod errors;
pub mod lint;
pub mod parameters;
pub mod registry;
pub mod resolver;
pub mod template;

pub use arguments::{Argument, ArgumentError, Arguments, Instance};
pub use container::{Container, ContainerConfig};
pub use definition::Definition;
pub use document::Document;
pub use errors::{ErrorKind, WireError};
pub use lint::{LintIssue, LintLevel, LintResult, lint};
pub use parameters::Parameters;
pub use registry::Registry;
