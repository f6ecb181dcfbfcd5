//! Definition documents
//!
//! A document bundles parameters and service definitions in one JSON object:
//!
//! ```json
//! {
//!   "parameters": { "driver_name": "Felix" },
//!   "services": {
//!     "driver": { "class": "app.Driver", "arguments": ["{{ driver_name }}"] },
//!     "car": { "class": "app.Car", "arguments": ["@driver"] }
//!   }
//! }
//! ```

use crate::container::ContainerConfig;
use crate::lint::config::LintConfig;
use crate::parameters::Parameters;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Document {
    pub parameters: Map<String, Value>,
    pub services: Map<String, Value>,
    /// Container settings applied by `Container::from_document`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerConfig>,
    /// Lint settings for `graphwire check`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<LintConfig>,
}

impl Document {
    /// Parse a document from JSON bytes
    pub fn load(bytes: &[u8]) -> anyhow::Result<Self> {
        let document = serde_json::from_slice(bytes).context("Invalid definition document")?;
        Ok(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Self::load(&bytes).with_context(|| format!("Failed to load '{}'", path.display()))
    }

    /// Serialize back to pretty JSON
    pub fn save(&self) -> anyhow::Result<Vec<u8>> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json.into_bytes())
    }

    pub fn parameters(&self) -> Parameters {
        self.parameters.clone().into_iter().collect()
    }
}

impl std::str::FromStr for Document {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::load(text.as_bytes())
    }
}
