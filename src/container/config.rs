//! Container configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Fail with a cycle error as soon as a service is requested while it is being built
    pub detect_cycles: bool,
    /// Maximum nesting of service resolutions while cycle detection is off
    pub max_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: 64,
        }
    }
}
