//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Definition shape checks
    pub shape: ShapeConfig,
    /// Reference checks (services and parameters)
    pub references: ReferencesConfig,
    /// Circular reference checks
    pub cycles: CyclesConfig,
}

/// Shape checking configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Enable shape checks
    pub enabled: bool,
    /// With a registry: check that every call names a registered method
    pub check_methods: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_methods: true,
        }
    }
}

/// Reference checking configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencesConfig {
    /// Enable reference checks
    pub enabled: bool,
    /// Check `@id` references against defined services
    pub check_services: bool,
    /// Check `{{ name }}` references against defined parameters
    pub check_parameters: bool,
    /// Report parameters nothing refers to
    pub report_unused_parameters: bool,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_services: true,
            check_parameters: true,
            report_unused_parameters: false, // Applications read parameters directly too
        }
    }
}

/// Cycle detection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyclesConfig {
    /// Enable cycle detection
    pub enabled: bool,
    /// Detect services that (transitively) depend on themselves
    pub check_services: bool,
    /// Detect parameters whose templates (transitively) reference themselves
    pub check_parameters: bool,
}

impl Default for CyclesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_services: true,
            check_parameters: true,
        }
    }
}
