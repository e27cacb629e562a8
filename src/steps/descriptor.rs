//! Step descriptors.
//!
//! A [`StepDescriptor`] is the immutable record the engine keeps for each
//! registered step. Its [`DispatchTarget`] is only looked up in the
//! [`StepRegistry`](super::StepRegistry) when the step is about to run.

use std::fmt;

use crate::config::StepConfig;

/// Registry coordinates of a step function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DispatchTarget {
    /// Registry module name.
    pub module: String,
    /// Function name within the module.
    pub function: String,
}

impl DispatchTarget {
    pub fn new(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.function)
    }
}

/// A registered pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDescriptor {
    /// Human-readable label; also the cache file and result key.
    pub name: String,

    /// Function to dispatch to.
    pub target: DispatchTarget,

    /// What the step does.
    pub description: String,

    /// Expected input (documentation only).
    pub input_type: String,

    /// Produced output (documentation only).
    pub output_type: String,

    /// Disabled steps are skipped entirely.
    pub enabled: bool,
}

impl StepDescriptor {
    /// Create an enabled step with empty documentation.
    pub fn new(
        name: impl Into<String>,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: DispatchTarget::new(module, function),
            description: String::new(),
            input_type: String::new(),
            output_type: String::new(),
            enabled: true,
        }
    }

    /// Build a descriptor from a config entry.
    pub fn from_config(config: &StepConfig) -> Self {
        Self {
            name: config.name.clone(),
            target: DispatchTarget::new(&config.module_name, &config.function_name),
            description: config.description.clone(),
            input_type: config.input_type.clone(),
            output_type: config.output_type.clone(),
            enabled: config.enabled,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the documented input and output types.
    pub fn with_types(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input_type = input.into();
        self.output_type = output.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Shorthand for `with_enabled(false)`.
    pub fn disabled(self) -> Self {
        self.with_enabled(false)
    }
}

impl From<&StepConfig> for StepDescriptor {
    fn from(config: &StepConfig) -> Self {
        Self::from_config(config)
    }
}
