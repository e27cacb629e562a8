//! Step function registry.
//!
//! Step descriptors name their function as a `(module, function)` pair. The
//! registry maps those pairs to statically typed [`StepFunction`]s that were
//! registered explicitly at startup; nothing is looked up by symbol at run
//! time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SteplineError};

use super::data::StepData;
use super::descriptor::DispatchTarget;

/// A step's single entry point.
///
/// Implementations signal failure by returning `Err`, never with a sentinel
/// value. They must not touch engine state or other steps' state.
pub trait StepFunction: Send + Sync {
    fn call(&self, input: StepData) -> Result<StepData>;
}

impl<F> StepFunction for F
where
    F: Fn(StepData) -> Result<StepData> + Send + Sync,
{
    fn call(&self, input: StepData) -> Result<StepData> {
        self(input)
    }
}

/// Registered step functions, grouped by module.
#[derive(Clone, Default)]
pub struct StepRegistry {
    modules: BTreeMap<String, BTreeMap<String, Arc<dyn StepFunction>>>,
}

impl StepRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in steps.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::builtin::register(&mut registry);
        registry
    }

    /// Register a function under `module::function`.
    ///
    /// Registering the same pair again replaces the earlier function.
    pub fn register<F>(
        &mut self,
        module: impl Into<String>,
        function: impl Into<String>,
        step: F,
    ) -> &mut Self
    where
        F: Fn(StepData) -> Result<StepData> + Send + Sync + 'static,
    {
        let module = module.into();
        let function = function.into();
        let replaced = self
            .modules
            .entry(module.clone())
            .or_default()
            .insert(function.clone(), Arc::new(step))
            .is_some();

        if replaced {
            debug!("Replaced step function {}::{}", module, function);
        } else {
            debug!("Registered step function {}::{}", module, function);
        }
        self
    }

    /// Resolve a dispatch target to its function.
    ///
    /// # Errors
    ///
    /// Returns `StepResolution` when the module is unknown or the module has
    /// no function with that name.
    pub fn resolve(&self, target: &DispatchTarget) -> Result<Arc<dyn StepFunction>> {
        let functions =
            self.modules
                .get(&target.module)
                .ok_or_else(|| SteplineError::StepResolution {
                    module: target.module.clone(),
                    function: target.function.clone(),
                    cause: "module not registered".to_string(),
                })?;

        functions
            .get(&target.function)
            .cloned()
            .ok_or_else(|| SteplineError::StepResolution {
                module: target.module.clone(),
                function: target.function.clone(),
                cause: format!(
                    "module '{}' has no function '{}'",
                    target.module, target.function
                ),
            })
    }

    /// Check whether a target resolves.
    pub fn contains(&self, target: &DispatchTarget) -> bool {
        self.modules
            .get(&target.module)
            .is_some_and(|f| f.contains_key(&target.function))
    }

    /// Registered module names, sorted.
    pub fn modules(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Function names registered in a module, sorted.
    pub fn functions(&self, module: &str) -> Vec<&str> {
        self.modules
            .get(module)
            .map(|f| f.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .modules
            .iter()
            .flat_map(|(m, fns)| fns.keys().map(move |name| format!("{}::{}", m, name)))
            .collect();
        f.debug_struct("StepRegistry")
            .field("functions", &entries)
            .finish()
    }
}
