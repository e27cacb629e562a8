//! Step descriptors, step data and the step function registry.
//!
//! - [`StepDescriptor`] - Immutable record of a registered step
//! - [`StepData`] - Value threaded from one step to the next
//! - [`StepRegistry`] - Maps `(module, function)` pairs to step functions
//! - [`builtin`] - Local text steps available to every workflow
//!
//! # Example
//!
//! ```
//! use stepline::steps::{DispatchTarget, StepData, StepRegistry};
//! use serde_json::json;
//!
//! let mut registry = StepRegistry::with_builtins();
//! registry.register("demo", "append_a", |input: StepData| {
//!     Ok(json!(format!("{}-A", input.as_str().unwrap_or_default())))
//! });
//!
//! let step = registry.resolve(&DispatchTarget::new("demo", "append_a")).unwrap();
//! assert_eq!(step.call(json!("x")).unwrap(), json!("x-A"));
//! ```

pub mod builtin;
pub mod data;
pub mod descriptor;
pub mod registry;

pub use data::{decode_input, encode_output, kind_of, to_json_lossy, StepData};
pub use descriptor::{DispatchTarget, StepDescriptor};
pub use registry::{StepFunction, StepRegistry};
