//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands build their [`WorkflowEngine`] through
//! [`EngineSetup`] so directory precedence and environment checks stay in
//! one place.
//!
//! [`WorkflowEngine`]: crate::runner::WorkflowEngine

pub mod batch;
pub mod cache;
pub mod dispatcher;
pub mod display;
pub mod interactive;
pub mod last;
pub mod list;
pub mod run;
pub mod setup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use setup::EngineSetup;
