//! Command-line interface for Stepline.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{BatchArgs, Cli, Commands, InteractiveArgs, LastArgs, ListArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, EngineSetup};
