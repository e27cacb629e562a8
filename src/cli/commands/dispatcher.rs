//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, InteractiveArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::setup::EngineSetup;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    setup: EngineSetup,
}

impl CommandDispatcher {
    pub fn new(setup: EngineSetup) -> Self {
        Self { setup }
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let setup = self.setup.clone();
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(setup, args.clone()).execute(ui)
            }
            Some(Commands::Batch(args)) => {
                super::batch::BatchCommand::new(setup, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(setup, args.clone()).execute(ui)
            }
            Some(Commands::Last(args)) => {
                super::last::LastCommand::new(setup, args.clone()).execute(ui)
            }
            Some(Commands::Cache(args)) => {
                super::cache::CacheCommand::new(setup, args.clone()).execute(ui)
            }
            Some(Commands::Interactive(args)) => {
                super::interactive::InteractiveCommand::new(setup, args.clone()).execute(ui)
            }
            None => super::interactive::InteractiveCommand::new(setup, InteractiveArgs::default())
                .execute(ui),
        }
    }
}
