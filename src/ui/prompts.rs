//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input};

use crate::error::{Result, SteplineError};

use super::{Prompt, PromptResult, PromptType};

fn map_dialoguer_err(e: dialoguer::Error) -> SteplineError {
    SteplineError::Io(e.into())
}

/// Prompt the user on a terminal.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_deref()
        .map(|s| PromptResult::String(s.to_string()).as_bool())
        .unwrap_or(true);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let input = Input::<String>::new().with_prompt(&prompt.question);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result))
}
