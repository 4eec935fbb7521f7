/*!
 * Interactive collaborators injected into the explorer
 *
 * Deleting and pasting over an existing item need an answer from the user.
 * The explorer asks through the [`Prompter`] trait so the core never reads
 * the console itself.
 */

use std::collections::VecDeque;

use dialoguer::{Confirm, Input, Select};
use log::warn;

use crate::error::{Result, VfshError};

/// Answer to a paste that collides with an existing item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Remove the existing item first
    Overwrite,
    /// Paste under a different name
    Rename(String),
    /// Abort the paste
    Cancel,
}

/// Source of confirmations and conflict decisions
pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Ask how to resolve a name collision
    fn choose_on_conflict(&mut self, prompt: &str) -> Result<ConflictChoice>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        (**self).confirm(prompt)
    }

    fn choose_on_conflict(&mut self, prompt: &str) -> Result<ConflictChoice> {
        (**self).choose_on_conflict(prompt)
    }
}

/// Terminal prompter backed by dialoguer
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> VfshError {
    VfshError::Prompt(format!("Failed to get user input: {}", e))
}

impl Prompter for DialoguerPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }

    fn choose_on_conflict(&mut self, prompt: &str) -> Result<ConflictChoice> {
        let choice = Select::new()
            .with_prompt(prompt)
            .items(&["Overwrite", "Rename", "Cancel"])
            .default(2)
            .interact()
            .map_err(prompt_error)?;

        match choice {
            0 => Ok(ConflictChoice::Overwrite),
            1 => {
                let name = Input::<String>::new()
                    .with_prompt("Enter new name")
                    .interact_text()
                    .map_err(prompt_error)?;
                Ok(ConflictChoice::Rename(name.trim().to_string()))
            }
            _ => Ok(ConflictChoice::Cancel),
        }
    }
}

/// Prompter for sessions without a terminal
///
/// Piped input has nobody to ask, so every confirmation is declined and
/// every name collision is cancelled. Nothing is deleted or overwritten.
#[derive(Debug, Default)]
pub struct UnattendedPrompter;

impl UnattendedPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for UnattendedPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        warn!("No terminal to answer '{}', declining", prompt);
        Ok(false)
    }

    fn choose_on_conflict(&mut self, prompt: &str) -> Result<ConflictChoice> {
        warn!("No terminal to answer '{}', cancelling", prompt);
        Ok(ConflictChoice::Cancel)
    }
}

/// Prompter that replays pre-recorded answers
///
/// Used for non-interactive sessions and tests. Running out of answers is a
/// [`VfshError::Prompt`] error.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    confirmations: VecDeque<bool>,
    choices: VecDeque<ConflictChoice>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirmation
    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }

    /// Queue an answer for the next conflict
    pub fn choose(mut self, choice: ConflictChoice) -> Self {
        self.choices.push_back(choice);
        self
    }

    /// Every prompt shown so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.asked.push(prompt.to_string());
        self.confirmations
            .pop_front()
            .ok_or_else(|| VfshError::Prompt(format!("no answer scripted for '{}'", prompt)))
    }

    fn choose_on_conflict(&mut self, prompt: &str) -> Result<ConflictChoice> {
        self.asked.push(prompt.to_string());
        self.choices
            .pop_front()
            .ok_or_else(|| VfshError::Prompt(format!("no choice scripted for '{}'", prompt)))
    }
}
