//! Terminal confirmation.

use dialoguer::Confirm;

use crate::core::prompt::{Answer, Prompt};
use crate::error::Result;

/// Asks on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask_to_proceed(&self, message: &str, default: Answer) -> Result<Answer> {
        let proceed = Confirm::new()
            .with_prompt(message)
            .default(default == Answer::Yes)
            .interact()?;
        Ok(if proceed { Answer::Yes } else { Answer::No })
    }
}
