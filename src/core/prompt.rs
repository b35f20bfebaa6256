//! Operator confirmation.

use crate::error::Result;

/// An operator's answer to a proceed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Asks the operator whether to continue. Only consulted on a terminal.
pub trait Prompt {
    fn ask_to_proceed(&self, message: &str, default: Answer) -> Result<Answer>;
}

/// Prompt for runs without a terminal. Answers with the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unattended;

impl Prompt for Unattended {
    fn ask_to_proceed(&self, _message: &str, default: Answer) -> Result<Answer> {
        Ok(default)
    }
}
