//! Interactive yes/no confirmation.

use anyhow::Result;

/// Asks the operator a yes/no question.
///
/// Injected so orchestration tests can script answers instead of reading a
/// terminal.
pub trait Prompt: std::fmt::Debug {
    /// Ask `question` and return the answer; defaults to yes on plain Enter.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Terminal-backed [`Prompt`] using dialoguer.
///
/// Invalid input is re-prompted by the widget until a valid yes/no answer is
/// given.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        let answer = dialoguer::Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact()?;
        Ok(answer)
    }
}
