//! User prompts.

use crate::error::{Error, Result};

/// Questions the setup flow may ask.
pub trait Prompter {
    /// Free text answer, possibly empty.
    fn input(&self, prompt: &str) -> Result<String>;
    /// Index into `items`.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()?)
    }
}

/// Validate `given` against `available`, or let the user pick one.
///
/// `kind` names the value in prompts and errors (`profile`, `region`, ...).
pub fn choose<P: Prompter + ?Sized>(
    prompter: &P,
    kind: &'static str,
    given: Option<String>,
    mut available: Vec<String>,
) -> Result<String> {
    available.sort();
    let chosen = match given.filter(|g| !g.trim().is_empty()) {
        Some(value) => value.trim().to_string(),
        None => {
            if available.is_empty() {
                return Err(Error::Config(format!("no {kind} available to choose from")));
            }
            let index = prompter.select(&format!("Select {kind}"), &available)?;
            available
                .get(index)
                .cloned()
                .ok_or_else(|| Error::Config(format!("invalid {kind} selection: {index}")))?
        }
    };
    if !available.contains(&chosen) {
        return Err(Error::not_found(kind, chosen));
    }
    log::debug!("Using {kind} {chosen}");
    Ok(chosen)
}
