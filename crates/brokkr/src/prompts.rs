//! Interactive prompt backend
//!
//! The dialoguer implementation of the core `Prompter` trait. Terminal
//! presentation lives here; what gets asked, and when, is decided by the
//! resolution phases in brokkr-core.

use dialoguer::{Confirm, Input, Select};

use brokkr_core::{Error, Prompter, Result, TemplateChoice};

/// Prompter backed by dialoguer
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::new()
            .with_prompt(prompt)
            .validate_with(|value: &String| {
                if value.trim().is_empty() {
                    Err("an answer is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(into_core)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(into_core)
    }

    fn select_template(&mut self) -> Result<TemplateChoice> {
        let choices = TemplateChoice::all();
        let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();

        let selection = Select::new()
            .with_prompt("What milestone will you be working on?")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(into_core)?;

        Ok(choices[selection])
    }
}

fn into_core(err: dialoguer::Error) -> Error {
    match err {
        dialoguer::Error::IO(io) => Error::Io(io),
    }
}
