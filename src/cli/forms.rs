//! Guided entry of the scenario form.
//!
//! The wizard walks every field in display order, pre-filling the current
//! value, and hands the collected values back to the caller. Nothing touches
//! the view until the caller applies the result.

use std::io::ErrorKind;

use dialoguer::theme::ColorfulTheme;

use crate::cli::io;
use crate::cli::shell_context::CommandError;
use crate::domain::{ScenarioField, ScenarioFields};

/// Outcome of an interactive form run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

pub struct ScenarioWizard<'a> {
    theme: &'a ColorfulTheme,
    initial: ScenarioFields,
}

impl<'a> ScenarioWizard<'a> {
    pub fn new(theme: &'a ColorfulTheme, initial: ScenarioFields) -> Self {
        Self { theme, initial }
    }

    pub fn run(self) -> Result<FormResult<ScenarioFields>, CommandError> {
        let mut collected = self.initial.clone();
        for field in ScenarioField::ALL {
            let answer = io::prompt_required_text(
                self.theme,
                field.label(),
                self.initial.get(field),
                field.required_message(),
            );
            match answer {
                Ok(value) => collected.set(field, value.trim()),
                Err(err) if is_interrupt(&err) => return Ok(FormResult::Cancelled),
                Err(err) => return Err(err),
            }
        }

        match io::confirm_action(self.theme, "Use these values?", true) {
            Ok(true) => Ok(FormResult::Completed(collected)),
            Ok(false) => Ok(FormResult::Cancelled),
            Err(err) if is_interrupt(&err) => Ok(FormResult::Cancelled),
            Err(err) => Err(err),
        }
    }
}

/// Changed fields between two form snapshots, in display order.
pub fn changed_fields(
    before: &ScenarioFields,
    after: &ScenarioFields,
) -> Vec<(ScenarioField, String)> {
    ScenarioField::ALL
        .into_iter()
        .filter(|field| before.get(*field) != after.get(*field))
        .map(|field| (field, after.get(field).to_string()))
        .collect()
}

fn is_interrupt(err: &CommandError) -> bool {
    match err {
        CommandError::Dialoguer(dialoguer::Error::IO(io_err)) => {
            io_err.kind() == ErrorKind::Interrupted
        }
        _ => false,
    }
}
