use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::shell_context::CommandError;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for a value that must contain non-whitespace text.
pub fn prompt_required_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: &str,
    required_message: &'static str,
) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .validate_with(move |input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Err(required_message)
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(CommandError::from)
}

/// Pick one item from a list. Returns `None` when the user backs out.
pub fn select_index(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
) -> Result<Option<usize>, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(CommandError::from)
}
