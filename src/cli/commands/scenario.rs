//! Form commands: drafting, submitting, selecting and editing scenarios.

use crate::cli::forms::{changed_fields, FormResult, ScenarioWizard};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output, render};
use crate::core::{Event, Rejection, ViewMode};
use crate::domain::{Displayable, ScenarioField, ScenarioId};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("new", "Start a blank scenario", "new", cmd_new),
        CommandEntry::new(
            "set",
            "Set one form field",
            "set <name|company|provider|client|state|service> <value...>",
            cmd_set,
        ),
        CommandEntry::new("fields", "Show the form and its messages", "fields", cmd_fields),
        CommandEntry::new(
            "submit",
            "Create the drafted scenario and generate its blueprint",
            "submit",
            cmd_submit,
        ),
        CommandEntry::new("list", "List saved scenarios", "list", cmd_list),
        CommandEntry::new(
            "select",
            "Load a saved scenario by number or id",
            "select [number|id]",
            cmd_select,
        ),
        CommandEntry::new("edit", "Edit the selected scenario", "edit", cmd_edit),
        CommandEntry::new(
            "save",
            "Store edits to the selected scenario",
            "save",
            cmd_save,
        ),
        CommandEntry::new("cancel", "Discard unsaved edits", "cancel", cmd_cancel),
        CommandEntry::new(
            "resubmit",
            "Regenerate the blueprint from the edited values without saving",
            "resubmit",
            cmd_resubmit,
        ),
        CommandEntry::new(
            "form",
            "Fill in the form field by field",
            "form",
            cmd_form,
        ),
    ]
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Event::CreateNew);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((name, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    };
    let field: ScenarioField = name.parse()?;
    let value = rest.join(" ");
    let accepted = !context.is_viewing();
    context.apply(Event::FieldChanged {
        field,
        value: value.clone(),
    });
    if accepted {
        if value.trim().is_empty() {
            output::info(format!("{} cleared.", field.label()));
        } else {
            output::info(format!("{} = {}", field.label(), value));
        }
    }
    Ok(())
}

fn cmd_fields(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::block(render::form(context.view()));
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Event::Submit);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Scenarios");
    output::block(render::scenario_list(
        context.view(),
        context.render_options(),
    ));
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = match args.first() {
        Some(reference) => resolve_scenario(context, reference),
        None => match pick_scenario(context)? {
            Some(id) => id,
            None => {
                output::info("Operation cancelled.");
                return Ok(());
            }
        },
    };
    context.apply(Event::SelectScenario(id));
    Ok(())
}

/// A 1-based list position, or else a scenario id.
fn resolve_scenario(context: &ShellContext, reference: &str) -> ScenarioId {
    let scenarios = context.view().scenarios();
    reference
        .parse::<usize>()
        .ok()
        .filter(|position| (1..=scenarios.len()).contains(position))
        .map(|position| scenarios[position - 1].id.clone())
        .unwrap_or_else(|| ScenarioId::from(reference))
}

fn pick_scenario(context: &ShellContext) -> Result<Option<ScenarioId>, CommandError> {
    if !context.can_prompt() {
        return Err(CommandError::InvalidArguments(
            "usage: select <number|id>".into(),
        ));
    }
    let scenarios = context.view().scenarios();
    if scenarios.is_empty() {
        output::info("No saved scenarios yet.");
        return Ok(None);
    }
    let labels: Vec<String> = scenarios.iter().map(Displayable::display_label).collect();
    let choice = io::select_index(&context.theme, "Select scenario", &labels)?;
    Ok(choice.map(|idx| scenarios[idx].id.clone()))
}

fn cmd_edit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Event::BeginEdit);
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Event::Save);
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Event::Cancel);
    Ok(())
}

fn cmd_resubmit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Event::Resubmit);
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.can_prompt() {
        return Err(CommandError::InvalidArguments(
            "form needs an interactive terminal; use `set` in scripts".into(),
        ));
    }
    if context.is_viewing() {
        output::warning(Rejection::ReadOnly);
        return Ok(());
    }

    let before = context.view().fields().clone();
    let collected = match ScenarioWizard::new(&context.theme, before.clone()).run()? {
        FormResult::Completed(fields) => fields,
        FormResult::Cancelled => {
            output::info("Form cancelled; fields left unchanged.");
            return Ok(());
        }
    };

    for (field, value) in changed_fields(&before, &collected) {
        context.apply(Event::FieldChanged { field, value });
    }

    let editing_saved = matches!(context.view().mode(), ViewMode::Editing { target: Some(_) });
    if editing_saved {
        output::hint("Use `save` to store these values or `resubmit` to preview them.");
    } else {
        context.apply(Event::Submit);
    }
    Ok(())
}
