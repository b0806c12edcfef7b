use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::cli::{output, render};
use crate::core::Event;
use crate::domain::{Rating, RatingMetric, Stakeholder};
use crate::errors::BlueprintError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            "Display the current blueprint",
            "show [--json]",
            cmd_show,
        ),
        CommandEntry::new(
            "rate",
            "Adjust a stakeholder rating while editing",
            "rate <client|provider|company> <severity|experience> <1-5>",
            cmd_rate,
        ),
        CommandEntry::new(
            "wait",
            "Block until the pending blueprint is ready",
            "wait",
            cmd_wait,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let as_json = match args.first() {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("--json") => true,
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown option `{other}` (usage: show [--json])"
            )))
        }
    };

    let view = context.view();
    let Some(blueprint) = view.blueprint() else {
        if view.is_generating() {
            output::info("Blueprint is still generating. Use `wait` to block until it is ready.");
        } else {
            output::info("No blueprint yet. Submit or select a scenario first.");
        }
        return Ok(());
    };

    if as_json {
        let text = serde_json::to_string_pretty(blueprint).map_err(BlueprintError::from)?;
        output::block(text);
    } else {
        output::block(render::blueprint(
            blueprint,
            view.can_rate(),
            context.render_options(),
        ));
    }
    Ok(())
}

fn cmd_rate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [who, metric, value] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: rate <client|provider|company> <severity|experience> <1-5>".into(),
        ));
    };
    let stakeholder: Stakeholder = who.parse()?;
    let metric: RatingMetric = metric.parse()?;
    let rating: Rating = value.parse()?;
    context.apply(Event::Rate {
        stakeholder,
        metric,
        rating,
    });
    Ok(())
}

fn cmd_wait(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.view().is_generating() {
        output::info("No generation in progress.");
        return Ok(());
    }
    context.wait_for_generation()
}
