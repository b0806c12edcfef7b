use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CommandError, CommandResult, ShellContext};
use crate::cli::{help, output, render};
use crate::session::APP_TITLE;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Show the session header and form state",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "signout",
            "Sign out of the current session",
            "signout",
            cmd_signout,
        ),
        CommandEntry::new(
            "config",
            "View and change shell preferences",
            "config [show|path|set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.view();
    output::block(render::header(&context.session));
    output::info(format!("  Mode        : {}", view.mode().label()));
    let selected = view
        .selected_id()
        .map(|id| format!("{} ({})", context.scenario_name(id), id))
        .unwrap_or_else(|| "none".into());
    output::info(format!("  Selected    : {selected}"));
    output::info(format!("  Scenarios   : {}", view.scenarios().len()));
    let blueprint = match (view.blueprint(), view.is_generating()) {
        (_, true) => "generating".to_string(),
        (Some(blueprint), false) => format!("ready ({})", blueprint.scenario_title),
        (None, false) => "none".to_string(),
    };
    output::info(format!("  Blueprint   : {blueprint}"));
    output::info(format!(
        "  Ratings     : {}",
        if view.can_rate() { "editable" } else { "read-only" }
    ));
    Ok(())
}

fn cmd_signout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.can_sign_out() {
        output::warning("Sign-out is not available in this session.");
        return Ok(());
    }
    if context.session.sign_out() {
        output::success(format!("Signed out {}.", context.session.user()));
        return Err(CommandError::ExitRequested);
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None | Some("show") => {
            output::section("Configuration");
            for (key, value) in context.config.entries() {
                output::info(format!("  {key:<20} {value}"));
            }
            Ok(())
        }
        Some("path") => {
            output::info(context.config_manager.config_path().display());
            Ok(())
        }
        Some("set") => {
            let [_, key, value @ ..] = args else {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            };
            if value.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            }
            let value = value.join(" ");
            context.update_config(key, &value)?;
            output::success(format!("{key} updated."));
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}` (usage: config [show|path|set <key> <value>])"
        ))),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("{} {}", APP_TITLE, meta.version));
    output::info(format!("  Build hash   : {}", meta.git_hash));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
