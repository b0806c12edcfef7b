use std::io;
use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::render::RenderOptions;
use crate::cli::{commands, CliOptions};
use crate::config::{Config, ConfigError, ConfigManager};
use crate::core::{
    BlueprintView, Effect, Event, GenerationCompleted, GenerationService, Notice, SystemClock,
    TemplateGenerator, ViewMode,
};
use crate::domain::{NamedEntity, ScenarioId};
use crate::errors::{BlueprintError, CliError};
use crate::session::{SessionShell, SignOutFn, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Per-command failure; reported without leaving the shell.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] BlueprintError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub session: SessionShell,
    pub last_command: Option<String>,
    pub running: bool,
    generation: GenerationService,
    completions: UnboundedReceiver<GenerationCompleted>,
    // Declared last so generation tasks are cancelled before the runtime stops.
    _runtime: Runtime,
}

impl ShellContext {
    pub fn new(options: CliOptions) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = options
            .config_path
            .clone()
            .map(ConfigManager::new)
            .unwrap_or_else(ConfigManager::from_default_location);
        let mut config = config_manager.load()?;
        if let Some(delay_ms) = options.delay_ms {
            config.generation_delay_ms = delay_ms;
        }
        apply_output_preferences(&config);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blueprint-generation")
            .enable_time()
            .build()
            .map_err(|err| CliError::Runtime(err.to_string()))?;
        let (generation, completions) = GenerationService::new(
            runtime.handle().clone(),
            Arc::new(TemplateGenerator),
            config.generation_delay(),
        );

        let user = options
            .user
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(User::new);
        let sign_out = user.as_ref().map(|user| {
            let name = user.username.clone();
            Box::new(move || tracing::info!(user = %name, "identity session released"))
                as SignOutFn
        });
        let session = SessionShell::new(user, sign_out, &config.guest_name, Arc::new(SystemClock));

        let mode = if options.script {
            CliMode::Script
        } else {
            CliMode::Interactive
        };

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            session,
            last_command: None,
            running: true,
            generation,
            completions,
            _runtime: runtime,
        })
    }

    pub fn view(&self) -> &BlueprintView {
        self.session.view()
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions::from_config(&self.config)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let view = self.view();
        let target = view
            .selected_id()
            .and_then(|id| view.scenario(id))
            .map(|scenario| format!(":{}", scenario.fields.scenario_name))
            .unwrap_or_default();
        let busy = if view.is_generating() { "…" } else { "" };
        format!("blueprint[{}{}]{}> ", view.mode().label(), target, busy)
    }

    pub(crate) fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> CommandResult {
        match self.registry.handler(command) {
            Some(handler) => handler(self, args),
            None => {
                self.suggest_command(raw);
                Ok(())
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    /// Runs one view transition and carries out its effects.
    pub(crate) fn apply(&mut self, event: Event) {
        let effects = self.session.view_mut().apply(event);
        for effect in effects {
            match effect {
                Effect::Generate(request) => self.generation.start(request),
                Effect::CancelGeneration(id) => {
                    self.generation.cancel(id);
                }
                Effect::Notify(notice) => self.report_notice(notice),
            }
        }
    }

    /// Applies every completion that has already arrived.
    pub(crate) fn drain_completions(&mut self) {
        while let Ok(done) = self.completions.try_recv() {
            self.complete(done);
        }
    }

    /// Blocks until the pending generation (if any) resolves.
    pub(crate) fn wait_for_generation(&mut self) -> CommandResult {
        while let Some(pending) = self.view().pending_request() {
            match self.completions.blocking_recv() {
                Some(done) => {
                    let finished = done.id == pending;
                    self.complete(done);
                    if finished {
                        break;
                    }
                }
                None => {
                    return Err(CommandError::InvalidArguments(
                        "generation service stopped unexpectedly".into(),
                    ))
                }
            }
        }
        Ok(())
    }

    fn complete(&mut self, done: GenerationCompleted) {
        self.generation.acknowledge(done.id);
        self.apply(Event::GenerationCompleted {
            id: done.id,
            blueprint: done.blueprint,
        });
    }

    pub(crate) fn scenario_name(&self, id: &ScenarioId) -> String {
        self.view()
            .scenario(id)
            .map(|scenario| scenario.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    fn report_notice(&self, notice: Notice) {
        match notice {
            Notice::ValidationFailed(fields) => {
                output::error(format!(
                    "Please complete all required fields ({} missing).",
                    fields.len()
                ));
                for field in fields {
                    if let Some(message) = self.view().errors().get(field) {
                        output::warning(format!("{}: {}", field.label(), message));
                    }
                }
            }
            Notice::ScenarioCreated(id) => {
                output::success(format!(
                    "Scenario `{}` created (id {}). Generating blueprint…",
                    self.scenario_name(&id),
                    id
                ));
            }
            Notice::ScenarioSelected(id) => output::info(format!(
                "Loaded scenario `{}`. Generating blueprint…",
                self.scenario_name(&id)
            )),
            Notice::ScenarioSaved(id) => {
                output::success(format!("Scenario `{}` saved.", self.scenario_name(&id)))
            }
            Notice::EditsDiscarded(id) => output::info(format!(
                "Changes discarded; `{}` restored.",
                self.scenario_name(&id)
            )),
            Notice::EditStarted(id) => {
                output::info(format!("Editing `{}`.", self.scenario_name(&id)));
                output::hint("Use `set`, then `save`, `resubmit` or `cancel`.");
            }
            Notice::FormReset => output::info("Started a new scenario."),
            Notice::Regenerating => output::info("Regenerating blueprint from current values…"),
            Notice::BlueprintReady(title) => {
                output::success(format!("Blueprint ready for `{}`.", title));
                output::hint("Use `show` to view it.");
            }
            Notice::Rated {
                stakeholder,
                metric,
                rating,
            } => output::success(format!(
                "{} {} set to {}.",
                stakeholder.label(),
                metric.label(),
                rating
            )),
            Notice::Rejected(rejection) => output::warning(rejection),
        }
    }

    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> CommandResult {
        self.config.set_value(key, value)?;
        self.config_manager.save(&self.config)?;
        self.generation.set_delay(self.config.generation_delay());
        apply_output_preferences(&self.config);
        Ok(())
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn is_viewing(&self) -> bool {
        matches!(self.view().mode(), ViewMode::Viewing(_))
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        crate::cli::io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other.to_string()),
        }
    }
}

fn apply_output_preferences(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output,
    });
}
