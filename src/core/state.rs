//! Scenario form and blueprint view state machine.
//!
//! All mutation goes through [`BlueprintView::apply`], which consumes one
//! [`Event`] and returns the [`Effect`]s the host must carry out (start or
//! cancel a generation, surface a notice). Rendering reads the view through
//! its accessors only.

use std::fmt;
use std::sync::Arc;

use crate::domain::{
    Blueprint, Identifiable, Rating, RatingMetric, Scenario, ScenarioField, ScenarioFields,
    ScenarioId, Stakeholder,
};
use crate::session::User;

use super::clock::Clock;
use super::generation::{GenerationRequest, RequestId};
use super::validation::{validate, ValidationErrors};

/// Where the form currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Blank form, nothing typed yet.
    NewEmpty,
    /// Fields are editable. `target` is the saved scenario being edited, or
    /// `None` for a draft that has not been submitted.
    Editing { target: Option<ScenarioId> },
    /// A saved scenario is selected and its fields are read-only.
    Viewing(ScenarioId),
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::NewEmpty => "new",
            ViewMode::Editing { target: None } => "drafting",
            ViewMode::Editing { target: Some(_) } => "editing",
            ViewMode::Viewing(_) => "viewing",
        }
    }
}

/// Discrete user or runtime events accepted by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FieldChanged { field: ScenarioField, value: String },
    SelectScenario(ScenarioId),
    CreateNew,
    Submit,
    BeginEdit,
    Save,
    Cancel,
    Resubmit,
    Rate {
        stakeholder: Stakeholder,
        metric: RatingMetric,
        rating: Rating,
    },
    GenerationCompleted { id: RequestId, blueprint: Blueprint },
}

/// Work the host performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Generate(GenerationRequest),
    CancelGeneration(RequestId),
    Notify(Notice),
}

/// User-facing outcome of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ValidationFailed(Vec<ScenarioField>),
    ScenarioCreated(ScenarioId),
    ScenarioSelected(ScenarioId),
    ScenarioSaved(ScenarioId),
    EditsDiscarded(ScenarioId),
    EditStarted(ScenarioId),
    FormReset,
    Regenerating,
    BlueprintReady(String),
    Rated {
        stakeholder: Stakeholder,
        metric: RatingMetric,
        rating: Rating,
    },
    Rejected(Rejection),
}

/// Reasons an event was ignored in the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    FinishEditingFirst,
    ReadOnly,
    NotEditingSaved,
    NotDrafting,
    NothingSelected,
    UnknownScenario(ScenarioId),
    RatingUnavailable,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::FinishEditingFirst => {
                write!(f, "Save or cancel the scenario you are editing first")
            }
            Rejection::ReadOnly => write!(f, "Fields are read-only; use `edit` to change them"),
            Rejection::NotEditingSaved => write!(f, "No saved scenario is being edited"),
            Rejection::NotDrafting => {
                write!(f, "Submit applies to new scenarios; use `save` or `resubmit`")
            }
            Rejection::NothingSelected => write!(f, "Select a scenario first"),
            Rejection::UnknownScenario(id) => write!(f, "No scenario with id `{id}`"),
            Rejection::RatingUnavailable => {
                write!(f, "Ratings can only be changed on a blueprint while editing")
            }
        }
    }
}

/// Complete in-memory state of one form session.
pub struct BlueprintView {
    user: User,
    clock: Arc<dyn Clock>,
    mode: ViewMode,
    fields: ScenarioFields,
    errors: ValidationErrors,
    scenarios: Vec<Scenario>,
    blueprint: Option<Blueprint>,
    pending: Option<RequestId>,
    // Blueprint (or pending request) was built from unsaved edits.
    previewing: bool,
    next_request: RequestId,
    last_issued_millis: i64,
}

impl BlueprintView {
    pub fn new(user: User, clock: Arc<dyn Clock>) -> Self {
        Self {
            user,
            clock,
            mode: ViewMode::NewEmpty,
            fields: ScenarioFields::default(),
            errors: ValidationErrors::default(),
            scenarios: Vec::new(),
            blueprint: None,
            pending: None,
            previewing: false,
            next_request: 1,
            last_issued_millis: i64::MIN,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn fields(&self) -> &ScenarioFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id() == id)
    }

    /// Scenario being viewed or edited, if any.
    pub fn selected_id(&self) -> Option<&ScenarioId> {
        match &self.mode {
            ViewMode::Viewing(id) => Some(id),
            ViewMode::Editing { target } => target.as_ref(),
            ViewMode::NewEmpty => None,
        }
    }

    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.blueprint.as_ref()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ViewMode::Editing { .. })
    }

    /// True when every required field holds non-blank text.
    pub fn submission_ready(&self) -> bool {
        validate(&self.fields).is_empty()
    }

    pub fn can_rate(&self) -> bool {
        self.blueprint.is_some() && self.is_editing()
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        tracing::debug!(mode = self.mode.label(), ?event, "applying view event");
        let mut effects = Vec::new();
        match event {
            Event::FieldChanged { field, value } => self.change_field(field, value, &mut effects),
            Event::SelectScenario(id) => self.select(id, &mut effects),
            Event::CreateNew => self.create_new(&mut effects),
            Event::Submit => self.submit(&mut effects),
            Event::BeginEdit => self.begin_edit(&mut effects),
            Event::Save => self.save(&mut effects),
            Event::Cancel => self.cancel(&mut effects),
            Event::Resubmit => self.resubmit(&mut effects),
            Event::Rate {
                stakeholder,
                metric,
                rating,
            } => self.rate(stakeholder, metric, rating, &mut effects),
            Event::GenerationCompleted { id, blueprint } => {
                self.complete_generation(id, blueprint, &mut effects)
            }
        }
        effects
    }

    fn change_field(&mut self, field: ScenarioField, value: String, effects: &mut Vec<Effect>) {
        if matches!(self.mode, ViewMode::Viewing(_)) {
            reject(effects, Rejection::ReadOnly);
            return;
        }
        if self.mode == ViewMode::NewEmpty {
            self.mode = ViewMode::Editing { target: None };
        }
        self.fields.set(field, value);
        self.errors.clear_field(field);
    }

    fn select(&mut self, id: ScenarioId, effects: &mut Vec<Effect>) {
        if self.is_mid_edit() {
            reject(effects, Rejection::FinishEditingFirst);
            return;
        }
        let Some(stored) = self.scenario(&id).map(|scenario| scenario.fields.clone()) else {
            reject(effects, Rejection::UnknownScenario(id));
            return;
        };
        self.fields = stored;
        self.errors.clear();
        self.mode = ViewMode::Viewing(id.clone());
        effects.push(Effect::Notify(Notice::ScenarioSelected(id)));
        let fields = self.fields.clone();
        self.request_generation(fields, effects);
    }

    fn create_new(&mut self, effects: &mut Vec<Effect>) {
        if self.is_mid_edit() {
            reject(effects, Rejection::FinishEditingFirst);
            return;
        }
        if let Some(previous) = self.pending.take() {
            effects.push(Effect::CancelGeneration(previous));
        }
        self.fields = ScenarioFields::default();
        self.errors.clear();
        self.blueprint = None;
        self.previewing = false;
        self.mode = ViewMode::Editing { target: None };
        effects.push(Effect::Notify(Notice::FormReset));
    }

    fn submit(&mut self, effects: &mut Vec<Effect>) {
        match self.mode {
            ViewMode::NewEmpty | ViewMode::Editing { target: None } => {}
            ViewMode::Editing { target: Some(_) } => {
                reject(effects, Rejection::NotDrafting);
                return;
            }
            ViewMode::Viewing(_) => {
                reject(effects, Rejection::ReadOnly);
                return;
            }
        }
        if !self.run_validation(effects) {
            return;
        }
        let id = self.next_scenario_id();
        self.scenarios.push(Scenario::new(id.clone(), self.fields.clone()));
        tracing::info!(scenario_id = %id, "scenario created");
        self.mode = ViewMode::Viewing(id.clone());
        effects.push(Effect::Notify(Notice::ScenarioCreated(id)));
        let fields = self.fields.clone();
        self.request_generation(fields, effects);
    }

    fn begin_edit(&mut self, effects: &mut Vec<Effect>) {
        match &self.mode {
            ViewMode::Viewing(id) => {
                let id = id.clone();
                self.mode = ViewMode::Editing {
                    target: Some(id.clone()),
                };
                effects.push(Effect::Notify(Notice::EditStarted(id)));
            }
            ViewMode::Editing { target: Some(_) } => {}
            ViewMode::NewEmpty | ViewMode::Editing { target: None } => {
                reject(effects, Rejection::NothingSelected)
            }
        }
    }

    /// Persists edits in place. The blueprint is left as it was.
    fn save(&mut self, effects: &mut Vec<Effect>) {
        let Some(id) = self.editing_target() else {
            reject(effects, Rejection::NotEditingSaved);
            return;
        };
        if !self.run_validation(effects) {
            return;
        }
        let fields = self.fields.clone();
        match self.scenarios.iter_mut().find(|scenario| scenario.id == id) {
            Some(scenario) => scenario.fields = fields,
            None => {
                reject(effects, Rejection::UnknownScenario(id));
                return;
            }
        }
        tracing::info!(scenario_id = %id, "scenario saved");
        self.previewing = false;
        self.mode = ViewMode::Viewing(id.clone());
        effects.push(Effect::Notify(Notice::ScenarioSaved(id)));
    }

    /// Restores the stored values. A blueprint previewed from the discarded
    /// edits is replaced by one generated from the stored values.
    fn cancel(&mut self, effects: &mut Vec<Effect>) {
        let Some(id) = self.editing_target() else {
            reject(effects, Rejection::NotEditingSaved);
            return;
        };
        if let Some(stored) = self.scenario(&id).map(|scenario| scenario.fields.clone()) {
            self.fields = stored;
        }
        self.errors.clear();
        self.mode = ViewMode::Viewing(id.clone());
        effects.push(Effect::Notify(Notice::EditsDiscarded(id)));
        if self.previewing {
            effects.push(Effect::Notify(Notice::Regenerating));
            let fields = self.fields.clone();
            self.request_generation(fields, effects);
        }
    }

    /// Regenerates from the unsaved field values without storing them.
    fn resubmit(&mut self, effects: &mut Vec<Effect>) {
        if self.editing_target().is_none() {
            reject(effects, Rejection::NotEditingSaved);
            return;
        }
        if !self.run_validation(effects) {
            return;
        }
        effects.push(Effect::Notify(Notice::Regenerating));
        let fields = self.fields.clone();
        self.request_generation(fields, effects);
        self.previewing = true;
    }

    fn rate(
        &mut self,
        stakeholder: Stakeholder,
        metric: RatingMetric,
        rating: Rating,
        effects: &mut Vec<Effect>,
    ) {
        let editing = self.is_editing();
        match self.blueprint.as_mut() {
            Some(blueprint) if editing => {
                blueprint.set_rating(stakeholder, metric, rating);
                effects.push(Effect::Notify(Notice::Rated {
                    stakeholder,
                    metric,
                    rating,
                }));
            }
            _ => reject(effects, Rejection::RatingUnavailable),
        }
    }

    fn complete_generation(
        &mut self,
        id: RequestId,
        blueprint: Blueprint,
        effects: &mut Vec<Effect>,
    ) {
        if self.pending != Some(id) {
            tracing::debug!(
                request_id = id,
                pending = ?self.pending,
                "dropping stale generation result"
            );
            return;
        }
        self.pending = None;
        let title = blueprint.scenario_title.clone();
        self.blueprint = Some(blueprint);
        tracing::info!(request_id = id, "blueprint ready");
        effects.push(Effect::Notify(Notice::BlueprintReady(title)));
    }

    fn request_generation(&mut self, fields: ScenarioFields, effects: &mut Vec<Effect>) {
        if let Some(previous) = self.pending.take() {
            effects.push(Effect::CancelGeneration(previous));
        }
        let id = self.next_request;
        self.next_request += 1;
        self.pending = Some(id);
        self.previewing = false;
        self.blueprint = None;
        effects.push(Effect::Generate(GenerationRequest { id, fields }));
    }

    fn run_validation(&mut self, effects: &mut Vec<Effect>) -> bool {
        self.errors = validate(&self.fields);
        if self.errors.is_empty() {
            true
        } else {
            effects.push(Effect::Notify(Notice::ValidationFailed(self.errors.fields())));
            false
        }
    }

    fn editing_target(&self) -> Option<ScenarioId> {
        match &self.mode {
            ViewMode::Editing { target: Some(id) } => Some(id.clone()),
            _ => None,
        }
    }

    fn is_mid_edit(&self) -> bool {
        matches!(self.mode, ViewMode::Editing { target: Some(_) })
    }

    /// Timestamp-based id, bumped past the last one issued so ids never repeat.
    fn next_scenario_id(&mut self) -> ScenarioId {
        let millis = self
            .clock
            .now_millis()
            .max(self.last_issued_millis.saturating_add(1));
        self.last_issued_millis = millis;
        ScenarioId::from_millis(millis)
    }
}

fn reject(effects: &mut Vec<Effect>, rejection: Rejection) {
    tracing::debug!(%rejection, "event rejected");
    effects.push(Effect::Notify(Notice::Rejected(rejection)));
}
