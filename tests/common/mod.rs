#![allow(dead_code)]

use std::sync::Arc;

use blueprint_builder::{
    core::{BlueprintView, Effect, Event, GenerationRequest, ManualClock, Notice, Rejection},
    domain::{ScenarioField, ScenarioFields},
    session::User,
};
use chrono::{TimeZone, Utc};

/// Fixed start instant so ids are predictable.
pub const START_MILLIS: i64 = 1_735_689_600_000;

pub fn manual_clock() -> Arc<ManualClock> {
    let start = Utc
        .timestamp_millis_opt(START_MILLIS)
        .single()
        .expect("valid start instant");
    Arc::new(ManualClock::new(start))
}

pub fn view_with_clock(clock: Arc<ManualClock>) -> BlueprintView {
    BlueprintView::new(User::new("tester"), clock)
}

pub fn fresh_view() -> BlueprintView {
    view_with_clock(manual_clock())
}

pub fn texas_fields() -> ScenarioFields {
    ScenarioFields::default()
        .with(ScenarioField::ScenarioName, "Test")
        .with(ScenarioField::CareCompany, "Homecare Professional")
        .with(ScenarioField::CareProvider, "PT")
        .with(ScenarioField::Client, "Jane Doe")
        .with(ScenarioField::State, "Texas")
        .with(ScenarioField::ServiceDescription, "PT sessions")
}

pub fn fill(view: &mut BlueprintView, fields: &ScenarioFields) {
    for field in ScenarioField::ALL {
        view.apply(Event::FieldChanged {
            field,
            value: fields.get(field).to_string(),
        });
    }
}

pub fn generation_requests(effects: &[Effect]) -> Vec<GenerationRequest> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Generate(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

pub fn rejections(effects: &[Effect]) -> Vec<Rejection> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(Notice::Rejected(rejection)) => Some(rejection.clone()),
            _ => None,
        })
        .collect()
}

/// Submits `fields` and returns the single generation request it issued.
pub fn submit(view: &mut BlueprintView, fields: &ScenarioFields) -> GenerationRequest {
    fill(view, fields);
    let effects = view.apply(Event::Submit);
    let mut requests = generation_requests(&effects);
    assert_eq!(requests.len(), 1, "submit should request one generation");
    requests.remove(0)
}

/// Completes `request` synchronously with the template generator.
pub fn complete(view: &mut BlueprintView, request: &GenerationRequest) -> Vec<Effect> {
    use blueprint_builder::core::{BlueprintGenerator, TemplateGenerator};
    view.apply(Event::GenerationCompleted {
        id: request.id,
        blueprint: TemplateGenerator.generate(&request.fields),
    })
}
