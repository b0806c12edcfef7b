mod common;

use blueprint_builder::{
    core::{Effect, Event, Notice, Rejection, ViewMode},
    domain::{Rating, RatingMetric, ScenarioField, ScenarioFields, Stakeholder},
};
use chrono::Duration;
use regex::Regex;

use common::{
    complete, fill, fresh_view, generation_requests, manual_clock, rejections, submit,
    texas_fields, view_with_clock,
};

#[test]
fn blank_field_blocks_submission_with_its_own_message() {
    for blank in ScenarioField::ALL {
        let mut view = fresh_view();
        let fields = texas_fields().with(blank, "   ");
        fill(&mut view, &fields);

        let effects = view.apply(Event::Submit);

        assert!(generation_requests(&effects).is_empty(), "{blank} blank");
        assert_eq!(view.errors().len(), 1);
        assert_eq!(view.errors().get(blank), Some(blank.required_message()));
        assert!(view.scenarios().is_empty());
        assert!(effects.contains(&Effect::Notify(Notice::ValidationFailed(vec![blank]))));
    }
}

#[test]
fn editing_a_field_clears_only_that_error() {
    let mut view = fresh_view();
    view.apply(Event::Submit);
    assert_eq!(view.errors().len(), 6);

    view.apply(Event::FieldChanged {
        field: ScenarioField::Client,
        value: "Jane Doe".into(),
    });

    assert!(!view.errors().contains(ScenarioField::Client));
    assert_eq!(view.errors().len(), 5);
    assert_eq!(
        view.errors().get(ScenarioField::State),
        Some("State is required")
    );
}

#[test]
fn submission_creates_scenario_and_requests_generation() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());

    assert_eq!(view.scenarios().len(), 1);
    let id = view.scenarios()[0].id.clone();
    assert_eq!(view.mode(), &ViewMode::Viewing(id));
    assert!(view.is_generating());
    assert!(view.blueprint().is_none());
    assert_eq!(request.fields, texas_fields());

    complete(&mut view, &request);
    let blueprint = view.blueprint().expect("blueprint after completion");
    assert_eq!(blueprint.scenario_title, "Test");
    assert!(blueprint
        .regulations
        .iter()
        .any(|line| line == "Texas PT licensing requirements"));
    assert!(!view.is_generating());
}

#[test]
fn selecting_a_saved_scenario_repopulates_fields() {
    let mut view = fresh_view();
    let first = submit(&mut view, &texas_fields());
    complete(&mut view, &first);

    let ohio = ScenarioFields::default()
        .with(ScenarioField::ScenarioName, "Ohio rehab")
        .with(ScenarioField::CareCompany, "Buckeye Care")
        .with(ScenarioField::CareProvider, "OT")
        .with(ScenarioField::Client, "Sam Lee")
        .with(ScenarioField::State, "Ohio")
        .with(ScenarioField::ServiceDescription, "OT visits");
    view.apply(Event::CreateNew);
    let second = submit(&mut view, &ohio);
    complete(&mut view, &second);

    let texas_id = view.scenarios()[0].id.clone();
    let effects = view.apply(Event::SelectScenario(texas_id.clone()));

    assert_eq!(view.fields(), &texas_fields());
    assert_eq!(view.mode(), &ViewMode::Viewing(texas_id));
    let requests = generation_requests(&effects);
    assert_eq!(requests.len(), 1);
    complete(&mut view, &requests[0]);
    assert_eq!(view.blueprint().map(|b| b.scenario_title.as_str()), Some("Test"));
}

#[test]
fn viewing_mode_is_read_only() {
    let mut view = fresh_view();
    submit(&mut view, &texas_fields());

    let effects = view.apply(Event::FieldChanged {
        field: ScenarioField::State,
        value: "Ohio".into(),
    });

    assert_eq!(rejections(&effects), vec![Rejection::ReadOnly]);
    assert_eq!(view.fields().state, "Texas");
}

#[test]
fn ratings_change_only_while_editing_with_a_blueprint() {
    let mut view = fresh_view();
    let rate = Event::Rate {
        stakeholder: Stakeholder::Client,
        metric: RatingMetric::PainPointSeverity,
        rating: Rating::new(1).unwrap(),
    };

    // No blueprint yet.
    let effects = view.apply(rate.clone());
    assert_eq!(rejections(&effects), vec![Rejection::RatingUnavailable]);

    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);
    let before = view.blueprint().cloned();

    // Viewing: blueprint present but read-only.
    let effects = view.apply(rate.clone());
    assert_eq!(rejections(&effects), vec![Rejection::RatingUnavailable]);
    assert_eq!(view.blueprint().cloned(), before);

    view.apply(Event::BeginEdit);
    assert!(view.can_rate());
    view.apply(rate);
    let blueprint = view.blueprint().expect("blueprint");
    assert_eq!(
        blueprint.rating(Stakeholder::Client, RatingMetric::PainPointSeverity),
        Rating::new(1).unwrap()
    );
    assert_eq!(
        blueprint.rating(Stakeholder::Client, RatingMetric::ExperienceLevel),
        Rating::new(2).unwrap()
    );
}

#[test]
fn create_new_resets_fields_and_blueprint() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);

    view.apply(Event::CreateNew);

    assert!(view.fields().is_empty());
    assert!(view.errors().is_empty());
    assert!(view.blueprint().is_none());
    assert_eq!(view.mode(), &ViewMode::Editing { target: None });
    assert_eq!(view.scenarios().len(), 1);
}

#[test]
fn create_new_cancels_pending_generation() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());

    let effects = view.apply(Event::CreateNew);

    assert!(effects.contains(&Effect::CancelGeneration(request.id)));
    assert!(!view.is_generating());
    complete(&mut view, &request);
    assert!(view.blueprint().is_none());
}

#[test]
fn save_persists_without_regenerating() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);
    let id = view.scenarios()[0].id.clone();

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::State,
        value: "Ohio".into(),
    });
    let effects = view.apply(Event::Save);

    assert!(generation_requests(&effects).is_empty());
    assert_eq!(view.scenario(&id).map(|s| s.fields.state.as_str()), Some("Ohio"));
    assert_eq!(view.mode(), &ViewMode::Viewing(id));
    let blueprint = view.blueprint().expect("blueprint kept");
    assert!(blueprint
        .regulations
        .contains(&"Texas PT licensing requirements".to_string()));
}

#[test]
fn resubmit_regenerates_without_persisting() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);
    let id = view.scenarios()[0].id.clone();

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::State,
        value: "Ohio".into(),
    });
    let effects = view.apply(Event::Resubmit);

    let requests = generation_requests(&effects);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].fields.state, "Ohio");
    assert_eq!(view.scenario(&id).map(|s| s.fields.state.as_str()), Some("Texas"));
    assert_eq!(view.mode(), &ViewMode::Editing { target: Some(id) });

    complete(&mut view, &requests[0]);
    assert!(view
        .blueprint()
        .expect("regenerated")
        .regulations
        .contains(&"Ohio PT licensing requirements".to_string()));
}

#[test]
fn cancel_restores_stored_values() {
    let mut view = fresh_view();
    submit(&mut view, &texas_fields());
    let id = view.scenarios()[0].id.clone();

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::Client,
        value: "Someone Else".into(),
    });
    view.apply(Event::Cancel);

    assert_eq!(view.fields(), &texas_fields());
    assert_eq!(view.mode(), &ViewMode::Viewing(id));
}

#[test]
fn save_with_blank_field_keeps_stored_record() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);
    let id = view.scenarios()[0].id.clone();

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::State,
        value: "  ".into(),
    });
    let effects = view.apply(Event::Save);

    assert!(generation_requests(&effects).is_empty());
    assert!(effects.contains(&Effect::Notify(Notice::ValidationFailed(vec![
        ScenarioField::State
    ]))));
    assert_eq!(view.errors().fields(), vec![ScenarioField::State]);
    assert_eq!(view.scenario(&id).map(|s| &s.fields), Some(&texas_fields()));
    assert_eq!(view.mode(), &ViewMode::Editing { target: Some(id) });
}

#[test]
fn resubmit_with_blank_field_keeps_blueprint() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);
    let id = view.scenarios()[0].id.clone();
    let before = view.blueprint().cloned();

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::ServiceDescription,
        value: String::new(),
    });
    let effects = view.apply(Event::Resubmit);

    assert!(generation_requests(&effects).is_empty());
    assert!(!effects.contains(&Effect::Notify(Notice::Regenerating)));
    assert_eq!(view.errors().fields(), vec![ScenarioField::ServiceDescription]);
    assert!(view.pending_request().is_none());
    assert_eq!(view.blueprint().cloned(), before);
    assert_eq!(view.scenario(&id).map(|s| &s.fields), Some(&texas_fields()));
    assert_eq!(view.mode(), &ViewMode::Editing { target: Some(id) });
}

#[test]
fn cancel_supersedes_pending_resubmit() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::State,
        value: "Ohio".into(),
    });
    let preview = generation_requests(&view.apply(Event::Resubmit)).remove(0);
    let effects = view.apply(Event::Cancel);

    assert!(effects.contains(&Effect::CancelGeneration(preview.id)));
    let restored = generation_requests(&effects);
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].fields, texas_fields());

    complete(&mut view, &preview);
    assert!(view.blueprint().is_none());
    complete(&mut view, &restored[0]);
    let regulations = &view.blueprint().expect("regenerated").regulations;
    assert!(regulations.contains(&"Texas PT licensing requirements".to_string()));
    assert!(!regulations.contains(&"Ohio PT licensing requirements".to_string()));
}

#[test]
fn cancel_after_finished_resubmit_restores_blueprint() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::State,
        value: "Ohio".into(),
    });
    let preview = generation_requests(&view.apply(Event::Resubmit)).remove(0);
    complete(&mut view, &preview);
    let effects = view.apply(Event::Cancel);

    let restored = generation_requests(&effects);
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].fields.state, "Texas");
    complete(&mut view, &restored[0]);
    assert!(view
        .blueprint()
        .expect("regenerated")
        .regulations
        .contains(&"Texas PT licensing requirements".to_string()));
}

#[test]
fn cancel_without_preview_keeps_blueprint() {
    let mut view = fresh_view();
    let request = submit(&mut view, &texas_fields());
    complete(&mut view, &request);
    let before = view.blueprint().cloned();

    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::Client,
        value: "Someone Else".into(),
    });
    let effects = view.apply(Event::Cancel);

    assert!(generation_requests(&effects).is_empty());
    assert_eq!(view.blueprint().cloned(), before);
}

#[test]
fn switching_scenarios_mid_edit_is_rejected() {
    let mut view = fresh_view();
    submit(&mut view, &texas_fields());
    let id = view.scenarios()[0].id.clone();
    view.apply(Event::BeginEdit);

    let effects = view.apply(Event::SelectScenario(id.clone()));
    assert_eq!(rejections(&effects), vec![Rejection::FinishEditingFirst]);
    let effects = view.apply(Event::CreateNew);
    assert_eq!(rejections(&effects), vec![Rejection::FinishEditingFirst]);
    assert_eq!(view.mode(), &ViewMode::Editing { target: Some(id) });
}

#[test]
fn superseded_generation_never_overwrites_blueprint() {
    let mut view = fresh_view();
    let first = submit(&mut view, &texas_fields());
    view.apply(Event::BeginEdit);
    view.apply(Event::FieldChanged {
        field: ScenarioField::ScenarioName,
        value: "Renamed".into(),
    });
    let effects = view.apply(Event::Resubmit);
    assert!(effects.contains(&Effect::CancelGeneration(first.id)));
    let second = generation_requests(&effects).remove(0);

    let late = complete(&mut view, &first);
    assert!(late.is_empty());
    assert!(view.blueprint().is_none());
    assert_eq!(view.pending_request(), Some(second.id));

    complete(&mut view, &second);
    assert_eq!(
        view.blueprint().map(|b| b.scenario_title.as_str()),
        Some("Renamed")
    );
}

#[test]
fn scenario_ids_are_timestamps_and_strictly_increase() {
    let clock = manual_clock();
    let mut view = view_with_clock(clock.clone());
    let pattern = Regex::new(r"^\d{13}$").unwrap();

    submit(&mut view, &texas_fields());
    view.apply(Event::CreateNew);
    submit(&mut view, &texas_fields());
    clock.advance(Duration::milliseconds(250));
    view.apply(Event::CreateNew);
    submit(&mut view, &texas_fields());

    let ids: Vec<i64> = view
        .scenarios()
        .iter()
        .map(|scenario| {
            assert!(pattern.is_match(scenario.id.as_str()));
            scenario.id.millis().expect("numeric id")
        })
        .collect();
    assert_eq!(ids[0], common::START_MILLIS);
    assert_eq!(ids[1], common::START_MILLIS + 1);
    assert_eq!(ids[2], common::START_MILLIS + 250);
}

#[test]
fn unknown_scenario_selection_is_rejected() {
    let mut view = fresh_view();
    let effects = view.apply(Event::SelectScenario("42".into()));
    assert_eq!(
        rejections(&effects),
        vec![Rejection::UnknownScenario("42".into())]
    );
    assert_eq!(view.mode(), &ViewMode::NewEmpty);
}
