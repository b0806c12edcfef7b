//! Text renderings of the session header, the form and the blueprint.
//!
//! Each function is a pure view of state and returns a `String`; printing is
//! left to the caller.

use crate::cli::output::current_preferences;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::config::Config;
use crate::core::BlueprintView;
use crate::domain::{Blueprint, Rating, ScenarioField, Stakeholder};
use crate::session::SessionShell;

const FALLBACK_COLUMN_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_column_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_column_width: FALLBACK_COLUMN_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Configured width, or half the terminal when unset.
    pub fn from_config(config: &Config) -> Self {
        let max_column_width = config.max_column_width.unwrap_or_else(|| {
            crossterm::terminal::size()
                .map(|(cols, _)| usize::from(cols).saturating_sub(12) / 2)
                .unwrap_or(FALLBACK_COLUMN_WIDTH)
                .clamp(24, 80)
        });
        Self { max_column_width }
    }
}

pub fn header(shell: &SessionShell) -> String {
    let header = shell.header();
    let mut right = header.greeting;
    if header.show_sign_out {
        right.push_str("  [signout]");
    }
    let rule = if current_preferences().plain_mode {
        "="
    } else {
        "═"
    };
    let width = header.title.chars().count() + right.chars().count() + 4;
    format!(
        "{}\n{}    {}\n{}",
        rule.repeat(width),
        header.title,
        right,
        rule.repeat(width)
    )
}

/// Field values with any validation message on the line beneath.
pub fn form(view: &BlueprintView) -> String {
    let label_width = ScenarioField::ALL
        .iter()
        .map(|field| field.label().len())
        .max()
        .unwrap_or(0);
    let placeholder = if current_preferences().plain_mode {
        "-"
    } else {
        "—"
    };
    let mut lines = vec![format!("Scenario form ({})", view.mode().label())];
    for field in ScenarioField::ALL {
        let value = view.fields().get(field);
        let shown = if value.is_empty() { placeholder } else { value };
        lines.push(format!(
            "  {:<width$}  {}",
            field.label(),
            shown,
            width = label_width
        ));
        if let Some(message) = view.errors().get(field) {
            lines.push(format!("  {:<width$}  ! {}", "", message, width = label_width));
        }
    }
    let submit_state = if view.submission_ready() {
        "ready to submit"
    } else {
        "fill in all fields to submit"
    };
    lines.push(format!("  ({submit_state})"));
    lines.join("\n")
}

pub fn scenario_list(view: &BlueprintView, options: RenderOptions) -> String {
    if view.scenarios().is_empty() {
        return "No saved scenarios yet.".to_string();
    }
    let cap = options.max_column_width;
    let mut table = Table::new(vec![
        TableColumn::new("#").align(Alignment::Right),
        TableColumn::new("Scenario").max(cap),
        TableColumn::new("Care Company").max(cap),
        TableColumn::new("Provider").max(cap),
        TableColumn::new("State").max(cap),
        TableColumn::new("Id"),
    ]);
    let selected = view.selected_id();
    for (idx, scenario) in view.scenarios().iter().enumerate() {
        let marker = if selected == Some(&scenario.id) {
            "*"
        } else {
            ""
        };
        table.push_row(vec![
            format!("{marker}{}", idx + 1),
            scenario.fields.scenario_name.clone(),
            scenario.fields.care_company.clone(),
            scenario.fields.care_provider.clone(),
            scenario.fields.state.clone(),
            scenario.id.to_string(),
        ]);
    }
    table.render()
}

fn rating_cell(rating: Rating, editable: bool) -> String {
    let gauge = if current_preferences().plain_mode {
        rating.to_string()
    } else {
        format!("{} {}", rating.gauge(), rating)
    };
    if editable {
        format!("{gauge} (editable)")
    } else {
        gauge
    }
}

/// Goals and pain points are shown in full; the row grows to fit them.
fn stakeholder_table(blueprint: &Blueprint, editable: bool) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Stakeholder"),
        TableColumn::new("Goals"),
        TableColumn::new("Pain Points"),
        TableColumn::new("Severity"),
        TableColumn::new("Experience"),
    ]);
    for who in Stakeholder::ALL {
        let profile = blueprint.stakeholder(who);
        let depth = profile.goals.len().max(profile.pain_points.len()).max(1);
        for line in 0..depth {
            let first = line == 0;
            table.push_row(vec![
                if first { who.label().to_string() } else { String::new() },
                profile.goals.get(line).cloned().unwrap_or_default(),
                profile.pain_points.get(line).cloned().unwrap_or_default(),
                if first {
                    rating_cell(profile.pain_point_severity, editable)
                } else {
                    String::new()
                },
                if first {
                    rating_cell(profile.experience_level, editable)
                } else {
                    String::new()
                },
            ]);
        }
    }
    table
}

fn category_table(blueprint: &Blueprint, cap: usize) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Area"),
        TableColumn::new("Details").max(cap * 2).wrap(),
    ]);
    let sections: [(&str, &[String]); 6] = [
        ("Communications", blueprint.communications.as_slice()),
        ("Technology", blueprint.technology.as_slice()),
        ("Insurance", blueprint.insurance.as_slice()),
        ("Social Determinants", blueprint.social_determinants.as_slice()),
        ("Regulations", blueprint.regulations.as_slice()),
        ("Opportunities", blueprint.opportunities.as_slice()),
    ];
    for (area, items) in sections {
        for (idx, item) in items.iter().enumerate() {
            let label = if idx == 0 { area } else { "" };
            table.push_row(vec![label.to_string(), item.clone()]);
        }
    }
    table
}

/// Full blueprint: title, narrative, stakeholders, timeline and categories.
pub fn blueprint(blueprint: &Blueprint, editable: bool, options: RenderOptions) -> String {
    let cap = options.max_column_width;
    let mut timeline = Table::new(vec![
        TableColumn::new("Step").align(Alignment::Right),
        TableColumn::new("Phase"),
        TableColumn::new("Milestone").max(cap * 2).wrap(),
    ]);
    for (idx, milestone) in blueprint.timeline.iter().enumerate() {
        timeline.push_row(vec![
            (idx + 1).to_string(),
            milestone.phase.clone(),
            milestone.description.clone(),
        ]);
    }

    [
        format!("Blueprint: {}", blueprint.scenario_title),
        blueprint.description.clone(),
        String::new(),
        stakeholder_table(blueprint, editable).render(),
        String::new(),
        timeline.render(),
        String::new(),
        category_table(blueprint, cap).render(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::{BlueprintGenerator, Event, SystemClock, TemplateGenerator};
    use crate::domain::ScenarioFields;

    fn texas() -> ScenarioFields {
        ScenarioFields::default()
            .with(ScenarioField::ScenarioName, "Test")
            .with(ScenarioField::CareCompany, "Homecare Professional")
            .with(ScenarioField::CareProvider, "PT")
            .with(ScenarioField::Client, "Jane Doe")
            .with(ScenarioField::State, "Texas")
            .with(ScenarioField::ServiceDescription, "PT sessions")
    }

    #[test]
    fn blueprint_lists_every_section() {
        let bp = TemplateGenerator.generate(&texas());
        let text = blueprint(&bp, false, RenderOptions { max_column_width: 80 });
        for needle in [
            "Blueprint: Test",
            "Care Provider",
            "Referral",
            "Regulations",
            "Texas PT licensing requirements",
            "Opportunities",
        ] {
            assert!(text.contains(needle), "missing `{needle}`");
        }
        assert!(!text.contains("(editable)"));
    }

    #[test]
    fn editable_blueprint_marks_ratings() {
        let bp = TemplateGenerator.generate(&texas());
        let text = blueprint(&bp, true, RenderOptions::default());
        assert!(text.contains("(editable)"));
    }

    #[test]
    fn stakeholder_text_is_never_truncated() {
        let bp = TemplateGenerator.generate(&texas());
        let text = blueprint(&bp, false, RenderOptions { max_column_width: 34 });
        for who in Stakeholder::ALL {
            let profile = bp.stakeholder(who);
            for entry in profile.goals.iter().chain(&profile.pain_points) {
                assert!(text.contains(entry.as_str()), "cut short: `{entry}`");
            }
        }
        assert!(!text.contains('…'));
    }

    #[test]
    fn narrow_columns_wrap_details_instead_of_cutting() {
        let bp = TemplateGenerator.generate(&texas());
        let text = blueprint(&bp, false, RenderOptions { max_column_width: 24 });
        assert!(!text.contains('…'));
        assert!(text.contains("Share a visit schedule with the client and"));
        assert!(text.lines().any(|line| line.trim() == "caregiver"));
    }

    #[test]
    fn form_shows_messages_under_fields() {
        let mut view = BlueprintView::new(
            crate::session::User::new("tester"),
            Arc::new(SystemClock),
        );
        view.apply(Event::Submit);
        let text = form(&view);
        assert!(text.contains("! Client is required"));
        assert!(text.contains("fill in all fields to submit"));
    }
}
