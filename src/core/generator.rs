//! Blueprint content generation.
//!
//! [`BlueprintGenerator`] is the seam where a real content backend would plug
//! in. The shipped [`TemplateGenerator`] fills a fixed home-care journey with
//! three values taken from the submitted form: the scenario title, a narrative
//! sentence naming the client, provider and company, and a licensing entry for
//! the selected state. Everything else is constant.

use once_cell::sync::Lazy;

use crate::domain::{
    Blueprint, Milestone, Rating, ScenarioFields, StakeholderProfile, Stakeholders,
};

/// Produces a blueprint from submitted scenario fields.
pub trait BlueprintGenerator: Send + Sync {
    fn generate(&self, fields: &ScenarioFields) -> Blueprint;
}

/// Fixed-template generator used until a real backend exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateGenerator;

impl BlueprintGenerator for TemplateGenerator {
    fn generate(&self, fields: &ScenarioFields) -> Blueprint {
        let mut blueprint = TEMPLATE.clone();
        blueprint.scenario_title = fields.scenario_name.clone();
        blueprint.description = narrative(fields);
        blueprint
            .regulations
            .insert(0, format!("{} PT licensing requirements", fields.state));
        blueprint
    }
}

fn narrative(fields: &ScenarioFields) -> String {
    format!(
        "{} receives in-home {} care coordinated by {}.",
        fields.client, fields.care_provider, fields.care_company
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn profile(
    goals: &[&str],
    pain_points: &[&str],
    severity: u8,
    experience: u8,
) -> StakeholderProfile {
    StakeholderProfile {
        goals: strings(goals),
        pain_points: strings(pain_points),
        pain_point_severity: Rating::saturating(severity),
        experience_level: Rating::saturating(experience),
    }
}

/// Constant part of every blueprint; per-request fields are left blank.
static TEMPLATE: Lazy<Blueprint> = Lazy::new(|| Blueprint {
    scenario_title: String::new(),
    description: String::new(),
    stakeholders: Stakeholders {
        client: profile(
            &[
                "Regain independent mobility at home",
                "Understand the plan of care",
                "Keep out-of-pocket costs predictable",
            ],
            &[
                "Long wait before the first visit",
                "Confusing insurance authorization",
                "Little feedback on progress",
            ],
            4,
            2,
        ),
        care_provider: profile(
            &[
                "Deliver evidence-based sessions",
                "Document visits without duplicate entry",
            ],
            &[
                "Travel time between home visits",
                "Incomplete referral information",
            ],
            3,
            4,
        ),
        care_company: profile(
            &[
                "Fill referrals quickly",
                "Stay compliant with payer and state rules",
                "Retain qualified clinicians",
            ],
            &[
                "Manual scheduling and authorization tracking",
                "Denied claims from missing documentation",
            ],
            3,
            3,
        ),
    },
    timeline: vec![
        Milestone {
            phase: "Referral".into(),
            description: "Physician order received and intake started".into(),
        },
        Milestone {
            phase: "Authorization".into(),
            description: "Insurance eligibility verified and visits approved".into(),
        },
        Milestone {
            phase: "Evaluation".into(),
            description: "Initial in-home assessment and plan of care".into(),
        },
        Milestone {
            phase: "Treatment".into(),
            description: "Scheduled sessions with progress notes".into(),
        },
        Milestone {
            phase: "Reassessment".into(),
            description: "Goals reviewed and plan adjusted".into(),
        },
        Milestone {
            phase: "Discharge".into(),
            description: "Home exercise program and follow-up".into(),
        },
    ],
    communications: strings(&[
        "Phone call to schedule the first visit",
        "Text message visit reminders",
        "Patient portal messages",
        "Printed home exercise handouts",
    ]),
    technology: strings(&[
        "Electronic health record",
        "Scheduling and routing software",
        "Mobile visit documentation app",
        "Telehealth check-ins",
    ]),
    insurance: strings(&[
        "Medicare Part B",
        "Medicaid managed care",
        "Commercial insurance prior authorization",
    ]),
    social_determinants: strings(&[
        "Transportation access",
        "Caregiver availability",
        "Home safety and accessibility",
        "Health literacy",
    ]),
    regulations: strings(&[
        "HIPAA privacy and security rules",
        "Medicare home health conditions of participation",
        "Plan of care recertification every 60 days",
    ]),
    opportunities: strings(&[
        "Automate insurance eligibility checks at intake",
        "Share a visit schedule with the client and caregiver",
        "Track functional outcomes between sessions",
        "Optimize clinician routes to cut travel time",
    ]),
});
