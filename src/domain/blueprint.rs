use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BlueprintError;

use super::rating::{Rating, RatingMetric};

/// Generated service journey shown beneath the scenario form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub scenario_title: String,
    pub description: String,
    pub stakeholders: Stakeholders,
    pub timeline: Vec<Milestone>,
    pub communications: Vec<String>,
    pub technology: Vec<String>,
    pub insurance: Vec<String>,
    pub social_determinants: Vec<String>,
    pub regulations: Vec<String>,
    pub opportunities: Vec<String>,
}

impl Blueprint {
    pub fn stakeholder(&self, who: Stakeholder) -> &StakeholderProfile {
        self.stakeholders.get(who)
    }

    pub fn rating(&self, who: Stakeholder, metric: RatingMetric) -> Rating {
        let profile = self.stakeholders.get(who);
        match metric {
            RatingMetric::PainPointSeverity => profile.pain_point_severity,
            RatingMetric::ExperienceLevel => profile.experience_level,
        }
    }

    pub fn set_rating(&mut self, who: Stakeholder, metric: RatingMetric, rating: Rating) {
        let profile = self.stakeholders.get_mut(who);
        match metric {
            RatingMetric::PainPointSeverity => profile.pain_point_severity = rating,
            RatingMetric::ExperienceLevel => profile.experience_level = rating,
        }
    }
}

/// The three parties whose journey the blueprint tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stakeholder {
    Client,
    CareProvider,
    CareCompany,
}

impl Stakeholder {
    pub const ALL: [Stakeholder; 3] = [
        Stakeholder::Client,
        Stakeholder::CareProvider,
        Stakeholder::CareCompany,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stakeholder::Client => "Client",
            Stakeholder::CareProvider => "Care Provider",
            Stakeholder::CareCompany => "Care Company",
        }
    }
}

impl fmt::Display for Stakeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stakeholder {
    type Err = BlueprintError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Stakeholder::Client),
            "provider" | "careprovider" | "care-provider" => Ok(Stakeholder::CareProvider),
            "company" | "carecompany" | "care-company" => Ok(Stakeholder::CareCompany),
            other => Err(BlueprintError::InvalidInput(format!(
                "unknown stakeholder `{other}` (use client, provider or company)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholders {
    pub client: StakeholderProfile,
    pub care_provider: StakeholderProfile,
    pub care_company: StakeholderProfile,
}

impl Stakeholders {
    pub fn get(&self, who: Stakeholder) -> &StakeholderProfile {
        match who {
            Stakeholder::Client => &self.client,
            Stakeholder::CareProvider => &self.care_provider,
            Stakeholder::CareCompany => &self.care_company,
        }
    }

    pub fn get_mut(&mut self, who: Stakeholder) -> &mut StakeholderProfile {
        match who {
            Stakeholder::Client => &mut self.client,
            Stakeholder::CareProvider => &mut self.care_provider,
            Stakeholder::CareCompany => &mut self.care_company,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderProfile {
    pub goals: Vec<String>,
    pub pain_points: Vec<String>,
    pub pain_point_severity: Rating,
    pub experience_level: Rating,
}

/// One step of the care timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub phase: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stakeholder_parsing_accepts_short_names() {
        assert_eq!(
            "provider".parse::<Stakeholder>().unwrap(),
            Stakeholder::CareProvider
        );
        assert_eq!(
            "Company".parse::<Stakeholder>().unwrap(),
            Stakeholder::CareCompany
        );
        assert!("payer".parse::<Stakeholder>().is_err());
    }
}
