use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BlueprintError;

use super::common::{Displayable, Identifiable, NamedEntity};

/// Timestamp-derived scenario identifier (milliseconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Millisecond value encoded in the identifier, when it is numeric.
    pub fn millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The six required inputs of the scenario form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioField {
    ScenarioName,
    CareCompany,
    CareProvider,
    Client,
    State,
    ServiceDescription,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 6] = [
        ScenarioField::ScenarioName,
        ScenarioField::CareCompany,
        ScenarioField::CareProvider,
        ScenarioField::Client,
        ScenarioField::State,
        ScenarioField::ServiceDescription,
    ];

    /// Stable camelCase key used in JSON and by the shell `set` command.
    pub fn key(self) -> &'static str {
        match self {
            ScenarioField::ScenarioName => "scenarioName",
            ScenarioField::CareCompany => "careCompany",
            ScenarioField::CareProvider => "careProvider",
            ScenarioField::Client => "client",
            ScenarioField::State => "state",
            ScenarioField::ServiceDescription => "serviceDescription",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScenarioField::ScenarioName => "Scenario Name",
            ScenarioField::CareCompany => "Care Company",
            ScenarioField::CareProvider => "Care Provider",
            ScenarioField::Client => "Client",
            ScenarioField::State => "State",
            ScenarioField::ServiceDescription => "Service Description",
        }
    }

    /// Inline message shown when the field is left blank.
    pub fn required_message(self) -> &'static str {
        match self {
            ScenarioField::ScenarioName => "Scenario name is required",
            ScenarioField::CareCompany => "Care company is required",
            ScenarioField::CareProvider => "Care provider is required",
            ScenarioField::Client => "Client is required",
            ScenarioField::State => "State is required",
            ScenarioField::ServiceDescription => "Service description is required",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ScenarioField::ScenarioName => &["name", "scenario", "scenario-name", "scenario_name"],
            ScenarioField::CareCompany => &["company", "care-company", "care_company"],
            ScenarioField::CareProvider => &["provider", "care-provider", "care_provider"],
            ScenarioField::Client => &[],
            ScenarioField::State => &["jurisdiction"],
            ScenarioField::ServiceDescription => &[
                "service",
                "description",
                "service-description",
                "service_description",
            ],
        }
    }
}

impl fmt::Display for ScenarioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioField {
    type Err = BlueprintError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim().to_ascii_lowercase();
        ScenarioField::ALL
            .into_iter()
            .find(|field| {
                field.key().eq_ignore_ascii_case(&needle)
                    || field.aliases().contains(&needle.as_str())
            })
            .ok_or_else(|| BlueprintError::UnknownField(input.trim().to_string()))
    }
}

/// Raw values of the scenario form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFields {
    pub scenario_name: String,
    pub care_company: String,
    pub care_provider: String,
    pub client: String,
    pub state: String,
    pub service_description: String,
}

impl ScenarioFields {
    pub fn get(&self, field: ScenarioField) -> &str {
        match field {
            ScenarioField::ScenarioName => &self.scenario_name,
            ScenarioField::CareCompany => &self.care_company,
            ScenarioField::CareProvider => &self.care_provider,
            ScenarioField::Client => &self.client,
            ScenarioField::State => &self.state,
            ScenarioField::ServiceDescription => &self.service_description,
        }
    }

    pub fn set(&mut self, field: ScenarioField, value: impl Into<String>) {
        let slot = match field {
            ScenarioField::ScenarioName => &mut self.scenario_name,
            ScenarioField::CareCompany => &mut self.care_company,
            ScenarioField::CareProvider => &mut self.care_provider,
            ScenarioField::Client => &mut self.client,
            ScenarioField::State => &mut self.state,
            ScenarioField::ServiceDescription => &mut self.service_description,
        };
        *slot = value.into();
    }

    /// Builder-style setter used by tests and the form wizard.
    pub fn with(mut self, field: ScenarioField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        ScenarioField::ALL
            .iter()
            .all(|field| self.get(*field).is_empty())
    }
}

/// A saved, user-authored description of a care situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    #[serde(flatten)]
    pub fields: ScenarioFields,
}

impl Scenario {
    pub fn new(id: ScenarioId, fields: ScenarioFields) -> Self {
        Self { id, fields }
    }
}

impl Identifiable for Scenario {
    fn id(&self) -> &ScenarioId {
        &self.id
    }
}

impl NamedEntity for Scenario {
    fn name(&self) -> &str {
        &self.fields.scenario_name
    }
}

impl Displayable for Scenario {
    fn display_label(&self) -> String {
        format!(
            "{} ({} / {}, {})",
            self.fields.scenario_name,
            self.fields.care_company,
            self.fields.care_provider,
            self.fields.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parsing_accepts_keys_and_aliases() {
        assert_eq!(
            "careProvider".parse::<ScenarioField>().unwrap(),
            ScenarioField::CareProvider
        );
        assert_eq!(
            "provider".parse::<ScenarioField>().unwrap(),
            ScenarioField::CareProvider
        );
        assert_eq!(
            "SERVICE".parse::<ScenarioField>().unwrap(),
            ScenarioField::ServiceDescription
        );
        assert!("insurer".parse::<ScenarioField>().is_err());
    }

    #[test]
    fn scenario_serializes_flat_camel_case() {
        let fields = ScenarioFields::default()
            .with(ScenarioField::ScenarioName, "Test")
            .with(ScenarioField::State, "Texas");
        let scenario = Scenario::new(ScenarioId::from_millis(1_700_000_000_000), fields);
        let json = serde_json::to_value(&scenario).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["scenarioName"], "Test");
        assert_eq!(json["state"], "Texas");
    }
}
