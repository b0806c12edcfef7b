use std::collections::BTreeMap;

use crate::domain::{ScenarioField, ScenarioFields};

/// Field-level messages from the most recent validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<ScenarioField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: ScenarioField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ScenarioField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn insert(&mut self, field: ScenarioField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drops the message for a single field, returning whether one existed.
    pub fn clear_field(&mut self, field: ScenarioField) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn fields(&self) -> Vec<ScenarioField> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScenarioField, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Every field is required and must contain non-whitespace text.
pub fn validate(fields: &ScenarioFields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in ScenarioField::ALL {
        if fields.get(field).trim().is_empty() {
            errors.insert(field, field.required_message());
        }
    }
    errors
}
