pub mod blueprint;
pub mod common;
pub mod rating;
pub mod scenario;

pub use blueprint::{Blueprint, Milestone, Stakeholder, StakeholderProfile, Stakeholders};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use rating::{Rating, RatingMetric};
pub use scenario::{Scenario, ScenarioField, ScenarioFields, ScenarioId};
