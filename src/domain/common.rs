use super::scenario::ScenarioId;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &ScenarioId;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
