//! Persistent user preferences for the blueprint shell.
//!
//! Owns the [`Config`] model plus disk persistence helpers. Scenarios and
//! blueprints are never written here; they live only in session memory.

mod error;
mod manager;
mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
