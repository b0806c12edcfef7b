use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Simulated latency of blueprint generation.
    #[serde(default = "Config::default_generation_delay_ms")]
    pub generation_delay_ms: u64,
    /// Display name used when no identity is supplied.
    #[serde(default = "Config::default_guest_name")]
    pub guest_name: String,
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_column_width: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation_delay_ms: Self::default_generation_delay_ms(),
            guest_name: Self::default_guest_name(),
            plain_output: false,
            max_column_width: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "generation_delay_ms",
        "guest_name",
        "plain_output",
        "max_column_width",
    ];

    pub fn default_generation_delay_ms() -> u64 {
        1500
    }

    pub fn default_guest_name() -> String {
        "Guest User".into()
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("generation_delay_ms", self.generation_delay_ms.to_string()),
            ("guest_name", self.guest_name.clone()),
            ("plain_output", self.plain_output.to_string()),
            (
                "max_column_width",
                self.max_column_width
                    .map(|width| width.to_string())
                    .unwrap_or_else(|| "auto".into()),
            ),
        ]
    }

    /// Updates a single setting from its textual form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "generation_delay_ms" | "delay" => {
                self.generation_delay_ms = value.parse().map_err(|_| {
                    ConfigError::Invalid(format!("`{value}` is not a number of milliseconds"))
                })?;
            }
            "guest_name" => {
                if value.is_empty() {
                    return Err(ConfigError::Invalid("guest name cannot be empty".into()));
                }
                self.guest_name = value.to_string();
            }
            "plain_output" => {
                self.plain_output = parse_bool(value)?;
            }
            "max_column_width" => {
                self.max_column_width = if value.eq_ignore_ascii_case("auto") {
                    None
                } else {
                    let width: usize = value.parse().map_err(|_| {
                        ConfigError::Invalid(format!("`{value}` is not a column width"))
                    })?;
                    if width < 8 {
                        return Err(ConfigError::Invalid(
                            "column width must be at least 8".into(),
                        ));
                    }
                    Some(width)
                };
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(ConfigError::Invalid(format!("`{other}` is not a boolean"))),
    }
}
