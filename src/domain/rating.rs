use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BlueprintError;

/// Integer score between [`Rating::MIN`] and [`Rating::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, BlueprintError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(BlueprintError::InvalidRating(value.to_string()))
        }
    }

    /// Clamps `value` into the valid range.
    pub fn saturating(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Five-slot gauge such as `●●●○○`.
    pub fn gauge(self) -> String {
        (Self::MIN..=Self::MAX)
            .map(|slot| if slot <= self.0 { '●' } else { '○' })
            .collect()
    }
}

impl TryFrom<u8> for Rating {
    type Error = BlueprintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = BlueprintError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .trim()
            .parse::<u8>()
            .map_err(|_| BlueprintError::InvalidRating(input.trim().to_string()))
            .and_then(Rating::new)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Which of a stakeholder's two ratings a control adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingMetric {
    PainPointSeverity,
    ExperienceLevel,
}

impl RatingMetric {
    pub fn label(self) -> &'static str {
        match self {
            RatingMetric::PainPointSeverity => "pain-point severity",
            RatingMetric::ExperienceLevel => "experience level",
        }
    }
}

impl FromStr for RatingMetric {
    type Err = BlueprintError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "severity" | "pain" | "pain-point" | "painpointseverity" => {
                Ok(RatingMetric::PainPointSeverity)
            }
            "experience" | "exp" | "level" | "experiencelevel" => Ok(RatingMetric::ExperienceLevel),
            other => Err(BlueprintError::InvalidInput(format!(
                "unknown rating `{other}` (use severity or experience)"
            ))),
        }
    }
}
