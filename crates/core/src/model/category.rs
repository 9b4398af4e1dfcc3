use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Subject area of a scenario. Selects the title and the template list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioCategory {
    Hiring,
    Microaggressions,
    PsychologicalSafety,
    CulturalStereotypes,
    Accessibility,
    GenderBias,
    Leadership,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown scenario category: {raw}")]
pub struct ParseCategoryError {
    pub raw: String,
}

impl ScenarioCategory {
    pub const ALL: [ScenarioCategory; 7] = [
        Self::Hiring,
        Self::Microaggressions,
        Self::PsychologicalSafety,
        Self::CulturalStereotypes,
        Self::Accessibility,
        Self::GenderBias,
        Self::Leadership,
    ];

    /// Category used when a caller does not pick one.
    pub const DEFAULT: ScenarioCategory = Self::Hiring;

    /// Wire key, e.g. `psychological-safety`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Hiring => "hiring",
            Self::Microaggressions => "microaggressions",
            Self::PsychologicalSafety => "psychological-safety",
            Self::CulturalStereotypes => "cultural-stereotypes",
            Self::Accessibility => "accessibility",
            Self::GenderBias => "gender-bias",
            Self::Leadership => "leadership",
        }
    }

    /// Human title shown for locally generated scenarios.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Hiring => "Hiring Bias",
            Self::Microaggressions => "Microaggressions",
            Self::PsychologicalSafety => "Psychological Safety",
            Self::CulturalStereotypes => "Cultural Stereotypes",
            Self::Accessibility => "Accessibility",
            Self::GenderBias => "Gender Bias",
            Self::Leadership => "Inclusive Leadership",
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.key() == trimmed)
            .ok_or_else(|| ParseCategoryError {
                raw: s.to_string(),
            })
    }
}
