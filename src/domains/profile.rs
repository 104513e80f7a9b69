use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdeaForgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expertise {
    Beginner,
    Intermediate,
    Experienced,
    Serial,
}

impl Expertise {
    pub const ALL: [Expertise; 4] = [
        Expertise::Beginner,
        Expertise::Intermediate,
        Expertise::Experienced,
        Expertise::Serial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Expertise::Beginner => "beginner",
            Expertise::Intermediate => "intermediate",
            Expertise::Experienced => "experienced",
            Expertise::Serial => "serial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Expertise::Beginner => "Beginner - new to entrepreneurship",
            Expertise::Intermediate => "Intermediate - some business experience",
            Expertise::Experienced => "Experienced - multiple ventures",
            Expertise::Serial => "Serial Entrepreneur - built & exited businesses",
        }
    }
}

impl fmt::Display for Expertise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expertise {
    type Err = IdeaForgeError;

    fn from_str(value: &str) -> Result<Self> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == needle)
            .ok_or_else(|| IdeaForgeError::InvalidInput(format!("unknown expertise: {value}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "$0-$100")]
    UpTo100,
    #[serde(rename = "$100-$500")]
    UpTo500,
    #[serde(rename = "$500-$1000")]
    UpTo1000,
    #[serde(rename = "$1000-$2000")]
    UpTo2000,
}

impl Budget {
    pub const ALL: [Budget; 4] = [
        Budget::UpTo100,
        Budget::UpTo500,
        Budget::UpTo1000,
        Budget::UpTo2000,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Budget::UpTo100 => "$0-$100",
            Budget::UpTo500 => "$100-$500",
            Budget::UpTo1000 => "$500-$1000",
            Budget::UpTo2000 => "$1000-$2000",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Budget::UpTo100 => "Bootstrap",
            Budget::UpTo500 => "Minimal investment",
            Budget::UpTo1000 => "Moderate",
            Budget::UpTo2000 => "Full launch",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Budget {
    type Err = IdeaForgeError;

    fn from_str(value: &str) -> Result<Self> {
        let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
        Self::ALL
            .into_iter()
            .find(|budget| budget.as_str() == compact.replace(',', ""))
            .ok_or_else(|| IdeaForgeError::InvalidInput(format!("unknown budget range: {value}")))
    }
}

/// Self-reported background used to tailor every prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub expertise: Expertise,
    pub interests: String,
    pub budget: Budget,
    #[serde(default)]
    pub skills: String,
}

impl Profile {
    pub fn new(
        expertise: Expertise,
        interests: impl Into<String>,
        budget: Budget,
        skills: impl Into<String>,
    ) -> Self {
        Self {
            expertise,
            interests: interests.into(),
            budget,
            skills: skills.into(),
        }
    }

    /// Skills may be blank; interests may not.
    pub fn validate(&self) -> Result<()> {
        if self.interests.trim().is_empty() {
            return Err(IdeaForgeError::InvalidInput(
                "interests are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_wire_profile() {
        let profile: Profile = serde_json::from_value(json!({
            "expertise": "beginner",
            "interests": "pets",
            "budget": "$100-$500",
            "skills": "writing"
        }))
        .unwrap();
        assert_eq!(profile.expertise, Expertise::Beginner);
        assert_eq!(profile.budget, Budget::UpTo500);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_budget_and_blank_interests() {
        let err = serde_json::from_value::<Profile>(json!({
            "expertise": "beginner",
            "interests": "pets",
            "budget": "$1-$2"
        }));
        assert!(err.is_err());

        let profile = Profile::new(Expertise::Serial, "  ", Budget::UpTo100, "");
        assert!(matches!(
            profile.validate(),
            Err(IdeaForgeError::InvalidInput(_))
        ));
    }

    #[test]
    fn parses_form_input() {
        assert_eq!("Serial".parse::<Expertise>().unwrap(), Expertise::Serial);
        assert_eq!("$1,000 - $2,000".parse::<Budget>().unwrap(), Budget::UpTo2000);
        assert!("expert".parse::<Expertise>().is_err());
    }
}
