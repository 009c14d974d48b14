//! Proficiency levels attached to a user's skills

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::data::SkillSet;

/// Proficiency on the 1 (Basic) to 4 (Expert) scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Proficiency(f64);

impl Proficiency {
    pub const BASIC: Proficiency = Proficiency(1.0);
    pub const INTERMEDIATE: Proficiency = Proficiency(2.0);
    pub const ADVANCED: Proficiency = Proficiency(3.0);
    pub const EXPERT: Proficiency = Proficiency(4.0);

    /// Level assumed for a skill whose proficiency is unknown or absent.
    ///
    /// Unknown levels count as Expert, so an unannotated profile scores the
    /// same weighted ratio as the plain match ratio.
    pub const DEFAULT: Proficiency = Proficiency::EXPERT;

    pub const MAX: f64 = 4.0;

    /// Numeric level; `None` outside [1, 4]
    pub fn from_level(level: f64) -> Option<Self> {
        (level.is_finite() && (1.0..=Self::MAX).contains(&level)).then_some(Proficiency(level))
    }

    /// Ordinal label, case-insensitive
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::BASIC),
            "intermediate" => Some(Self::INTERMEDIATE),
            "advanced" => Some(Self::ADVANCED),
            "expert" => Some(Self::EXPERT),
            other => other.parse::<f64>().ok().and_then(Self::from_level),
        }
    }

    pub fn level(self) -> f64 {
        self.0
    }

    /// Contribution to the weighted match ratio, in (0, 1]
    pub fn weight(self) -> f64 {
        self.0 / Self::MAX
    }
}

/// Proficiency as supplied by the user-configuration collaborator
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProficiencyInput {
    Level(f64),
    Label(String),
}

impl ProficiencyInput {
    pub fn resolve(&self) -> Proficiency {
        let parsed = match self {
            ProficiencyInput::Level(level) => Proficiency::from_level(*level),
            ProficiencyInput::Label(label) => Proficiency::from_label(label),
        };
        parsed.unwrap_or(Proficiency::DEFAULT)
    }
}

/// The user's claimed skills and optional proficiency levels
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub skills: SkillSet,
    levels: Option<BTreeMap<String, Proficiency>>,
}

impl UserProfile {
    pub fn new(skills: SkillSet) -> Self {
        Self {
            skills,
            levels: None,
        }
    }

    /// Attach per-skill levels, enabling the weighted scorer
    pub fn with_levels<I>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = (String, ProficiencyInput)>,
    {
        let resolved = levels
            .into_iter()
            .map(|(skill, input)| (skill.trim().to_string(), input.resolve()))
            .collect();
        self.levels = Some(resolved);
        self
    }

    pub fn is_weighted(&self) -> bool {
        self.levels.is_some()
    }

    /// Level for a skill, falling back to [`Proficiency::DEFAULT`]
    pub fn level(&self, skill: &str) -> Proficiency {
        self.levels
            .as_ref()
            .and_then(|levels| levels.get(skill).copied())
            .unwrap_or(Proficiency::DEFAULT)
    }
}

/// User profile file layout: `{"skills": [...], "levels": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub skills: Vec<String>,
    pub levels: Option<BTreeMap<String, ProficiencyInput>>,
}

impl RawProfile {
    /// Build a profile; skills that only appear in `levels` are claimed too
    pub fn into_profile(self) -> UserProfile {
        let mut claimed: BTreeSet<String> = self.skills.into_iter().collect();
        match self.levels {
            Some(levels) => {
                claimed.extend(levels.keys().cloned());
                UserProfile::new(claimed.into_iter().collect()).with_levels(levels)
            }
            None => UserProfile::new(claimed.into_iter().collect()),
        }
    }
}
