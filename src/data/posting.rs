//! Canonical posting and skill-set types
//!
//! Raw records may carry skills either as a list or as a comma-separated
//! string, and identifiers either as strings or numbers. Everything is
//! normalized here, once, so the rest of the engine only sees [`Posting`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// De-duplicated set of skill names detected in one posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated skill string ("Python, SQL,,Excel")
    pub fn from_csv(raw: &str) -> Self {
        raw.split(',').collect()
    }

    /// Insert a skill; blank names are ignored
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        self.0.insert(skill.to_string())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Skills in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> + Clone {
        self.0.iter().map(String::as_str)
    }

    /// Number of skills shared with `other`
    pub fn intersection_count(&self, other: &SkillSet) -> usize {
        self.0.intersection(&other.0).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

/// One job posting with its detected skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Posting {
    pub id: String,
    pub skills: SkillSet,
}

impl Posting {
    pub fn new<S: AsRef<str>>(id: impl Into<String>, skills: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: id.into(),
            skills: skills.into_iter().collect(),
        }
    }
}

/// Skills as they arrive from the extraction collaborator
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillField {
    List(Vec<Option<String>>),
    Csv(String),
    /// Anything else (numbers, objects) is malformed and treated as empty
    Other(serde_json::Value),
}

impl SkillField {
    pub fn into_skill_set(self) -> SkillSet {
        match self {
            SkillField::List(items) => items.into_iter().flatten().collect(),
            SkillField::Csv(raw) => SkillSet::from_csv(&raw),
            SkillField::Other(_) => SkillSet::new(),
        }
    }
}

/// Posting identifier as it arrives (string or number)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostingId {
    Text(String),
    Number(serde_json::Number),
}

impl PostingId {
    /// Canonical string form; blank identifiers are rejected
    pub fn into_id(self) -> Option<String> {
        let id = match self {
            PostingId::Text(text) => text.trim().to_string(),
            PostingId::Number(number) => number.to_string(),
        };
        (!id.is_empty()).then_some(id)
    }
}

/// Raw posting record before normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RawPosting {
    #[serde(default)]
    pub job_id: Option<PostingId>,

    #[serde(default)]
    pub id: Option<PostingId>,

    #[serde(default)]
    pub skills_detected: Option<SkillField>,

    #[serde(default)]
    pub skills: Option<SkillField>,
}

impl RawPosting {
    /// Normalize into a [`Posting`]; `None` when the record has no identifier.
    /// `job_id` and `skills_detected` win over `id` and `skills`.
    pub fn normalize(self) -> Option<Posting> {
        let id = self
            .job_id
            .and_then(PostingId::into_id)
            .or_else(|| self.id.and_then(PostingId::into_id))?;
        let skills = self
            .skills_detected
            .or(self.skills)
            .map(SkillField::into_skill_set)
            .unwrap_or_default();
        Some(Posting { id, skills })
    }
}
