//! Skill-gap scoring against a user profile

pub mod proficiency;
pub mod skill_gap;

pub use proficiency::{Proficiency, ProficiencyInput, RawProfile, UserProfile};
pub use skill_gap::{compute_skill_gap, MissingSkill, SkillGapReport, SkillGapRow};
