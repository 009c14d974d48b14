//! Posting ingestion and normalization

pub mod loader;
pub mod posting;

pub use posting::{Posting, SkillSet};
