//! JSON input handling for postings and user profiles

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::posting::{Posting, RawPosting};
use crate::scoring::{RawProfile, UserProfile};

/// Normalize raw records, dropping those without an identifier and repeated
/// identifiers (the first occurrence wins)
pub fn normalize_postings(records: Vec<RawPosting>) -> Vec<Posting> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let mut postings = Vec::with_capacity(total);

    for (i, record) in records.into_iter().enumerate() {
        let Some(posting) = record.normalize() else {
            log::warn!("Skipping record {} without an identifier", i);
            continue;
        };

        if !seen.insert(posting.id.clone()) {
            log::warn!("Skipping duplicate posting id {}", posting.id);
            continue;
        }

        postings.push(posting);
    }

    log::info!("Normalized {} of {} posting records", postings.len(), total);
    postings
}

/// Parse a JSON array of posting records
pub fn parse_postings(json: &str) -> Result<Vec<Posting>> {
    let records: Vec<RawPosting> =
        serde_json::from_str(json).context("Posting input must be a JSON array of records")?;
    Ok(normalize_postings(records))
}

/// Load postings from a JSON file
pub fn load_postings(path: impl AsRef<Path>) -> Result<Vec<Posting>> {
    let path = path.as_ref();
    log::info!("Reading postings file: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_postings(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load a user profile from a JSON file
pub fn load_profile(path: impl AsRef<Path>) -> Result<UserProfile> {
    let path = path.as_ref();
    log::info!("Reading user profile: {}", path.display());

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: RawProfile = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse profile {}", path.display()))?;

    Ok(raw.into_profile())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_records() {
        let postings = parse_postings(
            r#"[
                {"job_id": "a", "skills_detected": ["Python", "SQL"], "title": "Analyst"},
                {"id": 7, "skills": "Excel, SQL"},
                {"skills": ["Orphan"]},
                {"id": "a", "skills": ["Duplicate"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].id, "a");
        assert!(postings[0].skills.contains("Python"));
        assert_eq!(postings[1].id, "7");
        assert!(postings[1].skills.contains("Excel"));
    }

    #[test]
    fn record_with_both_identifier_keys_is_accepted() {
        let postings = parse_postings(
            r#"[
                {"id": "1", "job_id": "1", "skills": ["A", "B"]},
                {"job_id": "2", "skills": ["A"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].id, "1");
        assert_eq!(postings[0].skills.len(), 2);
        assert_eq!(postings[1].id, "2");
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_postings(r#"{"id": "1"}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_postings("/definitely/not/here.json").is_err());
    }
}
