//! Per-posting skill-gap metrics and the missing-skill ranking

use std::collections::HashMap;

use serde::Serialize;

use crate::data::Posting;
use crate::scoring::{Proficiency, UserProfile};

/// Match metrics for one posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGapRow {
    pub job_id: String,
    pub n_skills_job: usize,
    pub n_skills_user_has: usize,
    pub match_ratio: f64,

    /// Only present when the profile carries proficiency levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_match_ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_skill_level: Option<f64>,
}

/// A skill demanded by the corpus that the user lacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingSkill {
    pub skill: String,
    pub count: usize,
    pub priority: usize,
}

/// Scorer output: one row per posting plus the prioritized missing skills
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillGapReport {
    pub rows: Vec<SkillGapRow>,
    pub missing: Vec<MissingSkill>,
}

impl SkillGapReport {
    /// Match ratio per posting id
    pub fn match_ratios(&self) -> HashMap<&str, f64> {
        self.rows
            .iter()
            .map(|row| (row.job_id.as_str(), row.match_ratio))
            .collect()
    }

    /// Rows ordered by descending match ratio (stable)
    pub fn ranked_rows(&self) -> Vec<SkillGapRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.match_ratio.total_cmp(&a.match_ratio));
        rows
    }
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// Score a single posting against the profile
pub fn score_posting(posting: &Posting, profile: &UserProfile) -> SkillGapRow {
    let n_skills_job = posting.skills.len();
    let n_skills_user_has = posting.skills.intersection_count(&profile.skills);

    let (weighted_match_ratio, avg_skill_level) = if profile.is_weighted() {
        let levels: Vec<f64> = posting
            .skills
            .iter()
            .filter(|skill| profile.skills.contains(skill))
            .map(|skill| profile.level(skill).level())
            .collect();

        let weighted: f64 = levels
            .iter()
            .map(|level| level / Proficiency::MAX)
            .sum();
        let avg = ratio(levels.iter().sum(), levels.len());

        (Some(ratio(weighted, n_skills_job)), Some(avg))
    } else {
        (None, None)
    };

    SkillGapRow {
        job_id: posting.id.clone(),
        n_skills_job,
        n_skills_user_has,
        match_ratio: ratio(n_skills_user_has as f64, n_skills_job),
        weighted_match_ratio,
        avg_skill_level,
    }
}

/// Skills missing from the profile, most frequent first.
///
/// Ties keep the order in which skills were first encountered while walking
/// the postings.
pub fn missing_skills(postings: &[Posting], profile: &UserProfile) -> Vec<MissingSkill> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for posting in postings {
        for skill in posting.skills.iter() {
            let count = counts.entry(skill).or_insert(0);
            if *count == 0 {
                first_seen.push(skill);
            }
            *count += 1;
        }
    }

    let mut missing: Vec<MissingSkill> = first_seen
        .into_iter()
        .filter(|skill| !profile.skills.contains(skill))
        .map(|skill| {
            let count = counts[skill];
            MissingSkill {
                skill: skill.to_string(),
                count,
                priority: count,
            }
        })
        .collect();

    // Stable sort keeps first-encountered order among equal counts
    missing.sort_by(|a, b| b.count.cmp(&a.count));
    missing
}

/// Score every posting and rank the missing skills
pub fn compute_skill_gap(postings: &[Posting], profile: &UserProfile) -> SkillGapReport {
    log::debug!(
        "Scoring {} postings against {} user skills",
        postings.len(),
        profile.skills.len()
    );

    SkillGapReport {
        rows: postings
            .iter()
            .map(|posting| score_posting(posting, profile))
            .collect(),
        missing: missing_skills(postings, profile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ProficiencyInput;

    fn profile(skills: &[&str]) -> UserProfile {
        UserProfile::new(skills.iter().collect())
    }

    fn no_levels() -> Vec<(String, ProficiencyInput)> {
        Vec::new()
    }

    #[test]
    fn match_ratio_counts_shared_skills() {
        let posting = Posting::new("1", ["Python", "SQL", "Excel", "Tableau"]);
        let row = score_posting(&posting, &profile(&["SQL", "Python", "Git"]));

        assert_eq!(row.n_skills_job, 4);
        assert_eq!(row.n_skills_user_has, 2);
        assert!((row.match_ratio - 0.5).abs() < 1e-12);
        assert_eq!(row.weighted_match_ratio, None);
        assert_eq!(row.avg_skill_level, None);
    }

    #[test]
    fn empty_posting_scores_zero() {
        let posting = Posting::new("empty", Vec::<&str>::new());
        let row = score_posting(&posting, &profile(&["SQL"]).with_levels(no_levels()));

        assert_eq!(row.n_skills_job, 0);
        assert_eq!(row.match_ratio, 0.0);
        assert_eq!(row.weighted_match_ratio, Some(0.0));
        assert_eq!(row.avg_skill_level, Some(0.0));
    }

    #[test]
    fn weighted_ratio_uses_proficiency() {
        let posting = Posting::new("1", ["Python", "SQL", "Excel", "Spark"]);
        let user = profile(&["Python", "SQL", "Excel"]).with_levels([
            ("Python".to_string(), ProficiencyInput::Label("Basic".into())),
            ("SQL".to_string(), ProficiencyInput::Level(2.0)),
        ]);
        let row = score_posting(&posting, &user);

        // Python 1/4, SQL 2/4, Excel defaults to 4/4, Spark unmatched.
        let expected = (0.25 + 0.5 + 1.0) / 4.0;
        assert!((row.weighted_match_ratio.unwrap() - expected).abs() < 1e-12);
        assert!((row.avg_skill_level.unwrap() - 7.0 / 3.0).abs() < 1e-12);
        assert!((row.match_ratio - 0.75).abs() < 1e-12);
    }

    #[test]
    fn weighted_ratio_without_levels_matches_plain_ratio() {
        let posting = Posting::new("1", ["A", "B", "C"]);
        let row = score_posting(&posting, &profile(&["A", "C"]).with_levels(no_levels()));

        assert!((row.weighted_match_ratio.unwrap() - row.match_ratio).abs() < 1e-12);
        assert_eq!(row.avg_skill_level, Some(4.0));
    }

    #[test]
    fn missing_skills_ranked_by_frequency_then_first_seen() {
        let postings = vec![
            Posting::new("1", ["SQL", "Tableau"]),
            Posting::new("2", ["Python", "Spark"]),
            Posting::new("3", ["Spark", "SQL", "Tableau"]),
        ];
        let missing = missing_skills(&postings, &profile(&["Python"]));

        let order: Vec<_> = missing.iter().map(|m| (m.skill.as_str(), m.count)).collect();
        assert_eq!(order, vec![("SQL", 2), ("Tableau", 2), ("Spark", 2)]);
        assert!(missing.iter().all(|m| m.priority == m.count));
    }

    #[test]
    fn report_ranks_rows_by_match_ratio() {
        let postings = vec![
            Posting::new("low", ["A", "B", "C", "D"]),
            Posting::new("high", ["A"]),
            Posting::new("none", Vec::<&str>::new()),
        ];
        let report = compute_skill_gap(&postings, &profile(&["A"]));
        let ranked: Vec<_> = report.ranked_rows().into_iter().map(|r| r.job_id).collect();

        assert_eq!(ranked, vec!["high", "low", "none"]);
        assert_eq!(report.match_ratios()["low"], 0.25);
    }
}
