//! Human-readable cluster descriptions

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::clustering::ClusterAssignment;
use crate::data::Posting;
use crate::scoring::SkillGapReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster: u32,

    /// Most frequent skills in the cluster, joined by ", "
    pub top_skills: String,

    pub n_jobs: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_match_ratio: Option<f64>,
}

/// Most frequent skills among `members`, ties broken by name
fn top_skills(members: &[&Posting], top_n: usize) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for posting in members {
        for skill in posting.skills.iter() {
            *counts.entry(skill).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // BTreeMap order already sorts names; the stable sort keeps it for ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(top_n)
        .map(|(skill, _)| skill.to_string())
        .collect()
}

/// One summary per distinct cluster id, in ascending id order.
///
/// With a skill-gap report, each summary also carries the mean match ratio
/// of its members.
pub fn interpret_clusters(
    postings: &[Posting],
    assignment: &ClusterAssignment,
    skill_gap: Option<&SkillGapReport>,
    top_n: usize,
) -> Vec<ClusterSummary> {
    let mut groups: BTreeMap<u32, Vec<&Posting>> = BTreeMap::new();
    for posting in postings {
        if let Some(cluster) = assignment.get(&posting.id) {
            groups.entry(cluster).or_default().push(posting);
        }
    }

    let ratios: Option<HashMap<&str, f64>> = skill_gap.map(SkillGapReport::match_ratios);

    groups
        .into_iter()
        .map(|(cluster, members)| {
            let avg_match_ratio = ratios.as_ref().and_then(|ratios| {
                let values: Vec<f64> = members
                    .iter()
                    .filter_map(|posting| ratios.get(posting.id.as_str()).copied())
                    .collect();
                (!values.is_empty()).then(|| values.iter().mean())
            });

            ClusterSummary {
                cluster,
                top_skills: top_skills(&members, top_n).join(", "),
                n_jobs: members.len(),
                avg_match_ratio,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compute_skill_gap, UserProfile};

    fn postings() -> Vec<Posting> {
        vec![
            Posting::new("1", ["SQL", "Python"]),
            Posting::new("2", ["SQL", "Excel"]),
            Posting::new("3", ["Java", "Spring"]),
        ]
    }

    fn assignment() -> ClusterAssignment {
        [("1", 0u32), ("2", 0), ("3", 1)]
            .into_iter()
            .map(|(id, c)| (id.to_string(), c))
            .collect()
    }

    #[test]
    fn labels_top_skills_by_frequency_then_name() {
        let summaries = interpret_clusters(&postings(), &assignment(), None, 2);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].cluster, 0);
        assert_eq!(summaries[0].top_skills, "SQL, Excel");
        assert_eq!(summaries[0].n_jobs, 2);
        assert_eq!(summaries[0].avg_match_ratio, None);
        assert_eq!(summaries[1].top_skills, "Java, Spring");
    }

    #[test]
    fn averages_match_ratio_per_cluster() {
        let postings = postings();
        let profile = UserProfile::new(["SQL"].into_iter().collect());
        let report = compute_skill_gap(&postings, &profile);
        let summaries = interpret_clusters(&postings, &assignment(), Some(&report), 5);

        let first = summaries[0].avg_match_ratio.unwrap();
        assert!((first - 0.5).abs() < 1e-9);
        let second = summaries[1].avg_match_ratio.unwrap();
        assert!(second.abs() < 1e-9);
    }

    #[test]
    fn unassigned_postings_are_ignored() {
        let summaries = interpret_clusters(&postings(), &ClusterAssignment::default(), None, 5);
        assert!(summaries.is_empty());
    }
}
