//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, to_string_pretty};

use crate::analysis::AnalysisReport;

/// Save every table of the report as a JSON file under `output_dir`
pub fn save_results(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    log::info!("Saving analysis of {} postings to {}", report.posting_count(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir))?;

    save_summary(report, output_dir)?;

    save_json(output_dir, "skill_gap.json", &report.skill_gap.ranked_rows())?;
    save_json(output_dir, "missing_skills.json", &report.skill_gap.missing)?;
    save_json(output_dir, "centralities.json", &report.centralities)?;
    save_communities(report, output_dir)?;
    save_json(output_dir, "community_summaries.json", &report.community_summaries)?;
    save_json(output_dir, "clusters.json", &report.clusters.rows())?;
    save_json(output_dir, "cluster_summaries.json", &report.cluster_summaries)?;
    save_json(output_dir, "bridge_skills.json", &report.bridge_skills)?;
    save_json(output_dir, "graph_stats.json", &report.graph_stats)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn save_json<T: Serialize + ?Sized>(output_dir: &str, name: &str, value: &T) -> Result<()> {
    let path = Path::new(output_dir).join(name);
    log::debug!("Writing {}", path.display());

    let mut file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;

    Ok(())
}

/// Save summary information
fn save_summary(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let stats = &report.graph_stats;
    let clusters = &report.cluster_summaries;
    let best_match = report
        .skill_gap
        .rows
        .iter()
        .map(|row| row.match_ratio)
        .fold(0.0, f64::max);

    let summary = json!({
        "postings": {
            "count": report.posting_count(),
            "best_match_ratio": best_match,
            "missing_skill_count": report.skill_gap.missing.len(),
        },
        "bipartite": report.bipartite,
        "skill_graph": {
            "node_count": stats.node_count,
            "edge_count": stats.edge_count,
            "density": stats.density,
            "component_count": stats.component_count,
        },
        "community_stats": {
            "community_count": report.community_summaries.len(),
            "largest_community_size": report.community_summaries.first().map_or(0, |c| c.size),
        },
        "cluster_stats": {
            "cluster_count": clusters.len(),
            "largest_cluster_size": clusters.iter().map(|c| c.n_jobs).max().unwrap_or(0),
        },
        "top_bridge_skill": report.bridge_skills.first().map(|b| b.node.as_str()),
    });

    save_json(output_dir, "summary.json", &summary)
}

/// Save the community of every skill as (node, community) rows
fn save_communities(report: &AnalysisReport, output_dir: &str) -> Result<()> {
    let rows: Vec<_> = report
        .communities
        .iter()
        .map(|(node, community)| json!({ "node": node, "community": community }))
        .collect();

    save_json(output_dir, "communities.json", &rows)
}
