//! End-to-end analysis over a batch of postings

use serde::Serialize;

use crate::bridge::{bridge_skills, BridgeSkill};
use crate::centrality::{compute_centralities, CentralityTable};
use crate::clustering::{cluster_postings, interpret_clusters, ClusterAssignment, ClusterSummary};
use crate::community::{detect_communities, summarize_communities, CommunityAssignment, CommunitySummary};
use crate::config::Config;
use crate::data::Posting;
use crate::graph::bipartite::BipartiteSummary;
use crate::graph::{build_bipartite_graph, build_cooccurrence_graph, CompressedGraph, GraphStats};
use crate::scoring::{compute_skill_gap, SkillGapReport, UserProfile};

/// Co-occurrence graph with its node metrics and communities
pub fn skill_network_metrics(
    postings: &[Posting],
    config: &Config,
) -> (CompressedGraph, CentralityTable, CommunityAssignment) {
    let graph = build_cooccurrence_graph(postings);
    let centralities = compute_centralities(&graph, config);
    let communities = detect_communities(&graph);
    (graph, centralities, communities)
}

/// Every table produced by one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub skill_gap: SkillGapReport,
    pub bipartite: BipartiteSummary,
    pub graph_stats: GraphStats,
    pub centralities: CentralityTable,
    pub communities: CommunityAssignment,
    pub community_summaries: Vec<CommunitySummary>,
    pub clusters: ClusterAssignment,
    pub cluster_summaries: Vec<ClusterSummary>,
    pub bridge_skills: Vec<BridgeSkill>,
}

impl AnalysisReport {
    pub fn posting_count(&self) -> usize {
        self.skill_gap.rows.len()
    }
}

pub fn run_analysis(postings: &[Posting], profile: &UserProfile, config: &Config) -> AnalysisReport {
    log::info!("Analyzing {} postings", postings.len());

    let skill_gap = compute_skill_gap(postings, profile);
    let bipartite = build_bipartite_graph(postings).summary();

    let (graph, centralities, communities) = skill_network_metrics(postings, config);
    let graph_stats = GraphStats::compute(&graph);
    let community_summaries = summarize_communities(&graph, &communities, config.top_cluster_skills);

    let clusters = cluster_postings(postings, config);
    let cluster_summaries =
        interpret_clusters(postings, &clusters, Some(&skill_gap), config.top_cluster_skills);

    let bridge_skills = bridge_skills(&centralities, config.top_bridges);

    log::info!(
        "Skill graph: {} skills, {} edges, {} communities, {} clusters",
        graph_stats.node_count,
        graph_stats.edge_count,
        community_summaries.len(),
        cluster_summaries.len()
    );

    AnalysisReport {
        skill_gap,
        bipartite,
        graph_stats,
        centralities,
        communities,
        community_summaries,
        clusters,
        cluster_summaries,
        bridge_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_metrics_cover_every_skill() {
        let postings = vec![
            Posting::new("1", ["SQL", "Python"]),
            Posting::new("2", ["SQL", "Excel"]),
        ];
        let (graph, centralities, communities) = skill_network_metrics(&postings, &Config::default());

        assert_eq!(graph.node_count, 3);
        assert_eq!(centralities.len(), 3);
        assert_eq!(communities.len(), 3);
        assert_eq!(centralities.rows[0].node, "SQL");
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = run_analysis(&[], &UserProfile::default(), &Config::default());

        assert_eq!(report.posting_count(), 0);
        assert!(report.centralities.is_empty());
        assert!(report.communities.is_empty());
        assert!(report.clusters.is_empty());
        assert!(report.bridge_skills.is_empty());
        assert_eq!(report.graph_stats.node_count, 0);
    }
}
