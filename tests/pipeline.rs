use skill_graph_analyzer::config::Config;
use skill_graph_analyzer::data::loader::parse_postings;
use skill_graph_analyzer::data::Posting;
use skill_graph_analyzer::graph::build_bipartite_graph;
use skill_graph_analyzer::scoring::{RawProfile, UserProfile};
use skill_graph_analyzer::{run_analysis, skill_network_metrics};

fn triangle() -> Vec<Posting> {
    vec![
        Posting::new("1", ["SQL", "Python", "Excel"]),
        Posting::new("2", ["SQL"]),
    ]
}

fn profile(skills: &[&str]) -> UserProfile {
    UserProfile::new(skills.iter().collect())
}

#[test]
fn triangle_network() {
    let (graph, centralities, communities) = skill_network_metrics(&triangle(), &Config::default());

    assert_eq!(graph.node_count, 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.edge_list().all(|(_, _, w)| w == 1.0));

    for row in centralities.iter() {
        assert!((row.degree - 1.0).abs() < 1e-9);
        assert!(row.betweenness.abs() < 1e-9);
        assert!((row.closeness - 1.0).abs() < 1e-9);
        assert!((row.eigenvector - 1.0 / 3f64.sqrt()).abs() < 1e-6);
    }
    assert_eq!(communities.community_count(), 1);
}

#[test]
fn full_report() {
    let report = run_analysis(&triangle(), &profile(&["SQL"]), &Config::default());

    assert_eq!(report.posting_count(), 2);
    assert!((report.skill_gap.rows[0].match_ratio - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.skill_gap.rows[1].match_ratio, 1.0);

    let missing: Vec<_> = report.skill_gap.missing.iter().map(|m| m.skill.as_str()).collect();
    assert_eq!(missing.len(), 2);
    assert!(missing.contains(&"Python") && missing.contains(&"Excel"));

    assert_eq!(report.bipartite.job_nodes, 2);
    assert_eq!(report.bipartite.skill_nodes, 3);
    assert_eq!(report.bipartite.edges, 4);

    // Two postings never fill four clusters
    assert!(report.clusters.iter().all(|(_, c)| c == 0));
    assert_eq!(report.cluster_summaries.len(), 1);
    assert_eq!(report.cluster_summaries[0].n_jobs, 2);
    let avg = report.cluster_summaries[0].avg_match_ratio.unwrap();
    assert!((avg - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(report.bridge_skills.len(), 3);
    assert_eq!(report.graph_stats.component_count, 1);
}

#[test]
fn weighted_profile_from_json() {
    let raw: RawProfile = serde_json::from_str(
        r#"{"skills": ["SQL"], "levels": {"SQL": "Advanced", "Python": 2}}"#,
    )
    .unwrap();
    let report = run_analysis(&triangle(), &raw.into_profile(), &Config::default());

    let first = &report.skill_gap.rows[0];
    assert_eq!(first.n_skills_user_has, 2);
    // (3/4 + 2/4) / 3
    assert!((first.weighted_match_ratio.unwrap() - 1.25 / 3.0).abs() < 1e-9);
    assert!((first.avg_skill_level.unwrap() - 2.5).abs() < 1e-9);
}

#[test]
fn bipartite_projection_matches_cooccurrence() {
    let postings = parse_postings(
        r#"[
            {"job_id": "a", "skills_detected": ["Python", "SQL", "Docker"]},
            {"job_id": "b", "skills_detected": "SQL, Excel"},
            {"skills": ["Ignored"]},
            {"id": 3, "skills": null}
        ]"#,
    )
    .unwrap();
    assert_eq!(postings.len(), 3);

    let (graph, _, _) = skill_network_metrics(&postings, &Config::default());
    let projected = build_bipartite_graph(&postings).project_skills();
    assert_eq!(projected, graph);
    assert!(graph.node_index("Ignored").is_none());
}

#[test]
fn disconnected_skills_get_distinct_communities() {
    let postings = vec![
        Posting::new("1", ["Python", "Pandas"]),
        Posting::new("2", ["Java", "Spring"]),
    ];
    let (_, centralities, communities) = skill_network_metrics(&postings, &Config::default());

    assert_eq!(communities.community_count(), 2);
    assert_eq!(communities.get("Python"), communities.get("Pandas"));
    assert_ne!(communities.get("Python"), communities.get("Java"));
    assert!(centralities.iter().all(|row| row.betweenness == 0.0));
}
