//! Posting clustering by skill-vector similarity

pub mod features;
pub mod interpret;
pub mod kmeans;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Config;
use crate::data::Posting;

pub use features::FeatureMatrix;
pub use interpret::{interpret_clusters, ClusterSummary};
pub use kmeans::{kmeans, KMeansFit, KMeansParams};

/// Cluster id of every posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClusterAssignment(BTreeMap<String, u32>);

impl ClusterAssignment {
    pub fn get(&self, posting_id: &str) -> Option<u32> {
        self.0.get(posting_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, &cluster)| (id.as_str(), cluster))
    }

    /// Number of distinct cluster ids in use
    pub fn cluster_count(&self) -> usize {
        let mut ids: Vec<u32> = self.0.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// One row per posting, in id order
    pub fn rows(&self) -> Vec<ClusterRow> {
        self.iter()
            .map(|(job_id, cluster)| ClusterRow {
                job_id: job_id.to_string(),
                cluster,
            })
            .collect()
    }
}

impl FromIterator<(String, u32)> for ClusterAssignment {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Row of the cluster table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterRow {
    pub job_id: String,
    pub cluster: u32,
}

fn single_cluster(postings: &[Posting]) -> ClusterAssignment {
    postings.iter().map(|p| (p.id.clone(), 0)).collect()
}

/// Group postings into `config.n_clusters` clusters with seeded k-means
/// over standardized binary skill vectors.
///
/// With fewer postings than clusters, zero clusters or no skills at all,
/// every posting lands in cluster 0.
pub fn cluster_postings(postings: &[Posting], config: &Config) -> ClusterAssignment {
    let k = config.n_clusters;
    let features = FeatureMatrix::binary(postings);

    if k == 0 || postings.len() < k || features.n_features() == 0 {
        log::debug!(
            "Clustering {} postings into one group (k = {}, {} skills)",
            postings.len(),
            k,
            features.n_features()
        );
        return single_cluster(postings);
    }

    let params = KMeansParams {
        k,
        seed: config.seed,
        max_iter: config.kmeans_max_iter,
        n_init: config.kmeans_n_init,
        tolerance: config.kmeans_tolerance,
    };
    let fit = kmeans(&features.standardized(), &params);

    let assignment: ClusterAssignment = postings
        .iter()
        .zip(fit.labels)
        .map(|(posting, label)| (posting.id.clone(), label as u32))
        .collect();

    log::info!(
        "Clustered {} postings over {} skills into {} clusters",
        postings.len(),
        features.n_features(),
        assignment.cluster_count()
    );
    assignment
}
