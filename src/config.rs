//! Configuration management for the skill graph analyzer

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Tunable parameters of an analysis run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of k-means clusters over postings
    pub n_clusters: usize,

    /// Seed for k-means++ initialisation
    pub seed: u64,

    /// Number of bridge skills to report
    pub top_bridges: usize,

    /// Skills listed per cluster and central members per community
    pub top_cluster_skills: usize,

    pub eigenvector_max_iter: usize,
    pub eigenvector_tolerance: f64,

    pub kmeans_max_iter: usize,
    pub kmeans_n_init: usize,
    pub kmeans_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_clusters: 4,
            seed: 42,
            top_bridges: 10,
            top_cluster_skills: 5,
            eigenvector_max_iter: 1000,
            eigenvector_tolerance: 1e-6,
            kmeans_max_iter: 300,
            kmeans_n_init: 10,
            kmeans_tolerance: 1e-4,
        }
    }
}

impl Config {
    /// Create a configuration with custom clustering and bridge settings
    pub fn new(n_clusters: usize, seed: u64, top_bridges: usize) -> Self {
        Self {
            n_clusters,
            seed,
            top_bridges,
            ..Self::default()
        }
    }

    /// Load a JSON config file; absent fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"n_clusters": 6, "seed": 7}"#).unwrap();
        assert_eq!(config.n_clusters, 6);
        assert_eq!(config.seed, 7);
        assert_eq!(config.top_bridges, 10);
        assert_eq!(config.eigenvector_max_iter, 1000);
    }

    #[test]
    fn new_overrides_selected_fields() {
        let config = Config::new(3, 1, 5);
        assert_eq!((config.n_clusters, config.seed, config.top_bridges), (3, 1, 5));
        assert_eq!(config.kmeans_n_init, 10);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_json_file("/nonexistent/config.json").is_err());
    }
}
