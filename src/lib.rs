//! Core library functions for the skill graph analyzer

pub mod analysis;
pub mod bridge;
pub mod centrality;
pub mod clustering;
pub mod community;
pub mod config;
pub mod data;
pub mod graph;
pub mod scoring;
pub mod storage;
pub mod table;

pub use analysis::{run_analysis, skill_network_metrics, AnalysisReport};
pub use anyhow::{Result, anyhow};
