use anyhow::Result;
use clap::Parser;

use skill_graph_analyzer::config::Config;
use skill_graph_analyzer::data::{loader, SkillSet};
use skill_graph_analyzer::scoring::UserProfile;
use skill_graph_analyzer::{run_analysis, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "skill-graph-analyzer",
    about = "Skill-gap scoring and skill co-occurrence network analysis of job postings"
)]
struct Cli {
    /// Path to input JSON file of postings
    #[clap(long)]
    input: String,

    /// User profile JSON file (skills and proficiency levels)
    #[clap(long)]
    profile: Option<String>,

    /// Comma-separated skills the user has, merged with the profile
    #[clap(long)]
    skills: Option<String>,

    /// JSON config file; flags below override its values
    #[clap(long)]
    config: Option<String>,

    /// Output directory for results
    #[clap(long, default_value = "skill_results")]
    output_dir: String,

    /// Number of posting clusters
    #[clap(long)]
    clusters: Option<usize>,

    /// Seed for clustering
    #[clap(long)]
    seed: Option<u64>,

    /// Number of bridge skills to report
    #[clap(long)]
    top_bridges: Option<usize>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(n_clusters) = self.clusters {
            config.n_clusters = n_clusters;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(top_bridges) = self.top_bridges {
            config.top_bridges = top_bridges;
        }

        Ok(config)
    }

    fn profile(&self) -> Result<UserProfile> {
        let mut profile = match &self.profile {
            Some(path) => loader::load_profile(path)?,
            None => UserProfile::default(),
        };

        if let Some(skills) = &self.skills {
            for skill in SkillSet::from_csv(skills).iter() {
                profile.skills.insert(skill);
            }
        }

        Ok(profile)
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Starting skill graph analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    let config = args.config()?;
    let profile = args.profile()?;
    log::info!("Profile lists {} skills", profile.skills.len());

    // 1. Load data
    let postings = loader::load_postings(&args.input)?;

    // 2. Analyze
    let report = run_analysis(&postings, &profile, &config);

    // 3. Save results
    storage::save_results(&report, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
