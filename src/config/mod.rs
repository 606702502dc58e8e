pub mod admin;
pub mod cli;
pub mod seed_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CONTENT_ENDPOINT: &str =
    "https://us-west-2.cdn.hygraph.com/content/cmlnbszzu03lj07w926r5z5fl/master";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cms-build")]
#[command(about = "Fetch published CMS content into cms-data.json and stage the site into dist/")]
pub struct BuildConfig {
    /// Public, read-only content API endpoint
    #[arg(long, env = "CMS_ENDPOINT", default_value = DEFAULT_CONTENT_ENDPOINT)]
    pub endpoint: String,

    /// Site root holding index.html, css/, js/ ...
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Snapshot file name, relative to the site root
    #[arg(long, default_value = "cms-data.json")]
    pub output: String,

    /// Output directory, relative to the site root
    #[arg(long, default_value = "dist")]
    pub dist: String,

    #[arg(long, default_value = "5")]
    pub max_attempts: u32,

    #[arg(long, default_value = "30")]
    pub retry_delay_secs: u64,

    #[arg(long, default_value = "500")]
    pub chunk_pause_ms: u64,

    /// Fetch every collection in one query instead of chunks
    #[arg(long)]
    pub aggregate: bool,

    #[arg(long, help = "Log CPU and memory usage per build phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CONTENT_ENDPOINT.to_string(),
            root: ".".to_string(),
            output: "cms-data.json".to_string(),
            dist: "dist".to_string(),
            max_attempts: 5,
            retry_delay_secs: 30,
            chunk_pause_ms: 500,
            aggregate: false,
            monitor: false,
            json_logs: false,
            verbose: false,
        }
    }
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_path("root", &self.root)?;
        validate_path("output", &self.output)?;
        validate_path("dist", &self.dist)?;
        validate_positive_number("max_attempts", self.max_attempts as u64, 1)?;
        Ok(())
    }
}

impl ConfigProvider for BuildConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn site_root(&self) -> &str {
        &self.root
    }

    fn snapshot_file(&self) -> &str {
        &self.output
    }

    fn dist_dir(&self) -> &str {
        &self.dist
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn retry_base_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    fn chunk_pause(&self) -> Duration {
        Duration::from_millis(self.chunk_pause_ms)
    }

    fn aggregate_query(&self) -> bool {
        self.aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = BuildConfig::try_parse_from(["cms-build"]).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_base_delay(), Duration::from_secs(30));
        assert_eq!(config.chunk_pause(), Duration::from_millis(500));
        assert_eq!(config.snapshot_file(), "cms-data.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let config = BuildConfig {
            max_attempts: 0,
            ..BuildConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
