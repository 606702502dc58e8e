use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field, validate_url, Validate};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management-us-west-2.hygraph.com/graphql";
pub const DEFAULT_ENVIRONMENT_ID: &str = "4646dddacacd4e21a1b92ff22067d3fb";
pub const DEFAULT_ASSET_MODEL_ID: &str = "0a542d0c2bfc434a9d3e37148d8509dc";

pub const TOKEN_VAR: &str = "HYGRAPH_TOKEN";

#[derive(Debug, Clone, Parser)]
#[command(name = "schema-setup")]
#[command(about = "Create the site's content models in the CMS (Management API)")]
pub struct SchemaSetupConfig {
    /// Management API token (permanent auth token)
    #[arg(long, env = "HYGRAPH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "HYGRAPH_MANAGEMENT_ENDPOINT", default_value = DEFAULT_MANAGEMENT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = DEFAULT_ENVIRONMENT_ID)]
    pub environment_id: String,

    #[arg(long, default_value = DEFAULT_ASSET_MODEL_ID)]
    pub asset_model_id: String,

    /// Pause after each schema mutation so migrations can settle
    #[arg(long, default_value = "3000")]
    pub settle_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl SchemaSetupConfig {
    pub fn token(&self) -> Result<&str> {
        validate_required_field(TOKEN_VAR, &self.token)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Validate for SchemaSetupConfig {
    fn validate(&self) -> Result<()> {
        self.token()?;
        validate_url("endpoint", &self.endpoint)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "seed-content")]
#[command(about = "Create and publish the initial site content in the CMS")]
pub struct SeedConfig {
    #[arg(long, env = "HYGRAPH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(
        long,
        env = "HYGRAPH_ENDPOINT",
        default_value = super::DEFAULT_CONTENT_ENDPOINT
    )]
    pub endpoint: String,

    /// TOML file with the seed entries
    #[arg(long, default_value = "content/seed.toml")]
    pub content: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl SeedConfig {
    pub fn token(&self) -> Result<&str> {
        validate_required_field(TOKEN_VAR, &self.token)
    }
}

impl Validate for SeedConfig {
    fn validate(&self) -> Result<()> {
        self.token()?;
        validate_url("endpoint", &self.endpoint)?;
        validate_path("content", &self.content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CmsError;

    #[test]
    fn test_missing_token_fails_validation() {
        let config = SeedConfig {
            token: None,
            endpoint: "https://example.com/graphql".to_string(),
            content: "content/seed.toml".to_string(),
            verbose: false,
        };

        match config.validate() {
            Err(CmsError::MissingConfigError { field }) => assert_eq!(field, TOKEN_VAR),
            other => panic!("expected missing token, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_setup_with_token_validates() {
        let config = SchemaSetupConfig::try_parse_from([
            "schema-setup",
            "--token",
            "pat-123",
            "--endpoint",
            "https://management.example.com/graphql",
        ])
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.token().unwrap(), "pat-123");
        assert_eq!(config.settle_delay(), Duration::from_secs(3));
    }
}
