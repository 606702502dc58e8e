use clap::Parser;
use core_staging_cms::admin::seed::Seeder;
use core_staging_cms::config::admin::SeedConfig;
use core_staging_cms::config::seed_config::SeedContent;
use core_staging_cms::core::client::{ContentClient, RetryPolicy};
use core_staging_cms::utils::{logger, validation::Validate};
use core_staging_cms::{HttpTransport, Result};

async fn run(config: &SeedConfig) -> Result<()> {
    let content = SeedContent::from_file(&config.content)?;
    tracing::info!(
        "📄 Loaded {} entries across {} models from {}",
        content.entry_count(),
        content.models.len(),
        config.content
    );

    let transport = HttpTransport::new(config.endpoint.clone()).with_token(config.token()?);
    let seeder = Seeder::new(ContentClient::new(transport, RetryPolicy::default()));
    let report = seeder.seed_all(&content).await?;

    println!("✅ Content seeded and published! ({} entries)", report.published);
    for note in &report.notes {
        println!("📝 {}", note);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = SeedConfig::parse();
    logger::init_cli_logger(config.verbose);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("Usage: HYGRAPH_TOKEN=<token> seed-content");
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Seeding failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}
