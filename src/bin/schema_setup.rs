use clap::Parser;
use core_staging_cms::admin::schema::{ManagementClient, SchemaInstaller};
use core_staging_cms::config::admin::SchemaSetupConfig;
use core_staging_cms::utils::{logger, validation::Validate};
use core_staging_cms::HttpTransport;

#[tokio::main]
async fn main() {
    let config = SchemaSetupConfig::parse();
    logger::init_cli_logger(config.verbose);

    // token 必須在任何網路請求之前確認
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("Usage: HYGRAPH_TOKEN=<token> schema-setup");
        std::process::exit(e.exit_code());
    }

    let token = config.token.clone().unwrap_or_default();
    let transport = HttpTransport::new(config.endpoint.clone()).with_token(token);
    let installer = SchemaInstaller::new(
        ManagementClient::new(transport),
        config.environment_id.clone(),
        config.asset_model_id.clone(),
    )
    .with_settle_delay(config.settle_delay());

    println!("{}", "=".repeat(60));
    println!("Core Home Staging: CMS Schema Setup");
    println!("{}", "=".repeat(60));

    match installer.install().await {
        Ok(report) => {
            println!(
                "✅ Schema setup complete! {} models created, {} already existed, {} fields added",
                report.models_created, report.models_existing, report.fields_created
            );
            for model in &report.models_skipped {
                println!("⚠️  Fields skipped for {} (model id not found)", model);
            }
            println!("\nNext steps:");
            println!("1. Run: HYGRAPH_TOKEN=<token> seed-content");
            println!("2. Run: cms-build");
        }
        Err(e) => {
            tracing::error!("❌ Setup failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ Setup failed: {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
