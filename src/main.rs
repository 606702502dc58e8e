use clap::Parser;
use core_staging_cms::utils::{logger, validation::Validate};
use core_staging_cms::{BuildConfig, BuildEngine, HttpTransport, LocalStorage};

#[tokio::main]
async fn main() {
    let config = BuildConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cms-build");
    if config.verbose {
        tracing::debug!("Build config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let transport = HttpTransport::new(config.endpoint.clone());
    let storage = LocalStorage::new(config.root.clone());
    let monitor = config.monitor;
    let engine = BuildEngine::new_with_monitoring(transport, storage, config, monitor);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Build complete: {} collections, {} files staged",
                report.collections.len(),
                report.staging.copied_files
            );
            println!("✅ Build complete!");
            println!("📁 Snapshot saved to: {}", report.snapshot_path);
            for skipped in &report.staging.skipped {
                println!("⚠️  Skipped missing asset: {}", skipped);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
