use crate::core::client::{ContentClient, RetryPolicy};
use crate::core::query::QueryPlan;
use crate::core::snapshot::SnapshotBuilder;
use crate::core::staging::{AssetStager, StagingReport};
use crate::domain::ports::{ConfigProvider, GraphqlTransport, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::BuildMonitor;
use chrono::{DateTime, Utc};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub collections: Vec<String>,
    pub snapshot_path: String,
    pub staging: StagingReport,
    pub generated_at: DateTime<Utc>,
}

/// Snapshot first, staging second; staging never runs after a failed snapshot.
pub struct BuildEngine<T: GraphqlTransport, S: Storage, C: ConfigProvider> {
    snapshot: SnapshotBuilder<T, S>,
    stager: AssetStager,
    config: C,
    monitor: BuildMonitor,
}

impl<T: GraphqlTransport, S: Storage, C: ConfigProvider> BuildEngine<T, S, C> {
    pub fn new(transport: T, storage: S, config: C) -> Self {
        Self::new_with_monitoring(transport, storage, config, false)
    }

    pub fn new_with_monitoring(
        transport: T,
        storage: S,
        config: C,
        enable_monitoring: bool,
    ) -> Self {
        let policy = RetryPolicy::new(config.max_attempts(), config.retry_base_delay());
        let plan = if config.aggregate_query() {
            QueryPlan::aggregate()
        } else {
            QueryPlan::chunked()
        };

        let snapshot = SnapshotBuilder::new(
            ContentClient::new(transport, policy),
            storage,
            config.snapshot_file(),
        )
        .with_plan(plan)
        .with_chunk_pause(config.chunk_pause());
        let stager = AssetStager::default().with_snapshot(config.snapshot_file());

        Self {
            snapshot,
            stager,
            config,
            monitor: BuildMonitor::new(enable_monitoring),
        }
    }

    pub async fn run(&self) -> Result<BuildReport> {
        tracing::info!("🚀 Fetching content from {}", self.config.endpoint());
        self.monitor.log_phase("Start");

        let snapshot = self.snapshot.build().await?;
        self.monitor.log_phase("Snapshot");

        let root = Path::new(self.config.site_root());
        let dist = root.join(self.config.dist_dir());
        let staging = self.stager.stage(root, &dist)?;
        self.monitor.log_phase("Staging");
        self.monitor.log_summary();

        Ok(BuildReport {
            collections: snapshot.keys().map(str::to_string).collect(),
            snapshot_path: root
                .join(self.config.snapshot_file())
                .to_string_lossy()
                .into_owned(),
            staging,
            generated_at: Utc::now(),
        })
    }
}
