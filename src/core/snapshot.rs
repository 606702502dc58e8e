use crate::core::client::ContentClient;
use crate::core::query::QueryPlan;
use crate::domain::ports::{GraphqlTransport, Storage};
use crate::utils::error::{CmsError, Result};
use serde_json::{Map, Value};
use std::time::Duration;

pub const DEFAULT_CHUNK_PAUSE: Duration = Duration::from_millis(500);

/// The persisted aggregate: collection name → raw query result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    collections: Map<String, Value>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn get(&self, collection: &str) -> Option<&Value> {
        self.collections.get(collection)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.collections
    }

    /// 合併一個分塊的結果；集合名稱重複視為錯誤
    pub fn merge(&mut self, chunk: Map<String, Value>) -> Result<()> {
        for (name, value) in chunk {
            if self.collections.contains_key(&name) {
                return Err(CmsError::DuplicateCollection { name });
            }
            self.collections.insert(name, value);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.collections)?)
    }
}

pub struct SnapshotBuilder<T: GraphqlTransport, S: Storage> {
    client: ContentClient<T>,
    storage: S,
    plan: QueryPlan,
    output_file: String,
    chunk_pause: Duration,
}

impl<T: GraphqlTransport, S: Storage> SnapshotBuilder<T, S> {
    pub fn new(client: ContentClient<T>, storage: S, output_file: impl Into<String>) -> Self {
        Self {
            client,
            storage,
            plan: QueryPlan::chunked(),
            output_file: output_file.into(),
            chunk_pause: DEFAULT_CHUNK_PAUSE,
        }
    }

    pub fn with_plan(mut self, plan: QueryPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_chunk_pause(mut self, pause: Duration) -> Self {
        self.chunk_pause = pause;
        self
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Fetches every chunk in order, then writes the snapshot once.
    pub async fn collect(&self) -> Result<Snapshot> {
        let total = self.plan.len();
        let mut snapshot = Snapshot::default();

        for (index, chunk) in self.plan.chunks().iter().enumerate() {
            tracing::info!("📡 Query {}/{}...", index + 1, total);
            let data = self.client.fetch(&chunk.document()).await?;
            tracing::debug!(
                "Query {}/{} returned {} collections",
                index + 1,
                total,
                data.len()
            );
            snapshot.merge(data)?;

            // 分塊之間稍作停頓，避免觸發併發上限
            if index + 1 < total {
                tokio::time::sleep(self.chunk_pause).await;
            }
        }

        Ok(snapshot)
    }

    pub async fn build(&self) -> Result<Snapshot> {
        let snapshot = self.collect().await?;
        let bytes = snapshot.to_json()?;
        self.storage.write_file(&self.output_file, &bytes).await?;

        tracing::info!(
            "💾 {} written ({} collections)",
            self.output_file,
            snapshot.len()
        );
        Ok(snapshot)
    }
}
