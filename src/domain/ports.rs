use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn site_root(&self) -> &str;
    fn snapshot_file(&self) -> &str;
    fn dist_dir(&self) -> &str;
    fn max_attempts(&self) -> u32;
    fn retry_base_delay(&self) -> Duration;
    fn chunk_pause(&self) -> Duration;
    fn aggregate_query(&self) -> bool;
}

/// Raw HTTP answer from the content API, before status and `errors` are interpreted.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn post(&self, query: &str) -> Result<TransportResponse>;
}
