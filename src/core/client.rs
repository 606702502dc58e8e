use crate::domain::ports::{GraphqlTransport, TransportResponse};
use crate::utils::error::{CmsError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

pub const RATE_LIMITED: u16 = 429;

/// POSTs `{"query": ...}` to a GraphQL endpoint.
pub struct HttpTransport {
    endpoint: String,
    token: Option<String>,
    client: Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            client: Client::new(),
        }
    }

    /// 管理 API 需要 Bearer token，內容 API 是公開唯讀的
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn post(&self, query: &str) -> Result<TransportResponse> {
        tracing::debug!("POST {} ({} bytes of query)", self.endpoint, query.len());

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("CMS response status: {}", status);

        Ok(TransportResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// No retries at all; used by the page hydrator.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// 線性退避：第 n 次嘗試失敗後等待 `base_delay * n`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    data: Option<Map<String, Value>>,
    errors: Option<Vec<GraphqlError>>,
}

/// Interprets a raw response: status, then `errors`, then `data`.
pub fn interpret_response(response: &TransportResponse) -> Result<Map<String, Value>> {
    let success = (200..300).contains(&response.status);

    // errors 欄位即使在非 2xx 時也要優先回報
    let envelope: Option<GraphqlEnvelope> = serde_json::from_str(&response.body).ok();
    if let Some(errors) = envelope.as_ref().and_then(|e| e.errors.as_ref()) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(CmsError::GraphQl {
                messages: messages.join(", "),
            });
        }
    }

    if !success {
        return Err(CmsError::HttpStatus {
            status: response.status,
        });
    }

    match envelope {
        Some(GraphqlEnvelope { data: Some(data), .. }) => Ok(data),
        Some(_) => Ok(Map::new()),
        None => Err(CmsError::UnexpectedResponse {
            message: "response body is not a GraphQL JSON envelope".to_string(),
        }),
    }
}

pub struct ContentClient<T: GraphqlTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: GraphqlTransport> ContentClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one query, retrying only on HTTP 429 with linear backoff.
    pub async fn fetch(&self, query: &str) -> Result<Map<String, Value>> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let response = self.transport.post(query).await?;

            if response.status == RATE_LIMITED {
                if attempt >= max_attempts {
                    return Err(CmsError::RateLimited {
                        attempts: max_attempts,
                    });
                }
                let wait = self.policy.delay_for(attempt);
                tracing::warn!(
                    "⏳ Rate limited. Retrying in {:?}... (attempt {}/{})",
                    wait,
                    attempt,
                    max_attempts
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            return interpret_response(&response);
        }
    }
}
