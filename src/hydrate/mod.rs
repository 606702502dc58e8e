//! Runtime hydration of the statically rendered page.
//!
//! The page ships with complete fallback content. [`Hydrator::hydrate`] fetches
//! the live content in a single request and rewrites the regions it has data
//! for; any failure leaves the page exactly as it was.

pub mod page;
pub mod sections;
pub mod widgets;

use crate::core::client::{ContentClient, HttpTransport, RetryPolicy};
use crate::core::query::QueryPlan;
use crate::domain::model::SiteContent;
use crate::domain::ports::GraphqlTransport;
use crate::utils::error::Result;
use page::Page;
use serde::Deserialize;
use widgets::WidgetRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
    Hydrated { sections: Vec<&'static str> },
    Fallback { reason: String },
}

impl HydrationOutcome {
    pub fn is_hydrated(&self) -> bool {
        matches!(self, Self::Hydrated { .. })
    }
}

/// Page-side CMS settings. Both fields default to "off", so a page without
/// a config block keeps its static content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HydratorConfig {
    pub endpoint: String,
    pub enabled: bool,
}

impl HydratorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            enabled: true,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.trim().is_empty()
    }
}

pub struct Hydrator<T: GraphqlTransport> {
    client: ContentClient<T>,
    plan: QueryPlan,
    configured: bool,
}

impl<T: GraphqlTransport> Hydrator<T> {
    /// 只嘗試一次，失敗就保留靜態內容
    pub fn new(transport: T) -> Self {
        Self {
            client: ContentClient::new(transport, RetryPolicy::single_attempt()),
            plan: QueryPlan::aggregate(),
            configured: true,
        }
    }

    /// 未啟用或沒有端點時不會發出任何請求
    pub fn with_config(transport: T, config: &HydratorConfig) -> Self {
        Self {
            configured: config.is_configured(),
            ..Self::new(transport)
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub async fn fetch_content(&self) -> Result<SiteContent> {
        let mut data = serde_json::Map::new();
        for chunk in self.plan.chunks() {
            data.extend(self.client.fetch(&chunk.document()).await?);
        }
        Ok(SiteContent::from_data_lenient(data))
    }

    pub async fn hydrate(&self, page: &mut Page, widgets: &mut WidgetRegistry) -> HydrationOutcome {
        if !self.configured {
            tracing::debug!("CMS not configured, keeping static content");
            return HydrationOutcome::Fallback {
                reason: "CMS not configured".to_string(),
            };
        }

        let content = match self.fetch_content().await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("⚠️ CMS fetch failed, keeping static content: {}", e);
                return HydrationOutcome::Fallback {
                    reason: e.to_string(),
                };
            }
        };

        let sections = sections::apply(&content, page);
        widgets.rebind(page);
        tracing::info!("✅ Hydrated {} sections from CMS", sections.len());
        HydrationOutcome::Hydrated { sections }
    }
}

impl Hydrator<HttpTransport> {
    pub fn from_config(config: &HydratorConfig) -> Self {
        Self::with_config(HttpTransport::new(config.endpoint.trim()), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_enabled_flag_and_endpoint() {
        assert!(HydratorConfig::new("https://cms.example/content").is_configured());
        assert!(!HydratorConfig::new("   ").is_configured());
        assert!(!HydratorConfig::default().is_configured());

        let disabled = HydratorConfig {
            enabled: false,
            ..HydratorConfig::new("https://cms.example/content")
        };
        assert!(!disabled.is_configured());
    }

    #[test]
    fn test_config_block_without_enabled_stays_off() {
        let config =
            HydratorConfig::from_json_str(r#"{ "endpoint": "https://cms.example/content" }"#)
                .unwrap();
        assert!(!config.is_configured());

        let config = HydratorConfig::from_json_str(
            r#"{ "endpoint": "https://cms.example/content", "enabled": true }"#,
        )
        .unwrap();
        assert!(Hydrator::from_config(&config).is_configured());
    }
}
