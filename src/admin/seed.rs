use crate::admin::escape_literal;
use crate::config::seed_config::{SeedContent, SeedValue};
use crate::core::client::ContentClient;
use crate::domain::ports::GraphqlTransport;
use crate::utils::error::{CmsError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

fn render_value(value: &SeedValue) -> String {
    match value {
        SeedValue::Integer(n) => n.to_string(),
        SeedValue::Text(text) => format!("\"{}\"", escape_literal(text)),
        SeedValue::List(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| format!("\"{}\"", escape_literal(item)))
                .collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Renders an entry as GraphQL input fields, one `key: literal` per line.
pub fn render_mutation_fields(entry: &BTreeMap<String, SeedValue>) -> String {
    entry
        .iter()
        .map(|(key, value)| format!("{}: {}", key, render_value(value)))
        .collect::<Vec<_>>()
        .join("\n    ")
}

pub fn create_mutation(model: &str, entry: &BTreeMap<String, SeedValue>) -> String {
    format!(
        "mutation {{\n  create{}(data: {{\n    {}\n  }}) {{\n    id\n  }}\n}}",
        model,
        render_mutation_fields(entry)
    )
}

pub fn publish_mutation(model: &str, id: &str) -> String {
    format!(
        "mutation {{\n  publish{}(where: {{ id: \"{}\" }}, to: PUBLISHED) {{\n    id\n  }}\n}}",
        model,
        escape_literal(id)
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub published: usize,
    pub notes: Vec<String>,
}

pub struct Seeder<T: GraphqlTransport> {
    client: ContentClient<T>,
}

impl<T: GraphqlTransport> Seeder<T> {
    pub fn new(client: ContentClient<T>) -> Self {
        Self { client }
    }

    /// Creates one entry and publishes it; returns the new id.
    pub async fn create_and_publish(
        &self,
        model: &str,
        entry: &BTreeMap<String, SeedValue>,
    ) -> Result<String> {
        let data = self.client.fetch(&create_mutation(model, entry)).await?;
        let key = format!("create{}", model);
        let id = data
            .get(&key)
            .and_then(|created| created.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| CmsError::UnexpectedResponse {
                message: format!("{} returned no id", key),
            })?
            .to_string();

        self.client.fetch(&publish_mutation(model, &id)).await?;
        tracing::debug!("📤 Published {} {}", model, id);
        Ok(id)
    }

    pub async fn seed_all(&self, content: &SeedContent) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for model in &content.models {
            tracing::info!("🌱 Seeding {} ({} entries)", model.name, model.entries.len());
            for entry in &model.entries {
                self.create_and_publish(&model.name, entry).await?;
                report.published += 1;
            }
            if let Some(note) = &model.note {
                tracing::info!("📝 Note: {}", note);
                report.notes.push(note.clone());
            }
        }

        tracing::info!("✅ Seeded and published {} entries", report.published);
        Ok(report)
    }
}
