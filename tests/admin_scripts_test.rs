use anyhow::Result;
use core_staging_cms::admin::schema::{ManagementClient, MigrationOutcome, SchemaInstaller, SCHEMA};
use core_staging_cms::admin::seed::Seeder;
use core_staging_cms::config::seed_config::SeedContent;
use core_staging_cms::core::client::{ContentClient, RetryPolicy};
use core_staging_cms::{CmsError, HttpTransport};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

const SEED: &str = r#"
[[models]]
name = "Faq"
note = "Review answers before launch"

[[models.entries]]
question = "How long does staging take?"
answer = "Most setups take 1–2 days. We \"move fast\"."
order = 2
"#;

#[tokio::test]
async fn test_seed_creates_then_publishes_each_entry() -> Result<()> {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/content")
            .body_contains("createFaq")
            .body_contains("order: 2");
        then.status(200)
            .json_body(json!({ "data": { "createFaq": { "id": "faq-1" } } }));
    });
    let publish = server.mock(|when, then| {
        when.method(POST)
            .path("/content")
            .body_contains("publishFaq")
            .body_contains("faq-1")
            .body_contains("PUBLISHED");
        then.status(200)
            .json_body(json!({ "data": { "publishFaq": { "id": "faq-1" } } }));
    });

    let content = SeedContent::from_toml_str(SEED)?;
    let transport = HttpTransport::new(server.url("/content")).with_token("pat-123");
    let seeder = Seeder::new(ContentClient::new(transport, RetryPolicy::single_attempt()));

    let report = seeder.seed_all(&content).await?;

    create.assert_hits(1);
    publish.assert_hits(1);
    assert_eq!(report.published, 1);
    assert_eq!(report.notes, vec!["Review answers before launch".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_seed_stops_when_create_returns_no_id() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/content").body_contains("createFaq");
        then.status(200).json_body(json!({ "data": { "createFaq": null } }));
    });
    let publish = server.mock(|when, then| {
        when.method(POST).path("/content").body_contains("publishFaq");
        then.status(200).json_body(json!({ "data": {} }));
    });

    let content = SeedContent::from_toml_str(SEED)?;
    let seeder = Seeder::new(ContentClient::new(
        HttpTransport::new(server.url("/content")),
        RetryPolicy::single_attempt(),
    ));

    let result = seeder.seed_all(&content).await;

    assert!(matches!(result, Err(CmsError::UnexpectedResponse { .. })));
    publish.assert_hits(0);
    Ok(())
}

#[test]
fn test_bundled_seed_file_parses() -> Result<()> {
    let content = SeedContent::from_file("content/seed.toml")?;

    let names: Vec<&str> = content.models.iter().map(|m| m.name.as_str()).collect();
    let schema: Vec<&str> = SCHEMA.iter().map(|m| m.api_id).collect();
    assert_eq!(names, schema);

    let faqs = content.models.iter().find(|m| m.name == "Faq").unwrap();
    assert_eq!(faqs.entries.len(), 8);
    assert!(content
        .models
        .iter()
        .any(|m| m.name == "PortfolioItem" && m.note.is_some()));
    Ok(())
}

#[tokio::test]
async fn test_existing_model_is_skipped_over_http() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/management").body_contains("createModel");
        then.status(200).json_body(json!({
            "errors": [{ "message": "Model with apiId 'Faq' already exists" }]
        }));
    });

    let client = ManagementClient::new(HttpTransport::new(server.url("/management")))
        .with_pause(Duration::ZERO);
    let outcome = client
        .execute_migration(&SCHEMA[11].create_mutation("env-1"))
        .await?;

    mock.assert_hits(1);
    assert_eq!(outcome, MigrationOutcome::AlreadyExists);
    Ok(())
}

#[tokio::test]
async fn test_failed_connection_check_stops_setup() -> Result<()> {
    let server = MockServer::start();
    let connection_check = server.mock(|when, then| {
        when.method(POST).path("/management").body_contains("__typename");
        then.status(401).body("unauthorized");
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/management").body_contains("createModel");
        then.status(200).json_body(json!({ "data": {} }));
    });

    let installer = SchemaInstaller::new(
        ManagementClient::new(HttpTransport::new(server.url("/management"))),
        "env-1",
        "asset-1",
    )
    .with_settle_delay(Duration::ZERO);

    let result = installer.install().await;

    assert!(matches!(result, Err(CmsError::HttpStatus { status: 401 })));
    connection_check.assert_hits(1);
    create.assert_hits(0);
    Ok(())
}
