use anyhow::Result;
use core_staging_cms::{BuildConfig, BuildEngine, CmsError, HttpTransport, LocalStorage};
use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn site_root() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    std::fs::write(root.join("index.html"), "<html></html>")?;
    std::fs::create_dir_all(root.join("css"))?;
    std::fs::write(root.join("css/styles.css"), "body {}")?;
    std::fs::create_dir_all(root.join("js"))?;
    std::fs::write(root.join("js/main.js"), "")?;
    std::fs::write(root.join("README.md"), "not deployed")?;
    Ok(temp_dir)
}

fn config(endpoint: String, root: &Path) -> BuildConfig {
    BuildConfig {
        endpoint,
        root: root.to_string_lossy().into_owned(),
        retry_delay_secs: 0,
        chunk_pause_ms: 0,
        ..BuildConfig::default()
    }
}

fn engine(config: BuildConfig) -> BuildEngine<HttpTransport, LocalStorage, BuildConfig> {
    let transport = HttpTransport::new(config.endpoint.clone());
    let storage = LocalStorage::new(config.root.clone());
    BuildEngine::new(transport, storage, config)
}

/// 每個分塊以其第一個集合辨識
const CHUNKS: [(&str, &[&str]); 6] = [
    ("heroSections(", &["heroSections", "socialProofStats"]),
    ("whyStagingSections(", &["whyStagingSections", "services"]),
    ("portfolioItems(", &["portfolioItems", "resultsSections", "resultStats"]),
    ("howItWorksSteps(", &["howItWorksSteps", "testimonials"]),
    ("aboutSections(", &["aboutSections", "serviceAreas"]),
    ("faqs(", &["faqs", "contactInfos", "siteSettingsEntries"]),
];

#[tokio::test]
async fn test_build_writes_snapshot_and_stages_assets() -> Result<()> {
    let temp_dir = site_root()?;
    let server = MockServer::start();

    let mocks: Vec<_> = CHUNKS
        .iter()
        .map(|(marker, collections)| {
            let data: serde_json::Map<String, serde_json::Value> = collections
                .iter()
                .map(|c| (c.to_string(), json!([{ "label": format!("{} entry", c) }])))
                .collect();
            server.mock(|when, then| {
                when.method(POST).path("/graphql").body_contains(*marker);
                then.status(200).json_body(json!({ "data": data }));
            })
        })
        .collect();

    let report = engine(config(server.url("/graphql"), temp_dir.path()))
        .run()
        .await?;

    for mock in &mocks {
        mock.assert_hits(1);
    }
    assert_eq!(report.collections.len(), 14);

    let snapshot: serde_json::Value =
        serde_json::from_slice(&std::fs::read(temp_dir.path().join("cms-data.json"))?)?;
    let keys: Vec<&str> = snapshot
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 14);
    assert_eq!(keys.first(), Some(&"heroSections"));
    assert_eq!(snapshot["faqs"][0]["label"], "faqs entry");

    let dist = temp_dir.path().join("dist");
    assert!(dist.join("index.html").exists());
    assert!(dist.join("css/styles.css").exists());
    assert!(dist.join("js/main.js").exists());
    assert!(dist.join("cms-data.json").exists());
    assert!(!dist.join("README.md").exists());
    assert!(report.staging.skipped.contains(&"images".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_failed_chunk_leaves_no_snapshot() -> Result<()> {
    let temp_dir = site_root()?;
    let server = MockServer::start();

    let ok = |marker: &'static str| {
        server.mock(move |when, then| {
            when.method(POST).path("/graphql").body_contains(marker);
            then.status(200).json_body(json!({ "data": {} }));
        })
    };
    let first = ok("heroSections(");
    let second = ok("whyStagingSections(");
    let third = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("portfolioItems(");
        then.status(500).body("upstream exploded");
    });
    let fourth = ok("howItWorksSteps(");

    let result = engine(config(server.url("/graphql"), temp_dir.path()))
        .run()
        .await;

    match result {
        Err(CmsError::HttpStatus { status }) => assert_eq!(status, 500),
        other => panic!("expected HTTP 500 failure, got {:?}", other.map(|r| r.collections)),
    }
    first.assert_hits(1);
    second.assert_hits(1);
    third.assert_hits(1);
    fourth.assert_hits(0);

    assert!(!temp_dir.path().join("cms-data.json").exists());
    assert!(!temp_dir.path().join("dist").exists());
    Ok(())
}

#[tokio::test]
async fn test_graphql_errors_fail_the_build() -> Result<()> {
    let temp_dir = site_root()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200)
            .json_body(json!({ "errors": [{ "message": "Field 'x' missing" }, { "message": "bad" }] }));
    });

    let err = engine(config(server.url("/graphql"), temp_dir.path()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(&err, CmsError::GraphQl { messages } if messages == "Field 'x' missing, bad"));
    assert_ne!(err.exit_code(), 0);
    Ok(())
}

#[tokio::test]
async fn test_aggregate_mode_uses_single_request() -> Result<()> {
    let temp_dir = site_root()?;
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("heroSections(")
            .body_contains("siteSettingsEntries(");
        then.status(200)
            .json_body(json!({ "data": { "heroSections": [], "faqs": [] } }));
    });

    let config = BuildConfig {
        aggregate: true,
        ..config(server.url("/graphql"), temp_dir.path())
    };
    let report = engine(config).run().await?;

    mock.assert_hits(1);
    assert_eq!(report.collections, vec!["heroSections", "faqs"]);
    Ok(())
}

#[tokio::test]
async fn test_dist_pointing_at_site_root_is_rejected_without_deleting() -> Result<()> {
    let temp_dir = site_root()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(json!({ "data": { "faqs": [] } }));
    });

    for dist in [".", "css"] {
        let config = BuildConfig {
            dist: dist.to_string(),
            aggregate: true,
            ..config(server.url("/graphql"), temp_dir.path())
        };
        let err = engine(config).run().await.unwrap_err();

        assert!(matches!(&err, CmsError::InvalidConfigValueError { field, .. } if field == "dist"));
        assert!(temp_dir.path().join("index.html").exists());
        assert!(temp_dir.path().join("css/styles.css").exists());
        assert!(temp_dir.path().join("cms-data.json").exists());
    }
    Ok(())
}
