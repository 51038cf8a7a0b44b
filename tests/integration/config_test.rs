//! Configuration and logging bootstrap.

use datahub::core::config::AppConfig;
use datahub::core::error::ErrorKind;

use crate::helpers::{SOFTWARE_KEY, TEST_CONFIG, TestApp};

#[test]
fn test_config_parses_versioning_section() {
    let config = AppConfig::from_toml(TEST_CONFIG).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "pretty");
    assert!(config.versioning.reindex_on_create);
    assert_eq!(
        config.versioning.system_blocks.get("software").map(String::as_str),
        Some(SOFTWARE_KEY)
    );
}

#[test]
fn test_blank_system_block_key_is_rejected() {
    let err = AppConfig::from_toml(
        r#"
[versioning.system_blocks]
software = "  "
"#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_logging_installs_once() {
    let config = AppConfig::default();
    // Another test may already have installed a subscriber; a second
    // install must fail rather than panic.
    let _ = datahub::init_logging(&config.logging);
    let err = datahub::init_logging(&config.logging).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_reindex_can_be_disabled() {
    let app = TestApp::new();
    let mut config = app.config.clone();
    config.versioning.reindex_on_create = false;
    let workflow = datahub::service::VersionWorkflow::new(
        app.store.clone(),
        app.clock.clone(),
        std::sync::Arc::new(crate::helpers::citation_schema()),
        &config.versioning,
    )
    .unwrap()
    .with_indexer(app.indexer.clone());

    let mut dataset = app.seed_released(0).await;
    let candidate = crate::helpers::draft_of_latest(&dataset);
    workflow
        .create_version(&app.ctx(), &mut dataset, workflow.request(candidate))
        .await
        .unwrap();

    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(app.indexer.calls.lock().await.is_empty());
}
