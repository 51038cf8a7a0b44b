//! End-to-end tests for dataset version creation.

use std::sync::Arc;

use chrono::Duration;

use datahub::core::config::AppConfig;
use datahub::core::error::ErrorKind;
use datahub::core::traits::clock::Clock;
use datahub::core::types::violation::ViolationRule;
use datahub::database::VersionStore;
use datahub::entity::dataset::Dataset;
use datahub::entity::field::{DatasetField, FieldTree};
use datahub::entity::version::{DatasetVersion, VersionState};
use datahub::service::{CreateVersionRequest, VersionWorkflow};

use crate::helpers::{
    SOFTWARE_KEY, FailingStore, TestApp, citation_schema, draft_of_latest, released_dataset,
    valid_fields,
};

#[tokio::test]
async fn test_draft_from_released_copies_files_and_persists() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(3).await;
    app.clock.advance(Duration::minutes(5));
    let source_files = dataset.versions[0].file_metadatas.clone();

    let candidate = draft_of_latest(&dataset);
    let request = app.workflow.request(candidate);
    assert!(request.validate);

    let created = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, request)
        .await
        .expect("draft should be created");

    assert_eq!(created.state, VersionState::Draft);
    assert_eq!(dataset.versions[0].id, created.id);
    assert_eq!(dataset.versions.len(), 2);
    assert_eq!(dataset.modified_at, Some(app.clock.now()));
    assert_eq!(created.last_update_time, Some(app.clock.now()));

    assert_eq!(created.file_metadatas.len(), source_files.len());
    for (copy, source) in created.file_metadatas.iter().zip(&source_files) {
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.data_file_id, source.data_file_id);
        assert_eq!(copy.display_order, source.display_order);
        assert_eq!(copy.version_id, created.id);
    }

    let persisted = app.persisted(dataset.id).await;
    assert_eq!(persisted.versions.len(), 2);
    assert_eq!(persisted.versions[0].id, created.id);
    assert_eq!(persisted.revision, dataset.revision);

    let latest = app.store.load_latest(dataset.id).await.unwrap().unwrap();
    assert_eq!(latest.file_metadatas, created.file_metadatas);
}

#[tokio::test]
async fn test_stored_fields_are_tidied() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(0).await;

    let mut fields = valid_fields();
    fields.set_field("citation", "title", DatasetField::primitive("  Ocean Survey  "));
    let candidate = DatasetVersion::draft().with_fields(fields);

    let created = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .unwrap();

    assert_eq!(
        created.fields.field("citation", "title"),
        Some(&DatasetField::primitive("Ocean Survey"))
    );
    assert!(created.fields.field("citation", "subtitle").is_none());
    assert!(created.fields.field("software", "codeRepository").is_none());
    assert_eq!(created.fields.field_count(), valid_fields().field_count());
}

#[tokio::test]
async fn test_second_draft_is_rejected() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(2).await;
    let first = draft_of_latest(&dataset);
    app.workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(first))
        .await
        .unwrap();
    let snapshot = dataset.clone();

    let second = draft_of_latest(&dataset);
    let err = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(second))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("draft"));
    assert_eq!(dataset, snapshot);
    assert_eq!(app.persisted(dataset.id).await.versions.len(), 2);
}

#[tokio::test]
async fn test_candidate_already_in_history_is_rejected() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(0).await;
    let existing = dataset.versions[0].clone();

    let err = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(existing))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(dataset.versions.len(), 1);
}

#[tokio::test]
async fn test_missing_required_field_rejects_whole_operation() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(1).await;
    let snapshot = dataset.clone();
    app.clock.advance(Duration::hours(1));

    let fields = FieldTree::new()
        .with_field("citation", "subject", DatasetField::controlled("Physics"))
        .with_field("software", "softwareVersion", DatasetField::primitive("1.0"));
    let candidate = DatasetVersion::draft().with_fields(fields);

    let err = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].block, "citation");
    assert_eq!(err.violations[0].field, "title");
    assert_eq!(err.violations[0].rule, ViolationRule::RequiredMissing);

    assert_eq!(dataset.versions.len(), 1);
    assert_eq!(dataset.modified_at, snapshot.modified_at);
    assert_eq!(app.persisted(dataset.id).await, snapshot);
}

#[tokio::test]
async fn test_all_violations_are_reported() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(0).await;

    let mut fields = valid_fields();
    fields.set_field("citation", "subject", DatasetField::controlled("Astrology"));
    fields.set_field("citation", "productionDate", DatasetField::primitive("last spring"));
    fields.set_field(
        "citation",
        "author",
        DatasetField::compound([("authorAffiliation", DatasetField::primitive("MIT"))]),
    );
    let candidate = DatasetVersion::draft().with_fields(fields);

    let err = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .unwrap_err();

    let mut fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["author.authorName", "productionDate", "subject"]);
}

#[tokio::test]
async fn test_validation_can_be_skipped() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(0).await;

    let fields = FieldTree::new()
        .with_field("citation", "title", DatasetField::primitive(" "))
        .with_field("software", "softwareVersion", DatasetField::primitive("1.0"));
    let candidate = DatasetVersion::draft().with_fields(fields);

    let created = app
        .workflow
        .create_version(
            &app.ctx(),
            &mut dataset,
            CreateVersionRequest::new(candidate).without_validation(),
        )
        .await
        .expect("unvalidated version should be stored");

    assert!(created.fields.field("citation", "title").is_none());
    assert!(!created.fields.has_block("geospatial"));
    assert_eq!(created.fields.field_count(), 1);
}

#[tokio::test]
async fn test_system_block_requires_privileged_key() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(0).await;
    let changed = || {
        let mut fields = valid_fields();
        fields.set_field("software", "softwareVersion", DatasetField::primitive("2.0"));
        DatasetVersion::draft().with_fields(fields)
    };

    let err = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(changed()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .workflow
        .create_version(
            &app.ctx(),
            &mut dataset,
            CreateVersionRequest::new(changed()).with_privileged_key("guess"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(dataset.versions.len(), 1);

    let created = app
        .workflow
        .create_version(
            &app.ctx(),
            &mut dataset,
            CreateVersionRequest::new(changed()).with_privileged_key(SOFTWARE_KEY),
        )
        .await
        .unwrap();
    assert_eq!(
        created.fields.field("software", "softwareVersion"),
        Some(&DatasetField::primitive("2.0"))
    );
}

#[tokio::test]
async fn test_released_version_over_draft_is_permitted() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(1).await;
    let draft = draft_of_latest(&dataset);
    app.workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(draft))
        .await
        .unwrap();

    let released = DatasetVersion::released(2, 0).with_fields(valid_fields());
    let created = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(released))
        .await
        .unwrap();

    assert_eq!(created.state, VersionState::Released);
    assert_eq!(created.file_metadatas.len(), 1);
    let states: Vec<VersionState> = dataset.versions.iter().map(|v| v.state).collect();
    assert_eq!(
        states,
        vec![
            VersionState::Released,
            VersionState::Draft,
            VersionState::Released
        ]
    );
}

#[tokio::test]
async fn test_first_version_of_new_dataset() {
    let app = TestApp::new();
    let mut dataset = Dataset::new();
    let mut fields = valid_fields();
    fields.retain_blocks(|name, _| name != "software");
    let candidate = DatasetVersion::draft().with_fields(fields);

    let created = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .expect("first version should be stored");

    assert!(created.file_metadatas.is_empty());
    assert_eq!(created.dataset_id, Some(dataset.id));
    assert_eq!(app.persisted(dataset.id).await.versions.len(), 1);
}

#[tokio::test]
async fn test_store_failure_restores_history() {
    let config = AppConfig::from_toml(crate::helpers::TEST_CONFIG).unwrap();
    let app = TestApp::new();
    let workflow = VersionWorkflow::new(
        Arc::new(FailingStore),
        app.clock.clone(),
        Arc::new(citation_schema()),
        &config.versioning,
    )
    .unwrap()
    .with_indexer(app.indexer.clone());

    let mut dataset = released_dataset(2);
    let snapshot = dataset.clone();
    let candidate = draft_of_latest(&dataset);

    let err = workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Database);
    assert_eq!(dataset, snapshot);
    assert!(app.indexer.calls.lock().await.is_empty());
}

#[tokio::test]
async fn test_stale_copy_gets_retryable_conflict() {
    let app = TestApp::new();
    let dataset = app.seed_released(1).await;
    let mut alice = dataset.clone();
    let mut bob = dataset.clone();

    let draft = draft_of_latest(&alice);
    app.workflow
        .create_version(&app.ctx(), &mut alice, CreateVersionRequest::new(draft))
        .await
        .unwrap();

    let released = DatasetVersion::released(2, 0).with_fields(valid_fields());
    let err = app
        .workflow
        .create_version(&app.ctx(), &mut bob, CreateVersionRequest::new(released))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.is_retryable());
    assert_eq!(bob, dataset);

    let mut reloaded = app.persisted(dataset.id).await;
    let released = DatasetVersion::released(2, 0).with_fields(valid_fields());
    app.workflow
        .create_version(&app.ctx(), &mut reloaded, CreateVersionRequest::new(released))
        .await
        .expect("retry on a fresh copy should succeed");
    assert_eq!(app.persisted(dataset.id).await.versions.len(), 3);
}

#[tokio::test]
async fn test_reindex_is_requested_after_store() {
    let app = TestApp::new();
    let mut dataset = app.seed_released(0).await;
    let candidate = draft_of_latest(&dataset);

    app.workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .unwrap();

    let calls = app.indexer.wait_for(1).await;
    assert_eq!(calls, vec![(dataset.id, true)]);
}

#[tokio::test]
async fn test_reindex_failure_is_not_reported() {
    let app = TestApp::with_failing_indexer();
    let mut dataset = app.seed_released(0).await;
    let candidate = draft_of_latest(&dataset);

    let result = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await;

    assert!(result.is_ok());
    assert_eq!(app.indexer.wait_for(1).await.len(), 1);
    assert_eq!(app.persisted(dataset.id).await.versions.len(), 2);
}

#[tokio::test]
async fn test_system_block_on_first_version_requires_key() {
    let app = TestApp::new();
    let mut dataset = Dataset::new();
    let candidate = DatasetVersion::draft().with_fields(valid_fields());

    let err = app
        .workflow
        .create_version(&app.ctx(), &mut dataset, CreateVersionRequest::new(candidate))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(dataset.versions.is_empty());
    assert!(app.store.is_empty().await);
}

#[test]
fn test_validation_must_precede_tidy() {
    use datahub::service::{FieldNormalizer, FieldValidator};

    let schema = citation_schema();
    let normalizer = FieldNormalizer::new();
    let validator = FieldValidator::new().unwrap();

    let mut fields = valid_fields();
    fields.set_field("citation", "title", DatasetField::primitive(""));
    normalizer.initialize(&mut fields, &schema);

    let before = validator.validate(&fields, &schema);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].field, "title");

    normalizer.normalize(&mut fields, true);
    assert!(fields.field("citation", "title").is_none());
    assert!(validator.validate(&fields, &schema).is_empty());
}
