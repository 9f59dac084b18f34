//! Stored profiles driving resource managers end to end.

use zosmf_sdk::config::FileProfileStore;
use zosmf_sdk::datasets::DatasetManager;
use zosmf_sdk::jobs::JobManager;
use zosmf_sdk::ProfileStore;

use crate::common::{MockZosmf, BASE_PATH};

#[tokio::test]
async fn test_managers_from_stored_default_profile() {
    let mock = MockZosmf::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileProfileStore::with_path(dir.path().join(".zowe").join("zowe.config.json"));

    store.save(&mock.profile()).unwrap();
    store.set_default("mock").unwrap();

    let profile = store.get_default().unwrap();
    assert_eq!(profile.base_path, BASE_PATH);
    assert!(profile.reject_unauthorized);

    let datasets = DatasetManager::from_profile(&profile).unwrap();
    datasets.upload_text("IBMUSER.CONFIG", "stored").await.unwrap();

    let jobs = JobManager::from_store(&store, "mock").unwrap();
    let submitted = jobs
        .submit_job_statement("//CFGJOB JOB (ACCT)\n//S1 EXEC PGM=IEFBR14")
        .await
        .unwrap();
    assert_eq!(submitted.job_name, "CFGJOB");

    let session = store.create_session("mock").unwrap();
    assert!(session.base_url().ends_with(BASE_PATH));
    assert_eq!(
        DatasetManager::new(session).download_text("IBMUSER.CONFIG").await.unwrap(),
        "stored"
    );
}

#[tokio::test]
async fn test_missing_profile_surfaces_through_manager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zowe.config.json");
    let store = FileProfileStore::with_path(&path);

    let err = JobManager::from_store(&store, "dev").unwrap_err();
    assert!(err.config_error().unwrap().is_config_not_found());

    store
        .save(&zosmf_sdk::Profile::new("other", "host", 443, "u", "p"))
        .unwrap();
    let err = JobManager::from_store(&store, "dev").unwrap_err();
    assert!(err.config_error().unwrap().is_profile_not_found());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let profile = zosmf_sdk::Profile::new("down", "127.0.0.1", 1, "IBMUSER", "secret")
        .with_protocol("http");
    let jobs = JobManager::from_profile(&profile).unwrap();

    let err = jobs.get_job("JOB00001").await.unwrap_err();
    assert!(err.is_transport());
}
