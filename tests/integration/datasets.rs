//! Dataset content and listing against the mock service.

use zosmf_sdk::datasets::{DatasetFilter, DatasetManager, DownloadRequest, UploadRequest};

use crate::common::{MockZosmf, USER};

#[tokio::test]
async fn test_upload_download_round_trip() {
    let mock = MockZosmf::start().await;
    let datasets = DatasetManager::from_profile(&mock.profile()).unwrap();

    datasets
        .upload_content(&UploadRequest::new("TEST.DATA", "hello"))
        .await
        .unwrap();
    let content = datasets
        .download_content(&DownloadRequest::new("TEST.DATA"))
        .await
        .unwrap();

    assert_eq!(content, "hello");
}

#[tokio::test]
async fn test_empty_filter_lists_session_user_datasets() {
    let mock = MockZosmf::start().await;
    let datasets = DatasetManager::from_profile(&mock.profile()).unwrap();

    datasets.upload_text("IBMUSER.NOTES", "a").await.unwrap();
    datasets.upload_text("OTHER.NOTES", "b").await.unwrap();

    let list = datasets.list_datasets(&DatasetFilter::new()).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.datasets[0].name, "IBMUSER.NOTES");
    assert_eq!(list.datasets[0].record_length, Some(80));

    let received = mock.server.received_requests().await.unwrap();
    let listing = received
        .iter()
        .find(|r| r.method.as_str() == "GET")
        .unwrap();
    let dslevel = listing
        .url
        .query_pairs()
        .find(|(name, _)| name == "dslevel")
        .map(|(_, value)| value.into_owned());
    assert_eq!(dslevel, Some(format!("{}.*", USER)));
}

#[tokio::test]
async fn test_copy_writes_to_target() {
    let mock = MockZosmf::start().await;
    let datasets = DatasetManager::from_profile(&mock.profile()).unwrap();

    datasets.upload_text("SRC", "payload").await.unwrap();
    datasets.copy_dataset("SRC", "DST").await.unwrap();

    let copy = mock
        .server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path().ends_with("/DST"))
        .unwrap();
    assert_eq!(copy.method.as_str(), "PUT");
    let body: serde_json::Value = serde_json::from_slice(&copy.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"request": "copy", "from-dataset": {"dsn": "SRC"}})
    );

    assert_eq!(datasets.download_text("DST").await.unwrap(), "payload");
}

#[tokio::test]
async fn test_exists_and_info_fallback() {
    let mock = MockZosmf::start().await;
    let datasets = DatasetManager::from_profile(&mock.profile()).unwrap();

    assert!(!datasets.exists("IBMUSER.DATA").await.unwrap());
    datasets.upload_text("IBMUSER.DATA", "x").await.unwrap();
    assert!(datasets.exists("IBMUSER.DATA").await.unwrap());

    // The mock answers the metadata request with content, which is not JSON.
    let (info, source) = datasets
        .get_dataset_info_with_source("IBMUSER.DATA")
        .await
        .unwrap();
    assert_eq!(info.name, "IBMUSER.DATA");
    assert_eq!(source, zosmf_sdk::datasets::LookupSource::ListFallback);
}

#[tokio::test]
async fn test_download_missing_dataset() {
    let mock = MockZosmf::start().await;
    let datasets = DatasetManager::from_profile(&mock.profile()).unwrap();

    let err = datasets.download_text("IBMUSER.MISSING").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.body().unwrap().contains("IBMUSER.MISSING"));
}
