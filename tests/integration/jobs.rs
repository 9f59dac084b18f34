//! Job submission and completion against the mock service.

use std::time::Duration;

use zosmf_sdk::jobs::{is_job_complete, JobManager, SubmitJobRequest};

use crate::common::MockZosmf;

const JCL: &str = "//TESTJOB JOB (ACCT),'IT'\n//STEP1 EXEC PGM=IEFBR14";

#[tokio::test]
async fn test_submit_then_wait_for_output() {
    let mock = MockZosmf::start().await;
    let jobs = JobManager::from_profile(&mock.profile()).unwrap();

    let submitted = jobs.submit_job_statement(JCL).await.unwrap();
    assert!(!submitted.job_id.is_empty());
    assert_eq!(submitted.job_name, "TESTJOB");

    let status = jobs
        .wait_for_job_completion(
            &submitted.job_id,
            Duration::from_secs(5),
            Duration::from_millis(100),
        )
        .await
        .unwrap();
    assert!(status.contains("OUTPUT"));
    assert!(is_job_complete(&status));

    let job = jobs.get_job(&submitted.job_id).await.unwrap();
    assert_eq!(job.retcode.as_deref(), Some("CC 0000"));
}

#[tokio::test]
async fn test_submit_without_source_sends_nothing() {
    let mock = MockZosmf::start().await;
    let jobs = JobManager::from_profile(&mock.profile()).unwrap();

    let err = jobs
        .submit_job(&SubmitJobRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn test_unknown_job_is_api_error() {
    let mock = MockZosmf::start().await;
    let jobs = JobManager::from_profile(&mock.profile()).unwrap();

    let err = jobs.get_job_status("JOB99999").await.unwrap_err();
    assert!(err.is_api_error());
    assert_eq!(err.status(), Some(404));
    assert!(err.body().unwrap().contains("JOB99999"));
}

#[tokio::test]
async fn test_sequential_submissions_get_distinct_ids() {
    let mock = MockZosmf::start().await;
    let jobs = JobManager::from_profile(&mock.profile()).unwrap();

    let first = jobs.submit_job_statement(JCL).await.unwrap();
    let second = jobs.submit_job_statement(JCL).await.unwrap();
    assert_ne!(first.job_id, second.job_id);
}
