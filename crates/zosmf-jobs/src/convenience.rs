//! Convenience operations layered on [`JobManager`].

use std::collections::BTreeMap;

use tracing::{instrument, warn};
use zosmf_client::validation::validate_dataset_name;
use zosmf_client::ErrorKind as ClientErrorKind;

use crate::client::JobManager;
use crate::error::{Error, ErrorKind, Result};
use crate::types::*;

/// Status fragments that mean a job has finished.
const COMPLETED_STATUSES: [&str; 7] = [
    "OUTPUT", "CC 0000", "CC 0001", "CC 0002", "CC 0003", "CC 0004", "ABEND",
];

/// Whether `status` signals completion. Matching is a case-insensitive
/// substring test, so `"abend s0c4"` counts.
pub fn is_job_complete(status: &str) -> bool {
    let status = status.to_ascii_uppercase();
    COMPLETED_STATUSES.iter().any(|done| status.contains(done))
}

/// Check a submission before it is sent.
pub fn validate_job_request(request: &SubmitJobRequest) -> Result<()> {
    match request.source_count() {
        0 => {
            return Err(Error::validation(
                "a job source must be specified (job statement, job dataset, or job local file)",
            ))
        }
        1 => {}
        _ => {
            return Err(Error::validation(
                "only one job source may be specified (job statement, job dataset, or job local file)",
            ))
        }
    }

    match request.source() {
        Some(JobSource::Statement(jcl)) if !jcl.to_ascii_uppercase().contains("JOB") => Err(
            Error::validation("job statement must contain a JOB card"),
        ),
        Some(JobSource::Dataset { name, .. }) => {
            // A member reference like `HLQ.JCL(MEMBER)` is validated on the dataset part.
            let dataset = name.split('(').next().unwrap_or(name);
            validate_dataset_name(dataset).map_err(|e| match e.kind {
                ClientErrorKind::Validation(reason) => {
                    Error::validation(format!("invalid job dataset '{}': {}", name, reason))
                }
                _ => e.into(),
            })
        }
        _ => Ok(()),
    }
}

impl JobManager {
    /// Submit inline JCL.
    pub async fn submit_job_statement(&self, jcl: &str) -> Result<SubmitJobResponse> {
        self.submit_job(&SubmitJobRequest::statement(jcl)).await
    }

    /// Submit JCL stored in a dataset, optionally on a specific volume.
    pub async fn submit_job_from_dataset(
        &self,
        dataset: &str,
        volume: Option<&str>,
    ) -> Result<SubmitJobResponse> {
        self.submit_job(&SubmitJobRequest::dataset(dataset, volume))
            .await
    }

    /// Submit JCL from a local file.
    pub async fn submit_job_from_local_file(
        &self,
        file: &str,
        directory: Option<&str>,
        extension: Option<&str>,
    ) -> Result<SubmitJobResponse> {
        self.submit_job(&SubmitJobRequest::local_file(file, directory, extension))
            .await
    }

    pub async fn get_jobs_by_owner(&self, owner: &str, max_jobs: Option<u32>) -> Result<JobList> {
        let filter = JobFilter {
            owner: Some(owner.to_string()),
            max_jobs,
            ..Default::default()
        };
        self.list_jobs(&filter).await
    }

    pub async fn get_jobs_by_prefix(&self, prefix: &str, max_jobs: Option<u32>) -> Result<JobList> {
        let filter = JobFilter {
            prefix: Some(prefix.to_string()),
            max_jobs,
            ..Default::default()
        };
        self.list_jobs(&filter).await
    }

    pub async fn get_jobs_by_status(&self, status: &str, max_jobs: Option<u32>) -> Result<JobList> {
        let filter = JobFilter {
            status: Some(status.to_string()),
            max_jobs,
            ..Default::default()
        };
        self.list_jobs(&filter).await
    }

    /// All spool output of a job keyed by DD name.
    ///
    /// Spool files whose content cannot be read are logged and left out.
    #[instrument(skip(self))]
    pub async fn get_job_output(&self, job_id: &str) -> Result<BTreeMap<String, String>> {
        let files = self.get_spool_files(job_id).await?;

        let mut output = BTreeMap::new();
        for file in files {
            match self.get_spool_file_content(job_id, file.id).await {
                Ok(content) => {
                    output.insert(file.dd_name, content);
                }
                Err(e) => {
                    warn!(dd_name = %file.dd_name, spool_id = file.id, error = %e, "Skipping unreadable spool file");
                }
            }
        }

        Ok(output)
    }

    /// Spool output of one DD of a job.
    #[instrument(skip(self))]
    pub async fn get_job_output_by_dd_name(&self, job_id: &str, dd_name: &str) -> Result<String> {
        let files = self.get_spool_files(job_id).await?;

        let file = files
            .iter()
            .find(|f| f.dd_name == dd_name)
            .ok_or_else(|| {
                Error::new(ErrorKind::NotFound(format!(
                    "DD name {} not found for job {}",
                    dd_name, job_id
                )))
            })?;

        self.get_spool_file_content(job_id, file.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zosmf_client::Profile;

    fn manager_for(server: &MockServer) -> JobManager {
        let profile = Profile::new("mock", "127.0.0.1", server.address().port(), "IBMUSER", "secret")
            .with_protocol("http");
        JobManager::from_profile(&profile).unwrap()
    }

    #[test]
    fn test_is_job_complete() {
        for status in ["OUTPUT", "output", "CC 0000", "cc 0004", "ABEND S0C4", "JOB ABENDED"] {
            assert!(is_job_complete(status), "{status}");
        }
        for status in ["ACTIVE", "INPUT", "CC 0008", "CC 0012", ""] {
            assert!(!is_job_complete(status), "{status}");
        }
    }

    #[test]
    fn test_validate_job_request() {
        assert!(validate_job_request(&SubmitJobRequest::statement("//A JOB (1)")).is_ok());
        assert!(validate_job_request(&SubmitJobRequest::statement("//a job (1)")).is_ok());
        assert!(validate_job_request(&SubmitJobRequest::dataset("IBMUSER.JCL(IEFBR14)", None)).is_ok());
        assert!(validate_job_request(&SubmitJobRequest::local_file("x.jcl", None, None)).is_ok());

        let err = validate_job_request(&SubmitJobRequest::default()).unwrap_err();
        assert!(err.to_string().contains("must be specified"));

        let err = validate_job_request(&SubmitJobRequest::statement("//STEP1 EXEC PGM=X")).unwrap_err();
        assert!(err.to_string().contains("JOB card"));

        let err = validate_job_request(&SubmitJobRequest::dataset("1BAD..NAME", None)).unwrap_err();
        assert!(err.is_validation());

        let two = SubmitJobRequest {
            job_statement: Some("//A JOB".into()),
            job_local_file: Some("x.jcl".into()),
            ..Default::default()
        };
        assert!(validate_job_request(&two).unwrap_err().to_string().contains("only one"));
    }

    #[tokio::test]
    async fn test_get_jobs_by_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/restjobs/jobs"))
            .and(query_param("prefix", "IEF*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"jobs": []})))
            .expect(1)
            .mount(&server)
            .await;

        let list = manager_for(&server)
            .get_jobs_by_prefix("IEF*", None)
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_submit_from_local_file() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/restjobs/jobs"))
            .and(body_json(serde_json::json!({
                "jobLocalFile": "build.jcl",
                "extension": "jcl"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "jobid": "JOB00200"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let submitted = manager_for(&server)
            .submit_job_from_local_file("build.jcl", None, Some("jcl"))
            .await
            .unwrap();
        assert_eq!(submitted.job_id, "JOB00200");
    }

    #[tokio::test]
    async fn test_job_output_skips_unreadable_files() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/restjobs/jobs/JOB00001/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "ddname": "JESMSGLG"},
                {"id": 2, "ddname": "SYSPRINT"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/restjobs/jobs/JOB00001/files/1/records"))
            .respond_with(ResponseTemplate::new(200).set_body_string("JOB LOG"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/restjobs/jobs/JOB00001/files/2/records"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let output = manager_for(&server).get_job_output("JOB00001").await.unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output["JESMSGLG"], "JOB LOG");
    }

    #[tokio::test]
    async fn test_job_output_by_dd_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/restjobs/jobs/JOB00001/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 3, "ddname": "SYSOUT"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/restjobs/jobs/JOB00001/files/3/records"))
            .respond_with(ResponseTemplate::new(200).set_body_string("HELLO"))
            .mount(&server)
            .await;

        let jobs = manager_for(&server);
        assert_eq!(
            jobs.get_job_output_by_dd_name("JOB00001", "SYSOUT").await.unwrap(),
            "HELLO"
        );

        let err = jobs
            .get_job_output_by_dd_name("JOB00001", "SYSIN")
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotFound(_)));
    }
}
