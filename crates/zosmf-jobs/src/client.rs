//! z/OSMF jobs client.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, instrument};

use zosmf_client::response::status;
use zosmf_client::validation::encode_path_segment;
use zosmf_client::{Profile, Session, RESTJOBS_PATH};
use zosmf_config::ProfileStore;

use crate::error::{Error, ErrorKind, Result};
use crate::types::*;
use crate::validate_job_request;

/// Client for the z/OSMF jobs REST service (`/restjobs/jobs`).
///
/// Every operation sends exactly one request through the owned [`Session`],
/// except the polling and output helpers, which chain requests sequentially.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use zosmf_jobs::JobManager;
///
/// let jobs = JobManager::connect("mainframe.example.com", 443, "IBMUSER", "secret")?;
///
/// let submitted = jobs
///     .submit_job_statement("//IEFBR14 JOB (ACCT),'TEST'\n//STEP1 EXEC PGM=IEFBR14")
///     .await?;
/// let status = jobs
///     .wait_for_job_completion(&submitted.job_id, Duration::from_secs(60), Duration::from_secs(2))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct JobManager {
    session: Session,
}

impl JobManager {
    /// Create a job manager over an existing session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Create a job manager with a fresh session for `profile`.
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        Ok(Self::new(profile.new_session()?))
    }

    /// Create a job manager for a named profile in `store`.
    pub fn from_store<S: ProfileStore + ?Sized>(store: &S, profile_name: &str) -> Result<Self> {
        let profile = store.get(profile_name)?;
        Self::from_profile(&profile)
    }

    /// Create a job manager from bare connection details.
    pub fn connect(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(Session::connect(host, port, user, password)?))
    }

    /// Like [`JobManager::connect`], with TLS policy and base path.
    pub fn connect_with_options(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        reject_unauthorized: bool,
        base_path: impl Into<String>,
    ) -> Result<Self> {
        let session = Session::connect_with_options(
            host,
            port,
            user,
            password,
            reject_unauthorized,
            base_path,
        )?;
        Ok(Self::new(session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access, e.g. to add headers for later requests.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    fn job_path(id: &str) -> String {
        format!("{}/{}", RESTJOBS_PATH, encode_path_segment(id))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// List jobs matching `filter`.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<JobList> {
        let mut request = self.session.get(RESTJOBS_PATH);
        for (name, value) in filter.query_pairs() {
            request = request.query(name, value);
        }

        let response = self.session.send(request, status::OK).await?;
        let jobs: JobList = response.json()?;
        debug!(count = jobs.len(), "Listed jobs");
        Ok(jobs)
    }

    /// Get a job by identifier. The identifier is used as a correlator.
    #[instrument(skip(self))]
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        self.fetch_job(Self::job_path(job_id)).await
    }

    /// Get a job by job name and job ID.
    #[instrument(skip(self))]
    pub async fn get_job_by_name_id(&self, job_name: &str, job_id: &str) -> Result<Job> {
        let path = format!(
            "{}/{}/{}",
            RESTJOBS_PATH,
            encode_path_segment(job_name),
            encode_path_segment(job_id)
        );
        self.fetch_job(path).await
    }

    /// Get a job by its correlator.
    #[instrument(skip(self))]
    pub async fn get_job_by_correlator(&self, correlator: &str) -> Result<Job> {
        self.fetch_job(Self::job_path(correlator)).await
    }

    async fn fetch_job(&self, path: String) -> Result<Job> {
        let response = self.session.send(self.session.get(&path), status::OK).await?;
        Ok(response.json()?)
    }

    /// Current status string of a job (INPUT, ACTIVE, OUTPUT, ...).
    pub async fn get_job_status(&self, job_id: &str) -> Result<String> {
        Ok(self.get_job(job_id).await?.status)
    }

    /// Spool files of a job in service order.
    #[instrument(skip(self))]
    pub async fn get_spool_files(&self, job_id: &str) -> Result<Vec<SpoolFile>> {
        let path = format!("{}/files", Self::job_path(job_id));
        let response = self.session.send(self.session.get(&path), status::OK).await?;
        Ok(response.json()?)
    }

    /// Text content of one spool file.
    #[instrument(skip(self))]
    pub async fn get_spool_file_content(&self, job_id: &str, spool_id: u32) -> Result<String> {
        let path = format!("{}/files/{}/records", Self::job_path(job_id), spool_id);
        let request = self.session.get(&path).header("Accept", "text/plain");
        let response = self.session.send(request, status::OK).await?;
        Ok(response.text())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Submit a job. The request is validated before anything is sent.
    #[instrument(skip(self, request))]
    pub async fn submit_job(&self, request: &SubmitJobRequest) -> Result<SubmitJobResponse> {
        validate_job_request(request)?;
        let source = request
            .source()
            .ok_or_else(|| Error::validation("exactly one job source must be specified"))?;

        let http_request = self
            .session
            .put(RESTJOBS_PATH)
            .json(&SubmitJobBody::from(source))?;
        let response = self.session.send(http_request, status::ACCEPTED).await?;

        let submitted: SubmitJobResponse = response.json()?;
        debug!(job_id = %submitted.job_id, job_name = %submitted.job_name, "Job submitted");
        Ok(submitted)
    }

    /// Cancel a running job.
    #[instrument(skip(self))]
    pub async fn cancel_job(&self, job_id: &str) -> Result<()> {
        let path = format!("{}/cancel", Self::job_path(job_id));
        self.session.send(self.session.put(&path), status::NO_CONTENT).await?;
        Ok(())
    }

    /// Purge a job and its output.
    #[instrument(skip(self))]
    pub async fn purge_job(&self, job_id: &str) -> Result<()> {
        let path = format!("{}/purge", Self::job_path(job_id));
        self.session.send(self.session.put(&path), status::NO_CONTENT).await?;
        Ok(())
    }

    /// Delete a job.
    #[instrument(skip(self))]
    pub async fn delete_job(&self, job_id: &str) -> Result<()> {
        let path = Self::job_path(job_id);
        self.session.send(self.session.delete(&path), status::NO_CONTENT).await?;
        Ok(())
    }

    /// Poll until the job reaches a completed status and return that status.
    ///
    /// Elapsed time is checked before every poll; once it exceeds `timeout`
    /// the wait fails with a timeout error. Any failed poll ends the wait
    /// with that error.
    #[instrument(skip(self))]
    pub async fn wait_for_job_completion(
        &self,
        job_id: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<String> {
        let start = Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(Error::new(ErrorKind::Timeout(format!(
                    "job {} did not complete within {:?}",
                    job_id, timeout
                ))));
            }

            let status = self.get_job_status(job_id).await?;
            if crate::is_job_complete(&status) {
                debug!(%status, elapsed_ms = start.elapsed().as_millis(), "Job complete");
                return Ok(status);
            }

            sleep(poll_interval).await;
        }
    }

    /// Release idle pooled connections. The manager stays usable.
    pub fn close(&self) {
        self.session.close();
    }
}
