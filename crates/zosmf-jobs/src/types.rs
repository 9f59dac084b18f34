//! Types for the z/OSMF jobs REST API.
//!
//! Field names follow the service's JSON (`jobid`, `job-correlator`, ...).
//! Every field is defaulted so partial responses still decode.

use serde::{Deserialize, Serialize};

/// A batch job as reported by z/OSMF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(rename = "jobid")]
    pub job_id: String,
    #[serde(rename = "jobname")]
    pub job_name: String,
    pub owner: String,
    /// INPUT, ACTIVE or OUTPUT.
    pub status: String,
    /// JOB, STC or TSU.
    #[serde(rename = "type")]
    pub job_type: String,
    pub class: String,
    /// Completion code such as `CC 0000`; absent while the job runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsystem: Option<String>,
    #[serde(rename = "job-correlator", skip_serializing_if = "Option::is_none")]
    pub job_correlator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "files-url", skip_serializing_if = "Option::is_none")]
    pub files_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<i64>,
    #[serde(rename = "phase-name", skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
}

/// Result of a job listing.
///
/// The service answers either `{"jobs": [...]}` or a bare array; both decode
/// to the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JobListWire")]
pub struct JobList {
    pub jobs: Vec<Job>,
}

impl JobList {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }
}

impl IntoIterator for JobList {
    type Item = Job;
    type IntoIter = std::vec::IntoIter<Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.into_iter()
    }
}

/// Accepted listing shapes, tried in declaration order.
#[derive(Deserialize)]
#[serde(untagged)]
enum JobListWire {
    Wrapped { jobs: Vec<Job> },
    Bare(Vec<Job>),
    Empty(EmptyObject),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyObject {}

impl From<JobListWire> for JobList {
    fn from(wire: JobListWire) -> Self {
        let jobs = match wire {
            JobListWire::Wrapped { jobs } | JobListWire::Bare(jobs) => jobs,
            JobListWire::Empty(_) => Vec::new(),
        };
        Self { jobs }
    }
}

/// Filter for job listings. Unset and empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub owner: Option<String>,
    /// Job name prefix, `*` allowed.
    pub prefix: Option<String>,
    pub max_jobs: Option<u32>,
    pub job_id: Option<String>,
    pub job_name: Option<String>,
    pub status: Option<String>,
    pub user_correlator: Option<String>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn max_jobs(mut self, max_jobs: u32) -> Self {
        self.max_jobs = Some(max_jobs);
        self
    }

    pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = Some(job_name.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn user_correlator(mut self, correlator: impl Into<String>) -> Self {
        self.user_correlator = Some(correlator.into());
        self
    }

    /// Query parameters in service order.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let text = |value: &Option<String>| non_empty(value).map(str::to_string);

        [
            ("owner", text(&self.owner)),
            ("prefix", text(&self.prefix)),
            ("max-jobs", self.max_jobs.filter(|m| *m > 0).map(|m| m.to_string())),
            ("jobid", text(&self.job_id)),
            ("jobname", text(&self.job_name)),
            ("status", text(&self.status)),
            ("user-correlator", text(&self.user_correlator)),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// A job submission. Exactly one source must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitJobRequest {
    /// Inline JCL.
    pub job_statement: Option<String>,
    /// Dataset holding the JCL.
    pub job_dataset: Option<String>,
    /// Volume of `job_dataset` when it is not cataloged.
    pub volume: Option<String>,
    /// Local file holding the JCL.
    pub job_local_file: Option<String>,
    pub directory: Option<String>,
    pub extension: Option<String>,
}

impl SubmitJobRequest {
    pub fn statement(jcl: impl Into<String>) -> Self {
        Self {
            job_statement: Some(jcl.into()),
            ..Default::default()
        }
    }

    pub fn dataset(name: impl Into<String>, volume: Option<&str>) -> Self {
        Self {
            job_dataset: Some(name.into()),
            volume: volume.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn local_file(file: impl Into<String>, directory: Option<&str>, extension: Option<&str>) -> Self {
        Self {
            job_local_file: Some(file.into()),
            directory: directory.map(str::to_string),
            extension: extension.map(str::to_string),
            ..Default::default()
        }
    }

    /// The chosen source, or `None` when zero or several are set.
    pub fn source(&self) -> Option<JobSource<'_>> {
        let statement = non_empty(&self.job_statement);
        let dataset = non_empty(&self.job_dataset);
        let local_file = non_empty(&self.job_local_file);

        match (statement, dataset, local_file) {
            (Some(jcl), None, None) => Some(JobSource::Statement(jcl)),
            (None, Some(name), None) => Some(JobSource::Dataset {
                name,
                volume: non_empty(&self.volume),
            }),
            (None, None, Some(file)) => Some(JobSource::LocalFile {
                file,
                directory: non_empty(&self.directory),
                extension: non_empty(&self.extension),
            }),
            _ => None,
        }
    }

    /// Number of sources set.
    pub fn source_count(&self) -> usize {
        [&self.job_statement, &self.job_dataset, &self.job_local_file]
            .into_iter()
            .filter(|s| non_empty(s).is_some())
            .count()
    }
}

/// Where submitted JCL comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSource<'a> {
    Statement(&'a str),
    Dataset {
        name: &'a str,
        volume: Option<&'a str>,
    },
    LocalFile {
        file: &'a str,
        directory: Option<&'a str>,
        extension: Option<&'a str>,
    },
}

/// Request body for `PUT /restjobs/jobs`. Only the chosen source's fields appear.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum SubmitJobBody<'a> {
    Statement {
        #[serde(rename = "jobStatement")]
        job_statement: &'a str,
    },
    Dataset {
        #[serde(rename = "jobDataSet")]
        job_dataset: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        volume: Option<&'a str>,
    },
    LocalFile {
        #[serde(rename = "jobLocalFile")]
        job_local_file: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        directory: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        extension: Option<&'a str>,
    },
}

impl<'a> From<JobSource<'a>> for SubmitJobBody<'a> {
    fn from(source: JobSource<'a>) -> Self {
        match source {
            JobSource::Statement(jcl) => SubmitJobBody::Statement { job_statement: jcl },
            JobSource::Dataset { name, volume } => SubmitJobBody::Dataset {
                job_dataset: name,
                volume,
            },
            JobSource::LocalFile {
                file,
                directory,
                extension,
            } => SubmitJobBody::LocalFile {
                job_local_file: file,
                directory,
                extension,
            },
        }
    }
}

/// Response to a job submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitJobResponse {
    #[serde(rename = "jobid")]
    pub job_id: String,
    #[serde(rename = "jobname")]
    pub job_name: String,
    pub owner: String,
    pub status: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub class: String,
    #[serde(rename = "job-correlator", skip_serializing_if = "Option::is_none")]
    pub job_correlator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "files-url", skip_serializing_if = "Option::is_none")]
    pub files_url: Option<String>,
}

/// One spool file (DD) of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoolFile {
    pub id: u32,
    #[serde(rename = "ddname")]
    pub dd_name: String,
    #[serde(rename = "stepname", skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(rename = "procstep", skip_serializing_if = "Option::is_none")]
    pub proc_step: Option<String>,
    pub class: String,
    #[serde(rename = "jobid")]
    pub job_id: String,
    #[serde(rename = "jobname")]
    pub job_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<u32>,
    #[serde(rename = "byte-count", skip_serializing_if = "Option::is_none")]
    pub byte_count: Option<u64>,
    #[serde(rename = "record-count", skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    #[serde(rename = "records-url", skip_serializing_if = "Option::is_none")]
    pub records_url: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
