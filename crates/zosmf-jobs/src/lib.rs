//! # zosmf-jobs
//!
//! Client for the z/OSMF jobs REST service.
//!
//! - Submit JCL inline, from a dataset, or from a local file
//! - List and look up jobs by correlator or name/ID
//! - Cancel, purge and delete jobs
//! - Read spool files and wait for completion
//!
//! ## Example
//!
//! ```rust,ignore
//! use zosmf_config::FileProfileStore;
//! use zosmf_jobs::{JobFilter, JobManager};
//!
//! let store = FileProfileStore::new()?;
//! let jobs = JobManager::from_store(&store, "dev")?;
//!
//! for job in jobs.list_jobs(&JobFilter::new().owner("IBMUSER")).await? {
//!     println!("{} {} {}", job.job_id, job.job_name, job.status);
//! }
//! ```

mod client;
mod convenience;
mod error;
mod types;

pub use client::JobManager;
pub use convenience::{is_job_complete, validate_job_request};
pub use error::{Error, ErrorKind, Result};
pub use types::*;
