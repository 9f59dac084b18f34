//! # zosmf-sdk
//!
//! A z/OSMF REST API client library for Rust.
//!
//! Connection profiles become authenticated sessions, and resource managers
//! turn typed calls into z/OSMF requests for jobs and datasets.
//!
//! ## Security
//!
//! - Passwords are redacted in Debug output
//! - Certificate validation is on unless a profile sets
//!   `reject_unauthorized = false`, which is logged as a warning
//! - The profile file is written owner-only on Unix
//!
//! ## Crates
//!
//! - **zosmf-client** - Profiles, sessions, the HTTP transport, status-to-error mapping, name validation
//! - **zosmf-config** - Named profiles in `~/.zowe/zowe.config.json`
//! - **zosmf-jobs** - Jobs API: submit, list, cancel, purge, spool output, wait for completion
//! - **zosmf-datasets** - Datasets API: allocate, list, upload, download, members, copy, rename
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use zosmf_sdk::{DatasetManager, FileProfileStore, JobManager, ProfileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileProfileStore::new()?;
//!     let profile = store.get_default()?;
//!
//!     let datasets = DatasetManager::from_profile(&profile)?;
//!     datasets.upload_text_to_member("IBMUSER.JCL", "HELLO", "//HELLO JOB\n//S1 EXEC PGM=IEFBR14").await?;
//!
//!     let jobs = JobManager::from_profile(&profile)?;
//!     let submitted = jobs.submit_job_from_dataset("IBMUSER.JCL(HELLO)", None).await?;
//!     let status = jobs
//!         .wait_for_job_completion(&submitted.job_id, Duration::from_secs(60), Duration::from_secs(2))
//!         .await?;
//!     println!("{} finished: {}", submitted.job_id, status);
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use zosmf_client as client;
#[cfg(feature = "config")]
pub use zosmf_config as config;
#[cfg(feature = "datasets")]
pub use zosmf_datasets as datasets;
#[cfg(feature = "jobs")]
pub use zosmf_jobs as jobs;

// Re-export commonly used types at the top level
pub use zosmf_client::{ClientConfig, Profile, Session};
#[cfg(feature = "config")]
pub use zosmf_config::{FileProfileStore, ProfileStore};
#[cfg(feature = "datasets")]
pub use zosmf_datasets::DatasetManager;
#[cfg(feature = "jobs")]
pub use zosmf_jobs::JobManager;
