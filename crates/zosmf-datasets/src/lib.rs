//! # zosmf-datasets
//!
//! Client for the z/OSMF datasets REST service.
//!
//! - Allocate, list, copy, rename and delete datasets
//! - Upload and download content as plain text
//! - List, read, copy and delete members of partitioned datasets
//!
//! ## Example
//!
//! ```rust,ignore
//! use zosmf_datasets::{CreateDatasetRequest, DatasetManager, DatasetType, Space, SpaceUnit};
//!
//! let datasets = DatasetManager::connect("mainframe.example.com", 443, "IBMUSER", "secret")?;
//!
//! let request = CreateDatasetRequest::new(
//!     "IBMUSER.TEST.JCL",
//!     DatasetType::Partitioned,
//!     Space::standard(SpaceUnit::Tracks),
//! );
//! datasets.create_dataset(&request).await?;
//! datasets
//!     .upload_text_to_member("IBMUSER.TEST.JCL", "IEFBR14", "//IEFBR14 JOB\n//S1 EXEC PGM=IEFBR14")
//!     .await?;
//! ```

mod client;
mod convenience;
mod error;
mod types;
mod validation;

pub use client::DatasetManager;
pub use error::{Error, ErrorKind, Result};
pub use types::*;
pub use validation::{
    validate_create_dataset_request, validate_download_request, validate_upload_request,
};
