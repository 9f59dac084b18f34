//! Request checks run before anything is sent.

use zosmf_client::validation::{validate_dataset_name, validate_member_name};

use crate::error::{Error, Result};
use crate::types::{CreateDatasetRequest, DownloadRequest, UploadRequest, MAX_DIRECTORY_BLOCKS, MAX_RECORD_LENGTH};

/// Check an allocation request.
pub fn validate_create_dataset_request(request: &CreateDatasetRequest) -> Result<()> {
    validate_dataset_name(&request.name)?;

    if request.space.primary == 0 {
        return Err(Error::validation(
            "primary space allocation must be greater than 0",
        ));
    }

    if let Some(length) = request.record_length {
        if !(1..=MAX_RECORD_LENGTH).contains(&length) {
            return Err(Error::validation(format!(
                "record length must be between 1 and {}",
                MAX_RECORD_LENGTH
            )));
        }
    }

    if let Some(size) = request.block_size {
        if !(1..=MAX_RECORD_LENGTH).contains(&size) {
            return Err(Error::validation(format!(
                "block size must be between 1 and {}",
                MAX_RECORD_LENGTH
            )));
        }
    }

    if let Some(blocks) = request.directory_blocks() {
        if !(1..=MAX_DIRECTORY_BLOCKS).contains(&blocks) {
            return Err(Error::validation(format!(
                "directory blocks must be between 1 and {}",
                MAX_DIRECTORY_BLOCKS
            )));
        }
    }

    Ok(())
}

/// Check an upload: valid names and non-empty content.
pub fn validate_upload_request(request: &UploadRequest) -> Result<()> {
    validate_names(&request.dataset_name, request.member_name.as_deref())?;

    if request.content.is_empty() {
        return Err(Error::validation("content cannot be empty"));
    }

    Ok(())
}

/// Check a download: valid names.
pub fn validate_download_request(request: &DownloadRequest) -> Result<()> {
    validate_names(&request.dataset_name, request.member_name.as_deref())
}

pub(crate) fn validate_names(dataset: &str, member: Option<&str>) -> Result<()> {
    validate_dataset_name(dataset)?;
    if let Some(member) = member {
        validate_member_name(member)?;
    }
    Ok(())
}
