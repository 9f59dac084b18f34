//! Reading and writing dataset content.
//!
//! Content travels as plain text in both directions. A member is addressed as
//! `DATASET(MEMBER)` on the dataset endpoint.

use tracing::{debug, instrument};

use zosmf_client::response::status;
use zosmf_client::validation::encode_path_segment;
use zosmf_client::RESTFILES_DS_PATH;

use super::DatasetManager;
use crate::error::Result;
use crate::types::{DownloadRequest, UploadRequest};
use crate::{validate_download_request, validate_upload_request};

/// Encoding requested by the text helpers.
const TEXT_ENCODING: &str = "UTF-8";

fn content_path(dataset: &str, member: Option<&str>) -> String {
    match member {
        Some(member) => format!(
            "{}/{}({})",
            RESTFILES_DS_PATH,
            encode_path_segment(dataset),
            encode_path_segment(member)
        ),
        None => format!("{}/{}", RESTFILES_DS_PATH, encode_path_segment(dataset)),
    }
}

impl DatasetManager {
    /// Write content to a dataset or member, replacing what is there.
    #[instrument(skip(self, request), fields(dataset = %request.dataset_name, member = ?request.member_name))]
    pub async fn upload_content(&self, request: &UploadRequest) -> Result<()> {
        validate_upload_request(request)?;

        let path = content_path(&request.dataset_name, request.member_name.as_deref());
        let http_request = self.session.put(&path).text(request.content.as_str());
        self.session.send(http_request, status::WRITTEN).await?;

        debug!(bytes = request.content.len(), "Content uploaded");
        Ok(())
    }

    /// Read the content of a dataset or member.
    #[instrument(skip(self, request), fields(dataset = %request.dataset_name, member = ?request.member_name))]
    pub async fn download_content(&self, request: &DownloadRequest) -> Result<String> {
        validate_download_request(request)?;

        let path = content_path(&request.dataset_name, request.member_name.as_deref());
        let http_request = self
            .session
            .get(&path)
            .query_opt("encoding", request.encoding.as_deref())
            .header("Accept", "text/plain");
        let response = self.session.send(http_request, status::OK).await?;

        Ok(response.text())
    }

    pub async fn upload_text(&self, dataset: &str, content: &str) -> Result<()> {
        self.upload_content(&UploadRequest::new(dataset, content))
            .await
    }

    pub async fn upload_text_to_member(
        &self,
        dataset: &str,
        member: &str,
        content: &str,
    ) -> Result<()> {
        self.upload_content(&UploadRequest::new(dataset, content).member(member))
            .await
    }

    /// Read a dataset as UTF-8 text.
    pub async fn download_text(&self, dataset: &str) -> Result<String> {
        self.download_content(&DownloadRequest::new(dataset).encoding(TEXT_ENCODING))
            .await
    }

    /// Read a member as UTF-8 text.
    pub async fn download_text_from_member(&self, dataset: &str, member: &str) -> Result<String> {
        let request = DownloadRequest::new(dataset)
            .member(member)
            .encoding(TEXT_ENCODING);
        self.download_content(&request).await
    }
}
