//! z/OSMF datasets client.

mod content;
mod members;

use tracing::{debug, instrument};

use zosmf_client::response::status;
use zosmf_client::validation::{encode_path_segment, validate_dataset_name};
use zosmf_client::{Profile, Session, RESTFILES_DS_PATH};
use zosmf_config::ProfileStore;

use crate::error::{Error, Result};
use crate::types::*;
use crate::validate_create_dataset_request;

/// Client for the z/OSMF datasets REST service (`/restfiles/ds`).
///
/// Names are validated before any request that writes, deletes or transfers
/// content. Lookups by pattern are passed through unchecked, since patterns
/// may contain wildcards.
///
/// # Example
///
/// ```rust,ignore
/// use zosmf_datasets::{DatasetFilter, DatasetManager};
///
/// let datasets = DatasetManager::connect("mainframe.example.com", 443, "IBMUSER", "secret")?;
///
/// datasets.create_sequential_dataset("IBMUSER.NOTES").await?;
/// datasets.upload_text("IBMUSER.NOTES", "hello").await?;
///
/// for ds in datasets.list_datasets(&DatasetFilter::new().dslevel("IBMUSER.*")).await? {
///     println!("{} {:?}", ds.name, ds.dsorg);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatasetManager {
    session: Session,
}

impl DatasetManager {
    /// Create a dataset manager over an existing session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Create a dataset manager with a fresh session for `profile`.
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        Ok(Self::new(profile.new_session()?))
    }

    /// Create a dataset manager for a named profile in `store`.
    pub fn from_store<S: ProfileStore + ?Sized>(store: &S, profile_name: &str) -> Result<Self> {
        let profile = store.get(profile_name)?;
        Self::from_profile(&profile)
    }

    /// Create a dataset manager from bare connection details.
    pub fn connect(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(Session::connect(host, port, user, password)?))
    }

    /// Like [`DatasetManager::connect`], with TLS policy and base path.
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

    fn dataset_path(name: &str) -> String {
        format!("{}/{}", RESTFILES_DS_PATH, encode_path_segment(name))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// List datasets matching `filter`.
    #[instrument(skip(self))]
    pub async fn list_datasets(&self, filter: &DatasetFilter) -> Result<DatasetList> {
        let mut request = self
            .session
            .get(RESTFILES_DS_PATH)
            .header("X-IBM-Max-Items", filter.max_items())
            .header("X-IBM-Attributes", "base");
        for (name, value) in filter.query_pairs(self.session.user()) {
            request = request.query(name, value);
        }

        let response = self.session.send(request, status::OK).await?;
        let list: DatasetList = response.json()?;
        debug!(count = list.len(), "Listed datasets");
        Ok(list)
    }

    /// Attributes of one dataset, taken from a listing of that exact name.
    #[instrument(skip(self))]
    pub async fn get_dataset(&self, name: &str) -> Result<Dataset> {
        let list = self
            .list_datasets(&DatasetFilter::new().dslevel(name))
            .await?;
        list.into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::not_found(format!("dataset {}", name)))
    }

    /// Attributes of one dataset via its metadata endpoint, falling back to
    /// [`DatasetManager::get_dataset`] if that request fails for any reason.
    pub async fn get_dataset_info(&self, name: &str) -> Result<Dataset> {
        Ok(self.get_dataset_info_with_source(name).await?.0)
    }

    /// Like [`DatasetManager::get_dataset_info`], also reporting which lookup
    /// produced the answer.
    #[instrument(skip(self))]
    pub async fn get_dataset_info_with_source(
        &self,
        name: &str,
    ) -> Result<(Dataset, LookupSource)> {
        let request = self
            .session
            .get(&Self::dataset_path(name))
            .query("metadata", "true")
            .header("Accept", "application/json");

        let direct = match self.session.send(request, status::OK).await {
            Ok(response) => response.json::<Dataset>().map_err(Error::from),
            Err(e) => Err(e.into()),
        };

        // Only a record for the requested dataset counts; `{}` decodes to
        // an unnamed one.
        let direct = direct.and_then(|dataset| {
            if dataset.name.eq_ignore_ascii_case(name) {
                Ok(dataset)
            } else {
                Err(Error::not_found(format!(
                    "metadata for {} named '{}'",
                    name, dataset.name
                )))
            }
        });

        match direct {
            Ok(dataset) => Ok((dataset, LookupSource::Direct)),
            Err(e) => {
                debug!(error = %e, "Metadata lookup failed, falling back to listing");
                let dataset = self.get_dataset(name).await?;
                Ok((dataset, LookupSource::ListFallback))
            }
        }
    }

    /// Whether a dataset with exactly this name exists.
    #[instrument(skip(self))]
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let list = self
            .list_datasets(&DatasetFilter::new().dslevel(name))
            .await?;
        Ok(list.find(name).is_some())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Allocate a dataset. The request is validated before anything is sent.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_dataset(&self, request: &CreateDatasetRequest) -> Result<()> {
        validate_create_dataset_request(request)?;

        let http_request = self
            .session
            .post(&Self::dataset_path(&request.name))
            .json(&CreateDatasetBody::from(request))?;
        self.session.send(http_request, status::CREATED).await?;

        debug!(dataset_type = %request.dataset_type, "Dataset created");
        Ok(())
    }

    /// Delete a dataset.
    #[instrument(skip(self))]
    pub async fn delete_dataset(&self, name: &str) -> Result<()> {
        validate_dataset_name(name)?;
        let request = self.session.delete(&Self::dataset_path(name));
        self.session.send(request, status::NO_CONTENT).await?;
        Ok(())
    }

    /// Copy `source` into `target`. The request goes to the target.
    #[instrument(skip(self))]
    pub async fn copy_dataset(&self, source: &str, target: &str) -> Result<()> {
        validate_dataset_name(source)?;
        validate_dataset_name(target)?;

        let request = self
            .session
            .put(&Self::dataset_path(target))
            .json(&CopyBody::copy(source))?;
        self.session.send(request, status::CREATED).await?;
        Ok(())
    }

    /// Rename `old_name` to `new_name`. The request goes to the new name.
    #[instrument(skip(self))]
    pub async fn rename_dataset(&self, old_name: &str, new_name: &str) -> Result<()> {
        validate_dataset_name(old_name)?;
        validate_dataset_name(new_name)?;

        let request = self
            .session
            .put(&Self::dataset_path(new_name))
            .json(&CopyBody::rename(old_name))?;
        self.session.send(request, status::CREATED).await?;
        Ok(())
    }

    /// Release idle pooled connections. The manager stays usable.
    pub fn close(&self) {
        self.session.close();
    }
}
