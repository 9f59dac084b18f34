//! Types for the z/OSMF datasets REST API.
//!
//! Listings decode both the service's own field names (`items`, `dsname`,
//! `returnedRows`, ...) and the shorter names used by simplified gateways
//! (`datasets`, `name`, `returned`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Largest record length and block size z/OS accepts.
pub const MAX_RECORD_LENGTH: u32 = 32760;

/// Largest directory block count for a partitioned dataset.
pub const MAX_DIRECTORY_BLOCKS: u32 = 9999;

/// Numbers that arrive either as JSON numbers or as digit strings (`"80"`).
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// =============================================================================
// Enumerations
// =============================================================================

/// Dataset organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetType {
    #[serde(rename = "SEQ")]
    Sequential,
    #[serde(rename = "PO")]
    Partitioned,
    #[serde(rename = "PDSE")]
    Pdse,
    #[serde(rename = "VSAM")]
    Vsam,
}

impl DatasetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Sequential => "SEQ",
            DatasetType::Partitioned => "PO",
            DatasetType::Pdse => "PDSE",
            DatasetType::Vsam => "VSAM",
        }
    }

    /// `dsorg` value sent when allocating.
    pub fn dsorg(&self) -> &'static str {
        match self {
            DatasetType::Sequential => "PS",
            DatasetType::Partitioned | DatasetType::Pdse => "PO",
            DatasetType::Vsam => "VS",
        }
    }

    /// Whether the organization holds members.
    pub fn is_partitioned(&self) -> bool {
        matches!(self, DatasetType::Partitioned | DatasetType::Pdse)
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetType {
    type Err = Error;

    /// Accepts both the short names and the `dsorg` values a listing reports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEQ" | "PS" => Ok(DatasetType::Sequential),
            "PO" | "PDS" => Ok(DatasetType::Partitioned),
            "PDSE" | "PO-E" => Ok(DatasetType::Pdse),
            "VSAM" | "VS" => Ok(DatasetType::Vsam),
            other => Err(Error::validation(format!("invalid dataset type: {}", other))),
        }
    }
}

/// Unit of a space allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceUnit {
    #[serde(rename = "TRK")]
    Tracks,
    #[serde(rename = "CYL")]
    Cylinders,
    #[serde(rename = "KB")]
    Kilobytes,
    #[serde(rename = "MB")]
    Megabytes,
    #[serde(rename = "GB")]
    Gigabytes,
}

impl SpaceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceUnit::Tracks => "TRK",
            SpaceUnit::Cylinders => "CYL",
            SpaceUnit::Kilobytes => "KB",
            SpaceUnit::Megabytes => "MB",
            SpaceUnit::Gigabytes => "GB",
        }
    }
}

impl fmt::Display for SpaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpaceUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRK" => Ok(SpaceUnit::Tracks),
            "CYL" => Ok(SpaceUnit::Cylinders),
            "KB" => Ok(SpaceUnit::Kilobytes),
            "MB" => Ok(SpaceUnit::Megabytes),
            "GB" => Ok(SpaceUnit::Gigabytes),
            other => Err(Error::validation(format!("invalid space unit: {}", other))),
        }
    }
}

/// Record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordFormat {
    #[serde(rename = "F")]
    Fixed,
    #[serde(rename = "V")]
    Variable,
    #[serde(rename = "U")]
    Undefined,
}

impl RecordFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Fixed => "F",
            RecordFormat::Variable => "V",
            RecordFormat::Undefined => "U",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => Ok(RecordFormat::Fixed),
            "V" => Ok(RecordFormat::Variable),
            "U" => Ok(RecordFormat::Undefined),
            other => Err(Error::validation(format!("invalid record format: {}", other))),
        }
    }
}

// =============================================================================
// Space
// =============================================================================

/// Primary/secondary space allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub primary: u32,
    pub secondary: u32,
    pub unit: SpaceUnit,
    /// Directory blocks; only used for partitioned organizations.
    pub directory: u32,
}

impl Space {
    pub fn new(primary: u32, secondary: u32, unit: SpaceUnit) -> Self {
        Self {
            primary,
            secondary,
            unit,
            directory: 0,
        }
    }

    pub fn with_directory(mut self, blocks: u32) -> Self {
        self.directory = blocks;
        self
    }

    /// 10 primary, 5 secondary, 5 directory blocks.
    pub fn standard(unit: SpaceUnit) -> Self {
        Self::new(10, 5, unit).with_directory(5)
    }

    /// 100 primary, 50 secondary, 20 directory blocks.
    pub fn large(unit: SpaceUnit) -> Self {
        Self::new(100, 50, unit).with_directory(20)
    }

    /// 5 primary, 2 secondary, 2 directory blocks.
    pub fn small(unit: SpaceUnit) -> Self {
        Self::new(5, 2, unit).with_directory(2)
    }
}

impl Default for Space {
    fn default() -> Self {
        Self::standard(SpaceUnit::Tracks)
    }
}

// =============================================================================
// Listings
// =============================================================================

/// Dataset attributes as reported by a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(rename = "dsname", alias = "name")]
    pub name: String,
    /// PS, PO, PO-E, VS, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<String>,
    #[serde(rename = "vol", alias = "volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(rename = "recfm", alias = "recordFormat", skip_serializing_if = "Option::is_none")]
    pub record_format: Option<String>,
    #[serde(
        rename = "lrecl",
        alias = "recordLength",
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub record_length: Option<u32>,
    #[serde(
        rename = "blksz",
        alias = "blockSize",
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_size: Option<u32>,
    #[serde(rename = "dev", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(rename = "cdate", alias = "created", skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "rdate", alias = "referenced", skip_serializing_if = "Option::is_none")]
    pub referenced: Option<String>,
    #[serde(rename = "edate", alias = "expiration", skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    /// Percentage of allocated space in use.
    #[serde(deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub used: Option<u32>,
    #[serde(
        rename = "extx",
        alias = "extents",
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub extents: Option<u32>,
    /// `YES` when the dataset has been migrated off primary storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migr: Option<String>,
}

impl Dataset {
    /// Organization parsed from `dsorg`, if recognized.
    pub fn dataset_type(&self) -> Option<DatasetType> {
        self.dsorg.as_deref().and_then(|d| d.parse().ok())
    }

    pub fn is_migrated(&self) -> bool {
        self.migr
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("YES"))
    }
}

/// Result of a dataset listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ListWire<Dataset>")]
pub struct DatasetList {
    #[serde(rename = "items")]
    pub datasets: Vec<Dataset>,
    #[serde(rename = "returnedRows")]
    pub returned: usize,
    #[serde(rename = "totalRows", skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl DatasetList {
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dataset> {
        self.datasets.iter()
    }

    /// The dataset named exactly `name`, if listed.
    pub fn find(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

impl IntoIterator for DatasetList {
    type Item = Dataset;
    type IntoIter = std::vec::IntoIter<Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.into_iter()
    }
}

/// A member of a partitioned dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetMember {
    #[serde(rename = "member", alias = "name")]
    pub name: String,
    #[serde(rename = "vers", alias = "version", deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(rename = "mod", alias = "modLevel", deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub mod_level: Option<u32>,
    #[serde(rename = "c4date", alias = "created", skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "m4date", alias = "modified", skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(rename = "user", alias = "userid", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Current number of records.
    #[serde(rename = "cnorc", alias = "size", deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub records: Option<u32>,
}

/// Result of a member listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ListWire<DatasetMember>")]
pub struct MemberList {
    #[serde(rename = "items")]
    pub members: Vec<DatasetMember>,
    #[serde(rename = "returnedRows")]
    pub returned: usize,
    #[serde(rename = "totalRows", skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl MemberList {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatasetMember> {
        self.members.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }
}

impl IntoIterator for MemberList {
    type Item = DatasetMember;
    type IntoIter = std::vec::IntoIter<DatasetMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

/// Listing envelope shared by dataset and member listings.
#[derive(Deserialize)]
#[serde(default)]
struct ListWire<T> {
    #[serde(alias = "datasets", alias = "members")]
    items: Vec<T>,
    #[serde(rename = "returnedRows", alias = "returned")]
    returned_rows: Option<usize>,
    #[serde(rename = "totalRows", alias = "total")]
    total_rows: Option<usize>,
}

impl<T> Default for ListWire<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            returned_rows: None,
            total_rows: None,
        }
    }
}

impl From<ListWire<Dataset>> for DatasetList {
    fn from(wire: ListWire<Dataset>) -> Self {
        DatasetList {
            returned: wire.returned_rows.unwrap_or(wire.items.len()),
            total: wire.total_rows,
            datasets: wire.items,
        }
    }
}

impl From<ListWire<DatasetMember>> for MemberList {
    fn from(wire: ListWire<DatasetMember>) -> Self {
        MemberList {
            returned: wire.returned_rows.unwrap_or(wire.items.len()),
            total: wire.total_rows,
            members: wire.items,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Listing filter.
///
/// When neither `dslevel` nor `volser` is set the listing is restricted to
/// `{user}.*` for the session user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetFilter {
    /// Name pattern, e.g. `IBMUSER.*` or `SYS1.**.LOAD*`.
    pub dslevel: Option<String>,
    /// Volume serial.
    pub volser: Option<String>,
    /// Dataset name to resume a paged listing from.
    pub start: Option<String>,
    /// Row limit sent as `X-IBM-Max-Items`; `None` or 0 means unlimited.
    pub limit: Option<u32>,
}

impl DatasetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dslevel(mut self, pattern: impl Into<String>) -> Self {
        self.dslevel = Some(pattern.into());
        self
    }

    pub fn volser(mut self, volume: impl Into<String>) -> Self {
        self.volser = Some(volume.into());
        self
    }

    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for this filter, defaulting `dslevel` for `user`.
    pub(crate) fn query_pairs(&self, user: &str) -> Vec<(&'static str, String)> {
        fn set(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        let mut dslevel = set(&self.dslevel);
        let volser = set(&self.volser);
        if dslevel.is_none() && volser.is_none() {
            dslevel = Some(format!("{}.*", user));
        }

        [("dslevel", dslevel), ("volser", volser), ("start", set(&self.start))]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }

    /// Value of the `X-IBM-Max-Items` header.
    pub(crate) fn max_items(&self) -> String {
        self.limit.unwrap_or(0).to_string()
    }
}

/// Allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatasetRequest {
    pub name: String,
    pub dataset_type: DatasetType,
    pub volume: Option<String>,
    pub space: Space,
    pub record_format: Option<RecordFormat>,
    pub record_length: Option<u32>,
    pub block_size: Option<u32>,
    /// Directory blocks; overrides `space.directory` when set.
    pub directory: Option<u32>,
}

impl CreateDatasetRequest {
    pub fn new(name: impl Into<String>, dataset_type: DatasetType, space: Space) -> Self {
        Self {
            name: name.into(),
            dataset_type,
            volume: None,
            space,
            record_format: None,
            record_length: None,
            block_size: None,
            directory: None,
        }
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    pub fn record_format(mut self, format: RecordFormat) -> Self {
        self.record_format = Some(format);
        self
    }

    pub fn record_length(mut self, length: u32) -> Self {
        self.record_length = Some(length);
        self
    }

    pub fn block_size(mut self, size: u32) -> Self {
        self.block_size = Some(size);
        self
    }

    pub fn directory(mut self, blocks: u32) -> Self {
        self.directory = Some(blocks);
        self
    }

    /// Directory blocks that will be requested, if any.
    pub fn directory_blocks(&self) -> Option<u32> {
        if !self.dataset_type.is_partitioned() {
            return None;
        }
        self.directory
            .or_else(|| Some(self.space.directory).filter(|&d| d > 0))
    }
}

/// JSON body of an allocation request.
#[derive(Debug, Serialize)]
pub(crate) struct CreateDatasetBody<'a> {
    dsorg: &'static str,
    alcunit: &'static str,
    primary: u32,
    secondary: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    dirblk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recfm: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lrecl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blksize: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vol: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dsntype: Option<&'static str>,
}

impl<'a> From<&'a CreateDatasetRequest> for CreateDatasetBody<'a> {
    fn from(request: &'a CreateDatasetRequest) -> Self {
        CreateDatasetBody {
            dsorg: request.dataset_type.dsorg(),
            alcunit: request.space.unit.as_str(),
            primary: request.space.primary,
            secondary: request.space.secondary,
            dirblk: request.directory_blocks(),
            recfm: request.record_format.map(|f| f.as_str()),
            lrecl: request.record_length,
            blksize: request.block_size,
            vol: request.volume.as_deref(),
            dsntype: (request.dataset_type == DatasetType::Pdse).then_some("LIBRARY"),
        }
    }
}

/// Content to write to a dataset or member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    pub dataset_name: String,
    pub member_name: Option<String>,
    pub content: String,
}

impl UploadRequest {
    pub fn new(dataset_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            member_name: None,
            content: content.into(),
        }
    }

    pub fn member(mut self, member: impl Into<String>) -> Self {
        self.member_name = Some(member.into());
        self
    }
}

/// Content to read from a dataset or member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRequest {
    pub dataset_name: String,
    pub member_name: Option<String>,
    /// Sent as the `encoding` query parameter.
    pub encoding: Option<String>,
}

impl DownloadRequest {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            ..Default::default()
        }
    }

    pub fn member(mut self, member: impl Into<String>) -> Self {
        self.member_name = Some(member.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

/// How [`DatasetManager::get_dataset_info_with_source`](crate::DatasetManager::get_dataset_info_with_source)
/// found its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    /// The metadata request on the dataset itself succeeded.
    Direct,
    /// The metadata request failed and a listing was used instead.
    ListFallback,
}

/// JSON body of a copy or rename, sent to the target.
#[derive(Debug, Serialize)]
pub(crate) struct CopyBody<'a> {
    request: &'static str,
    #[serde(rename = "from-dataset")]
    from_dataset: FromDataset<'a>,
}

#[derive(Debug, Serialize)]
struct FromDataset<'a> {
    dsn: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    member: Option<&'a str>,
}

impl<'a> CopyBody<'a> {
    pub(crate) fn copy(dsn: &'a str) -> Self {
        Self::with_request("copy", dsn, None)
    }

    pub(crate) fn copy_member(dsn: &'a str, member: &'a str) -> Self {
        Self::with_request("copy", dsn, Some(member))
    }

    pub(crate) fn rename(dsn: &'a str) -> Self {
        Self::with_request("rename", dsn, None)
    }

    fn with_request(request: &'static str, dsn: &'a str, member: Option<&'a str>) -> Self {
        CopyBody {
            request,
            from_dataset: FromDataset { dsn, member },
        }
    }
}
