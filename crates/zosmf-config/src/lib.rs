//! # zosmf-config
//!
//! Named z/OSMF connection profiles, stored in a Zowe-style configuration
//! file (`~/.zowe/zowe.config.json` by default).
//!
//! ## Example
//!
//! ```rust,ignore
//! use zosmf_config::{FileProfileStore, ProfileStore};
//! use zosmf_client::Profile;
//!
//! let store = FileProfileStore::new()?;
//! store.save(&Profile::new("dev", "mainframe.example.com", 443, "IBMUSER", "secret"))?;
//! store.set_default("dev")?;
//!
//! let session = store.create_session("dev")?;
//! ```
//!
//! A missing file and a missing profile are different errors:
//! [`Error::is_config_not_found`] vs [`Error::is_profile_not_found`].

mod error;
mod store;

pub use error::{Error, ErrorKind, Result};
pub use store::{default_config_path, FileProfileStore, ProfileStore, ZOSMF_CATEGORY};
