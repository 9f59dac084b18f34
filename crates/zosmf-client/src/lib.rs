//! # zosmf-client
//!
//! Core connection layer for the z/OSMF REST API.
//!
//! This crate provides:
//! - [`Profile`]: connection descriptor (host, port, credentials, TLS policy)
//! - [`Session`]: a live connection with computed base URL and default headers
//! - [`Transport`]: the seam between sessions and the network, with
//!   [`ReqwestTransport`] as the production implementation
//! - Shared status-to-error mapping ([`Response::ensure_status`])
//! - z/OS name validation ([`validation`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Resource Managers                        │
//! │            (zosmf-jobs, zosmf-datasets)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                              │
//! │  - Base URL derived once from the Profile                   │
//! │  - Session headers, Basic credentials, CSRF header          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Transport (ReqwestTransport)               │
//! │  - Pooled HTTP client, TLS policy, timeouts                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use zosmf_client::{Profile, response::status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zosmf_client::Error> {
//!     let profile = Profile::new("dev", "mainframe.example.com", 443, "IBMUSER", "secret")
//!         .with_base_path("/zosmf");
//!     let session = profile.new_session()?;
//!
//!     let info = session.send(session.get("/info"), status::OK).await?;
//!     println!("{}", info.text());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod profile;
mod request;
pub mod response;
mod session;
mod transport;
pub mod validation;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use profile::Profile;
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use session::{Session, CSRF_HEADER};
pub use transport::{ReqwestTransport, Transport};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// User-Agent sent when the configuration does not override it.
pub const USER_AGENT: &str = concat!("zosmf-sdk/", env!("CARGO_PKG_VERSION"));

/// Jobs REST service root.
pub const RESTJOBS_PATH: &str = "/restjobs/jobs";

/// Datasets REST service root.
pub const RESTFILES_DS_PATH: &str = "/restfiles/ds";

// Re-exported so downstream crates can implement `Transport` without a direct dependency.
pub use async_trait::async_trait;
