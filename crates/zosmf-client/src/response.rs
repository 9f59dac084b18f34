//! HTTP response handling and status-to-error mapping.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// A fully buffered HTTP response.
///
/// The body is read completely by the transport before a `Response` exists,
/// so error mapping never sees a partially read body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Create a response from its parts. Header names are normalized to lowercase.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body as text. Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::with_source(
                ErrorKind::Json(format!("failed to decode response: {}", e)),
                e,
            )
        })
    }

    /// Classify the response against an operation's accepted status codes.
    ///
    /// Any other status becomes `ErrorKind::Api` carrying the status and the
    /// complete body text.
    pub fn ensure_status(self, accepted: &[u16]) -> Result<Self> {
        if accepted.contains(&self.status) {
            return Ok(self);
        }

        Err(Error::new(ErrorKind::Api {
            status: self.status,
            body: self.text(),
        }))
    }
}

/// Status sets shared by the resource managers.
pub mod status {
    /// Plain reads.
    pub const OK: &[u16] = &[200];
    /// Creation-style writes.
    pub const CREATED: &[u16] = &[200, 201];
    /// Job submission.
    pub const ACCEPTED: &[u16] = &[200, 201, 202];
    /// Deletes and job actions.
    pub const NO_CONTENT: &[u16] = &[200, 204];
    /// Content uploads.
    pub const WRITTEN: &[u16] = &[200, 201, 204];
}
