//! Live connections derived from a [`Profile`].

use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::profile::Profile;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::transport::{ReqwestTransport, Transport};

/// Header z/OSMF requires on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";

/// A configured connection to one z/OSMF server.
///
/// The base URL is computed once at construction. Header changes affect every
/// later request but never the base URL or the transport. Header mutation
/// takes `&mut self`, so it cannot race with requests issued through the same
/// session; clones share the transport but carry their own header map.
#[derive(Clone)]
pub struct Session {
    profile: Arc<Profile>,
    base_url: String,
    transport: Arc<dyn Transport>,
    headers: Vec<(String, String)>,
}

impl Session {
    /// Build a session with the default client configuration.
    pub fn new(profile: Profile) -> Result<Self> {
        Self::with_config(profile, ClientConfig::default())
    }

    /// Build a session with a custom client configuration.
    ///
    /// The profile's `response_timeout`, when set, replaces `config.timeout`.
    /// A profile with `reject_unauthorized == false` gets a transport that
    /// accepts any certificate for any host.
    pub fn with_config(profile: Profile, config: ClientConfig) -> Result<Self> {
        let config = config.with_response_timeout(profile.response_timeout);
        let transport = ReqwestTransport::new(config, profile.reject_unauthorized)?;
        Self::with_transport(profile, Arc::new(transport))
    }

    /// Build a session over an existing transport.
    ///
    /// Every constructor ends here, so a profile with an empty host, user or
    /// password, or port 0, is rejected before anything is sent.
    pub fn with_transport(profile: Profile, transport: Arc<dyn Transport>) -> Result<Self> {
        profile.validate()?;
        let base_url = profile.base_url();
        url::Url::parse(&base_url)?;

        Ok(Self {
            profile: Arc::new(profile),
            base_url,
            transport,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        })
    }

    /// Build a session from bare connection details with secure defaults.
    pub fn connect(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::new(Profile::new("direct", host, port, user, password))
    }

    /// Like [`Session::connect`], with TLS policy and base path.
    pub fn connect_with_options(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        reject_unauthorized: bool,
        base_path: impl Into<String>,
    ) -> Result<Self> {
        let profile = Profile::new("direct", host, port, user, password)
            .with_reject_unauthorized(reject_unauthorized)
            .with_base_path(base_path);
        Self::new(profile)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// User the session authenticates as.
    pub fn user(&self) -> &str {
        &self.profile.user
    }

    /// Session-wide headers applied to every request.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Add a session-wide header, replacing one with the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(existing) => *existing = (name, value),
            None => self.headers.push((name, value)),
        }
    }

    /// Remove a session-wide header. Names match ignoring case.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }

    /// Create a GET request for `path` under the base URL.
    pub fn get(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, self.url(path))
    }

    /// Create a PUT request for `path` under the base URL.
    pub fn put(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Put, self.url(path))
    }

    /// Create a POST request for `path` under the base URL.
    pub fn post(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, self.url(path))
    }

    /// Create a DELETE request for `path` under the base URL.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with session headers and credentials applied.
    ///
    /// Request-specific headers win over session headers of the same name.
    /// Any HTTP status is returned as `Ok`; see [`Session::send`].
    #[instrument(skip(self, request), fields(method = request.method().as_str(), url = %request.url()))]
    pub async fn execute(&self, mut request: RequestBuilder) -> Result<Response> {
        let specific = std::mem::replace(&mut request.headers, self.headers.clone());
        for (name, value) in specific {
            request = request.header(name, value);
        }

        request = request.basic_auth(self.profile.user.as_str(), self.profile.password.as_str());

        if request.method().is_mutating() {
            request = request.header_if_absent(CSRF_HEADER, "true");
        }

        self.transport.send(request).await
    }

    /// Send a request and map any status outside `accepted` to an API error.
    pub async fn send(&self, request: RequestBuilder, accepted: &[u16]) -> Result<Response> {
        self.execute(request).await?.ensure_status(accepted)
    }

    /// Release idle pooled connections. Safe to call repeatedly; the session
    /// and any clone of it remain usable.
    pub fn close(&self) {
        self.transport.close_idle();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("profile", &self.profile)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
