//! The seam between sessions and the network.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder};
use crate::response::Response;

/// Sends a fully prepared request and returns the buffered response.
///
/// Sessions hold a transport behind an `Arc`, so tests can substitute a
/// recording or failing implementation without a server.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send one request. Returns `Err` only when no HTTP response was obtained.
    async fn send(&self, request: RequestBuilder) -> Result<Response>;

    /// Release idle pooled connections. The transport stays usable.
    fn close_idle(&self) {}
}

/// Transport backed by a pooled `reqwest::Client`.
#[derive(Debug)]
pub struct ReqwestTransport {
    inner: RwLock<reqwest::Client>,
    config: ClientConfig,
    accept_invalid_certs: bool,
}

impl ReqwestTransport {
    /// Build a transport. `reject_unauthorized = false` disables certificate
    /// and hostname verification for every request it sends.
    pub fn new(config: ClientConfig, reject_unauthorized: bool) -> Result<Self> {
        let accept_invalid_certs = !reject_unauthorized;
        if accept_invalid_certs {
            warn!("TLS certificate verification is disabled for this session");
        }

        let inner = build_client(&config, accept_invalid_certs)?;

        Ok(Self {
            inner: RwLock::new(inner),
            config,
            accept_invalid_certs,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn client(&self) -> reqwest::Client {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

fn build_client(config: &ClientConfig, accept_invalid_certs: bool) -> Result<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(&config.user_agent)
        .gzip(config.accept_compressed)
        .deflate(config.accept_compressed)
        .danger_accept_invalid_certs(accept_invalid_certs);

    builder
        .build()
        .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))
}

fn full_url(request: &RequestBuilder) -> Result<url::Url> {
    let mut url = url::Url::parse(&request.url)?;
    if !request.query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &request.query_params {
            pairs.append_pair(name, value);
        }
    }
    Ok(url)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let url = full_url(&request)?;
        let mut req = self.client().request(request.method.to_reqwest(), url);

        if let Some((ref user, ref password)) = request.basic_auth {
            req = req.basic_auth(user, Some(password));
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.body(serde_json::to_vec(&value)?),
                RequestBody::Text(text) => req.body(text),
            };
        }

        if self.config.enable_tracing {
            debug!(method = request.method.as_str(), url = %request.url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        let body = response.bytes().await?;

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, content_length = body.len(), "Response received");
            } else {
                info!(status, content_length = body.len(), "Non-success response");
            }
        }

        Ok(Response::new(status, headers, body))
    }

    fn close_idle(&self) {
        // reqwest has no explicit pool drain; swapping in a fresh client drops
        // the old pool once in-flight clones finish.
        match build_client(&self.config, self.accept_invalid_certs) {
            Ok(fresh) => match self.inner.write() {
                Ok(mut guard) => *guard = fresh,
                Err(poisoned) => *poisoned.into_inner() = fresh,
            },
            Err(e) => warn!(error = %e, "Failed to rebuild HTTP client while closing idle connections"),
        }
    }
}
