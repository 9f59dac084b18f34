//! HTTP client settings shared by every session built from them.

use std::time::Duration;

/// Settings for the `reqwest` client behind a [`crate::ReqwestTransport`].
///
/// Certificate checks are not configured here: they follow the profile's
/// `reject_unauthorized` flag.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout. A profile's `response_timeout` replaces it.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// How long an idle pooled connection is kept.
    pub pool_idle_timeout: Duration,
    /// Idle connections kept per host. Zero disables pooling.
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Send `Accept-Encoding` for gzip and deflate and decode replies.
    pub accept_compressed: bool,
    /// Emit a `debug!` event per request and response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: crate::DEFAULT_TIMEOUT,
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            accept_compressed: true,
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Apply a profile's response timeout, if it has one.
    pub(crate) fn with_response_timeout(self, response_timeout: Option<Duration>) -> Self {
        match response_timeout {
            Some(timeout) => Self { timeout, ..self },
            None => self,
        }
    }
}

/// Builder for [`ClientConfig`], starting from the defaults.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Connection reuse: how long idle connections live and how many are
    /// kept per host. Long-running batch tools polling one LPAR rarely need
    /// more than a couple.
    pub fn with_pool(mut self, idle_timeout: Duration, max_idle_per_host: usize) -> Self {
        self.config.pool_idle_timeout = idle_timeout;
        self.config.pool_max_idle_per_host = max_idle_per_host;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
