//! Connection profiles.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::session::Session;

/// Connection descriptor for one z/OSMF endpoint.
///
/// A `Profile` is plain data. Sessions keep their own copy, so changing a
/// profile after a session was derived from it never affects that session.
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Explicit scheme. `None` means https, subject to the plain-HTTP port rule.
    pub protocol: Option<String>,
    /// Appended verbatim to the authority, e.g. `/zosmf`.
    pub base_path: String,
    /// When false, TLS certificate and hostname verification are disabled.
    pub reject_unauthorized: bool,
    /// Per-request timeout overriding the client default.
    pub response_timeout: Option<Duration>,
}

impl Profile {
    /// Create a profile with secure defaults.
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            protocol: None,
            base_path: String::new(),
            reject_unauthorized: true,
            response_timeout: None,
        }
    }

    pub fn with_reject_unauthorized(mut self, reject: bool) -> Self {
        self.reject_unauthorized = reject;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// Check the fields a session cannot work without.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::validation("profile host cannot be empty"));
        }
        if self.port == 0 {
            return Err(Error::validation("profile port must be greater than 0"));
        }
        if self.user.is_empty() {
            return Err(Error::validation("profile user cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(Error::validation("profile password cannot be empty"));
        }
        Ok(())
    }

    /// Scheme used for requests.
    ///
    /// Ports 80 and 8080 always mean plain HTTP, whatever the profile says.
    pub fn scheme(&self) -> &str {
        if self.port == 80 || self.port == 8080 {
            return "http";
        }
        match self.protocol.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => "https",
        }
    }

    /// Base URL derived from scheme, host, port and base path.
    ///
    /// The port is omitted when it is 0, 80 or 443. The base path is appended
    /// as given, without slash normalization.
    pub fn base_url(&self) -> String {
        let mut url = format!("{}://{}", self.scheme(), self.host);
        if !matches!(self.port, 0 | 80 | 443) {
            url.push_str(&format!(":{}", self.port));
        }
        url.push_str(&self.base_path);
        url
    }

    /// Build a live session from this profile.
    pub fn new_session(&self) -> Result<Session> {
        Session::new(self.clone())
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("protocol", &self.protocol)
            .field("base_path", &self.base_path)
            .field("reject_unauthorized", &self.reject_unauthorized)
            .field("response_timeout", &self.response_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(port: u16) -> Profile {
        Profile::new("dev", "mf.example.com", port, "IBMUSER", "secret")
    }

    #[test]
    fn test_defaults_are_secure() {
        let p = profile(443);
        assert!(p.reject_unauthorized);
        assert_eq!(p.protocol, None);
        assert_eq!(p.base_path, "");
        assert_eq!(p.response_timeout, None);
    }

    #[test]
    fn test_base_url_port_rules() {
        let cases = [
            (443, "https://mf.example.com"),
            (80, "http://mf.example.com"),
            (8080, "http://mf.example.com:8080"),
            (10443, "https://mf.example.com:10443"),
            (0, "https://mf.example.com"),
        ];

        for (port, expected) in cases {
            assert_eq!(profile(port).base_url(), expected, "port {port}");
        }
    }

    #[test]
    fn test_plain_http_ports_override_explicit_protocol() {
        let p = profile(8080).with_protocol("https");
        assert_eq!(p.scheme(), "http");

        let p = profile(9080).with_protocol("http");
        assert_eq!(p.base_url(), "http://mf.example.com:9080");
    }

    #[test]
    fn test_scheme_for_every_port() {
        // Exhaustive over the port space: only 80 and 8080 force http.
        for port in 1..=u16::MAX {
            let p = profile(port);
            let url = p.base_url();
            if port == 80 || port == 8080 {
                assert!(url.starts_with("http://"), "port {port}: {url}");
            } else {
                assert!(url.starts_with("https://"), "port {port}: {url}");
            }
            let has_port = url.ends_with(&format!(":{port}"));
            assert_eq!(has_port, port != 80 && port != 443, "port {port}: {url}");
        }
    }

    #[test]
    fn test_base_path_appended_verbatim() {
        let p = profile(443).with_base_path("/zosmf/");
        assert_eq!(p.base_url(), "https://mf.example.com/zosmf/");

        let p = profile(10443).with_base_path("/zosmf");
        assert_eq!(p.base_url(), "https://mf.example.com:10443/zosmf");
    }

    #[test]
    fn test_validate() {
        assert!(profile(443).validate().is_ok());

        let mut p = profile(443);
        p.host.clear();
        assert!(p.validate().unwrap_err().to_string().contains("host"));

        assert!(profile(0).validate().unwrap_err().to_string().contains("port"));

        let mut p = profile(443);
        p.user.clear();
        assert!(p.validate().unwrap_err().is_validation());

        let mut p = profile(443);
        p.password.clear();
        assert!(p.validate().unwrap_err().to_string().contains("password"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", profile(443));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }
}
