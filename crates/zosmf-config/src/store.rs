//! Profile storage backed by a Zowe-style configuration document.
//!
//! ```json
//! {
//!   "profiles": { "zosmf": { "dev": { "host": "...", "port": 443, ... } } },
//!   "default": { "zosmf": "dev" }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use zosmf_client::{Profile, Session};

use crate::error::{Error, ErrorKind, Result};

/// Category key under `profiles` and `default`.
pub const ZOSMF_CATEGORY: &str = "zosmf";

/// Named profile storage.
pub trait ProfileStore: Send + Sync {
    /// Load a profile by name.
    fn get(&self, name: &str) -> Result<Profile>;

    /// Names of all stored profiles, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Insert or replace a profile under `profile.name`.
    fn save(&self, profile: &Profile) -> Result<()>;

    /// Remove a profile.
    fn delete(&self, name: &str) -> Result<()>;

    /// Load the profile recorded as default.
    fn get_default(&self) -> Result<Profile>;

    /// Record an existing profile as default.
    fn set_default(&self, name: &str) -> Result<()>;

    /// Load a profile and build a session from it.
    fn create_session(&self, name: &str) -> Result<Session> {
        let profile = self.get(name)?;
        Ok(profile.new_session()?)
    }
}

/// On-disk document. Unknown top-level keys survive a load/save cycle.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    profiles: Map<String, Value>,
    #[serde(default, rename = "default")]
    defaults: Map<String, Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ConfigDocument {
    fn zosmf_profiles(&self) -> Option<&Map<String, Value>> {
        self.profiles.get(ZOSMF_CATEGORY).and_then(Value::as_object)
    }
}

/// File-based profile store.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    /// Create a store at the default path.
    ///
    /// Default path: `~/.zowe/zowe.config.json`
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: default_config_path()?,
        })
    }

    /// Create a store over a custom file path.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ConfigDocument> {
        if !self.path.exists() {
            return Err(Error::new(ErrorKind::ConfigNotFound(
                self.path.display().to_string(),
            )));
        }

        let json = std::fs::read_to_string(&self.path)?;
        let document = serde_json::from_str(&json)?;
        Ok(document)
    }

    fn load_or_default(&self) -> Result<ConfigDocument> {
        match self.load() {
            Err(e) if e.is_config_not_found() => Ok(ConfigDocument::default()),
            other => other,
        }
    }

    fn write(&self, document: &ConfigDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, json)?;

        // Profiles carry passwords
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, name: &str) -> Result<Profile> {
        let document = self.load()?;
        let data = document
            .zosmf_profiles()
            .and_then(|profiles| profiles.get(name))
            .ok_or_else(|| Error::new(ErrorKind::ProfileNotFound(name.to_string())))?;

        profile_from_value(name, data)
    }

    fn list(&self) -> Result<Vec<String>> {
        let document = self.load()?;
        let mut names: Vec<String> = document
            .zosmf_profiles()
            .map(|profiles| profiles.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let mut document = self.load_or_default()?;
        let mut profiles = match document.profiles.remove(ZOSMF_CATEGORY) {
            Some(Value::Object(existing)) => existing,
            _ => Map::new(),
        };

        let mut attributes = match profiles.remove(&profile.name) {
            Some(Value::Object(existing)) => existing,
            _ => Map::new(),
        };
        write_attributes(&mut attributes, profile);
        profiles.insert(profile.name.clone(), Value::Object(attributes));
        document
            .profiles
            .insert(ZOSMF_CATEGORY.to_string(), Value::Object(profiles));

        self.write(&document)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut document = self.load()?;
        let removed = document
            .profiles
            .get_mut(ZOSMF_CATEGORY)
            .and_then(Value::as_object_mut)
            .and_then(|profiles| profiles.remove(name));

        if removed.is_none() {
            return Err(Error::new(ErrorKind::ProfileNotFound(name.to_string())));
        }

        self.write(&document)
    }

    fn get_default(&self) -> Result<Profile> {
        let document = self.load()?;
        let name = document
            .defaults
            .get(ZOSMF_CATEGORY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::new(ErrorKind::NoDefaultProfile))?
            .to_string();

        self.get(&name)
    }

    fn set_default(&self, name: &str) -> Result<()> {
        let mut document = self.load()?;
        let exists = document
            .zosmf_profiles()
            .is_some_and(|profiles| profiles.contains_key(name));
        if !exists {
            return Err(Error::new(ErrorKind::ProfileNotFound(name.to_string())));
        }

        document
            .defaults
            .insert(ZOSMF_CATEGORY.to_string(), Value::String(name.to_string()));
        self.write(&document)
    }
}

/// Read a stored profile, ignoring attributes of the wrong type.
fn profile_from_value(name: &str, data: &Value) -> Result<Profile> {
    let map = data.as_object().ok_or_else(|| {
        Error::new(ErrorKind::InvalidProfile(format!(
            "profile '{}' is not an object",
            name
        )))
    })?;

    let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

    let mut profile = Profile::new(
        name,
        text("host").unwrap_or_default(),
        map.get("port").and_then(port_from_value).unwrap_or(0),
        text("user").unwrap_or_default(),
        text("password").unwrap_or_default(),
    );

    profile.reject_unauthorized = map
        .get("rejectUnauthorized")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    profile.base_path = text("basePath").unwrap_or_default();
    profile.protocol = text("protocol").filter(|p| !p.is_empty());
    profile.response_timeout = map
        .get("responseTimeout")
        .and_then(Value::as_f64)
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(Duration::from_secs_f64);

    Ok(profile)
}

/// Accept any JSON number that names a valid port. Fractions are truncated.
fn port_from_value(value: &Value) -> Option<u16> {
    let number = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))?;
    u16::try_from(number).ok()
}

fn write_attributes(attributes: &mut Map<String, Value>, profile: &Profile) {
    attributes.insert("host".into(), Value::from(profile.host.as_str()));
    attributes.insert("port".into(), Value::from(profile.port));
    attributes.insert("user".into(), Value::from(profile.user.as_str()));
    attributes.insert("password".into(), Value::from(profile.password.as_str()));
    attributes.insert(
        "rejectUnauthorized".into(),
        Value::from(profile.reject_unauthorized),
    );
    attributes.insert("basePath".into(), Value::from(profile.base_path.as_str()));

    match &profile.protocol {
        Some(protocol) => attributes.insert("protocol".into(), Value::from(protocol.as_str())),
        None => attributes.remove("protocol"),
    };
    match profile.response_timeout {
        Some(timeout) => {
            attributes.insert("responseTimeout".into(), Value::from(timeout.as_secs_f64()))
        }
        None => attributes.remove("responseTimeout"),
    };
}

/// Get the default configuration file path.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        Error::new(ErrorKind::Io("Could not find home directory".to_string()))
    })?;

    Ok(home.join(".zowe").join("zowe.config.json"))
}
