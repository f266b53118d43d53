use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::PortalogError;

/// JSON key labels for the serialized record.
///
/// Different call sites label the same four semantic fields with different
/// strings. That is a configuration surface: the labels vary per profile,
/// the field order and meaning do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLabels {
    #[serde(default = "default_timestamp_label")]
    pub timestamp: String,
    #[serde(default = "default_client_addr_label")]
    pub client_addr: String,
    #[serde(default = "default_user_agent_label")]
    pub user_agent: String,
    #[serde(default = "default_credential_label")]
    pub credential: String,
}

/// One call-site profile: where records go and which policy applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Preferred durable location, typically under the system log tree.
    #[serde(default = "default_primary_path")]
    pub primary_path: PathBuf,
    /// Secondary location under the application's own directory, used when
    /// the primary is inaccessible. Its parent directory is created
    /// owner-only if missing.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: PathBuf,
    #[serde(default)]
    pub key_labels: KeyLabels,
    /// Restrict a token credential to `[A-Za-z0-9\-._ ]` after trimming and
    /// truncation. Token call sites only; pair credentials are never
    /// filtered.
    #[serde(default)]
    pub filter_credential_chars: bool,
    /// Reject pair submissions whose password trims to empty.
    #[serde(default)]
    pub require_secret: bool,
    /// Echo each stored line to the diagnostic stream after a successful
    /// append. The echo duplicates unredacted secrets into a second
    /// stream, so it is opt-in.
    #[serde(default)]
    pub echo_to_diagnostics: bool,
}

/// Named profile set, one entry per logical log stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalogConfig {
    #[serde(default)]
    pub profiles: HashMap<String, SinkConfig>,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_timestamp_label() -> String { "ts".into() }
fn default_client_addr_label() -> String { "ip".into() }
fn default_user_agent_label() -> String { "ua".into() }
fn default_credential_label() -> String { "token".into() }
fn default_primary_path() -> PathBuf { "/var/log/ca.log".into() }
fn default_fallback_path() -> PathBuf { "logs/ca.log".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for KeyLabels {
    fn default() -> Self {
        Self {
            timestamp: default_timestamp_label(),
            client_addr: default_client_addr_label(),
            user_agent: default_user_agent_label(),
            credential: default_credential_label(),
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            primary_path: default_primary_path(),
            fallback_path: default_fallback_path(),
            key_labels: KeyLabels::default(),
            filter_credential_chars: false,
            require_secret: false,
            echo_to_diagnostics: false,
        }
    }
}

impl PortalogConfig {
    /// Load the profile set from a YAML file + env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: PortalogConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("PORTALOG_").split("_"))
            .extract()?;
        Ok(config)
    }

    /// Look up a named profile.
    pub fn profile(&self, name: &str) -> Result<&SinkConfig, PortalogError> {
        self.profiles
            .get(name)
            .ok_or_else(|| PortalogError::ProfileNotFound(name.to_string()))
    }
}
