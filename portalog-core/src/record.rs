//! Submission record model.
//!
//! A [`SubmissionRecord`] is built once per request from fields the HTTP
//! layer already extracted, then serialized to a single JSON line. It has no
//! life beyond that call and the persisted line.

use chrono::{SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::anonymize::{UNKNOWN_ADDR, anonymize_addr};
use crate::config::{KeyLabels, SinkConfig};
use crate::error::PortalogError;
use crate::sanitize::{clean_user_agent, filter_token};

/// Credential field of a submission record.
///
/// Serializes untagged: a token is a bare JSON string, a pair is
/// `{"user": …, "password": …}`. Secret fields may be empty strings, never
/// null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credential {
    Token(String),
    Pair { user: String, password: String },
}

/// Raw request fields, as extracted by the HTTP-handling caller.
#[derive(Debug, Clone, Copy)]
pub struct RawSubmission<'a> {
    /// Peer address as seen by the transport layer.
    pub remote_addr: Option<&'a str>,
    /// `User-Agent` header value, if the request carried one.
    pub user_agent: Option<&'a str>,
    pub credential: RawCredential<'a>,
}

/// Credential field as it arrived, before policy is applied.
#[derive(Debug, Clone, Copy)]
pub enum RawCredential<'a> {
    /// Single opaque secret (token call sites).
    Token(&'a str),
    /// Identifier plus optional secret (credential-pair call sites).
    Pair {
        user: &'a str,
        password: Option<&'a str>,
    },
}

/// One fully normalized submission record. Never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// ISO-8601 UTC instant with timezone designator, captured at
    /// construction time.
    pub timestamp: String,
    /// Anonymized client address (see [`crate::anonymize`]).
    pub client_addr: String,
    /// Truncated user-agent; `"-"` when the header was absent.
    pub user_agent: String,
    pub credential: Credential,
}

impl SubmissionRecord {
    /// Build a record from raw fields under the profile's policy.
    ///
    /// Fails with [`PortalogError::InvalidInput`] when the identifying
    /// field (token, or user) is empty after sanitization, or when
    /// `require_secret` is set and the password trims to empty. Address
    /// problems never fail the build; they degrade to `"0.0.0.0"`.
    pub fn build(raw: RawSubmission<'_>, cfg: &SinkConfig) -> Result<Self, PortalogError> {
        let credential = match raw.credential {
            RawCredential::Token(t) => {
                let token = if cfg.filter_credential_chars {
                    filter_token(t)
                } else {
                    t.trim().to_string()
                };
                if token.is_empty() {
                    return Err(PortalogError::InvalidInput("token".into()));
                }
                Credential::Token(token)
            }
            RawCredential::Pair { user, password } => {
                let user = user.trim().to_string();
                if user.is_empty() {
                    return Err(PortalogError::InvalidInput("user".into()));
                }
                // Pair secrets are trimmed but never character-filtered.
                let password = password.unwrap_or("").trim().to_string();
                if cfg.require_secret && password.is_empty() {
                    return Err(PortalogError::InvalidInput("password".into()));
                }
                Credential::Pair { user, password }
            }
        };

        Ok(Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            client_addr: match raw.remote_addr {
                Some(addr) => anonymize_addr(addr),
                None => UNKNOWN_ADDR.to_string(),
            },
            user_agent: clean_user_agent(raw.user_agent),
            credential,
        })
    }

    /// Serialize to one JSON object using the profile's key labels.
    ///
    /// Field order is fixed (time, address, user-agent, credential) no
    /// matter what the labels are. The line terminator is the sink's job.
    pub fn to_json_line(&self, labels: &KeyLabels) -> Result<String, PortalogError> {
        Ok(serde_json::to_string(&Labeled {
            record: self,
            labels,
        })?)
    }
}

/// Serialization adapter pairing a record with its profile's labels.
struct Labeled<'a> {
    record: &'a SubmissionRecord,
    labels: &'a KeyLabels,
}

impl Serialize for Labeled<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&self.labels.timestamp, &self.record.timestamp)?;
        map.serialize_entry(&self.labels.client_addr, &self.record.client_addr)?;
        map.serialize_entry(&self.labels.user_agent, &self.record.user_agent)?;
        map.serialize_entry(&self.labels.credential, &self.record.credential)?;
        map.end()
    }
}
