//! Core data models for attack-search
//!
//! The ATT&CK dataset is a STIX 2.x bundle whose objects carry dozens of
//! optional fields. Only the handful the search needs are modeled here;
//! everything else in the document is ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Source name that marks an external reference as the canonical ATT&CK entry
pub const CANONICAL_SOURCE: &str = "mitre-attack";

/// Top-level STIX bundle as published in the mitre/cti repository
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Bundle {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub spec_version: Option<String>,
    #[serde(default)]
    pub objects: Vec<AttackObject>,
}

impl Bundle {
    /// Decode a bundle from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bundle: Bundle = serde_json::from_slice(bytes)?;
        log::debug!("Decoded bundle '{}' with {} objects", bundle.id, bundle.objects.len());
        Ok(bundle)
    }
}

/// One typed entry of the bundle (technique, tactic, group, relationship, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttackObject {
    #[serde(default)]
    pub id: String,
    /// STIX type discriminator, e.g. `attack-pattern` or `intrusion-set`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_references: Vec<ExternalReference>,
    #[serde(default)]
    pub revoked: bool,
    #[serde(default)]
    pub x_mitre_deprecated: bool,
}

impl AttackObject {
    /// Name of the object, treating an empty string the same as a missing one
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// External references whose source is the ATT&CK knowledge base itself
    pub fn canonical_references(&self) -> impl Iterator<Item = &ExternalReference> {
        self.external_references.iter().filter(|r| r.is_canonical())
    }

    /// Whether the object has been revoked or deprecated upstream
    pub fn is_retired(&self) -> bool {
        self.revoked || self.x_mitre_deprecated
    }
}

/// Pointer from an object to an outside resource (ATT&CK page, CAPEC, paper, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalReference {
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl ExternalReference {
    pub fn is_canonical(&self) -> bool {
        self.source_name == CANONICAL_SOURCE
    }
}

/// A single search hit: an object name paired with one canonical URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub name: String,
    pub url: String,
}

impl MatchRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
