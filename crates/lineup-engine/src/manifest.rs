//! Gallery manifest — which identities to enroll and where their sample
//! images live. Supplied at initialization; the enrolled set never
//! changes for the lifetime of a session.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest parse failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("manifest lists no identities")]
    NoIdentities,
    #[error("duplicate identity label {0:?}")]
    DuplicateLabel(String),
    #[error("identity {0:?} lists no samples")]
    NoSamples(String),
}

/// Top-level manifest structure:
///
/// ```toml
/// [[identity]]
/// label = "Tony Stark"
/// samples = ["https://example.com/tony/1.jpg", "samples/tony/2.jpg"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryManifest {
    #[serde(rename = "identity", default)]
    pub identities: Vec<IdentityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEntry {
    pub label: String,
    /// Sample image locators, URL or local path.
    pub samples: Vec<String>,
}

impl GalleryManifest {
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Total sample locators across all identities.
    pub fn sample_count(&self) -> usize {
        self.identities.iter().map(|i| i.samples.len()).sum()
    }

    fn validate(&self) -> Result<(), ManifestError> {
        if self.identities.is_empty() {
            return Err(ManifestError::NoIdentities);
        }
        let mut seen = HashSet::new();
        for identity in &self.identities {
            if !seen.insert(identity.label.as_str()) {
                return Err(ManifestError::DuplicateLabel(identity.label.clone()));
            }
            if identity.samples.is_empty() {
                return Err(ManifestError::NoSamples(identity.label.clone()));
            }
        }
        Ok(())
    }
}
