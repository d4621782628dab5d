//! Immutable gallery of known identities and their reference descriptors.

use crate::types::Descriptor;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("gallery has no identities with any usable descriptor")]
    Empty,
    #[error("identity {0:?} has no descriptors")]
    EmptyIdentity(String),
    #[error("duplicate identity label {0:?}")]
    DuplicateLabel(String),
}

/// A label paired with one or more reference descriptors for that identity.
///
/// The descriptor list is never empty: samples that yielded no face are
/// dropped before construction, and an identity that lost every sample
/// must not reach the gallery at all.
// Serialize only: deserialization would sidestep the non-empty check.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledDescriptors {
    label: String,
    descriptors: Vec<Descriptor>,
}

impl LabeledDescriptors {
    pub fn new(
        label: impl Into<String>,
        descriptors: Vec<Descriptor>,
    ) -> Result<Self, GalleryError> {
        let label = label.into();
        if descriptors.is_empty() {
            return Err(GalleryError::EmptyIdentity(label));
        }
        Ok(Self { label, descriptors })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }
}

/// The set of enrolled identities, built once and read-only afterwards.
///
/// Iteration order is construction order; the matcher's tie-break relies
/// on it being stable.
#[derive(Debug, Clone)]
pub struct Gallery {
    sets: Vec<LabeledDescriptors>,
}

impl Gallery {
    pub fn new(sets: Vec<LabeledDescriptors>) -> Result<Self, GalleryError> {
        if sets.is_empty() {
            return Err(GalleryError::Empty);
        }
        let mut seen = HashSet::new();
        for set in &sets {
            if !seen.insert(set.label().to_string()) {
                return Err(GalleryError::DuplicateLabel(set.label().to_string()));
            }
        }
        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[LabeledDescriptors] {
        &self.sets
    }

    /// Number of enrolled identities.
    pub fn identity_count(&self) -> usize {
        self.sets.len()
    }

    /// Total reference descriptors across all identities.
    pub fn descriptor_count(&self) -> usize {
        self.sets.iter().map(|s| s.descriptors().len()).sum()
    }
}
