//! Gallery construction.
//!
//! Fans out one blocking task per (identity, sample): fetch the image,
//! run single-face detection, keep the descriptor. Each task writes its
//! own slot; slots are merged after every task has finished, so sample
//! order within an identity is preserved regardless of completion order.

use crate::manifest::GalleryManifest;
use lineup_core::{Descriptor, FaceAnalyzer, Gallery, GalleryError, LabeledDescriptors};
use lineup_media::{ImageSource, SampleLocator};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

#[derive(Error, Debug)]
pub enum BuildError {
    /// Every identity lost all of its samples. Matching against an empty
    /// gallery would report "unknown" for everything and mask the real
    /// failure, so construction refuses instead.
    #[error("no identity produced a usable descriptor; gallery would be empty")]
    EmptyGallery,
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

/// Outcome counters for one gallery build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub identities_loaded: usize,
    /// Identities omitted because none of their samples yielded a face.
    pub identities_skipped: usize,
    pub samples_loaded: usize,
    pub samples_failed: usize,
}

/// Build the gallery described by `manifest`.
///
/// Per-sample fetch and detection failures are logged and skipped; an
/// identity is enrolled with whatever samples survived. Only a fully
/// empty result is an error.
pub async fn build_gallery(
    analyzer: Arc<dyn FaceAnalyzer + Send + Sync>,
    source: Arc<dyn ImageSource + Send + Sync>,
    manifest: &GalleryManifest,
) -> Result<(Gallery, BuildReport), BuildError> {
    let mut tasks: JoinSet<(usize, usize, Option<Descriptor>)> = JoinSet::new();

    for (identity_idx, identity) in manifest.identities.iter().enumerate() {
        for (sample_idx, raw_locator) in identity.samples.iter().enumerate() {
            let analyzer = analyzer.clone();
            let source = source.clone();
            let label = identity.label.clone();
            let raw_locator = raw_locator.clone();

            tasks.spawn_blocking(move || {
                let descriptor = extract_sample(&*analyzer, &*source, &label, &raw_locator);
                (identity_idx, sample_idx, descriptor)
            });
        }
    }

    // One slot per manifest sample, filled as tasks land.
    let mut slots: Vec<Vec<Option<Descriptor>>> = manifest
        .identities
        .iter()
        .map(|identity| vec![None; identity.samples.len()])
        .collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((identity_idx, sample_idx, descriptor)) => {
                slots[identity_idx][sample_idx] = descriptor;
            }
            Err(e) => {
                tracing::error!(error = %e, "sample task failed to run");
            }
        }
    }

    let mut report = BuildReport::default();
    let mut sets = Vec::new();

    for (identity, identity_slots) in manifest.identities.iter().zip(slots) {
        let total = identity_slots.len();
        let descriptors: Vec<Descriptor> = identity_slots.into_iter().flatten().collect();
        report.samples_failed += total - descriptors.len();
        report.samples_loaded += descriptors.len();

        if descriptors.is_empty() {
            tracing::warn!(
                label = %identity.label,
                samples = total,
                "identity omitted from gallery: no sample yielded a face"
            );
            report.identities_skipped += 1;
            continue;
        }

        tracing::info!(
            label = %identity.label,
            descriptors = descriptors.len(),
            "identity enrolled"
        );
        sets.push(LabeledDescriptors::new(identity.label.clone(), descriptors)?);
    }

    if sets.is_empty() {
        return Err(BuildError::EmptyGallery);
    }
    report.identities_loaded = sets.len();

    let gallery = Gallery::new(sets)?;
    tracing::info!(
        identities = gallery.identity_count(),
        descriptors = gallery.descriptor_count(),
        "gallery built"
    );
    Ok((gallery, report))
}

/// Fetch one sample and extract its descriptor. All failures are
/// non-fatal here: log, skip, let the caller tally.
fn extract_sample(
    analyzer: &dyn FaceAnalyzer,
    source: &dyn ImageSource,
    label: &str,
    raw_locator: &str,
) -> Option<Descriptor> {
    let locator = SampleLocator::parse(raw_locator);

    let pixels = match source.fetch(&locator) {
        Ok(pixels) => pixels,
        Err(e) => {
            tracing::warn!(label, %locator, error = %e, "sample fetch failed, skipping");
            return None;
        }
    };

    match analyzer.detect_single_face(&pixels.data, pixels.width, pixels.height) {
        Ok(Some(detection)) => Some(detection.descriptor),
        Ok(None) => {
            tracing::warn!(label, %locator, "no face found in sample, skipping");
            None
        }
        Err(e) => {
            tracing::warn!(label, %locator, error = %e, "sample detection failed, skipping");
            None
        }
    }
}
