//! External face analysis boundary.

use crate::types::Detection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),
    #[error("detection failed: {0}")]
    DetectionFailed(String),
}

/// Detection plus descriptor extraction, delegated to a pretrained-model
/// backend. One call analyzes a whole image; per-face descriptors come
/// back batched, never one call per face.
///
/// Implementations take raw RGB8 pixels so this crate stays free of image
/// decoding concerns.
pub trait FaceAnalyzer {
    /// Detect every face in the image, with landmarks and descriptors.
    fn detect_all_faces(
        &self,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, AnalyzerError>;

    /// Detect the most prominent face, if any.
    ///
    /// Default implementation keeps the highest-confidence detection.
    fn detect_single_face(
        &self,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Option<Detection>, AnalyzerError> {
        let faces = self.detect_all_faces(rgb, width, height)?;
        Ok(faces.into_iter().reduce(|best, candidate| {
            if candidate.bbox.confidence > best.bbox.confidence {
                candidate
            } else {
                best
            }
        }))
    }
}
