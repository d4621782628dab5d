use serde::{Deserialize, Serialize};
use std::fmt;

/// Label reported for a probe that matched nothing within the threshold.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Bounding box for a detected face, in pixel coordinates of the query image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

/// Face descriptor vector (128-dimensional for FaceNet-style models).
///
/// Produced opaquely by the inference backend; treated as an immutable
/// value. The dimension is whatever the backend emits — both sides of a
/// comparison must come from the same model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    values: Vec<f32>,
}

impl Descriptor {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Euclidean distance to another descriptor.
    ///
    /// For L2-normalized descriptors this lives in [0, 2]; the recognition
    /// model's conventional same-identity cutoff is 0.6.
    pub fn euclidean_distance(&self, other: &Descriptor) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

/// One detected face as returned by the inference backend: location,
/// optional 5-point landmarks, and the identity descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Five-point facial landmarks: [left_eye, right_eye, nose, left_mouth, right_mouth].
    pub landmarks: Option<[(f32, f32); 5]>,
    pub descriptor: Descriptor,
}

/// Result of matching one probe descriptor against a gallery.
///
/// `label` is `None` when no gallery descriptor was within the threshold;
/// the distance to the nearest descriptor is reported either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub label: Option<String>,
    pub distance: f32,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.label.is_some()
    }

    /// The matched label, or [`UNKNOWN_LABEL`] for a non-match.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.display_label(), self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance_identical() {
        let a = Descriptor::new(vec![0.5, -0.25, 1.0]);
        let b = a.clone();
        assert_eq!(a.euclidean_distance(&b), 0.0);
    }

    #[test]
    fn test_euclidean_distance_unit_axes() {
        // Distance between orthogonal unit vectors is sqrt(2)
        let a = Descriptor::new(vec![1.0, 0.0]);
        let b = Descriptor::new(vec![0.0, 1.0]);
        assert!((a.euclidean_distance(&b) - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_distance_symmetric() {
        let a = Descriptor::new(vec![0.1, 0.9, -0.4]);
        let b = Descriptor::new(vec![-0.3, 0.2, 0.8]);
        assert_eq!(a.euclidean_distance(&b), b.euclidean_distance(&a));
    }

    #[test]
    fn test_match_result_display() {
        let hit = MatchResult {
            label: Some("Thor".into()),
            distance: 0.4211,
        };
        assert_eq!(hit.to_string(), "Thor (0.42)");
        assert!(hit.is_match());

        let miss = MatchResult {
            label: None,
            distance: 0.88,
        };
        assert_eq!(miss.to_string(), "unknown (0.88)");
        assert_eq!(miss.display_label(), UNKNOWN_LABEL);
        assert!(!miss.is_match());
    }
}
