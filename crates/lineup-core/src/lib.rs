//! lineup-core — Gallery data model and nearest-descriptor face matching.
//!
//! Detection, landmarks, and descriptor extraction are delegated to an
//! external pretrained-model backend behind the [`FaceAnalyzer`] trait;
//! this crate owns everything downstream of the descriptors.

pub mod analyzer;
pub mod gallery;
pub mod matcher;
pub mod overlay;
pub mod types;

pub use analyzer::{AnalyzerError, FaceAnalyzer};
pub use gallery::{Gallery, GalleryError, LabeledDescriptors};
pub use matcher::{FaceMatcher, DEFAULT_MATCH_THRESHOLD};
pub use overlay::{plan_overlay, DrawCommand, RenderSurface};
pub use types::{BoundingBox, Descriptor, Detection, MatchResult, UNKNOWN_LABEL};
