//! lineup-media — Image source boundary.
//!
//! Resolves sample locators (remote URL or local path) into decoded RGB
//! pixel buffers. Fetch failures are surfaced per call; retry and skip
//! policy belongs to the caller.

pub mod pixels;
pub mod source;

pub use pixels::Pixels;
pub use source::{FsHttpImageSource, ImageSource, MediaError, SampleLocator};
