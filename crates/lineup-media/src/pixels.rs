//! Decoded image pixels.

use crate::source::MediaError;

/// A decoded RGB8 image.
#[derive(Debug, Clone)]
pub struct Pixels {
    /// Packed RGB data (width * height * 3 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Pixels {
    pub fn from_dynamic(image: image::DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self {
            data: rgb.into_raw(),
            width,
            height,
        }
    }

    /// Decode an encoded image (JPEG, PNG, ...) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, MediaError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(image))
    }
}
