//! PNG annotation surface.
//!
//! Draws detection boxes onto a copy of the query image. Labels are
//! reported on stdout by the caller; the surface draws boxes only.

use anyhow::{anyhow, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use lineup_core::{BoundingBox, RenderSurface};
use lineup_media::Pixels;
use std::path::Path;

const BOX_COLOR: Rgb<u8> = Rgb([64, 220, 120]);
const BOX_STROKE: i32 = 2;

pub struct PngSurface {
    base: RgbImage,
    canvas: RgbImage,
}

impl PngSurface {
    pub fn new(pixels: &Pixels) -> Result<Self> {
        let base = RgbImage::from_raw(pixels.width, pixels.height, pixels.data.clone())
            .ok_or_else(|| anyhow!("pixel buffer does not match its dimensions"))?;
        let canvas = base.clone();
        Ok(Self { base, canvas })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.canvas.save(path)?;
        Ok(())
    }
}

impl RenderSurface for PngSurface {
    fn clear(&mut self) {
        self.canvas = self.base.clone();
    }

    fn draw_box(&mut self, bbox: &BoundingBox, label: &str) {
        let x = bbox.x.round() as i32;
        let y = bbox.y.round() as i32;
        let width = bbox.width.round().max(1.0) as u32;
        let height = bbox.height.round().max(1.0) as u32;

        for inset in 0..BOX_STROKE {
            let shrink = (2 * inset) as u32;
            if width <= shrink || height <= shrink {
                break;
            }
            let rect = Rect::at(x + inset, y + inset).of_size(width - shrink, height - shrink);
            draw_hollow_rect_mut(&mut self.canvas, rect, BOX_COLOR);
        }
        tracing::debug!(label, x, y, width, height, "overlay box drawn");
    }
}
