use std::path::Path;

use crate::foundation::error::{TelepageError, TelepageResult};
use crate::foundation::math::{digest_u64, mul_div255_u8};

/// Straight (non-premultiplied) RGBA8 bitmap, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let data = fill.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Mix `rgb` over the pixel with coverage `alpha`; the pixel stays opaque.
    pub fn blend_pixel(&mut self, x: u32, y: u32, rgb: [u8; 4], alpha: u8) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let a = u16::from(alpha);
        for c in 0..3 {
            let dst = u16::from(self.data[i + c]);
            let src = u16::from(rgb[c]);
            self.data[i + c] = mul_div255_u8(src, a) + mul_div255_u8(dst, 255 - a);
        }
        self.data[i + 3] = 255;
    }

    /// Fill a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        for yy in y..y1 {
            for xx in x..x1 {
                self.put_pixel(xx, yy, rgba);
            }
        }
    }

    /// FNV-1a digest of the pixel data.
    pub fn digest(&self) -> u64 {
        digest_u64(&self.data)
    }

    pub fn save_png(&self, path: &Path) -> TelepageResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| TelepageError::export(format!("write png '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
