//! Flip, rotate and resample art blocks on the fine sub-cell grid.

use crate::art::block::ArtBlock;
use crate::foundation::core::{COLS, CONTENT_ROWS, FINE_WIDTH, FinePos, MAX_ART_FINE_HEIGHT, SIXEL_COLS, SIXEL_ROWS};
use crate::foundation::error::{TelepageError, TelepageResult};
use crate::transform::fine::transform_fine;

/// Mirror left to right.
pub fn flip_horizontal(block: &ArtBlock) -> ArtBlock {
    let w = block.fine_width();
    transform_fine(block, w, block.fine_height(), |p| FinePos::new(w - 1 - p.x, p.y))
}

/// Mirror top to bottom.
pub fn flip_vertical(block: &ArtBlock) -> ArtBlock {
    let h = block.fine_height();
    transform_fine(block, block.fine_width(), h, |p| FinePos::new(p.x, h - 1 - p.y))
}

/// Quarter turn clockwise; the fine extent swaps width and height.
pub fn rotate_90(block: &ArtBlock) -> ArtBlock {
    let h = block.fine_height();
    transform_fine(block, h, block.fine_width(), |p| FinePos::new(p.y, h - 1 - p.x))
}

/// Nearest-neighbour resample by `factor`, at least one cell and at most the drawable page.
pub fn scale(block: &ArtBlock, factor: f64) -> TelepageResult<ArtBlock> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TelepageError::validation(format!(
            "scale factor must be finite and > 0, got {factor}"
        )));
    }
    let (w, h) = (block.fine_width(), block.fine_height());
    if w == 0 || h == 0 {
        return Ok(block.clone());
    }
    let new_w = ((w as f64 * factor).round() as usize).clamp(SIXEL_COLS, FINE_WIDTH);
    let new_h = ((h as f64 * factor).round() as usize).clamp(SIXEL_ROWS, MAX_ART_FINE_HEIGHT);
    Ok(transform_fine(block, new_w, new_h, |p| {
        FinePos::new(
            ((p.x as f64 / factor).floor() as usize).min(w - 1),
            ((p.y as f64 / factor).floor() as usize).min(h - 1),
        )
    }))
}

/// Resample to an explicit cell size, clamped to 1..=40 by 1..=23.
pub fn resize_to(block: &ArtBlock, width: usize, height: usize) -> ArtBlock {
    let width = width.clamp(1, COLS);
    let height = height.clamp(1, CONTENT_ROWS);
    let (w, h) = (block.fine_width(), block.fine_height());
    if w == 0 || h == 0 {
        return ArtBlock::new(width, height);
    }
    let (new_w, new_h) = (width * SIXEL_COLS, height * SIXEL_ROWS);
    transform_fine(block, new_w, new_h, |p| {
        FinePos::new((p.x * w / new_w).min(w - 1), (p.y * h / new_h).min(h - 1))
    })
}

/// A named transform, as listed in page documents.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtTransform {
    FlipH,
    FlipV,
    Rotate,
    Scale(f64),
    Resize { width: usize, height: usize },
}

impl ArtTransform {
    pub fn apply(self, block: &ArtBlock) -> TelepageResult<ArtBlock> {
        Ok(match self {
            ArtTransform::FlipH => flip_horizontal(block),
            ArtTransform::FlipV => flip_vertical(block),
            ArtTransform::Rotate => rotate_90(block),
            ArtTransform::Scale(f) => scale(block, f)?,
            ArtTransform::Resize { width, height } => resize_to(block, width, height),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/geometry.rs"]
mod tests;
