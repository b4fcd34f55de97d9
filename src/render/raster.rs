use crate::foundation::core::{CellPos, Color, COLS, ROWS, SIXEL_COLS, SIXEL_ROWS, SIXELS_PER_CELL};
use crate::foundation::error::{TelepageError, TelepageResult};
use crate::mosaic::cell::MosaicCell;
use crate::mosaic::overlay::MosaicOverlay;
use crate::mosaic::text::{ImportTextOverlay, ImportedTextCell};
use crate::page::cell::{Cell, FontTag};
use crate::page::grid::PageGrid;
use crate::render::frame::FrameRGBA;
use crate::render::glyph::GlyphRasterizer;

/// Unscaled page bitmap size; a cell is 14.4 × 20 px.
pub const BASE_WIDTH: u32 = 576;
pub const BASE_HEIGHT: u32 = 500;
pub const MAX_SCALE: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterOpts {
    /// Integer multiplier on the base size.
    pub scale: u32,
    /// Font for cells that do not name one.
    pub default_font: FontTag,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            scale: 1,
            default_font: FontTag::Bedstead,
        }
    }
}

impl RasterOpts {
    pub fn frame_size(&self) -> (u32, u32) {
        (BASE_WIDTH * self.scale, BASE_HEIGHT * self.scale)
    }

    pub fn cell_size(&self) -> (f64, f64) {
        let (w, h) = self.frame_size();
        (f64::from(w) / COLS as f64, f64::from(h) / ROWS as f64)
    }
}

/// The three per-cell layers a page is composed from.
#[derive(Clone, Copy, Debug)]
pub struct PageLayers<'a> {
    pub grid: &'a PageGrid,
    pub mosaics: &'a MosaicOverlay,
    pub text: &'a ImportTextOverlay,
}

/// The single layer that paints a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellLayer<'a> {
    Separator(Color),
    Mosaic(&'a MosaicCell),
    ImportedText(&'a ImportedTextCell),
    Template(&'a Cell),
    Empty,
}

impl<'a> PageLayers<'a> {
    /// Precedence: separator, mosaic, imported text, template text or background.
    pub fn layer_at(&self, pos: CellPos) -> CellLayer<'a> {
        let cell = self.grid.get(pos);
        if let Some(c) = cell.filter(|c| c.separator) {
            return CellLayer::Separator(c.fg);
        }
        if let Some(m) = self.mosaics.get(pos).filter(|m| m.sixels().any()) {
            return CellLayer::Mosaic(m);
        }
        if let Some(t) = self.text.get(pos) {
            return CellLayer::ImportedText(t);
        }
        match cell {
            Some(c) if !c.is_blank() || c.bg != Color::Black => CellLayer::Template(c),
            _ => CellLayer::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GlyphHalf {
    Whole,
    Top,
    Bottom,
}

/// Pixel box of a cell: origins floor, extents ceil.
#[derive(Clone, Copy, Debug)]
struct CellBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl CellBox {
    fn px(&self) -> (u32, u32, u32, u32) {
        (
            self.x.floor() as u32,
            self.y.floor() as u32,
            self.w.ceil() as u32,
            self.h.ceil() as u32,
        )
    }
}

/// Composite one page into a fresh bitmap.
pub fn rasterize(
    layers: &PageLayers<'_>,
    glyphs: &mut dyn GlyphRasterizer,
    opts: RasterOpts,
) -> TelepageResult<FrameRGBA> {
    if opts.scale == 0 || opts.scale > MAX_SCALE {
        return Err(TelepageError::render(format!(
            "scale must be in 1..={MAX_SCALE}, got {}",
            opts.scale
        )));
    }
    let (width, height) = opts.frame_size();
    let (cw, ch) = opts.cell_size();
    let mut frame = FrameRGBA::new(width, height, Color::Black.rgba());

    for row in 0..ROWS {
        for col in 0..COLS {
            let pos = CellPos::new(row, col);
            let cell_box = CellBox {
                x: col as f64 * cw,
                y: row as f64 * ch,
                w: cw,
                h: ch,
            };
            match layers.layer_at(pos) {
                CellLayer::Separator(color) => paint_separator(&mut frame, cell_box, color),
                CellLayer::Mosaic(m) => paint_mosaic(&mut frame, cell_box, m),
                CellLayer::ImportedText(t) => {
                    paint_background(&mut frame, cell_box, t.bg);
                    paint_glyph(&mut frame, glyphs, cell_box, t.ch, t.fg, opts.default_font, GlyphHalf::Whole);
                }
                CellLayer::Template(c) => {
                    paint_background(&mut frame, cell_box, c.bg);
                    if !c.is_blank() {
                        let half = if c.double_top {
                            GlyphHalf::Top
                        } else if c.double_bottom {
                            GlyphHalf::Bottom
                        } else {
                            GlyphHalf::Whole
                        };
                        let font = c.font.unwrap_or(opts.default_font);
                        paint_glyph(&mut frame, glyphs, cell_box, c.ch, c.fg, font, half);
                    }
                }
                CellLayer::Empty => {}
            }
        }
    }
    tracing::debug!(width, height, "page rasterized");
    Ok(frame)
}

fn paint_background(frame: &mut FrameRGBA, b: CellBox, bg: Color) {
    if bg != Color::Black {
        let (x, y, w, h) = b.px();
        frame.fill_rect(x, y, w, h, bg.rgba());
    }
}

fn paint_separator(frame: &mut FrameRGBA, b: CellBox, color: Color) {
    let rule = CellBox {
        y: b.y + b.h * 2.0 / 3.0,
        h: b.h / 3.0,
        ..b
    };
    let (x, y, w, h) = rule.px();
    frame.fill_rect(x, y, w, h, color.rgba());
}

fn paint_mosaic(frame: &mut FrameRGBA, b: CellBox, cell: &MosaicCell) {
    let half_w = b.w / SIXEL_COLS as f64;
    let third_h = b.h / SIXEL_ROWS as f64;
    let rgba = cell.color().rgba();
    for i in (0..SIXELS_PER_CELL).filter(|&i| cell.is_on(i)) {
        let part = CellBox {
            x: b.x + (i % SIXEL_COLS) as f64 * half_w,
            y: b.y + (i / SIXEL_COLS) as f64 * third_h,
            w: half_w,
            h: third_h,
        };
        let (x, y, w, h) = part.px();
        frame.fill_rect(x, y, w, h, rgba);
    }
}

/// Blit a glyph clipped to its cell. Double-height halves sample the mask at half vertical
/// rate, the bottom half starting one cell height into the doubled glyph.
fn paint_glyph(
    frame: &mut FrameRGBA,
    glyphs: &mut dyn GlyphRasterizer,
    b: CellBox,
    ch: char,
    fg: Color,
    font: FontTag,
    half: GlyphHalf,
) {
    let (x0, y0, w, h) = b.px();
    let Some(mask) = glyphs.rasterize(ch, font, w, h) else {
        tracing::debug!(?ch, ?font, "glyph unavailable");
        return;
    };
    let rgba = fg.rgba();
    for dy in 0..h {
        let my = match half {
            GlyphHalf::Whole => dy,
            GlyphHalf::Top => dy / 2,
            GlyphHalf::Bottom => (dy + h) / 2,
        };
        for dx in 0..w {
            let a = mask.alpha_at(dx, my);
            if a > 0 {
                frame.blend_pixel(x0 + dx, y0 + dy, rgba, a);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
