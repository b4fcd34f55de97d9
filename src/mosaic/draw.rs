//! Free-hand drawing primitives on the fine grid. Every primitive writes through the overlay
//! one sub-cell at a time and skips anything outside the drawable rows.

use crate::foundation::core::{Color, FinePos, SixelPos};
use crate::mosaic::overlay::MosaicOverlay;

fn plot(overlay: &mut MosaicOverlay, x: i64, y: i64, on: bool, color: Color) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    let pos = SixelPos::from_fine(FinePos::new(x as usize, y as usize));
    if !pos.cell.in_content() {
        return false;
    }
    overlay.set_sixel(pos, on, color);
    true
}

/// Set (or clear) one sub-cell when it lies in rows 1..=23.
pub fn draw_sixel(overlay: &mut MosaicOverlay, pos: SixelPos, on: bool, color: Color) -> bool {
    if !pos.cell.in_content() {
        return false;
    }
    overlay.set_sixel(pos, on, color);
    true
}

/// Bresenham line between two fine positions, endpoints included. Returns sub-cells written.
///
/// The same sub-cells are lit whichever endpoint comes first.
pub fn draw_line(
    overlay: &mut MosaicOverlay,
    from: FinePos,
    to: FinePos,
    on: bool,
    color: Color,
) -> usize {
    let (from, to) = if (to.x, to.y) < (from.x, from.y) {
        (to, from)
    } else {
        (from, to)
    };
    let (mut x0, mut y0) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut written = 0;
    loop {
        if plot(overlay, x0, y0, on, color) {
            written += 1;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    written
}

/// Rectangle outline spanning two opposite fine corners.
pub fn draw_rect(
    overlay: &mut MosaicOverlay,
    a: FinePos,
    b: FinePos,
    on: bool,
    color: Color,
) -> usize {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    let mut written = 0;
    for x in x0..=x1 {
        written += usize::from(plot(overlay, x as i64, y0 as i64, on, color));
        if y1 != y0 {
            written += usize::from(plot(overlay, x as i64, y1 as i64, on, color));
        }
    }
    for y in (y0 + 1)..y1 {
        written += usize::from(plot(overlay, x0 as i64, y as i64, on, color));
        if x1 != x0 {
            written += usize::from(plot(overlay, x1 as i64, y as i64, on, color));
        }
    }
    written
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/draw.rs"]
mod tests;
