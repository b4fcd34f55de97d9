use std::collections::VecDeque;

use crate::foundation::core::{Color, FINE_HEIGHT, FINE_WIDTH, FinePos, SIXELS_PER_CELL, SixelPos};
use crate::mosaic::overlay::MosaicOverlay;

/// Flood fill from `seed` over 4-connected sub-cells that share its on/off state, flipping each
/// one. Newly lit sub-cells take `color`. The header and fastext rows are never crossed.
///
/// Returns the number of sub-cells changed.
pub fn flood_fill(overlay: &mut MosaicOverlay, seed: SixelPos, color: Color) -> usize {
    assert!(seed.index < SIXELS_PER_CELL, "sixel index {} out of range", seed.index);
    if !seed.cell.in_content() {
        return 0;
    }
    let target = overlay.is_on(seed);
    let mut visited = vec![false; FINE_WIDTH * FINE_HEIGHT];
    let mut queue = VecDeque::from([seed.to_fine()]);
    let mut changed = 0usize;

    while let Some(p) = queue.pop_front() {
        let slot = &mut visited[p.y * FINE_WIDTH + p.x];
        if *slot {
            continue;
        }
        *slot = true;

        let s = SixelPos::from_fine(p);
        if !s.cell.in_content() || overlay.is_on(s) != target {
            continue;
        }
        overlay.set_sixel(s, !target, color);
        changed += 1;

        if p.x > 0 {
            queue.push_back(FinePos::new(p.x - 1, p.y));
        }
        if p.x + 1 < FINE_WIDTH {
            queue.push_back(FinePos::new(p.x + 1, p.y));
        }
        if p.y > 0 {
            queue.push_back(FinePos::new(p.x, p.y - 1));
        }
        if p.y + 1 < FINE_HEIGHT {
            queue.push_back(FinePos::new(p.x, p.y + 1));
        }
    }

    tracing::debug!(changed, target, "flood fill");
    changed
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fill.rs"]
mod tests;
