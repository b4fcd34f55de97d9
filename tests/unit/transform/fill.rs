use super::*;
use crate::art::block::ArtBlock;
use crate::foundation::core::{CONTENT_ROWS, CellPos, COLS};
use crate::mosaic::cell::Sixels;
use crate::mosaic::draw::draw_rect;

#[test]
fn fill_on_empty_page_covers_content_rows_only() {
    let mut overlay = MosaicOverlay::new();
    let n = flood_fill(&mut overlay, SixelPos::new(10, 10, 0), Color::Green);
    assert_eq!(n, COLS * CONTENT_ROWS * SIXELS_PER_CELL);
    assert!(overlay.get(CellPos::new(0, 5)).is_none());
    assert!(overlay.get(CellPos::new(24, 5)).is_none());
    assert_eq!(overlay.get(CellPos::new(1, 0)).unwrap().color(), Color::Green);
}

#[test]
fn fill_is_bounded_by_outline() {
    let mut overlay = MosaicOverlay::new();
    // Fine rectangle x 10..=19, y 6..=14; interior is 8 by 7.
    draw_rect(&mut overlay, FinePos::new(10, 6), FinePos::new(19, 14), true, Color::Red);
    let inside = SixelPos::from_fine(FinePos::new(12, 9));
    let n = flood_fill(&mut overlay, inside, Color::Yellow);
    assert_eq!(n, 8 * 7);
    assert!(overlay.is_on_fine(FinePos::new(15, 10)));
    assert!(!overlay.is_on_fine(FinePos::new(25, 10)));
}

#[test]
fn fill_on_lit_region_turns_it_off() {
    let mut overlay = MosaicOverlay::new();
    overlay.set(CellPos::new(5, 5), Sixels::FULL, Color::White);
    overlay.set(CellPos::new(5, 6), Sixels::FULL, Color::White);
    let n = flood_fill(&mut overlay, SixelPos::new(5, 6, 3), Color::Red);
    assert_eq!(n, 12);
    assert_eq!(overlay.count(), 0);
}

#[test]
fn fill_from_header_row_is_a_noop() {
    let mut overlay = MosaicOverlay::new();
    assert_eq!(flood_fill(&mut overlay, SixelPos::new(0, 3, 2), Color::Red), 0);
    assert_eq!(overlay.count(), 0);
}

#[test]
fn filled_region_crops_to_content_area() {
    let mut overlay = MosaicOverlay::new();
    flood_fill(&mut overlay, SixelPos::new(1, 0, 0), Color::Blue);
    let (origin, block) = ArtBlock::crop_overlay(&overlay).unwrap();
    assert_eq!(origin, CellPos::new(1, 0));
    assert_eq!((block.width(), block.height()), (COLS, CONTENT_ROWS));
}
