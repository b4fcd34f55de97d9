use super::*;

#[test]
fn sixel_to_fine_matches_layout() {
    assert_eq!(SixelPos::new(0, 0, 0).to_fine(), FinePos::new(0, 0));
    assert_eq!(SixelPos::new(0, 0, 1).to_fine(), FinePos::new(1, 0));
    assert_eq!(SixelPos::new(0, 0, 5).to_fine(), FinePos::new(1, 2));
    assert_eq!(SixelPos::new(2, 3, 4).to_fine(), FinePos::new(6, 8));
}

#[test]
fn fine_mapping_roundtrips_over_whole_page() {
    for y in 0..FINE_HEIGHT {
        for x in 0..FINE_WIDTH {
            let p = FinePos::new(x, y);
            let s = SixelPos::from_fine(p);
            assert!(s.cell.in_page());
            assert!(s.index < SIXELS_PER_CELL);
            assert_eq!(s.to_fine(), p);
        }
    }
}

#[test]
fn content_band_excludes_header_and_nav_rows() {
    assert!(!CellPos::new(0, 5).in_content());
    assert!(CellPos::new(1, 0).in_content());
    assert!(CellPos::new(23, 39).in_content());
    assert!(!CellPos::new(24, 0).in_content());
    assert!(!CellPos::new(5, 40).in_content());
}

#[test]
fn palette_index_masks_low_bits() {
    assert_eq!(Color::from_index(3), Color::Yellow);
    assert_eq!(Color::from_index(19), Color::Yellow);
    assert_eq!(Color::White.index(), 7);
    assert_eq!(
        serde_json::to_string(&Color::Magenta).unwrap(),
        "\"magenta\""
    );
}
