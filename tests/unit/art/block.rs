use super::*;

#[test]
fn pixel_map_pads_and_takes_first_lit_colour() {
    let art = ArtBlock::from_pixel_map(&["R.W", ".Y"]).unwrap();
    // 3 wide pads to 4 (2 cells), 2 tall pads to 3 (1 row).
    assert_eq!((art.width(), art.height()), (2, 1));
    let left = art.get(0, 0).unwrap();
    assert_eq!(left.sixels().to_bits_string(), "100100");
    assert_eq!(left.color(), Color::Red);
    let right = art.get(0, 1).unwrap();
    assert_eq!(right.sixels().to_bits_string(), "100000");
    assert_eq!(right.color(), Color::White);
}

#[test]
fn pixel_map_blank_cells_are_absent() {
    let art = ArtBlock::from_pixel_map(&["..GG", "..GG", "..GG"]).unwrap();
    assert!(art.get(0, 0).is_none());
    assert_eq!(art.get(0, 1).unwrap().sixels(), Sixels::FULL);
    assert_eq!(art.occupied().count(), 1);
}

#[test]
fn pixel_map_rejects_unknown_letters() {
    let err = ArtBlock::from_pixel_map(&["RX"]).unwrap_err();
    assert!(err.to_string().contains("unknown colour"));
}

#[test]
fn crop_finds_bounding_box() {
    let mut ov = MosaicOverlay::new();
    ov.set(CellPos::new(4, 6), Sixels::FULL, Color::Red);
    ov.set(CellPos::new(7, 9), Sixels::FULL, Color::Blue);
    let (origin, art) = ArtBlock::crop_overlay(&ov).unwrap();
    assert_eq!(origin, CellPos::new(4, 6));
    assert_eq!((art.width(), art.height()), (4, 4));
    assert_eq!(art.get(0, 0).unwrap().color(), Color::Red);
    assert_eq!(art.get(3, 3).unwrap().color(), Color::Blue);
    assert!(art.get(1, 1).is_none());
    assert!(ArtBlock::crop_overlay(&MosaicOverlay::new()).is_none());
}

#[test]
fn ragged_rows_pad_to_widest() {
    let c = MosaicCell::from_bits("111111", Color::Green);
    let art = ArtBlock::from_rows(vec![vec![c], vec![None, None, c]]);
    assert_eq!((art.width(), art.height()), (3, 2));
    assert_eq!((art.fine_width(), art.fine_height()), (6, 6));
    assert!(art.get(1, 2).is_some());
}

#[test]
fn serde_is_rows_of_cells() {
    let c = MosaicCell::from_bits("101010", Color::Cyan);
    let art = ArtBlock::from_rows(vec![vec![c, None]]);
    let json = serde_json::to_string(&art).unwrap();
    assert_eq!(json, r#"[[{"sixels":"101010","color":"cyan"},null]]"#);
    assert_eq!(serde_json::from_str::<ArtBlock>(&json).unwrap(), art);
}
