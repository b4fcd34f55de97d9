use super::*;
use crate::foundation::core::{CONTENT_ROWS, Color};
use crate::mosaic::cell::MosaicCell;

fn sample() -> ArtBlock {
    ArtBlock::from_pixel_map(&["RR..GG", "R....G", "......", "..BB..", ".YYYY.", "W....W"]).unwrap()
}

/// Lit sub-cells and extents, ignoring colour. Rotations regroup sub-cells from differently
/// coloured source cells into one cell, and a cell keeps only one colour.
fn pattern(block: &ArtBlock) -> (usize, usize, usize, usize, Vec<(usize, usize, String)>) {
    let cells = block
        .occupied()
        .map(|(r, c, cell)| (r, c, cell.sixels().to_bits_string()))
        .collect();
    (block.width(), block.height(), block.fine_width(), block.fine_height(), cells)
}

fn bits(block: &ArtBlock, row: usize, col: usize) -> Option<String> {
    block.get(row, col).map(|c| c.sixels().to_bits_string())
}

#[test]
fn flip_horizontal_reverses_cells_and_swaps_pairs() {
    let art = ArtBlock::from_rows(vec![vec![
        MosaicCell::from_bits("101010", Color::Red),
        None,
    ]]);
    let flipped = flip_horizontal(&art);
    assert_eq!(bits(&flipped, 0, 0), None);
    assert_eq!(bits(&flipped, 0, 1).as_deref(), Some("010101"));
    assert_eq!(flipped.get(0, 1).unwrap().color(), Color::Red);
}

#[test]
fn flip_vertical_reverses_rows_and_swaps_thirds() {
    let art = ArtBlock::from_rows(vec![
        vec![MosaicCell::from_bits("110000", Color::Green)],
        vec![None],
    ]);
    let flipped = flip_vertical(&art);
    assert_eq!(bits(&flipped, 0, 0), None);
    assert_eq!(bits(&flipped, 1, 0).as_deref(), Some("000011"));
}

#[test]
fn flips_are_involutions() {
    let art = sample();
    assert_eq!(flip_horizontal(&flip_horizontal(&art)), art);
    assert_eq!(flip_vertical(&flip_vertical(&art)), art);
}

#[test]
fn rotate_swaps_fine_extent() {
    let art = ArtBlock::from_rows(vec![vec![MosaicCell::from_bits("100000", Color::White)]]);
    let r = rotate_90(&art);
    assert_eq!((r.fine_width(), r.fine_height()), (3, 2));
    assert_eq!((r.width(), r.height()), (2, 1));
    // Top-left moves to top-right.
    let lit: Vec<_> = r.occupied().map(|(row, col, c)| (row, col, c.sixels().to_bits_string())).collect();
    assert_eq!(lit, vec![(0, 1, "100000".to_string())]);
}

#[test]
fn four_rotations_restore_the_block() {
    let art = sample();
    let back = rotate_90(&rotate_90(&rotate_90(&rotate_90(&art))));
    assert_eq!(pattern(&back), pattern(&art));

    let mono = art.recolored(Color::Yellow);
    let back = rotate_90(&rotate_90(&rotate_90(&rotate_90(&mono))));
    assert_eq!(back, mono);

    let single = ArtBlock::from_rows(vec![vec![MosaicCell::from_bits("110100", Color::Cyan)]]);
    let back = rotate_90(&rotate_90(&rotate_90(&rotate_90(&single))));
    assert_eq!(back, single);
}

#[test]
fn scale_up_then_down_restores_dimensions() {
    let art = sample();
    let up = scale(&art, 2.0).unwrap();
    assert_eq!((up.width(), up.height()), (6, 4));
    let down = scale(&up, 0.5).unwrap();
    assert_eq!((down.width(), down.height()), (art.width(), art.height()));
    assert_eq!(down, art);
}

#[test]
fn scale_is_bounded() {
    let art = sample();
    let tiny = scale(&art, 0.01).unwrap();
    assert_eq!((tiny.fine_width(), tiny.fine_height()), (2, 3));
    let huge = scale(&art, 100.0).unwrap();
    assert_eq!((huge.width(), huge.height()), (40, CONTENT_ROWS));
}

#[test]
fn scale_rejects_bad_factors() {
    let art = sample();
    assert!(scale(&art, 0.0).is_err());
    assert!(scale(&art, -1.0).is_err());
    assert!(scale(&art, f64::NAN).is_err());
}

#[test]
fn resize_to_clamps_and_resamples() {
    let art = ArtBlock::from_rows(vec![vec![MosaicCell::from_bits("111111", Color::Magenta)]]);
    let big = resize_to(&art, 3, 2);
    assert_eq!((big.width(), big.height()), (3, 2));
    assert_eq!(big.occupied().count(), 6);
    assert!(big.occupied().all(|(_, _, c)| c.sixels().count() == 6 && c.color() == Color::Magenta));

    let clamped = resize_to(&art, 0, 99);
    assert_eq!((clamped.width(), clamped.height()), (1, CONTENT_ROWS));
}

#[test]
fn transform_list_applies_in_order() {
    let steps = [ArtTransform::FlipH, ArtTransform::Rotate, ArtTransform::FlipH, ArtTransform::Rotate];
    let run = |art: &ArtBlock| {
        steps
            .iter()
            .try_fold(art.clone(), |out, t| t.apply(&out))
            .unwrap()
    };

    let art = sample();
    assert_eq!(pattern(&run(&art)), pattern(&art));

    let mono = art.recolored(Color::Green);
    assert_eq!(run(&mono), mono);
}
