use super::*;
use crate::decode::page::encode_identifier;
use crate::foundation::error::ImportError;
use crate::items::registry::PlacedContent;
use crate::mosaic::cell::Sixels;
use crate::page::cell::FontTag;
use crate::render::glyph::GlyphMask;
use std::sync::Arc;

struct TopHalf;

impl GlyphRasterizer for TopHalf {
    fn rasterize(&mut self, _ch: char, _font: FontTag, width: u32, height: u32) -> Option<Arc<GlyphMask>> {
        let mut mask = GlyphMask::new(width, height);
        for y in 0..height / 2 {
            for x in 0..width {
                mask.alpha[(y * width + x) as usize] = 255;
            }
        }
        Some(Arc::new(mask))
    }
}

fn session() -> PageSession {
    PageSession::with_builtin_templates(Box::new(TopHalf), PageSessionOpts::default()).unwrap()
}

/// Row 5: yellow graphics, two full blocks, a blast-through 'A', then red text 'B'.
fn sample_identifier() -> String {
    let mut codes = CodeGrid::new();
    for (col, code) in [19u8, 127, 127, 65, 1, 66].into_iter().enumerate() {
        codes.set(CellPos::new(5, col), code);
    }
    encode_identifier(&codes, None)
}

#[test]
fn template_load_builds_grid_and_marks_dirty() {
    let mut s = session();
    s.load_template("news", PageFields::default()).unwrap();
    assert!(s.grid().row_text(0).contains("CEEFAX"));
    assert!(matches!(s.source(), PageSource::Template { id, .. } if id == "news"));
    assert!(s.is_dirty());
}

#[test]
fn unknown_template_is_a_validation_error() {
    let mut s = session();
    let err = s.load_template("nope", PageFields::default()).unwrap_err();
    assert!(matches!(err, TelepageError::Validation(_)));
    assert_eq!(s.source(), &PageSource::Blank);
}

#[test]
fn import_modes_split_layers() {
    let id = sample_identifier();

    let mut s = session();
    let summary = s.import(&id, ImportMode::Mosaics).unwrap();
    assert_eq!((summary.mosaic_cells, summary.text_cells), (2, 0));
    assert_eq!(summary.metadata.as_deref(), Some("0"));

    let summary = s.import(&id, ImportMode::Full).unwrap();
    assert_eq!((summary.mosaic_cells, summary.text_cells), (2, 2));
    let a = s.overlays().text.get(CellPos::new(5, 3)).unwrap();
    assert_eq!((a.ch, a.fg), ('A', Color::Yellow));
    assert_eq!(s.overlays().text.get(CellPos::new(5, 5)).unwrap().fg, Color::Red);

    let summary = s.import(&id, ImportMode::Rendered).unwrap();
    assert_eq!((summary.mosaic_cells, summary.text_cells), (4, 0));
    let a = s.overlays().mosaics.get(CellPos::new(5, 3)).unwrap();
    assert_eq!(a.sixels(), Sixels([true, true, true, true, false, false]));
    assert_eq!(a.color(), Color::Yellow);
}

#[test]
fn import_replaces_template_and_items() {
    let mut s = session();
    s.load_template("news", PageFields::default()).unwrap();
    s.insert_text("HELLO", CellPos::new(10, 0), 5, 1);
    s.import(&sample_identifier(), ImportMode::Mosaics).unwrap();
    assert_eq!(s.grid().row_text(0).trim(), "");
    assert!(s.items().is_empty());
    assert!(matches!(s.source(), PageSource::Import { mode: ImportMode::Mosaics, .. }));
}

#[test]
fn failed_import_leaves_state_untouched() {
    let mut s = session();
    s.load_template("news", PageFields::default()).unwrap();
    s.set_sixel(SixelPos::new(3, 3, 0), true);
    s.render().unwrap();
    let before = s.overlays().clone();

    let err = s.import("https://example.com/no-fragment", ImportMode::Full).unwrap_err();
    assert!(matches!(err, TelepageError::Import(ImportError::MissingFragment)));
    assert_eq!(s.overlays(), &before);
    assert!(s.grid().row_text(0).contains("CEEFAX"));
    assert!(!s.is_dirty());
}

#[test]
fn drawing_uses_the_active_color_and_respects_content_rows() {
    let mut s = session();
    s.set_color(Color::Magenta);
    assert_eq!(s.toggle_sixel(SixelPos::new(0, 0, 0)), None);
    assert_eq!(s.toggle_sixel(SixelPos::new(2, 2, 5)), Some(true));
    assert_eq!(s.overlays().mosaics.get(CellPos::new(2, 2)).unwrap().color(), Color::Magenta);
    assert_eq!(s.toggle_sixel(SixelPos::new(2, 2, 5)), Some(false));
    assert!(s.overlays().mosaics.get(CellPos::new(2, 2)).is_none());

    let n = s.draw_line(FinePos::new(0, 6), FinePos::new(9, 6), true);
    assert_eq!(n, 10);
    assert!(s.erase_cell(CellPos::new(2, 0)));
    assert!(!s.erase_cell(CellPos::new(2, 0)));
}

#[test]
fn fill_counts_sub_cells() {
    let mut s = session();
    let n = s.flood_fill(SixelPos::new(1, 0, 0));
    assert_eq!(n, 40 * 23 * 6);
    assert!(s.overlays().mosaics.get(CellPos::new(23, 39)).is_some());
    assert_eq!(s.flood_fill(SixelPos::new(0, 0, 0)), 0);
}

#[test]
fn mutations_coalesce_into_one_render() {
    let mut s = session();
    s.render().unwrap();
    assert!(s.render_if_dirty().unwrap().is_none());

    for col in 0..5 {
        s.set_sixel(SixelPos::new(4, col, 0), true);
    }
    assert!(s.render_if_dirty().unwrap().is_some());
    assert!(s.render_if_dirty().unwrap().is_none());

    let stats = s.stats();
    assert_eq!(stats.renders, 2);
    assert_eq!(stats.mutations, 5);
    assert_eq!(stats.coalesced, 4);
}

#[test]
fn no_op_edits_do_not_dirty() {
    let mut s = session();
    let id = s.insert_text("GONE", CellPos::new(3, 3), 4, 1);
    assert!(s.delete_item(id));
    s.render().unwrap();
    assert!(!s.set_sixel(SixelPos::new(0, 0, 0), true));
    assert!(!s.move_item(id, CellPos::new(5, 5)));
    assert!(!s.delete_item(id));
    assert!(!s.is_dirty());
}

#[test]
fn text_art_is_placed_as_mosaic_item() {
    let mut s = session();
    s.set_color(Color::Green);
    let id = s.insert_text_art("AB", CellPos::new(6, 6), 4, 1).unwrap();
    let item = s.items().get(id).unwrap();
    assert!(matches!(item.content(), PlacedContent::Mosaic { .. }));
    let cell = s.overlays().mosaics.get(CellPos::new(6, 7)).unwrap();
    assert_eq!(cell.color(), Color::Green);
    assert_eq!(cell.sixels(), Sixels([true, true, true, true, false, false]));
    assert!(s.insert_text_art("   ", CellPos::new(6, 6), 4, 1).is_none());
}

#[test]
fn item_transform_and_delete_route_through_session() {
    let mut s = session();
    let art = ArtBlock::from_pixel_map(&["RR..", "....", "...."]).unwrap();
    let id = s.insert_art(&art, CellPos::new(8, 8));
    assert!(s.transform_item(id, ArtTransform::FlipH).unwrap());
    assert!(s.overlays().mosaics.get(CellPos::new(8, 8)).is_none());
    assert!(s.overlays().mosaics.get(CellPos::new(8, 9)).is_some());
    assert!(s.delete_item(id));
    assert_eq!(s.overlays().mosaics.count(), 0);
    assert!(s.hit_test(CellPos::new(8, 9)).is_none());
}

#[test]
fn effects_are_applied_after_raster() {
    let mut plain = session();
    let clean = plain.render().unwrap().digest();

    let mut crt = PageSession::with_builtin_templates(
        Box::new(TopHalf),
        PageSessionOpts {
            effects: Some(CrtSettings::preset(crate::render::fx::CrtPreset::Authentic)),
            ..PageSessionOpts::default()
        },
    )
    .unwrap();
    let frame = crt.render().unwrap();
    assert_eq!((frame.width, frame.height), (576, 500));
    assert_ne!(frame.digest(), clean);
}
