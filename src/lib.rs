//! Telepage builds, edits and rasterizes teletext pages.
//!
//! A page is a fixed 40×25 character grid. Three layers stack on top of each other:
//!
//! 1. **Page grid**: characters and colours produced from a template ([`TemplateCatalogue`],
//!    [`build_page`]) or left blank after an import.
//! 2. **Import text overlay**: literal characters carried over from an imported page.
//! 3. **Mosaic overlay**: 2×3 block-graphics cells, edited with the drawing tools, the flood fill
//!    and the placed-item registry.
//!
//! Pages are imported from (and exported to) the editor's URL-fragment identifier
//! ([`decode_page`], [`encode_identifier`]) and rasterized into [`FrameRGBA`] bitmaps, optionally
//! through the CRT post-processing chain ([`CrtEffects`]).
//!
//! [`PageSession`] ties the layers together. It tracks the active source, marks itself dirty on
//! every mutation and coalesces renders. [`PageDocument`] describes a whole page as JSON for
//! batch use and the `telepage` binary.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same inputs (and noise seed) produce byte-identical frames.
//! - **Fonts are a collaborator**: glyphs come through [`GlyphRasterizer`]; tests use stubs.
#![forbid(unsafe_code)]

mod art;
mod decode;
mod foundation;
mod items;
mod mosaic;
mod page;
mod render;
mod session;
mod transform;

pub use art::block::ArtBlock;
pub use art::library::{Clipart, ClipartLibrary};
pub use art::text::text_to_art;
pub use decode::bitstream::{
    ALPHABET, CodeGrid, FULL_PAGE_SYMBOLS, decode_codes, encode_codes, is_symbol, symbol_value,
};
pub use decode::interpret::{
    CodeEffect, Extraction, ImportMode, RowState, extract, extract_rendered, interpret,
};
pub use decode::page::{DEFAULT_METADATA, DecodedPage, EDITOR_URL, decode_page, encode_identifier};
pub use decode::payload::{LEGACY_MIN_LEN, Payload, locate_payload};
pub use foundation::core::{
    COLS, CONTENT_ROWS, CellPos, Color, FINE_HEIGHT, FINE_WIDTH, FIRST_CONTENT_ROW, FinePos,
    LAST_CONTENT_ROW, MAX_ART_FINE_HEIGHT, ROWS, SIXEL_COLS, SIXEL_ROWS, SIXELS_PER_CELL, SixelPos,
};
pub use foundation::error::{ImportError, TelepageError, TelepageResult};
pub use foundation::math::digest_u64;
pub use items::registry::{Corner, ItemId, ItemRegistry, PlacedContent, PlacedItem};
pub use mosaic::cell::{MosaicCell, Sixels};
pub use mosaic::draw::{draw_line, draw_rect, draw_sixel};
pub use mosaic::layers::Overlays;
pub use mosaic::overlay::MosaicOverlay;
pub use mosaic::text::{ImportTextOverlay, ImportedTextCell};
pub use page::build::{PageFields, build_page};
pub use page::cell::{Cell, FontTag};
pub use page::clock::{format_date_time, now_date_time};
pub use page::grid::{PageGrid, TextStyle};
pub use page::template::{BodyStyle, Listing, Section, SportsResult, Template, TemplateCatalogue};
pub use page::wrap::{center_text, wrap_lines};
pub use render::frame::FrameRGBA;
pub use render::fx::{CrtEffects, CrtPreset, CrtSettings, PostProcess};
pub use render::glyph::{
    ALPHA_THRESHOLD, COVERAGE_THRESHOLD, GlyphMask, GlyphRasterizer, GlyphSampler, SixelSampler,
    SvgGlyphRasterizer, sample_mask,
};
pub use render::raster::{
    BASE_HEIGHT, BASE_WIDTH, CellLayer, MAX_SCALE, PageLayers, RasterOpts, rasterize,
};
pub use session::document::{ArtPlacement, ArtSource, EffectsConfig, PageDocument, TextPlacement};
pub use session::page_session::{
    ImportSummary, PageSession, PageSessionOpts, PageSource, SessionStats,
};
pub use transform::fill::flood_fill;
pub use transform::geometry::{
    ArtTransform, flip_horizontal, flip_vertical, resize_to, rotate_90, scale,
};
