use crate::art::block::ArtBlock;
use crate::art::text::text_to_art;
use crate::decode::bitstream::CodeGrid;
use crate::decode::interpret::{ImportMode, extract, extract_rendered};
use crate::decode::page::decode_page;
use crate::foundation::core::{CellPos, Color, FinePos, SixelPos};
use crate::foundation::error::{TelepageError, TelepageResult};
use crate::items::registry::{Corner, ItemId, ItemRegistry, PlacedItem};
use crate::mosaic::draw;
use crate::mosaic::layers::Overlays;
use crate::page::build::{PageFields, build_page};
use crate::page::grid::PageGrid;
use crate::page::template::TemplateCatalogue;
use crate::render::frame::FrameRGBA;
use crate::render::fx::{CrtEffects, CrtSettings, PostProcess};
use crate::render::glyph::{GlyphRasterizer, SixelSampler};
use crate::render::raster::{PageLayers, RasterOpts, rasterize};
use crate::transform::fill::flood_fill;
use crate::transform::geometry::ArtTransform;

/// Options controlling how a `PageSession` rasterizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageSessionOpts {
    pub raster: RasterOpts,
    /// Post-processing chain; `None` leaves the raster as-is.
    pub effects: Option<CrtSettings>,
}

/// Where the page grid content currently comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PageSource {
    #[default]
    Blank,
    Template { id: String, fields: PageFields },
    Import { metadata: Option<String>, codes: CodeGrid, mode: ImportMode },
}

/// Mutation and render counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// State mutations recorded since the session was created.
    pub mutations: u64,
    /// Rasterize passes actually run.
    pub renders: u64,
    /// Mutations folded into a later mutation's render instead of getting their own.
    pub coalesced: u64,
}

/// What an import produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub metadata: Option<String>,
    pub mode: ImportMode,
    pub mosaic_cells: usize,
    pub text_cells: usize,
}

/// One editable page: template grid, both overlays, placed items and the glyph collaborators.
/// Every mutation goes through here and marks the page dirty; rendering is deferred until
/// [`PageSession::render_if_dirty`] or [`PageSession::render`].
pub struct PageSession {
    catalogue: TemplateCatalogue,
    source: PageSource,
    grid: PageGrid,
    overlays: Overlays,
    items: ItemRegistry,
    sampler: SixelSampler,
    opts: PageSessionOpts,
    color: Color,
    dirty: bool,
    pending: u64,
    stats: SessionStats,
    frame: Option<FrameRGBA>,
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("source", &self.source)
            .field("items", &self.items.len())
            .field("dirty", &self.dirty)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl PageSession {
    pub fn new(
        catalogue: TemplateCatalogue,
        rasterizer: Box<dyn GlyphRasterizer>,
        opts: PageSessionOpts,
    ) -> Self {
        Self {
            catalogue,
            source: PageSource::Blank,
            grid: PageGrid::new(),
            overlays: Overlays::new(),
            items: ItemRegistry::new(),
            sampler: SixelSampler::new(rasterizer),
            opts,
            color: Color::White,
            dirty: true,
            pending: 0,
            stats: SessionStats::default(),
            frame: None,
        }
    }

    /// A session over the built-in template catalogue.
    pub fn with_builtin_templates(
        rasterizer: Box<dyn GlyphRasterizer>,
        opts: PageSessionOpts,
    ) -> TelepageResult<Self> {
        Ok(Self::new(TemplateCatalogue::builtin()?, rasterizer, opts))
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.pending += 1;
        self.stats.mutations += 1;
    }

    fn touch_if(&mut self, changed: bool) -> bool {
        if changed {
            self.touch();
        }
        changed
    }

    pub fn catalogue(&self) -> &TemplateCatalogue {
        &self.catalogue
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    pub fn grid(&self) -> &PageGrid {
        &self.grid
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn opts(&self) -> &PageSessionOpts {
        &self.opts
    }

    pub fn set_effects(&mut self, effects: Option<CrtSettings>) {
        self.opts.effects = effects;
        self.touch();
    }

    /// The last rendered frame, if any.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Cell size in whole pixels at the current scale; what glyph sampling uses.
    fn sample_cell_size(&self) -> (u32, u32) {
        let (w, h) = self.opts.raster.cell_size();
        (w.ceil() as u32, h.ceil() as u32)
    }

    // ---- page source ----

    /// Rebuild the page grid from a catalogue template. Overlays and placed items stay.
    #[tracing::instrument(skip(self, fields))]
    pub fn load_template(&mut self, id: &str, fields: PageFields) -> TelepageResult<()> {
        let template = self
            .catalogue
            .get(id)
            .ok_or_else(|| TelepageError::validation(format!("unknown template '{id}'")))?;
        self.grid.clear();
        build_page(&mut self.grid, template, &fields);
        self.source = PageSource::Template {
            id: id.to_string(),
            fields,
        };
        self.touch();
        Ok(())
    }

    /// Decode an identifier and replace the page with its content. On any error the session is
    /// left exactly as it was.
    #[tracing::instrument(skip(self, source), fields(len = source.len()))]
    pub fn import(&mut self, source: &str, mode: ImportMode) -> TelepageResult<ImportSummary> {
        let page = decode_page(source)?;
        let overlays = match mode {
            ImportMode::Mosaics | ImportMode::Full => {
                let ex = extract(&page.codes, mode == ImportMode::Full);
                Overlays {
                    mosaics: ex.mosaics,
                    text: ex.text,
                }
            }
            ImportMode::Rendered => {
                let (cw, ch) = self.sample_cell_size();
                Overlays {
                    mosaics: extract_rendered(&page.codes, &mut self.sampler, cw, ch),
                    ..Overlays::new()
                }
            }
        };
        let summary = ImportSummary {
            metadata: page.metadata.clone(),
            mode,
            mosaic_cells: overlays.mosaics.count(),
            text_cells: overlays.text.count(),
        };
        tracing::info!(mosaics = summary.mosaic_cells, text = summary.text_cells, "page imported");

        self.grid.clear();
        self.overlays = overlays;
        self.items.clear();
        self.source = PageSource::Import {
            metadata: page.metadata,
            codes: page.codes,
            mode,
        };
        self.touch();
        Ok(summary)
    }

    // ---- drawing ----

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Flip one sub-cell. Returns its new state, or `None` outside the drawable rows.
    pub fn toggle_sixel(&mut self, pos: SixelPos) -> Option<bool> {
        if !pos.cell.in_content() {
            return None;
        }
        let on = self.overlays.mosaics.toggle_sixel(pos, self.color);
        self.touch();
        Some(on)
    }

    pub fn set_sixel(&mut self, pos: SixelPos, on: bool) -> bool {
        let changed = draw::draw_sixel(&mut self.overlays.mosaics, pos, on, self.color);
        self.touch_if(changed)
    }

    pub fn draw_line(&mut self, from: FinePos, to: FinePos, on: bool) -> usize {
        let n = draw::draw_line(&mut self.overlays.mosaics, from, to, on, self.color);
        self.touch_if(n > 0);
        n
    }

    pub fn draw_rect(&mut self, a: FinePos, b: FinePos, on: bool) -> usize {
        let n = draw::draw_rect(&mut self.overlays.mosaics, a, b, on, self.color);
        self.touch_if(n > 0);
        n
    }

    #[tracing::instrument(skip(self))]
    pub fn flood_fill(&mut self, seed: SixelPos) -> usize {
        let n = flood_fill(&mut self.overlays.mosaics, seed, self.color);
        self.touch_if(n > 0);
        n
    }

    /// Clear one mosaic cell in the drawable rows.
    pub fn erase_cell(&mut self, pos: CellPos) -> bool {
        if !pos.in_content() || self.overlays.mosaics.get(pos).is_none() {
            return false;
        }
        self.overlays.mosaics.clear_cell(pos);
        self.touch();
        true
    }

    /// Remove all mosaics and imported text. Placed items are forgotten with them.
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
        self.items.clear();
        self.touch();
    }

    // ---- placed items ----

    pub fn insert_art(&mut self, art: &ArtBlock, pos: CellPos) -> ItemId {
        let id = self.items.insert_art(&mut self.overlays, art, pos);
        self.touch();
        id
    }

    pub fn insert_text(&mut self, text: &str, pos: CellPos, width: usize, height: usize) -> ItemId {
        let id = self
            .items
            .insert_text(&mut self.overlays, text, pos, width, height, self.color);
        self.touch();
        id
    }

    /// Sample `text` into block graphics and place it as art. `None` when nothing is lit.
    pub fn insert_text_art(&mut self, text: &str, pos: CellPos, width: usize, height: usize) -> Option<ItemId> {
        let (cw, ch) = self.sample_cell_size();
        let art = text_to_art(text, width, height, self.color, &mut self.sampler, cw, ch)?;
        Some(self.insert_art(&art, pos))
    }

    pub fn hit_test(&self, pos: CellPos) -> Option<ItemId> {
        self.items.hit_test(pos)
    }

    pub fn select(&mut self, id: ItemId) -> bool {
        self.items.select(id)
    }

    pub fn deselect(&mut self) {
        self.items.deselect();
    }

    pub fn selected(&self) -> Option<&PlacedItem> {
        self.items.selected()
    }

    pub fn move_item(&mut self, id: ItemId, pos: CellPos) -> bool {
        let changed = self.items.move_item(&mut self.overlays, id, pos);
        self.touch_if(changed)
    }

    pub fn resize_item(&mut self, id: ItemId, width: usize, height: usize) -> bool {
        let changed = self.items.resize_item(&mut self.overlays, id, width, height);
        self.touch_if(changed)
    }

    pub fn resize_from_corner(&mut self, id: ItemId, corner: Corner, cell: CellPos) -> bool {
        let changed = self
            .items
            .resize_from_corner(&mut self.overlays, id, corner, cell);
        self.touch_if(changed)
    }

    pub fn set_item_text(&mut self, id: ItemId, text: &str) -> bool {
        let changed = self.items.set_item_text(&mut self.overlays, id, text);
        self.touch_if(changed)
    }

    pub fn transform_item(&mut self, id: ItemId, transform: ArtTransform) -> TelepageResult<bool> {
        let changed = self.items.transform_item(&mut self.overlays, id, transform)?;
        Ok(self.touch_if(changed))
    }

    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let changed = self.items.delete(&mut self.overlays, id);
        self.touch_if(changed)
    }

    // ---- rendering ----

    /// Rasterize (and post-process) the current state unconditionally.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self) -> TelepageResult<&FrameRGBA> {
        let layers = PageLayers {
            grid: &self.grid,
            mosaics: &self.overlays.mosaics,
            text: &self.overlays.text,
        };
        let mut frame = rasterize(&layers, self.sampler.rasterizer_mut(), self.opts.raster)?;
        if let Some(settings) = self.opts.effects {
            CrtEffects::new(settings).apply(&mut frame)?;
        }
        self.stats.renders += 1;
        self.stats.coalesced += self.pending.saturating_sub(1);
        self.pending = 0;
        self.dirty = false;
        let frame: &FrameRGBA = self.frame.insert(frame);
        Ok(frame)
    }

    /// One render for everything mutated since the last one; `None` when nothing changed.
    pub fn render_if_dirty(&mut self) -> TelepageResult<Option<&FrameRGBA>> {
        if !self.dirty {
            return Ok(None);
        }
        self.render().map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
