//! Glyph collaborators: rasterizing a character into a coverage mask, and sampling a mask into
//! six sub-cell flags.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::{SIXEL_COLS, SIXEL_ROWS, SIXELS_PER_CELL};
use crate::mosaic::cell::Sixels;
use crate::mosaic::text::is_blank_char;
use crate::page::cell::FontTag;

/// 8-bit coverage for one rendered character, `width × height`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl GlyphMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x < self.width && y < self.height {
            self.alpha[y as usize * self.width as usize + x as usize]
        } else {
            0
        }
    }
}

/// Renders one character with its top edge at y = 0 and a font size equal to `height`.
pub trait GlyphRasterizer {
    /// `None` when nothing can be drawn (no usable font, or an unrenderable character).
    fn rasterize(&mut self, ch: char, font: FontTag, width: u32, height: u32)
        -> Option<Arc<GlyphMask>>;
}

/// Turns a character into the sub-cell pattern it would occupy in a `width × height` cell.
pub trait GlyphSampler {
    fn sample(&mut self, ch: char, width: u32, height: u32) -> Sixels;
}

/// A region counts as lit when more than this share of its pixels pass [`ALPHA_THRESHOLD`].
pub const COVERAGE_THRESHOLD: f64 = 0.15;
pub const ALPHA_THRESHOLD: u8 = 30;

/// Sample a mask over a 2×3 split. Regions are `ceil(w/2) × ceil(h/3)` from the top-left and
/// clipped to the mask, so the last column or row may be narrower.
pub fn sample_mask(mask: &GlyphMask) -> Sixels {
    let half_w = mask.width.div_ceil(SIXEL_COLS as u32);
    let third_h = mask.height.div_ceil(SIXEL_ROWS as u32);
    let mut sixels = Sixels::EMPTY;
    for si in 0..SIXELS_PER_CELL {
        let x0 = (si % SIXEL_COLS) as u32 * half_w;
        let y0 = (si / SIXEL_COLS) as u32 * third_h;
        let x1 = (x0 + half_w).min(mask.width);
        let y1 = (y0 + third_h).min(mask.height);
        let total = u64::from(x1.saturating_sub(x0)) * u64::from(y1.saturating_sub(y0));
        if total == 0 {
            continue;
        }
        let mut lit = 0u64;
        for y in y0..y1 {
            for x in x0..x1 {
                lit += u64::from(mask.alpha_at(x, y) > ALPHA_THRESHOLD);
            }
        }
        sixels.set(si, lit as f64 / total as f64 > COVERAGE_THRESHOLD);
    }
    sixels
}

/// The default sampler: draws through a [`GlyphRasterizer`] in the base font and caches the
/// result per `(char, width, height)`.
pub struct SixelSampler {
    rasterizer: Box<dyn GlyphRasterizer>,
    cache: HashMap<(char, u32, u32), Sixels>,
}

impl SixelSampler {
    pub fn new(rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        Self {
            rasterizer,
            cache: HashMap::new(),
        }
    }

    pub fn rasterizer_mut(&mut self) -> &mut dyn GlyphRasterizer {
        self.rasterizer.as_mut()
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for SixelSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SixelSampler")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl GlyphSampler for SixelSampler {
    fn sample(&mut self, ch: char, width: u32, height: u32) -> Sixels {
        if is_blank_char(ch) || width == 0 || height == 0 {
            return Sixels::EMPTY;
        }
        if let Some(&hit) = self.cache.get(&(ch, width, height)) {
            return hit;
        }
        let sixels = match self.rasterizer.rasterize(ch, FontTag::Bedstead, width, height) {
            Some(mask) => sample_mask(&mask),
            None => {
                tracing::warn!(?ch, "no glyph to sample; treating as empty");
                Sixels::EMPTY
            }
        };
        self.cache.insert((ch, width, height), sixels);
        sixels
    }
}

type MaskKey = (char, FontTag, u32, u32);

/// Renders characters through `usvg`/`resvg` using the system font database plus any font
/// files loaded explicitly.
pub struct SvgGlyphRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    cache: HashMap<MaskKey, Option<Arc<GlyphMask>>>,
}

impl SvgGlyphRasterizer {
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fontdb(db)
    }

    pub fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        tracing::debug!(faces = db.len(), "glyph font database ready");
        Self {
            fontdb: Arc::new(db),
            cache: HashMap::new(),
        }
    }

    /// Load every `.ttf`, `.otf` and `.ttc` file directly inside `dir`. Returns faces added.
    pub fn load_fonts_dir(&mut self, dir: &Path) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return 0;
        };
        let db = Arc::make_mut(&mut self.fontdb);
        let before = db.len();
        for entry in rd.flatten() {
            let path = entry.path();
            let ext = path
                .extension()
                .and_then(|s| s.to_str())
                .map(str::to_ascii_lowercase);
            if matches!(ext.as_deref(), Some("ttf" | "otf" | "ttc")) {
                let _ = db.load_font_file(&path);
            }
        }
        self.cache.clear();
        db.len() - before
    }

    fn render(&self, ch: char, font: FontTag, width: u32, height: u32) -> Option<GlyphMask> {
        let svg = glyph_svg(ch, font, width, height);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: font_resolver(),
            ..Default::default()
        };
        let tree = match usvg::Tree::from_data(svg.as_bytes(), &opts) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(?ch, error = %e, "glyph svg rejected");
                return None;
            }
        };
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;
        resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        let mut mask = GlyphMask::new(width, height);
        for (dst, px) in mask.alpha.iter_mut().zip(pixmap.data().chunks_exact(4)) {
            *dst = px[3];
        }
        Some(mask)
    }
}

impl GlyphRasterizer for SvgGlyphRasterizer {
    fn rasterize(
        &mut self,
        ch: char,
        font: FontTag,
        width: u32,
        height: u32,
    ) -> Option<Arc<GlyphMask>> {
        if width == 0 || height == 0 {
            return None;
        }
        let key = (ch, font, width, height);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        let mask = self.render(ch, font, width, height).map(Arc::new);
        self.cache.insert(key, mask.clone());
        mask
    }
}

/// Requested family first, then the generic monospace fallbacks, then any face at all.
fn font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                if let usvg::FontFamily::Named(name) = family {
                    families.push(usvg::fontdb::Family::Name(name));
                }
            }
            families.push(usvg::fontdb::Family::Monospace);
            families.push(usvg::fontdb::Family::SansSerif);
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight::NORMAL,
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

fn xml_escape(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&apos;".to_string(),
        c => c.to_string(),
    }
}

/// A one-character SVG document. The baseline sits at 80% of the font size below the top edge.
pub(crate) fn glyph_svg(ch: char, font: FontTag, width: u32, height: u32) -> String {
    let baseline = f64::from(height) * 0.8;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r##"<text x="0" y="{b}" font-family="'{family}', monospace" font-size="{h}" fill="#ffffff" xml:space="preserve">{text}</text>"##,
            "</svg>"
        ),
        w = width,
        h = height,
        b = baseline,
        family = font.family(),
        text = xml_escape(ch),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
