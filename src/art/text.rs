use crate::art::block::ArtBlock;
use crate::foundation::core::Color;
use crate::mosaic::cell::MosaicCell;
use crate::page::wrap::wrap_lines;
use crate::render::glyph::GlyphSampler;

/// Lay `text` out in a `width × height` cell box (wrapped the same way as placed text) and turn
/// every character into the mosaic the sampler sees for it.
///
/// `None` when the text is blank or nothing samples as lit.
pub fn text_to_art(
    text: &str,
    width: usize,
    height: usize,
    color: Color,
    sampler: &mut dyn GlyphSampler,
    cell_width: u32,
    cell_height: u32,
) -> Option<ArtBlock> {
    if text.trim().is_empty() || width == 0 || height == 0 {
        return None;
    }
    let lines = wrap_lines(text, width, height);
    let mut art = ArtBlock::new(width, height);
    for (r, line) in lines.iter().enumerate().take(height) {
        for (c, ch) in line.chars().enumerate().take(width) {
            let sixels = sampler.sample(ch, cell_width, cell_height);
            art.set(r, c, MosaicCell::new(sixels, color));
        }
    }
    (!art.is_empty()).then_some(art)
}

#[cfg(test)]
#[path = "../../tests/unit/art/text.rs"]
mod tests;
