use crate::decode::bitstream::CodeGrid;
use crate::foundation::core::{CellPos, Color};
use crate::mosaic::cell::{MosaicCell, Sixels};
use crate::mosaic::overlay::MosaicOverlay;
use crate::mosaic::text::ImportTextOverlay;
use crate::render::glyph::GlyphSampler;

/// How much of a decoded page an import keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Block graphics only.
    #[default]
    Mosaics,
    /// Block graphics plus literal text in the import text layer.
    Full,
    /// Literal text is sampled into block graphics as well, so everything is editable art.
    Rendered,
}

/// What one code does to the cell it occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeEffect {
    /// 0-7 (text) or 16-23 (graphics); the cell itself is blank.
    SetForeground { color: Color, graphics: bool },
    /// 28 or 29; the cell itself is blank.
    SetBackground(Color),
    /// Any other code below 32.
    Control,
    Mosaic(MosaicCell),
    Text { ch: char, fg: Color, bg: Color },
    Blank,
}

/// Column-scan state. Reset at the start of every row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowState {
    pub graphics: bool,
    pub fg: Color,
    pub bg: Color,
}

impl Default for RowState {
    fn default() -> Self {
        Self {
            graphics: false,
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

fn is_mosaic_code(code: u8) -> bool {
    (32..64).contains(&code) || (96..128).contains(&code)
}

impl RowState {
    pub fn step(&mut self, code: u8) -> CodeEffect {
        match code {
            0..=7 => {
                self.graphics = false;
                self.fg = Color::from_index(code);
                CodeEffect::SetForeground {
                    color: self.fg,
                    graphics: false,
                }
            }
            16..=23 => {
                self.graphics = true;
                self.fg = Color::from_index(code & 7);
                CodeEffect::SetForeground {
                    color: self.fg,
                    graphics: true,
                }
            }
            28 => {
                self.bg = Color::Black;
                CodeEffect::SetBackground(self.bg)
            }
            29 => {
                self.bg = self.fg;
                CodeEffect::SetBackground(self.bg)
            }
            0..32 => CodeEffect::Control,
            _ if self.graphics && is_mosaic_code(code) => {
                match MosaicCell::new(Sixels::from_mosaic_code(code), self.fg) {
                    Some(cell) => CodeEffect::Mosaic(cell),
                    None => CodeEffect::Blank,
                }
            }
            _ => match char::from(code) {
                ' ' => CodeEffect::Blank,
                ch => CodeEffect::Text {
                    ch,
                    fg: self.fg,
                    bg: self.bg,
                },
            },
        }
    }
}

/// Visit every cell in row-major order with its classified effect.
pub fn interpret(grid: &CodeGrid, mut visit: impl FnMut(CellPos, CodeEffect)) {
    for (row, codes) in grid.rows().enumerate() {
        let mut state = RowState::default();
        for (col, &code) in codes.iter().enumerate() {
            visit(CellPos::new(row, col), state.step(code));
        }
    }
}

/// Both layers an import produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub mosaics: MosaicOverlay,
    pub text: ImportTextOverlay,
}

/// Single pass over the grid. The text layer stays empty unless `include_text` is set.
pub fn extract(grid: &CodeGrid, include_text: bool) -> Extraction {
    let mut out = Extraction::default();
    interpret(grid, |pos, effect| match effect {
        CodeEffect::Mosaic(cell) => out.mosaics.put(pos, Some(cell)),
        CodeEffect::Text { ch, fg, bg } if include_text => out.text.set(pos, ch, fg, bg),
        _ => {}
    });
    out
}

/// Single pass that turns literal characters into mosaics through `sampler`.
pub fn extract_rendered(
    grid: &CodeGrid,
    sampler: &mut dyn GlyphSampler,
    cell_width: u32,
    cell_height: u32,
) -> MosaicOverlay {
    let mut mosaics = MosaicOverlay::new();
    interpret(grid, |pos, effect| match effect {
        CodeEffect::Mosaic(cell) => mosaics.put(pos, Some(cell)),
        CodeEffect::Text { ch, fg, .. } => {
            let sixels = sampler.sample(ch, cell_width, cell_height);
            mosaics.set(pos, sixels, fg);
        }
        _ => {}
    });
    mosaics
}

#[cfg(test)]
#[path = "../../tests/unit/decode/interpret.rs"]
mod tests;
