use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::art::block::ArtBlock;
use crate::art::library::ClipartLibrary;
use crate::decode::interpret::ImportMode;
use crate::foundation::core::{CellPos, Color};
use crate::foundation::error::{TelepageError, TelepageResult};
use crate::mosaic::cell::MosaicCell;
use crate::page::build::PageFields;
use crate::page::cell::FontTag;
use crate::render::fx::{CrtPreset, CrtSettings};
use crate::render::raster::{MAX_SCALE, RasterOpts};
use crate::session::page_session::{PageSession, PageSessionOpts};
use crate::transform::geometry::ArtTransform;

/// Where a placed piece of art comes from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ArtSource {
    /// A built-in clipart id.
    Clipart { clipart: String },
    /// Inline pixel map: `.` is off, `W R G Y B M C` are lit in that colour.
    Pixels { pixels: Vec<String> },
    /// Explicit cells, row-major; `null` holes stay empty.
    Cells { cells: Vec<Vec<Option<MosaicCell>>> },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtPlacement {
    #[serde(flatten)]
    pub source: ArtSource,
    pub row: usize,
    pub col: usize,
    /// Applied in order before placing.
    #[serde(default)]
    pub transforms: Vec<ArtTransform>,
    /// Repaint every cell in one colour.
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextPlacement {
    pub text: String,
    pub row: usize,
    pub col: usize,
    pub width: usize,
    #[serde(default = "default_text_height")]
    pub height: usize,
    #[serde(default = "default_text_color")]
    pub color: Color,
    /// Sample the text into block graphics instead of placing it as characters.
    #[serde(default)]
    pub as_art: bool,
}

fn default_text_height() -> usize {
    1
}

fn default_text_color() -> Color {
    Color::White
}

/// A preset name or a full settings object.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EffectsConfig {
    Preset(CrtPreset),
    Custom(CrtSettings),
}

impl EffectsConfig {
    pub fn settings(self) -> CrtSettings {
        match self {
            EffectsConfig::Preset(p) => CrtSettings::preset(p),
            EffectsConfig::Custom(s) => s,
        }
    }
}

/// A whole page described as JSON: a template (or an imported identifier), art and text boxes
/// placed on top, and output options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageDocument {
    pub template: String,
    pub fields: PageFields,
    /// When set, the page grid comes from this identifier and `template` is ignored.
    pub import: Option<String>,
    pub import_mode: ImportMode,
    pub art: Vec<ArtPlacement>,
    pub texts: Vec<TextPlacement>,
    pub effects: Option<EffectsConfig>,
    pub scale: u32,
    pub font: FontTag,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self {
            template: "news".to_string(),
            fields: PageFields::default(),
            import: None,
            import_mode: ImportMode::default(),
            art: Vec::new(),
            texts: Vec::new(),
            effects: None,
            scale: 1,
            font: FontTag::Bedstead,
        }
    }
}

impl PageDocument {
    pub fn from_json_str(s: &str) -> TelepageResult<Self> {
        serde_json::from_str(s).map_err(|e| TelepageError::validation(format!("parse page JSON: {e}")))
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> TelepageResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TelepageError::validation(format!("parse page JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> TelepageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TelepageError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Session options this document asks for.
    pub fn opts(&self) -> TelepageResult<PageSessionOpts> {
        if self.scale == 0 || self.scale > MAX_SCALE {
            return Err(TelepageError::validation(format!(
                "scale must be in 1..={MAX_SCALE}, got {}",
                self.scale
            )));
        }
        let effects = self.effects.map(EffectsConfig::settings);
        if let Some(settings) = &effects {
            settings.validate()?;
        }
        Ok(PageSessionOpts {
            raster: RasterOpts {
                scale: self.scale,
                default_font: self.font,
            },
            effects,
        })
    }

    fn resolve_art(placement: &ArtPlacement, library: &ClipartLibrary) -> TelepageResult<ArtBlock> {
        let mut art = match &placement.source {
            ArtSource::Clipart { clipart } => library
                .get(clipart)
                .map(|c| c.art.clone())
                .ok_or_else(|| TelepageError::validation(format!("unknown clipart '{clipart}'")))?,
            ArtSource::Pixels { pixels } => ArtBlock::from_pixel_map(pixels)?,
            ArtSource::Cells { cells } => ArtBlock::from_rows(cells.clone()),
        };
        for t in &placement.transforms {
            art = t.apply(&art)?;
        }
        if let Some(color) = placement.color {
            art = art.recolored(color);
        }
        Ok(art)
    }

    /// Load the page source into `session`, then place every art and text entry in order.
    /// All art is resolved before the session is touched.
    pub fn apply(&self, session: &mut PageSession, library: &ClipartLibrary) -> TelepageResult<()> {
        let art = self
            .art
            .iter()
            .map(|p| Self::resolve_art(p, library).map(|a| (CellPos::new(p.row, p.col), a)))
            .collect::<TelepageResult<Vec<_>>>()?;

        match &self.import {
            Some(source) => {
                session.import(source, self.import_mode)?;
            }
            None => session.load_template(&self.template, self.fields.clone())?,
        }

        for (pos, block) in &art {
            session.insert_art(block, *pos);
        }

        let color = session.color();
        for t in &self.texts {
            session.set_color(t.color);
            let pos = CellPos::new(t.row, t.col);
            if t.as_art {
                if session.insert_text_art(&t.text, pos, t.width, t.height).is_none() {
                    tracing::debug!(text = %t.text, "text art sampled empty; skipped");
                }
            } else {
                session.insert_text(&t.text, pos, t.width, t.height);
            }
        }
        session.set_color(color);
        session.deselect();
        tracing::debug!(art = art.len(), texts = self.texts.len(), "page document applied");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/document.rs"]
mod tests;
