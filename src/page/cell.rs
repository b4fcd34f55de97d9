use crate::foundation::core::Color;

/// Font a text cell asks the glyph rasterizer for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FontTag {
    #[default]
    #[serde(rename = "bedstead")]
    Bedstead,
    #[serde(rename = "bedstead-ext")]
    BedsteadExtended,
    #[serde(rename = "modeseven")]
    ModeSeven,
}

impl FontTag {
    pub fn family(self) -> &'static str {
        match self {
            FontTag::Bedstead => "Bedstead",
            FontTag::BedsteadExtended => "Bedstead Extended",
            FontTag::ModeSeven => "Mode Seven",
        }
    }
}

/// One template-layer character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub double_top: bool,
    pub double_bottom: bool,
    pub font: Option<FontTag>,
    /// Rendered as a rule across the bottom third of the cell in `fg`.
    pub separator: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Color::Black,
        double_top: false,
        double_bottom: false,
        font: None,
        separator: false,
    };

    pub fn separator(color: Color) -> Self {
        Self {
            fg: color,
            separator: true,
            ..Self::BLANK
        }
    }

    pub fn is_blank(&self) -> bool {
        crate::mosaic::text::is_blank_char(self.ch)
    }
}
