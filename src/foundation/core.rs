/// Character columns on a page.
pub const COLS: usize = 40;
/// Character rows on a page, including the header (row 0) and navigation row (row 24).
pub const ROWS: usize = 25;
/// Sub-cells across one character cell.
pub const SIXEL_COLS: usize = 2;
/// Sub-cells down one character cell.
pub const SIXEL_ROWS: usize = 3;
/// Sub-cells per character cell.
pub const SIXELS_PER_CELL: usize = SIXEL_COLS * SIXEL_ROWS;
/// Width of the fine sub-cell grid.
pub const FINE_WIDTH: usize = COLS * SIXEL_COLS;
/// Height of the fine sub-cell grid.
pub const FINE_HEIGHT: usize = ROWS * SIXEL_ROWS;
/// First row open to drawing and placed items.
pub const FIRST_CONTENT_ROW: usize = 1;
/// Last row open to drawing and placed items.
pub const LAST_CONTENT_ROW: usize = 23;
/// Number of drawable rows.
pub const CONTENT_ROWS: usize = LAST_CONTENT_ROW - FIRST_CONTENT_ROW + 1;
/// Largest fine-grid height any art block may reach (23 usable rows).
pub const MAX_ART_FINE_HEIGHT: usize = CONTENT_ROWS * SIXEL_ROWS;

/// The eight teletext colours, in palette order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
}

impl Color {
    pub const PALETTE: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Palette lookup; only the low three bits are significant.
    pub fn from_index(idx: u8) -> Self {
        Self::PALETTE[usize::from(idx & 7)]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn rgba(self) -> [u8; 4] {
        match self {
            Color::Black => [0, 0, 0, 255],
            Color::Red => [255, 0, 0, 255],
            Color::Green => [0, 255, 0, 255],
            Color::Yellow => [255, 255, 0, 255],
            Color::Blue => [0, 0, 255, 255],
            Color::Magenta => [255, 0, 255, 255],
            Color::Cyan => [0, 255, 255, 255],
            Color::White => [255, 255, 255, 255],
        }
    }

    /// Single-letter code used by pixel-map art (`W R G Y B M C`); black has none.
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'W' => Some(Color::White),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            'B' => Some(Color::Blue),
            'M' => Some(Color::Magenta),
            'C' => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// A character-cell coordinate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_page(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Inside the drawable band (rows 1..=23).
    pub fn in_content(self) -> bool {
        self.col < COLS && (FIRST_CONTENT_ROW..=LAST_CONTENT_ROW).contains(&self.row)
    }
}

/// A coordinate on the 80×75 fine sub-cell grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FinePos {
    pub x: usize,
    pub y: usize,
}

impl FinePos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn in_page(self) -> bool {
        self.x < FINE_WIDTH && self.y < FINE_HEIGHT
    }
}

/// A sub-cell addressed as (cell, index) with index in `0..6`:
/// 0 top-left, 1 top-right, 2 mid-left, 3 mid-right, 4 bottom-left, 5 bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SixelPos {
    pub cell: CellPos,
    pub index: usize,
}

impl SixelPos {
    pub fn new(row: usize, col: usize, index: usize) -> Self {
        Self {
            cell: CellPos::new(row, col),
            index,
        }
    }

    /// Cell + index to fine coordinate.
    pub fn to_fine(self) -> FinePos {
        FinePos {
            x: self.cell.col * SIXEL_COLS + self.index % SIXEL_COLS,
            y: self.cell.row * SIXEL_ROWS + self.index / SIXEL_COLS,
        }
    }

    /// Fine coordinate to cell + index.
    pub fn from_fine(pos: FinePos) -> Self {
        Self {
            cell: CellPos::new(pos.y / SIXEL_ROWS, pos.x / SIXEL_COLS),
            index: (pos.y % SIXEL_ROWS) * SIXEL_COLS + pos.x % SIXEL_COLS,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
