use crate::foundation::core::{CellPos, Color, SIXEL_COLS, SIXEL_ROWS};
use crate::foundation::error::{TelepageError, TelepageResult};
use crate::mosaic::cell::{MosaicCell, Sixels};
use crate::mosaic::overlay::MosaicOverlay;

/// A rectangular block of optional mosaic cells, row-major.
///
/// Besides its cell extent the block records the exact fine-grid extent of its content
/// (`fine_width <= 2 * width`, `fine_height <= 3 * height`), so transforms that land on a
/// partial cell (rotating a 1×1 block gives 3×2 sub-cells) can be reversed exactly.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<Vec<Option<MosaicCell>>>", into = "Vec<Vec<Option<MosaicCell>>>")]
pub struct ArtBlock {
    width: usize,
    height: usize,
    fine_width: usize,
    fine_height: usize,
    cells: Vec<Option<MosaicCell>>,
}

impl ArtBlock {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            fine_width: width * SIXEL_COLS,
            fine_height: height * SIXEL_ROWS,
            cells: vec![None; width * height],
        }
    }

    /// A block sized to cover `fine_width × fine_height` sub-cells.
    pub(crate) fn with_fine_extent(fine_width: usize, fine_height: usize) -> Self {
        let mut block = Self::new(
            fine_width.div_ceil(SIXEL_COLS),
            fine_height.div_ceil(SIXEL_ROWS),
        );
        block.fine_width = fine_width;
        block.fine_height = fine_height;
        block
    }

    /// Ragged rows are padded with empty cells to the longest row.
    pub fn from_rows(rows: Vec<Vec<Option<MosaicCell>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut block = Self::new(width, rows.len());
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                block.set(r, c, cell);
            }
        }
        block
    }

    /// Build from a pixel map, one string per fine row: `.` is off and `W R G Y B M C` are lit
    /// sub-cells in that colour. Width pads to even and height to a multiple of three. A
    /// cell takes the colour of its first lit sub-cell.
    pub fn from_pixel_map<S: AsRef<str>>(lines: &[S]) -> TelepageResult<Self> {
        let rows: Vec<Vec<char>> = lines.iter().map(|l| l.as_ref().chars().collect()).collect();
        for (y, row) in rows.iter().enumerate() {
            if let Some(bad) = row.iter().find(|&&ch| ch != '.' && Color::from_letter(ch).is_none()) {
                return Err(TelepageError::validation(format!(
                    "pixel map row {y} has unknown colour {bad:?}"
                )));
            }
        }
        let fine_w = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut block = Self::new(fine_w.div_ceil(SIXEL_COLS), rows.len().div_ceil(SIXEL_ROWS));
        let pixel = |x: usize, y: usize| {
            rows.get(y)
                .and_then(|r| r.get(x))
                .and_then(|&ch| Color::from_letter(ch))
        };
        for r in 0..block.height {
            for c in 0..block.width {
                let mut sixels = Sixels::EMPTY;
                let mut color = None;
                for i in 0..SIXEL_COLS * SIXEL_ROWS {
                    let px = pixel(c * SIXEL_COLS + i % SIXEL_COLS, r * SIXEL_ROWS + i / SIXEL_COLS);
                    if let Some(px) = px {
                        sixels.set(i, true);
                        color.get_or_insert(px);
                    }
                }
                block.set(r, c, MosaicCell::new(sixels, color.unwrap_or_default()));
            }
        }
        Ok(block)
    }

    /// Copy the bounding box of every occupied overlay cell. `None` when the overlay is empty.
    pub fn crop_overlay(overlay: &MosaicOverlay) -> Option<(CellPos, ArtBlock)> {
        let mut occupied = overlay.occupied().map(|(p, _)| p);
        let first = occupied.next()?;
        let (mut min_r, mut max_r, mut min_c, mut max_c) = (first.row, first.row, first.col, first.col);
        for p in occupied {
            min_r = min_r.min(p.row);
            max_r = max_r.max(p.row);
            min_c = min_c.min(p.col);
            max_c = max_c.max(p.col);
        }
        let mut block = Self::new(max_c - min_c + 1, max_r - min_r + 1);
        for r in 0..block.height {
            for c in 0..block.width {
                let cell = overlay.get(CellPos::new(min_r + r, min_c + c)).copied();
                block.set(r, c, cell);
            }
        }
        Some((CellPos::new(min_r, min_c), block))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fine_width(&self) -> usize {
        self.fine_width
    }

    pub fn fine_height(&self) -> usize {
        self.fine_height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&MosaicCell> {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col].as_ref()
        } else {
            None
        }
    }

    /// Out of bounds is a no-op.
    pub fn set(&mut self, row: usize, col: usize, cell: Option<MosaicCell>) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = cell;
        }
    }

    /// `(row, col, cell)` for every lit cell.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &MosaicCell)> + '_ {
        let w = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|cell| (i / w, i % w, cell)))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Every cell recoloured.
    pub fn recolored(&self, color: Color) -> Self {
        let mut out = self.clone();
        for cell in out.cells.iter_mut().flatten() {
            *cell = MosaicCell::new(cell.sixels(), color).unwrap_or(*cell);
        }
        out
    }
}

impl From<Vec<Vec<Option<MosaicCell>>>> for ArtBlock {
    fn from(rows: Vec<Vec<Option<MosaicCell>>>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<ArtBlock> for Vec<Vec<Option<MosaicCell>>> {
    fn from(block: ArtBlock) -> Self {
        if block.width == 0 {
            return vec![Vec::new(); block.height];
        }
        block.cells.chunks(block.width).map(<[_]>::to_vec).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/art/block.rs"]
mod tests;
