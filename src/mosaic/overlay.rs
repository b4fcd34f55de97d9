use crate::foundation::core::{COLS, CellPos, Color, FinePos, ROWS, SixelPos};
use crate::mosaic::cell::{MosaicCell, Sixels};

/// The block-graphics layer: one optional [`MosaicCell`] per character cell.
///
/// Every writer goes through [`MosaicOverlay::set`]/[`MosaicOverlay::set_sixel`], which drop
/// the entry as soon as its last sub-cell turns off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicOverlay {
    cells: Vec<Option<MosaicCell>>,
}

impl Default for MosaicOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl MosaicOverlay {
    pub fn new() -> Self {
        Self {
            cells: vec![None; ROWS * COLS],
        }
    }

    fn slot(pos: CellPos) -> Option<usize> {
        pos.in_page().then(|| pos.row * COLS + pos.col)
    }

    pub fn get(&self, pos: CellPos) -> Option<&MosaicCell> {
        Self::slot(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Write a whole cell. An empty pattern clears it. Out of bounds is a no-op.
    pub fn set(&mut self, pos: CellPos, sixels: Sixels, color: Color) {
        if let Some(i) = Self::slot(pos) {
            self.cells[i] = MosaicCell::new(sixels, color);
        }
    }

    pub fn put(&mut self, pos: CellPos, cell: Option<MosaicCell>) {
        if let Some(i) = Self::slot(pos) {
            self.cells[i] = cell;
        }
    }

    pub fn clear_cell(&mut self, pos: CellPos) {
        self.put(pos, None);
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn is_on(&self, pos: SixelPos) -> bool {
        self.get(pos.cell).is_some_and(|c| c.is_on(pos.index))
    }

    pub fn is_on_fine(&self, pos: FinePos) -> bool {
        pos.in_page() && self.is_on(SixelPos::from_fine(pos))
    }

    /// Set one sub-cell and recolour its cell.
    ///
    /// Panics when `pos.index >= 6`.
    pub fn set_sixel(&mut self, pos: SixelPos, on: bool, color: Color) {
        let Some(i) = Self::slot(pos.cell) else {
            return;
        };
        let mut sixels = self.cells[i].map(|c| c.sixels()).unwrap_or_default();
        sixels.set(pos.index, on);
        self.cells[i] = MosaicCell::new(sixels, color);
    }

    /// Flip one sub-cell; returns its new state.
    pub fn toggle_sixel(&mut self, pos: SixelPos, color: Color) -> bool {
        let on = !self.is_on(pos);
        self.set_sixel(pos, on, color);
        on
    }

    pub fn occupied(&self) -> impl Iterator<Item = (CellPos, &MosaicCell)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            c.as_ref()
                .map(|cell| (CellPos::new(i / COLS, i % COLS), cell))
        })
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/overlay.rs"]
mod tests;
