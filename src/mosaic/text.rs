use crate::foundation::core::{COLS, CellPos, Color, ROWS};

/// A character written by an import or a placed text item, layered above the template grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportedTextCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Second text layer. Blank characters are never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportTextOverlay {
    cells: Vec<Option<ImportedTextCell>>,
}

impl Default for ImportTextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportTextOverlay {
    pub fn new() -> Self {
        Self {
            cells: vec![None; ROWS * COLS],
        }
    }

    fn slot(pos: CellPos) -> Option<usize> {
        pos.in_page().then(|| pos.row * COLS + pos.col)
    }

    pub fn get(&self, pos: CellPos) -> Option<&ImportedTextCell> {
        Self::slot(pos).and_then(|i| self.cells[i].as_ref())
    }

    pub fn set(&mut self, pos: CellPos, ch: char, fg: Color, bg: Color) {
        if let Some(i) = Self::slot(pos) {
            self.cells[i] = (!is_blank_char(ch)).then_some(ImportedTextCell { ch, fg, bg });
        }
    }

    pub fn clear_cell(&mut self, pos: CellPos) {
        if let Some(i) = Self::slot(pos) {
            self.cells[i] = None;
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

pub(crate) fn is_blank_char(ch: char) -> bool {
    ch == ' ' || ch == '\0'
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/text.rs"]
mod tests;
