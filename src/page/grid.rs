use crate::foundation::core::{COLS, CellPos, Color, ROWS};
use crate::page::cell::{Cell, FontTag};
use crate::page::wrap::break_line;

/// The template text layer: 40×25 [`Cell`]s, rebuilt wholesale from a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageGrid {
    cells: Vec<Cell>,
}

impl Default for PageGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Foreground, background and font for a run of written text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Color,
    pub font: Option<FontTag>,
}

impl TextStyle {
    pub fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Black,
            font: None,
        }
    }

    pub fn with_font(mut self, font: Option<FontTag>) -> Self {
        self.font = font;
        self
    }

    pub fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }
}

impl PageGrid {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::BLANK; ROWS * COLS],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        pos.in_page().then(|| &self.cells[pos.row * COLS + pos.col])
    }

    fn get_mut(&mut self, pos: CellPos) -> Option<&mut Cell> {
        pos.in_page().then(|| &mut self.cells[pos.row * COLS + pos.col])
    }

    /// Replace character and style, keeping double-height flags. Out of bounds is a no-op.
    pub fn set_cell(&mut self, pos: CellPos, ch: char, style: TextStyle) {
        if let Some(cell) = self.get_mut(pos) {
            cell.ch = ch;
            cell.fg = style.fg;
            cell.bg = style.bg;
            cell.font = style.font;
        }
    }

    pub fn put(&mut self, pos: CellPos, cell: Cell) {
        if let Some(slot) = self.get_mut(pos) {
            *slot = cell;
        }
    }

    /// Write left to right from `pos`, stopping at the right edge.
    pub fn write_string(&mut self, pos: CellPos, text: &str, style: TextStyle) {
        for (i, ch) in text.chars().enumerate() {
            let col = pos.col + i;
            if col >= COLS {
                break;
            }
            self.set_cell(CellPos::new(pos.row, col), ch, style);
        }
    }

    /// Word-wrap `text` into the columns from `start.col` to the right edge, writing at most
    /// `max_rows` rows. Returns the number of rows consumed; empty source lines consume one.
    pub fn write_wrapped(
        &mut self,
        start: CellPos,
        text: &str,
        style: TextStyle,
        max_rows: usize,
    ) -> usize {
        let width = COLS.saturating_sub(start.col);
        let mut used = 0;
        for line in text.split('\n') {
            if used >= max_rows {
                break;
            }
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                used += 1;
                continue;
            }
            let mut rest: &[char] = &chars;
            while !rest.is_empty() && used < max_rows {
                let (head, tail) = break_line(rest, width);
                let head: String = head.iter().collect();
                self.write_string(CellPos::new(start.row + used, start.col), &head, style);
                rest = tail;
                used += 1;
            }
        }
        used
    }

    /// Flag `len` cells from `pos` as double-height tops and copy the character and colours
    /// to the row below as bottoms, so both halves always agree.
    pub fn set_double_height(&mut self, pos: CellPos, len: usize) {
        for col in pos.col..(pos.col + len).min(COLS) {
            let top_pos = CellPos::new(pos.row, col);
            let Some(top) = self.get_mut(top_pos) else {
                return;
            };
            top.double_top = true;
            let top = *top;
            if let Some(bottom) = self.get_mut(CellPos::new(pos.row + 1, col)) {
                bottom.double_bottom = true;
                bottom.ch = top.ch;
                bottom.fg = top.fg;
                bottom.bg = top.bg;
                bottom.font = top.font;
            }
        }
    }

    /// Turn a whole row into a separator rule.
    pub fn set_separator_row(&mut self, row: usize, color: Color) {
        for col in 0..COLS {
            self.put(CellPos::new(row, col), Cell::separator(color));
        }
    }

    /// Row contents as a string, for inspection.
    pub fn row_text(&self, row: usize) -> String {
        (0..COLS)
            .filter_map(|col| self.get(CellPos::new(row, col)))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/grid.rs"]
mod tests;
