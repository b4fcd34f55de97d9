use crate::art::block::ArtBlock;
use crate::foundation::core::{CellPos, Color, COLS, CONTENT_ROWS, FIRST_CONTENT_ROW, ROWS};
use crate::foundation::error::TelepageResult;
use crate::mosaic::layers::Overlays;
use crate::page::wrap::wrap_lines;
use crate::transform::geometry::{ArtTransform, resize_to};

/// Stable handle for a placed item; never reused within a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacedContent {
    /// `data` is what was last written; `original` is the untouched source every resize reads.
    Mosaic { data: ArtBlock, original: ArtBlock },
    /// `lines` is the current wrap of `text` at the item's width and height.
    Text {
        text: String,
        color: Color,
        lines: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedItem {
    id: ItemId,
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    content: PlacedContent,
}

impl PlacedItem {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn content(&self) -> &PlacedContent {
        &self.content
    }

    /// Bounding-rectangle test; blank cells inside the rectangle still count.
    pub fn contains(&self, pos: CellPos) -> bool {
        (self.row..self.row + self.height).contains(&pos.row)
            && (self.col..self.col + self.width).contains(&pos.col)
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize, CellPos)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width).map(move |c| (r, c, CellPos::new(self.row + r, self.col + c)))
        })
    }

    fn erase(&self, ov: &mut Overlays) {
        match &self.content {
            PlacedContent::Text { .. } => {
                for (_, _, pos) in self.cells() {
                    ov.text.clear_cell(pos);
                }
            }
            PlacedContent::Mosaic { data, .. } => {
                for (r, c, _) in data.occupied() {
                    ov.mosaics.clear_cell(CellPos::new(self.row + r, self.col + c));
                }
            }
        }
    }

    fn write(&self, ov: &mut Overlays) {
        match &self.content {
            PlacedContent::Text { color, lines, .. } => {
                for (r, c, pos) in self.cells() {
                    if !pos.in_content() {
                        continue;
                    }
                    let ch = lines.get(r).and_then(|l| l.chars().nth(c)).unwrap_or(' ');
                    ov.text.set(pos, ch, *color, Color::Black);
                }
            }
            PlacedContent::Mosaic { data, .. } => {
                for (r, c, cell) in data.occupied() {
                    let pos = CellPos::new(self.row + r, self.col + c);
                    if pos.in_content() {
                        ov.mosaics.put(pos, Some(*cell));
                    }
                }
            }
        }
    }

    /// Regenerate content for the current extent.
    fn relayout(&mut self) {
        let (w, h) = (self.width, self.height);
        match &mut self.content {
            PlacedContent::Text { text, lines, .. } => *lines = wrap_lines(text, w, h),
            PlacedContent::Mosaic { data, original } => *data = resize_to(original, w, h),
        }
    }
}

/// Handle a drag-resize is started from; the opposite corner stays put.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

fn clamp_extent(width: usize, height: usize) -> (usize, usize) {
    (width.clamp(1, COLS), height.clamp(1, CONTENT_ROWS))
}

/// Keep a `width × height` rectangle inside rows 1..=23 and columns 0..=39.
fn clamp_origin(row: usize, col: usize, width: usize, height: usize) -> (usize, usize) {
    let max_row = (ROWS - 1).saturating_sub(height).max(FIRST_CONTENT_ROW);
    let max_col = COLS.saturating_sub(width);
    (row.clamp(FIRST_CONTENT_ROW, max_row), col.min(max_col))
}

/// Ordered placed items plus the current selection. Later items sit on top for hit-testing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemRegistry {
    items: Vec<PlacedItem>,
    selected: Option<ItemId>,
    next_id: u64,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, ov: &mut Overlays, mut item: PlacedItem) -> ItemId {
        let (row, col) = clamp_origin(item.row, item.col, item.width, item.height);
        item.row = row;
        item.col = col;
        item.write(ov);
        let id = item.id;
        tracing::debug!(?id, row, col, w = item.width, h = item.height, "item placed");
        self.items.push(item);
        self.selected = Some(id);
        id
    }

    fn alloc_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    /// Place a copy of `art` with its top-left at `pos` and select it.
    pub fn insert_art(&mut self, ov: &mut Overlays, art: &ArtBlock, pos: CellPos) -> ItemId {
        let (width, height) = clamp_extent(art.width(), art.height());
        let data = if (width, height) == (art.width(), art.height()) {
            art.clone()
        } else {
            resize_to(art, width, height)
        };
        let item = PlacedItem {
            id: self.alloc_id(),
            row: pos.row,
            col: pos.col,
            width,
            height,
            content: PlacedContent::Mosaic {
                data,
                original: art.clone(),
            },
        };
        self.push(ov, item)
    }

    /// Place a text box and select it. Zero extents are raised to one cell.
    pub fn insert_text(
        &mut self,
        ov: &mut Overlays,
        text: &str,
        pos: CellPos,
        width: usize,
        height: usize,
        color: Color,
    ) -> ItemId {
        let (width, height) = clamp_extent(width, height);
        let item = PlacedItem {
            id: self.alloc_id(),
            row: pos.row,
            col: pos.col,
            width,
            height,
            content: PlacedContent::Text {
                text: text.to_string(),
                color,
                lines: wrap_lines(text, width, height),
            },
        };
        self.push(ov, item)
    }

    /// The most recently inserted item whose rectangle contains `pos`.
    pub fn hit_test(&self, pos: CellPos) -> Option<ItemId> {
        self.items.iter().rev().find(|i| i.contains(pos)).map(|i| i.id)
    }

    pub fn get(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedItem> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn select(&mut self, id: ItemId) -> bool {
        let found = self.get(id).is_some();
        if found {
            self.selected = Some(id);
        }
        found
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&PlacedItem> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Move so the top-left lands at `pos`, clamped to keep the item on the page.
    /// Returns `false` when the clamped position is unchanged.
    pub fn move_item(&mut self, ov: &mut Overlays, id: ItemId, pos: CellPos) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let item = &mut self.items[i];
        let (row, col) = clamp_origin(pos.row, pos.col, item.width, item.height);
        if (row, col) == (item.row, item.col) {
            return false;
        }
        item.erase(ov);
        item.row = row;
        item.col = col;
        item.write(ov);
        true
    }

    /// Resize in place. Mosaic items resample from their original art; text items rewrap.
    pub fn resize_item(&mut self, ov: &mut Overlays, id: ItemId, width: usize, height: usize) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let item = &self.items[i];
        let (width, height) = clamp_extent(width, height);
        let width = width.min(COLS - item.col).max(1);
        let height = height.min((ROWS - 1).saturating_sub(item.row)).max(1);
        let (row, col) = (item.row, item.col);
        self.reshape(ov, i, row, col, width, height)
    }

    /// Drag the `corner` handle to `cell`; the opposite corner is the anchor. Cells off the
    /// drawable area are pulled back onto its edge, and the result never leaves rows 1..=23.
    pub fn resize_from_corner(&mut self, ov: &mut Overlays, id: ItemId, corner: Corner, cell: CellPos) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let cell = CellPos::new(
            cell.row.clamp(FIRST_CONTENT_ROW, ROWS - 1),
            cell.col.min(COLS),
        );
        let item = &self.items[i];
        let (bottom, right) = (item.row + item.height, item.col + item.width);
        let (anchor_row, anchor_col) = match corner {
            Corner::Nw => (bottom, right),
            Corner::Ne => (bottom, item.col),
            Corner::Sw => (item.row, right),
            Corner::Se => (item.row, item.col),
        };
        let row = cell.row.min(anchor_row);
        let col = cell.col.min(anchor_col);
        let mut height = (cell.row.max(anchor_row) - row).max(1);
        let mut width = (cell.col.max(anchor_col) - col).max(1);
        let row = row.max(FIRST_CONTENT_ROW);
        if row + height > ROWS - 1 {
            height = (ROWS - 1).saturating_sub(row).max(1);
        }
        if col + width > COLS {
            width = COLS.saturating_sub(col).max(1);
        }
        let (row, col) = clamp_origin(row, col, width, height);
        self.reshape(ov, i, row, col, width, height)
    }

    fn reshape(&mut self, ov: &mut Overlays, i: usize, row: usize, col: usize, width: usize, height: usize) -> bool {
        let item = &mut self.items[i];
        if (row, col, width, height) == (item.row, item.col, item.width, item.height) {
            return false;
        }
        item.erase(ov);
        let resized = (width, height) != (item.width, item.height);
        item.row = row;
        item.col = col;
        item.width = width;
        item.height = height;
        if resized {
            item.relayout();
        }
        item.write(ov);
        tracing::debug!(id = ?item.id, row, col, width, height, "item reshaped");
        true
    }

    /// Replace a text item's source text and rewrap it. `false` for mosaic items.
    pub fn set_item_text(&mut self, ov: &mut Overlays, id: ItemId, new_text: &str) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let item = &mut self.items[i];
        if !matches!(item.content, PlacedContent::Text { .. }) {
            return false;
        }
        item.erase(ov);
        if let PlacedContent::Text { text, .. } = &mut item.content {
            *text = new_text.to_string();
        }
        item.relayout();
        item.write(ov);
        true
    }

    /// Apply a geometric transform to a mosaic item. The transformed art becomes the item's new
    /// original, so later resizes start from it. An item shown at its art's natural size takes
    /// the natural size of the result. A resized item keeps its displayed size through flips and
    /// swaps it on rotation; `Scale` and `Resize` always take the size they produce.
    pub fn transform_item(&mut self, ov: &mut Overlays, id: ItemId, transform: ArtTransform) -> TelepageResult<bool> {
        let Some(i) = self.index_of(id) else {
            return Ok(false);
        };
        let item = &mut self.items[i];
        let PlacedContent::Mosaic { original, .. } = &item.content else {
            return Ok(false);
        };
        let next = transform.apply(original)?;
        let natural = (item.width, item.height) == (original.width(), original.height());
        let target = match transform {
            _ if natural => (next.width(), next.height()),
            ArtTransform::FlipH | ArtTransform::FlipV => (item.width, item.height),
            ArtTransform::Rotate => (item.height, item.width),
            _ => (next.width(), next.height()),
        };
        item.erase(ov);
        let (width, height) = clamp_extent(target.0, target.1);
        let (row, col) = clamp_origin(item.row, item.col, width, height);
        item.row = row;
        item.col = col;
        item.width = width;
        item.height = height;
        let fits = (width, height) == (next.width(), next.height());
        item.content = PlacedContent::Mosaic {
            data: next.clone(),
            original: next,
        };
        if !fits {
            item.relayout();
        }
        item.write(ov);
        Ok(true)
    }

    /// Erase an item's cells and drop it. Clears the selection when it was selected.
    pub fn delete(&mut self, ov: &mut Overlays, id: ItemId) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let item = self.items.remove(i);
        item.erase(ov);
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Forget every item without touching the overlays.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/items/registry.rs"]
mod tests;
