use crate::art::block::ArtBlock;
use crate::foundation::core::{Color, FinePos, SIXELS_PER_CELL, SixelPos};
use crate::mosaic::cell::{MosaicCell, Sixels};

/// An art block viewed at sub-cell resolution: one optional colour per fine position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FineGrid {
    width: usize,
    height: usize,
    px: Vec<Option<Color>>,
}

impl FineGrid {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            px: vec![None; width * height],
        }
    }

    pub(crate) fn expand(block: &ArtBlock) -> Self {
        let mut grid = Self::blank(block.fine_width(), block.fine_height());
        for (row, col, cell) in block.occupied() {
            for index in 0..SIXELS_PER_CELL {
                if cell.is_on(index) {
                    let p = SixelPos::new(row, col, index).to_fine();
                    grid.put(p, Some(cell.color()));
                }
            }
        }
        grid
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn get(&self, p: FinePos) -> Option<Color> {
        if p.x < self.width && p.y < self.height {
            self.px[p.y * self.width + p.x]
        } else {
            None
        }
    }

    fn put(&mut self, p: FinePos, v: Option<Color>) {
        if p.x < self.width && p.y < self.height {
            self.px[p.y * self.width + p.x] = v;
        }
    }

    /// Build a `width × height` grid where each destination reads the source position `map`
    /// returns for it.
    pub(crate) fn remap(
        &self,
        width: usize,
        height: usize,
        map: impl Fn(FinePos) -> FinePos,
    ) -> Self {
        let mut out = Self::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                let dst = FinePos::new(x, y);
                out.put(dst, self.get(map(dst)));
            }
        }
        out
    }

    /// Pack back into cells. A cell takes the colour of its last lit sub-cell in index order.
    pub(crate) fn repack(&self) -> ArtBlock {
        let mut block = ArtBlock::with_fine_extent(self.width, self.height);
        for row in 0..block.height() {
            for col in 0..block.width() {
                let mut sixels = Sixels::EMPTY;
                let mut color = Color::White;
                for index in 0..SIXELS_PER_CELL {
                    if let Some(c) = self.get(SixelPos::new(row, col, index).to_fine()) {
                        sixels.set(index, true);
                        color = c;
                    }
                }
                block.set(row, col, MosaicCell::new(sixels, color));
            }
        }
        block
    }
}

/// Expand, resample through `map`, repack. Every geometric transform goes through here.
pub(crate) fn transform_fine(
    block: &ArtBlock,
    width: usize,
    height: usize,
    map: impl Fn(FinePos) -> FinePos,
) -> ArtBlock {
    FineGrid::expand(block).remap(width, height, map).repack()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fine.rs"]
mod tests;
