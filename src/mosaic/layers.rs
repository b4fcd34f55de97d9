use crate::mosaic::overlay::MosaicOverlay;
use crate::mosaic::text::ImportTextOverlay;

/// The two editable layers above the template grid. Placed items and imports write here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlays {
    pub mosaics: MosaicOverlay,
    pub text: ImportTextOverlay,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.mosaics.clear();
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.mosaics.count() == 0 && self.text.count() == 0
    }
}
