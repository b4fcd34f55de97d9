use std::collections::BTreeMap;

use crate::art::block::ArtBlock;
use crate::foundation::error::{TelepageError, TelepageResult};

#[derive(Clone, Debug, serde::Deserialize)]
struct RawClipart {
    name: String,
    category: String,
    width: usize,
    height: usize,
    pixels: Vec<String>,
}

/// One named piece of pre-drawn art.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clipart {
    pub id: String,
    pub name: String,
    pub category: String,
    pub art: ArtBlock,
}

impl Clipart {
    fn from_raw(id: String, raw: RawClipart) -> TelepageResult<Self> {
        let drawn = ArtBlock::from_pixel_map(&raw.pixels)?;
        if drawn.width() > raw.width || drawn.height() > raw.height {
            return Err(TelepageError::validation(format!(
                "clipart '{id}' pixels span {}x{} cells, declared {}x{}",
                drawn.width(),
                drawn.height(),
                raw.width,
                raw.height
            )));
        }
        let mut art = ArtBlock::new(raw.width, raw.height);
        for (r, c, cell) in drawn.occupied() {
            art.set(r, c, Some(*cell));
        }
        Ok(Self {
            id,
            name: raw.name,
            category: raw.category,
            art,
        })
    }
}

/// Clipart keyed by id, in id order.
#[derive(Clone, Debug, Default)]
pub struct ClipartLibrary {
    entries: BTreeMap<String, Clipart>,
}

impl ClipartLibrary {
    pub fn builtin() -> TelepageResult<Self> {
        Self::from_json_str(include_str!("../../assets/clipart.json"))
    }

    pub fn from_json_str(json: &str) -> TelepageResult<Self> {
        let raw: BTreeMap<String, RawClipart> = serde_json::from_str(json)
            .map_err(|e| TelepageError::serde(format!("clipart json: {e}")))?;
        let entries = raw
            .into_iter()
            .map(|(id, r)| Ok((id.clone(), Clipart::from_raw(id, r)?)))
            .collect::<TelepageResult<_>>()?;
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&Clipart> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clipart> + '_ {
        self.entries.values()
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut cats: Vec<&str> = self.entries.values().map(|c| c.category.as_str()).collect();
        cats.sort_unstable();
        cats.dedup();
        cats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/art/library.rs"]
mod tests;
