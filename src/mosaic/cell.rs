use crate::foundation::core::{Color, SIXELS_PER_CELL};

/// On/off state of the six sub-cells of one character cell, in order
/// top-left, top-right, mid-left, mid-right, bottom-left, bottom-right.
///
/// Serialized as a six-character bit string such as `"110011"`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Sixels(pub [bool; SIXELS_PER_CELL]);

impl Sixels {
    pub const EMPTY: Sixels = Sixels([false; SIXELS_PER_CELL]);
    pub const FULL: Sixels = Sixels([true; SIXELS_PER_CELL]);

    /// Bit masks of the block-graphics code (minus 32) for each sub-cell. The bottom-right
    /// sub-cell lives on bit 64; bit 32 is the held/separated flag and is not modelled.
    const CODE_BITS: [u8; SIXELS_PER_CELL] = [1, 2, 4, 8, 16, 64];

    /// Decode a block-graphics character code (32..=63 or 96..=127).
    pub fn from_mosaic_code(code: u8) -> Self {
        let bits = code.wrapping_sub(32);
        let mut flags = [false; SIXELS_PER_CELL];
        for (flag, mask) in flags.iter_mut().zip(Self::CODE_BITS) {
            *flag = bits & mask != 0;
        }
        Self(flags)
    }

    /// Inverse of [`Sixels::from_mosaic_code`] for the contiguous-graphics form.
    pub fn to_mosaic_code(self) -> u8 {
        let bits = self
            .0
            .iter()
            .zip(Self::CODE_BITS)
            .filter(|(on, _)| **on)
            .fold(0u8, |acc, (_, mask)| acc | mask);
        bits + 32
    }

    pub fn from_bits_str(s: &str) -> Option<Self> {
        let mut flags = [false; SIXELS_PER_CELL];
        let mut n = 0usize;
        for ch in s.chars() {
            if n >= SIXELS_PER_CELL {
                return None;
            }
            flags[n] = match ch {
                '1' => true,
                '0' => false,
                _ => return None,
            };
            n += 1;
        }
        (n == SIXELS_PER_CELL).then_some(Self(flags))
    }

    pub fn to_bits_string(self) -> String {
        self.0.iter().map(|&on| if on { '1' } else { '0' }).collect()
    }

    pub fn any(self) -> bool {
        self.0.iter().any(|&on| on)
    }

    pub fn count(self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    /// Panics when `index >= 6`.
    pub fn get(self, index: usize) -> bool {
        self.0[index]
    }

    /// Panics when `index >= 6`.
    pub fn set(&mut self, index: usize, on: bool) {
        self.0[index] = on;
    }
}

impl TryFrom<String> for Sixels {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_bits_str(&value)
            .ok_or_else(|| format!("expected six '0'/'1' characters, got {value:?}"))
    }
}

impl From<Sixels> for String {
    fn from(value: Sixels) -> Self {
        value.to_bits_string()
    }
}

/// A lit block-graphics cell. Construction rejects the all-off pattern, so an empty cell is
/// only ever represented by absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawMosaicCell")]
pub struct MosaicCell {
    sixels: Sixels,
    color: Color,
}

#[derive(serde::Deserialize)]
struct RawMosaicCell {
    sixels: Sixels,
    #[serde(default)]
    color: Color,
}

impl TryFrom<RawMosaicCell> for MosaicCell {
    type Error = String;

    fn try_from(raw: RawMosaicCell) -> Result<Self, Self::Error> {
        MosaicCell::new(raw.sixels, raw.color)
            .ok_or_else(|| "mosaic cell must have at least one sub-cell on".to_string())
    }
}

impl MosaicCell {
    pub fn new(sixels: Sixels, color: Color) -> Option<Self> {
        sixels.any().then_some(Self { sixels, color })
    }

    /// Parse a `"bits"` pattern; `"000000"` yields `None`.
    pub fn from_bits(bits: &str, color: Color) -> Option<Self> {
        Sixels::from_bits_str(bits).and_then(|s| Self::new(s, color))
    }

    pub fn sixels(&self) -> Sixels {
        self.sixels
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_on(&self, index: usize) -> bool {
        self.sixels.get(index)
    }

    /// Rewrite one sub-cell and recolour the cell; `None` when the result is empty.
    pub fn with_sixel(self, index: usize, on: bool, color: Color) -> Option<Self> {
        let mut sixels = self.sixels;
        sixels.set(index, on);
        Self::new(sixels, color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/cell.rs"]
mod tests;
