use crate::foundation::core::{COLS, CellPos, ROWS};

/// The 64-symbol alphabet of edit.tf payloads, in value order.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

const CODE_BITS: u32 = 7;
const SYMBOL_BITS: u32 = 6;

/// Number of symbols a full 25×40 page packs into.
pub const FULL_PAGE_SYMBOLS: usize = (ROWS * COLS * CODE_BITS as usize).div_ceil(SYMBOL_BITS as usize);

/// Six-bit value of one symbol. Anything outside the alphabet decodes as 0.
pub fn symbol_value(ch: char) -> u8 {
    match ch {
        'A'..='Z' => ch as u8 - b'A',
        'a'..='z' => ch as u8 - b'a' + 26,
        '0'..='9' => ch as u8 - b'0' + 52,
        '-' => 62,
        '_' => 63,
        _ => 0,
    }
}

pub fn is_symbol(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// A 25×40 grid of 7-bit character codes, zero-filled by default.
///
/// Serializes as 25 rows of 40 integers.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct CodeGrid {
    codes: Vec<u8>,
}

impl Default for CodeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGrid {
    pub fn new() -> Self {
        Self {
            codes: vec![0; ROWS * COLS],
        }
    }

    /// Out-of-page positions read as 0.
    pub fn get(&self, pos: CellPos) -> u8 {
        if pos.in_page() {
            self.codes[pos.row * COLS + pos.col]
        } else {
            0
        }
    }

    /// Out-of-page writes are ignored; codes are masked to 7 bits.
    pub fn set(&mut self, pos: CellPos, code: u8) {
        if pos.in_page() {
            self.codes[pos.row * COLS + pos.col] = code & 0x7f;
        }
    }

    /// One row of 40 codes; `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        (row < ROWS).then(|| &self.codes[row * COLS..(row + 1) * COLS])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.codes.chunks_exact(COLS)
    }
}

impl TryFrom<Vec<Vec<u8>>> for CodeGrid {
    type Error = String;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if rows.len() > ROWS {
            return Err(format!("code grid has {} rows, max {ROWS}", rows.len()));
        }
        let mut grid = CodeGrid::new();
        for (r, row) in rows.iter().enumerate() {
            if row.len() > COLS {
                return Err(format!("code grid row {r} has {} columns, max {COLS}", row.len()));
            }
            for (c, &code) in row.iter().enumerate() {
                if code > 0x7f {
                    return Err(format!("code {code} at row {r} col {c} is not 7-bit"));
                }
                grid.set(CellPos::new(r, c), code);
            }
        }
        Ok(grid)
    }
}

impl From<CodeGrid> for Vec<Vec<u8>> {
    fn from(grid: CodeGrid) -> Self {
        grid.rows().map(<[u8]>::to_vec).collect()
    }
}

/// Re-slice a 6-bit symbol stream into 7-bit codes, MSB first. Code `k` lands at
/// (k / 40, k % 40); codes past the page and trailing partial bits are dropped.
pub fn decode_codes(payload: &str) -> CodeGrid {
    let mut grid = CodeGrid::new();
    let capacity = ROWS * COLS;
    let mut acc: u32 = 0;
    let mut nbits: u32 = 0;
    let mut k = 0usize;
    for ch in payload.chars() {
        acc = (acc << SYMBOL_BITS) | u32::from(symbol_value(ch));
        nbits += SYMBOL_BITS;
        if nbits >= CODE_BITS {
            nbits -= CODE_BITS;
            grid.codes[k] = ((acc >> nbits) & 0x7f) as u8;
            acc &= (1 << nbits) - 1;
            k += 1;
            if k == capacity {
                break;
            }
        }
    }
    grid
}

/// Pack a grid back into symbols; the final symbol is zero-padded.
pub fn encode_codes(grid: &CodeGrid) -> String {
    let mut out = String::with_capacity(FULL_PAGE_SYMBOLS);
    let mut acc: u32 = 0;
    let mut nbits: u32 = 0;
    for &code in &grid.codes {
        acc = (acc << CODE_BITS) | u32::from(code & 0x7f);
        nbits += CODE_BITS;
        while nbits >= SYMBOL_BITS {
            nbits -= SYMBOL_BITS;
            out.push(char::from(ALPHABET[((acc >> nbits) & 0x3f) as usize]));
        }
        acc &= (1 << nbits) - 1;
    }
    if nbits > 0 {
        out.push(char::from(ALPHABET[((acc << (SYMBOL_BITS - nbits)) & 0x3f) as usize]));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/decode/bitstream.rs"]
mod tests;
