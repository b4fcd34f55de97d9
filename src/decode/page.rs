use crate::decode::bitstream::{CodeGrid, decode_codes, encode_codes};
use crate::decode::payload::locate_payload;
use crate::foundation::error::ImportError;

/// Base used when building an identifier for a code grid.
pub const EDITOR_URL: &str = "https://edit.tf/";

/// Metadata written when none is given: the default character set.
pub const DEFAULT_METADATA: &str = "0";

/// The raw result of decoding an identifier, before any layer extraction.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecodedPage {
    pub metadata: Option<String>,
    pub codes: CodeGrid,
}

/// Locate the payload inside `source` and decode it into a 25×40 code grid.
pub fn decode_page(source: &str) -> Result<DecodedPage, ImportError> {
    let payload = locate_payload(source)?;
    tracing::debug!(symbols = payload.data.len(), "payload located");
    Ok(DecodedPage {
        metadata: payload.metadata,
        codes: decode_codes(&payload.data),
    })
}

/// `https://edit.tf/#{metadata}:{payload}` for a grid.
pub fn encode_identifier(codes: &CodeGrid, metadata: Option<&str>) -> String {
    format!(
        "{EDITOR_URL}#{}:{}",
        metadata.unwrap_or(DEFAULT_METADATA),
        encode_codes(codes)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/decode/page.rs"]
mod tests;
