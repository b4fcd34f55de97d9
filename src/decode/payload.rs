use percent_encoding::percent_decode_str;

use crate::decode::bitstream::is_symbol;
use crate::foundation::error::ImportError;

/// Shortest payload accepted without a `metadata:` prefix.
pub const LEGACY_MIN_LEN: usize = 1120;

/// A sanitized payload located inside an identifier string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    /// The part before the first `:` (the character-set nibble on edit.tf), when present.
    pub metadata: Option<String>,
    /// Alphabet symbols only.
    pub data: String,
}

/// Find the fragment after `#`, percent-decode it, and keep only alphabet symbols of the data
/// part. Accepts `metadata:data[:extra...]` or a bare legacy payload of at least
/// [`LEGACY_MIN_LEN`] symbols.
pub fn locate_payload(source: &str) -> Result<Payload, ImportError> {
    let raw = source.trim();
    if raw.is_empty() {
        return Err(ImportError::Empty);
    }
    let (_, fragment) = raw.split_once('#').ok_or(ImportError::MissingFragment)?;
    if fragment.is_empty() {
        return Err(ImportError::EmptyPayload);
    }
    let fragment = percent_decode_fragment(fragment);

    let mut parts = fragment.split(':');
    let first = parts.next().unwrap_or_default();
    let (metadata, data) = match parts.next() {
        Some(second) => (Some(first.to_string()), second),
        None => (None, first),
    };

    let data: String = data.chars().filter(|&ch| is_symbol(ch)).collect();
    if data.is_empty() {
        return Err(ImportError::EmptyPayload);
    }
    if metadata.is_none() && data.len() < LEGACY_MIN_LEN {
        return Err(ImportError::Unparseable {
            len: data.len(),
            min: LEGACY_MIN_LEN,
        });
    }
    tracing::debug!(len = data.len(), metadata = ?metadata, "located payload");
    Ok(Payload { metadata, data })
}

/// Malformed escapes or non-UTF-8 results leave the fragment untouched.
fn percent_decode_fragment(fragment: &str) -> String {
    if !escapes_well_formed(fragment) {
        return fragment.to_string();
    }
    match percent_decode_str(fragment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => fragment.to_string(),
    }
}

fn escapes_well_formed(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit));
            if !ok {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/decode/payload.rs"]
mod tests;
