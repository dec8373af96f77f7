//! Native document serializer.
//!
//! The on-disk form is pretty-printed JSON. Encoding writes every field,
//! defaults included, so the file is self-describing. Decoding ignores
//! fields this build does not know (forward compatibility) and defaults
//! fields the file does not carry (backward compatibility).

use crate::error::{Error, Result};
use crate::model::Document;

/// Encode a document to its canonical byte form.
///
/// # Errors
///
/// Returns `Error::Format` if serialization fails, which only happens for
/// non-finite floats.
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    let json = serde_json::to_string_pretty(document)?;
    Ok(json.into_bytes())
}

/// Decode a document from bytes.
///
/// # Errors
///
/// Returns `Error::Format` on malformed input. No partial document is ever
/// returned.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    serde_json::from_slice(bytes).map_err(|e| Error::Format(format!("not a NovelKeep backup: {e}")))
}
