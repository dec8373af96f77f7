//! Backup format detection.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// Shape probe for the foreign export. Only the presence of
/// `datastore._String` matters; every value is discarded unread.
#[derive(Deserialize)]
struct Probe {
    datastore: Option<DatastoreProbe>,
}

#[derive(Deserialize)]
struct DatastoreProbe {
    #[serde(rename = "_String")]
    string_bucket: Option<IgnoredAny>,
}

/// Classify raw bytes as foreign or native.
///
/// Returns true iff the top-level object has a `datastore` object that
/// itself contains a `_String` map. Neither schema is fully decoded, so this
/// is cheap and independent of which decode path runs next. Bytes that do
/// not parse at all are reported native; the native decoder then surfaces
/// the format error.
#[must_use]
pub fn is_foreign(bytes: &[u8]) -> bool {
    match serde_json::from_slice::<Probe>(bytes) {
        Ok(probe) => probe
            .datastore
            .is_some_and(|d| d.string_bucket.is_some()),
        Err(_) => false,
    }
}
