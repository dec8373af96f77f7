//! Foreign format converter.
//!
//! The legacy reader app persists everything in a flat, prefix-addressed
//! key-value dump with one bucket per value type (`_Bool`, `_Int`,
//! `_String`, `_Float`, `_Long`, `_StringSet`). Conversion runs two passes:
//!
//! 1. **Classification**: every `_String` entry is matched against an
//!    ordered table of prefix rules, extracting an embedded id or name. A
//!    malformed payload skips that entry with a warning; conversion never
//!    aborts because of one bad entry.
//! 2. **Reconstruction**: classified entries are joined back into library,
//!    history, and read-chapter records, with best-effort lookups into the
//!    position/timestamp key families and explicit defaults for anything
//!    absent.
//!
//! The legacy schema has no chapter-URL concept, so one is synthesized as
//! `{source}#chapter-{index}`. This is one-way; it does not round-trip to
//! the legacy app's own addressing.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{
    AUTOSCROLL_SPEED_MAX, AUTOSCROLL_SPEED_MIN, AppSettings, Document, FOREIGN_PRODUCER,
    HistoryRecord, LibraryRecord, ReadChapterRecord, ReaderSettings, ReadingStatus, Theme,
};

/// Key prefixes of the legacy dump, in classification order.
const PREFIX_BOOKMARKED: &str = "result_bookmarked/";
const PREFIX_BOOKMARKED_STATE: &str = "result_bookmarked_state/";
const PREFIX_HISTORY: &str = "result_history/";
const PREFIX_DOWNLOADS: &str = "downloads_data/";

/// Position and timestamp key families, addressed by novel display name.
const PREFIX_POSITION: &str = "reader_epub_position/";
const PREFIX_CHAPTER_TITLE: &str = "reader_epub_chapter/";
const PREFIX_SCROLL: &str = "reader_epub_scroll/";
const PREFIX_LAST_READ: &str = "reader_epub_last_read/";
const PREFIX_CHAPTER_READ: &str = "reader_epub_position_read/";

/// Legacy theme/settings keys.
const SETTING_THEME: &str = "reader_theme";
const SETTING_TTS_SPEED: &str = "tts_speed";

/// Legacy status codes. Unknown codes map to `PlanToRead`.
fn status_from_code(code: i64) -> ReadingStatus {
    match code {
        1 => ReadingStatus::Completed,
        2 => ReadingStatus::Reading,
        3 => ReadingStatus::OnHold,
        4 => ReadingStatus::Dropped,
        _ => ReadingStatus::PlanToRead,
    }
}

/// Case-insensitive provider identifier → native provider name.
/// Unrecognized identifiers pass through unchanged.
const PROVIDER_NAMES: &[(&str, &str)] = &[
    ("novelbin", "NovelBin"),
    ("royalroad", "Royal Road"),
    ("scribblehub", "Scribble Hub"),
    ("lightnovelpub", "LightNovelPub"),
    ("freewebnovel", "FreeWebNovel"),
    ("novelfull", "NovelFull"),
];

fn normalize_provider(raw: &str) -> String {
    let lower = raw.to_lowercase();
    PROVIDER_NAMES
        .iter()
        .find(|(id, _)| *id == lower)
        .map_or_else(|| raw.to_string(), |(_, name)| (*name).to_string())
}

/// Deterministic chapter URL for a legacy chapter index.
fn synthesize_chapter_url(source: &str, index: i64) -> String {
    format!("{source}#chapter-{index}")
}

// ── Foreign document shape ────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ForeignExport {
    #[serde(default)]
    datastore: Buckets,
    #[serde(default)]
    settings: Option<Buckets>,
}

#[derive(Debug, Default, Deserialize)]
struct Buckets {
    #[serde(rename = "_Bool", default)]
    _bools: HashMap<String, bool>,
    #[serde(rename = "_Int", default)]
    ints: HashMap<String, i64>,
    #[serde(rename = "_String", default)]
    strings: HashMap<String, String>,
    #[serde(rename = "_Float", default)]
    floats: HashMap<String, f64>,
    #[serde(rename = "_Long", default)]
    longs: HashMap<String, i64>,
    #[serde(rename = "_StringSet", default)]
    _string_sets: HashMap<String, Vec<String>>,
}

/// Payload of a `result_bookmarked/{id}` entry.
#[derive(Debug, Clone, Deserialize)]
struct NovelPayload {
    source: String,
    name: String,
    #[serde(rename = "apiName", default)]
    api_name: String,
    #[serde(default)]
    image: Option<String>,
}

/// Payload of a `result_history/{id}` entry.
#[derive(Debug, Clone, Deserialize)]
struct HistoryPayload {
    source: String,
    name: String,
    #[serde(rename = "apiName", default)]
    api_name: String,
    #[serde(default)]
    chapter: Option<i64>,
    #[serde(default)]
    time: Option<i64>,
}

/// Payload of a `downloads_data/{id}` entry.
#[derive(Debug, Clone, Deserialize)]
struct DownloadPayload {
    name: String,
    #[serde(default)]
    chapters: Option<u32>,
}

// ── Classification ────────────────────────────────────────────

/// Result of the classification pass over the `_String` bucket.
#[derive(Debug, Default)]
struct Classified {
    /// id → library candidate, ordered for deterministic output.
    novels: BTreeMap<i64, NovelPayload>,
    /// id → integer status code.
    states: HashMap<i64, i64>,
    /// History candidates, ordered by id.
    history: BTreeMap<i64, HistoryPayload>,
    /// Display name → downloaded chapter count.
    downloads: HashMap<String, u32>,
    /// Display name → source URL, joined against during reconstruction.
    sources: HashMap<String, String>,
}

/// One classification rule: a key prefix and the extractor that consumes a
/// matching entry. Rules are applied in order; the first match wins.
type Extractor = fn(&mut Classified, id: i64, value: &str) -> std::result::Result<(), String>;

const RULES: &[(&str, Extractor)] = &[
    (PREFIX_BOOKMARKED_STATE, extract_state),
    (PREFIX_BOOKMARKED, extract_novel),
    (PREFIX_HISTORY, extract_history),
    (PREFIX_DOWNLOADS, extract_download),
];

fn extract_novel(out: &mut Classified, id: i64, value: &str) -> std::result::Result<(), String> {
    let payload: NovelPayload = serde_json::from_str(value).map_err(|e| e.to_string())?;
    out.sources
        .insert(payload.name.clone(), payload.source.clone());
    out.novels.insert(id, payload);
    Ok(())
}

fn extract_state(out: &mut Classified, id: i64, value: &str) -> std::result::Result<(), String> {
    let code: i64 = value.trim().parse().map_err(|_| format!("bad status code {value:?}"))?;
    out.states.insert(id, code);
    Ok(())
}

fn extract_history(out: &mut Classified, id: i64, value: &str) -> std::result::Result<(), String> {
    let payload: HistoryPayload = serde_json::from_str(value).map_err(|e| e.to_string())?;
    out.sources
        .insert(payload.name.clone(), payload.source.clone());
    out.history.insert(id, payload);
    Ok(())
}

fn extract_download(out: &mut Classified, _id: i64, value: &str) -> std::result::Result<(), String> {
    let payload: DownloadPayload = serde_json::from_str(value).map_err(|e| e.to_string())?;
    let count = payload.chapters.unwrap_or(0);
    let entry = out.downloads.entry(payload.name).or_insert(0);
    *entry = (*entry).max(count);
    Ok(())
}

fn classify(strings: &HashMap<String, String>) -> Classified {
    let mut out = Classified::default();
    for (key, value) in strings {
        let Some((suffix, extractor)) = RULES
            .iter()
            .find_map(|(prefix, f)| key.strip_prefix(prefix).map(|s| (s, f)))
        else {
            continue;
        };
        let Ok(id) = suffix.parse::<i64>() else {
            warn!(key = %key, "skipping entry with non-numeric id");
            continue;
        };
        if let Err(reason) = extractor(&mut out, id, value) {
            warn!(key = %key, reason = %reason, "skipping malformed entry");
        }
    }
    out
}

// ── Reconstruction ────────────────────────────────────────────

/// Last-read lookup: prefer the exact key for the current chapter index,
/// otherwise the newest timestamp for any chapter of that novel.
fn last_read_for(longs: &HashMap<String, i64>, name: &str, index: i64) -> Option<i64> {
    let exact = format!("{PREFIX_LAST_READ}{name}/{index}");
    if let Some(ts) = longs.get(&exact) {
        return Some(*ts);
    }
    let prefix = format!("{PREFIX_LAST_READ}{name}/");
    longs
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(_, ts)| *ts)
        .max()
}

fn reconstruct_library(export: &ForeignExport, classified: &Classified, now: i64) -> Vec<LibraryRecord> {
    let ds = &export.datastore;
    classified
        .novels
        .iter()
        .map(|(id, payload)| {
            let name = &payload.name;
            let status = classified
                .states
                .get(id)
                .copied()
                .map_or(ReadingStatus::PlanToRead, status_from_code);
            let index = ds
                .ints
                .get(&format!("{PREFIX_POSITION}{name}"))
                .copied()
                .unwrap_or(0);
            let title = ds
                .strings
                .get(&format!("{PREFIX_CHAPTER_TITLE}{name}"))
                .cloned()
                .unwrap_or_default();
            let scroll = ds
                .floats
                .get(&format!("{PREFIX_SCROLL}{name}"))
                .copied()
                .unwrap_or(0.0);
            LibraryRecord {
                url: payload.source.clone(),
                name: name.clone(),
                cover_url: payload.image.clone().unwrap_or_default(),
                provider: normalize_provider(&payload.api_name),
                status,
                last_chapter: title,
                last_read_at: last_read_for(&ds.longs, name, index),
                scroll_position: scroll as f32,
                total_chapters: classified.downloads.get(name).copied().unwrap_or(0),
                acknowledged_chapters: 0,
                unread_chapters: 0,
                added_at: now,
                updated_at: now,
            }
        })
        .collect()
}

fn reconstruct_history(export: &ForeignExport, classified: &Classified) -> Vec<HistoryRecord> {
    let ds = &export.datastore;
    // One row per novel URL: keep the newest entry per source.
    let mut by_source: HashMap<String, HistoryRecord> = HashMap::new();
    for payload in classified.history.values() {
        let index = payload.chapter.unwrap_or_else(|| {
            ds.ints
                .get(&format!("{PREFIX_POSITION}{}", payload.name))
                .copied()
                .unwrap_or(0)
        });
        let read_at = payload
            .time
            .or_else(|| last_read_for(&ds.longs, &payload.name, index))
            .unwrap_or(0);
        let record = HistoryRecord {
            novel_url: payload.source.clone(),
            chapter_url: synthesize_chapter_url(&payload.source, index),
            chapter_title: ds
                .strings
                .get(&format!("{PREFIX_CHAPTER_TITLE}{}", payload.name))
                .cloned()
                .unwrap_or_default(),
            provider: normalize_provider(&payload.api_name),
            read_at,
        };
        match by_source.get(&record.novel_url) {
            Some(existing) if existing.read_at >= record.read_at => {}
            _ => {
                by_source.insert(record.novel_url.clone(), record);
            }
        }
    }
    let mut records: Vec<_> = by_source.into_values().collect();
    records.sort_by(|a, b| a.novel_url.cmp(&b.novel_url));
    records
}

fn reconstruct_read_chapters(
    export: &ForeignExport,
    classified: &Classified,
) -> Vec<ReadChapterRecord> {
    let mut records = Vec::new();
    for (key, read_at) in &export.datastore.longs {
        let Some(rest) = key.strip_prefix(PREFIX_CHAPTER_READ) else {
            continue;
        };
        // Names may contain separators, so split on the *last* one.
        let Some((name, index_str)) = rest.rsplit_once('/') else {
            warn!(key = %key, "skipping read marker without chapter index");
            continue;
        };
        let Ok(index) = index_str.parse::<i64>() else {
            warn!(key = %key, "skipping read marker with non-numeric index");
            continue;
        };
        // Entries whose name has no known source are dropped.
        let Some(source) = classified.sources.get(name) else {
            debug!(name = %name, "read marker references unknown novel");
            continue;
        };
        records.push(ReadChapterRecord {
            novel_url: source.clone(),
            chapter_url: synthesize_chapter_url(source, index),
            read_at: *read_at,
        });
    }
    records.sort_by(|a, b| (&a.novel_url, &a.chapter_url).cmp(&(&b.novel_url, &b.chapter_url)));
    records
}

fn reconstruct_settings(buckets: &Buckets) -> (AppSettings, ReaderSettings) {
    let mut app = AppSettings::default();
    let mut reader = ReaderSettings::default();

    // Theme is a free-text key in the legacy app; substring match is the
    // best available signal.
    if let Some(raw_theme) = buckets.strings.get(SETTING_THEME) {
        let lower = raw_theme.to_lowercase();
        let theme = if lower.contains("amoled") {
            Theme::Amoled
        } else if lower.contains("light") {
            Theme::Light
        } else {
            Theme::Dark
        };
        app.theme = theme;
        reader.theme = theme;
    }

    // The legacy app has no autoscroll; its TTS speed is the closest analog.
    if let Some(tts_speed) = buckets.floats.get(SETTING_TTS_SPEED) {
        reader.autoscroll_speed =
            (*tts_speed as f32).clamp(AUTOSCROLL_SPEED_MIN, AUTOSCROLL_SPEED_MAX);
    }

    (app, reader)
}

/// Convert a legacy export into a native document.
///
/// The result is tagged with the [`FOREIGN_PRODUCER`] sentinel so the
/// restore orchestrator skips the native version gate.
///
/// # Errors
///
/// Returns `Error::Format` if the bytes do not parse as a legacy export at
/// all. Individual malformed entries inside a parseable export are skipped,
/// never fatal.
pub fn convert(bytes: &[u8]) -> Result<Document> {
    let export: ForeignExport = serde_json::from_slice(bytes)
        .map_err(|e| Error::Format(format!("not a legacy export: {e}")))?;

    let classified = classify(&export.datastore.strings);
    debug!(
        novels = classified.novels.len(),
        history = classified.history.len(),
        "legacy export classified"
    );

    let mut document = Document::new(FOREIGN_PRODUCER, "converted legacy export");
    let now = document.created_at;

    document.library = reconstruct_library(&export, &classified, now);
    document.history = reconstruct_history(&export, &classified);
    document.read_chapters = reconstruct_read_chapters(&export, &classified);

    if let Some(settings) = &export.settings {
        let (app, reader) = reconstruct_settings(settings);
        document.app_settings = Some(app);
        document.reader_settings = Some(reader);
    }

    Ok(document)
}
