//! Source playability checks.
//!
//! Decides whether the current runtime can decode a candidate source by
//! looking at its declared extension. Pure and side-effect free; safe to
//! call repeatedly. Results depend on the runtime's codec set and are
//! never cached across engine instances.

use super::model::TrackSource;

/// Containers the default `rodio` feature set decodes.
const SUPPORTED: &[&str] = &["mp3", "mpeg", "wav", "ogg", "oga", "flac"];

/// Audio extensions we recognize but cannot necessarily decode. A source
/// carrying one of these and missing from the supported list is rejected.
const RECOGNIZED: &[&str] = &[
    "aac", "m4a", "m4b", "wma", "aiff", "aif", "opus", "webm", "ape", "mid", "midi",
];

/// The runtime's reported codec support.
#[derive(Debug, Clone)]
pub struct CodecSupport {
    supported: Vec<String>,
}

impl Default for CodecSupport {
    fn default() -> Self {
        Self {
            supported: SUPPORTED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CodecSupport {
    /// Build from an explicit extension list (case-insensitive, dots ignored).
    pub fn with_extensions(extensions: &[String]) -> Self {
        Self {
            supported: extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Whether this runtime can play `source`.
    ///
    /// Sources without a recognizable extension (blob references, bare
    /// URLs) are optimistically playable; the transport surfaces a
    /// playback error later if the optimism was misplaced.
    pub fn is_playable(&self, source: &TrackSource) -> bool {
        let Some(ext) = source.extension() else {
            return true;
        };
        if self.supported.iter().any(|s| s == &ext) {
            return true;
        }
        // Known audio container we cannot decode: reject. Anything else
        // is treated as an opaque source and let through.
        !RECOGNIZED.contains(&ext.as_str())
    }
}
