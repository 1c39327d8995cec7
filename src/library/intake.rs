//! Upload intake.
//!
//! Admits a batch of user-selected files into the playlist store. Only
//! `audio/mpeg`-typed or `.mp3`-suffixed entries are admissible; the rest
//! of the batch is ignored or, when nothing qualifies, the whole batch is
//! discarded so the caller can reset its file input.

use super::model::{Track, TrackSource};
use super::store::PlaylistStore;

/// One file offered by the upload widget.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// Display name as reported by the file picker.
    pub name: String,
    /// Declared MIME type, when the environment provides one.
    pub mime: Option<String>,
    /// Ephemeral source reference minted for the file object.
    pub source: TrackSource,
}

/// Outcome of ingesting an upload batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Every file was admitted.
    Full { added: usize },
    /// Some files were ignored; the admissible ones went in.
    Partial { added: usize, ignored: usize },
    /// Nothing admissible. The store is unchanged and the file input
    /// should be reset so the same files can be re-selected.
    Rejected,
}

fn admissible(candidate: &UploadCandidate) -> bool {
    if let Some(mime) = &candidate.mime {
        if mime.eq_ignore_ascii_case("audio/mpeg") {
            return true;
        }
    }
    candidate
        .name
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

fn track_from(candidate: &UploadCandidate) -> Track {
    let title = candidate
        .name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|s| !s.is_empty())
        .unwrap_or(&candidate.name)
        .to_string();
    Track::uploaded(title, candidate.source.clone())
}

/// Ingest a batch of upload candidates into `store`.
///
/// Admission is decided per candidate; duplicates of sources already in
/// the store are silently dropped by the dedup append, so `added` in the
/// report is the count actually inserted.
pub fn ingest(store: &mut PlaylistStore, batch: &[UploadCandidate]) -> Admission {
    let admitted: Vec<Track> = batch.iter().filter(|c| admissible(c)).map(track_from).collect();

    let ignored = batch.len() - admitted.len();
    if admitted.is_empty() {
        return Admission::Rejected;
    }

    let added = store.append(admitted);
    if ignored == 0 {
        Admission::Full { added }
    } else {
        Admission::Partial { added, ignored }
    }
}
