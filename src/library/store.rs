//! The playlist store.
//!
//! Ordered collection of built-in and user-added tracks. Built-in tracks
//! come first in their fixed order, uploads follow in upload order, and
//! no two tracks ever share a source.

use std::time::Duration;

use super::model::{Track, TrackSource};
use super::validate::CodecSupport;

pub struct PlaylistStore {
    builtin: Vec<Track>,
    uploads: Vec<Track>,
    support: CodecSupport,
}

impl PlaylistStore {
    /// Create a store seeded with the built-in tracks. Duplicate sources
    /// within the seed are dropped, keeping the first occurrence.
    pub fn new(builtin: Vec<Track>, support: CodecSupport) -> Self {
        let mut store = Self {
            builtin: Vec::new(),
            uploads: Vec::new(),
            support,
        };
        for track in builtin {
            if !store.contains_source(&track.source) {
                store.builtin.push(track);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.uploads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.uploads.is_empty()
    }

    pub fn contains_source(&self, source: &TrackSource) -> bool {
        self.iter().any(|t| &t.source == source)
    }

    /// All tracks in stable order: built-in first, then uploads.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.builtin.iter().chain(self.uploads.iter())
    }

    /// Append uploaded tracks, skipping any whose source already exists
    /// in the store or earlier in the same batch. Returns the number
    /// actually inserted.
    pub fn append(&mut self, tracks: Vec<Track>) -> usize {
        let mut added = 0;
        for track in tracks {
            if self.contains_source(&track.source) {
                continue;
            }
            self.uploads.push(track);
            added += 1;
        }
        added
    }

    /// The playable subsequence of the playlist, recomputed through the
    /// validator on every call. Stable-ordered so index-based selection
    /// stays meaningful across re-renders.
    pub fn playable_set(&self) -> Vec<Track> {
        self.iter()
            .filter(|t| self.support.is_playable(&t.source))
            .cloned()
            .collect()
    }

    /// Backfill an unknown duration after the first successful metadata
    /// read for `source`. A no-op when the duration is already known or
    /// the source is not in the store.
    pub fn resolve_duration(&mut self, source: &TrackSource, measured: Duration) {
        let found = self
            .builtin
            .iter_mut()
            .chain(self.uploads.iter_mut())
            .find(|t| &t.source == source);
        if let Some(track) = found {
            if track.duration.is_none() {
                track.duration = Some(measured);
            }
        }
    }
}
