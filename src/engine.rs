//! The playback engine.
//!
//! Ties the playlist store, the transport state machine, the signal
//! graph and the media backend together behind one facade. The shell
//! reads the engine's observable state and calls its operations; nothing
//! else mutates playback.

mod controller;
mod model;
mod sync;


pub use model::{PlaybackState, Transport};
pub use sync::{SyncEvent, TransportSync};

use std::time::Duration;

use tracing::warn;

use crate::config::Settings;
use crate::error::ErrorKind;
use crate::graph::{Band, EqualizerState, SignalGraph};
use crate::library::{
    Admission, CodecSupport, PlaylistStore, Track, TrackSource, UploadCandidate, ingest,
};
use crate::media::MediaBackend;

pub struct Engine<B: MediaBackend> {
    store: PlaylistStore,
    /// Cached playable set; refreshed whenever the store changes.
    playable: Vec<Track>,
    state: PlaybackState,
    graph: SignalGraph,
    backend: B,
    sync: TransportSync<B::Resource>,
    /// Known-good fallback shown when nothing in the store is playable.
    sentinel: Track,
}

impl<B: MediaBackend> Engine<B> {
    pub fn new(settings: &Settings, builtin: Vec<Track>, backend: B) -> Self {
        let support = CodecSupport::with_extensions(&settings.library.extensions);
        let store = PlaylistStore::new(builtin, support);

        let mut state = PlaybackState::default();
        state.shuffle = settings.playback.shuffle;
        state.repeat = settings.playback.repeat;

        let graph = SignalGraph::new(EqualizerState {
            bass_db: settings.equalizer.bass_db,
            mid_db: settings.equalizer.mid_db,
            treble_db: settings.equalizer.treble_db,
        });

        let sentinel = Track {
            title: settings.sentinel.title.clone(),
            artist: None,
            album: None,
            source: TrackSource::new(settings.sentinel.source.clone()),
            duration: None,
            user_uploaded: false,
        };

        let mut engine = Self {
            store,
            playable: Vec::new(),
            state,
            graph,
            backend,
            sync: TransportSync::new(),
            sentinel,
        };
        engine.refresh_playable();
        engine
    }

    // ---- observable state -------------------------------------------------

    pub fn playback_state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn equalizer(&self) -> EqualizerState {
        self.graph.equalizer()
    }

    /// The playable set transport indices address.
    pub fn playable_set(&self) -> &[Track] {
        &self.playable
    }

    /// The full playlist, playable or not.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.store.iter()
    }

    /// The track the transport currently addresses; the sentinel when
    /// the playable set is empty.
    pub fn current_track(&self) -> &Track {
        self.playable
            .get(self.state.current_index)
            .unwrap_or(&self.sentinel)
    }

    // ---- transport operations --------------------------------------------

    pub fn select_track(&mut self, idx: usize) {
        self.state.select_track(idx, self.playable.len());
        if !self.playable.is_empty() {
            self.start_current();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let was_playing = self.state.is_playing();
        let was_ended = self.state.transport == Transport::Ended;
        self.state.toggle_play_pause();
        if self.state.is_playing() && !was_playing {
            if self.sync.has_resource() && !was_ended {
                // Suspended contexts must resume before a play request.
                self.graph.resume();
                self.sync.play();
            } else {
                // A drained resource cannot restart; reload from the top.
                self.state.position = Duration::ZERO;
                self.start_current();
            }
        } else if was_playing && !self.state.is_playing() {
            self.sync.pause();
        }
    }

    pub fn next(&mut self) {
        if self.state.advance(self.playable.len()) {
            self.start_current();
        }
    }

    pub fn previous(&mut self) {
        if self.state.retreat(self.playable.len()) {
            self.start_current();
        }
    }

    /// Clamp and apply a seek. Play/pause intent is untouched.
    pub fn seek(&mut self, target: Duration) {
        let duration = self.sync.duration().or(self.current_track().duration);
        let clamped = self.state.seek_position(target, duration);
        self.sync.seek(clamped);
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.state.shuffle = on;
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
    }

    pub fn set_repeat(&mut self, on: bool) {
        self.state.repeat = on;
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = !self.state.repeat;
    }

    /// Clamp `db` into [-12, 12] and apply it to the band's filter node
    /// without interrupting playback. Returns the value in effect.
    pub fn set_gain(&mut self, band: Band, db: f32) -> f32 {
        self.graph.set_gain(band, db)
    }

    // ---- playlist operations ----------------------------------------------

    /// Ingest an upload batch. Admission outcomes surface in
    /// `last_error`: `UploadRejected` for an all-invalid batch (the
    /// caller resets its file input), `UploadPartial` when some files
    /// were ignored.
    pub fn upload(&mut self, batch: &[UploadCandidate]) -> Admission {
        let report = ingest(&mut self.store, batch);
        self.refresh_playable();
        match report {
            Admission::Rejected => self.state.last_error = Some(ErrorKind::UploadRejected),
            Admission::Partial { .. } => self.state.last_error = Some(ErrorKind::UploadPartial),
            Admission::Full { .. } => {
                // A clean batch supersedes an earlier admission complaint.
                if let Some(ErrorKind::UploadRejected | ErrorKind::UploadPartial) =
                    self.state.last_error
                {
                    self.state.last_error = None;
                }
            }
        }
        report
    }

    // ---- event pump -------------------------------------------------------

    /// Drain pending media events and fold them into playback state.
    /// Call from the host's event loop.
    pub fn pump(&mut self) {
        for event in self.sync.pump() {
            match event {
                SyncEvent::Position(p) => self.state.position = p,
                SyncEvent::Metadata { source, duration } => {
                    self.store.resolve_duration(&source, duration);
                    if let Some(track) = self.playable.iter_mut().find(|t| t.source == source) {
                        if track.duration.is_none() {
                            track.duration = Some(duration);
                        }
                    }
                }
                SyncEvent::Ended => self.handle_ended(),
                SyncEvent::Failed(msg) => {
                    warn!(error = %msg, "media resource failed");
                    self.state.report_error(ErrorKind::PlaybackError);
                    self.sync.pause();
                }
            }
        }
    }

    // ---- internals --------------------------------------------------------

    /// Load and start the current track: attach the signal graph (or
    /// degrade to unfiltered output), swap the media resource, resume
    /// the context, then play.
    fn start_current(&mut self) {
        let Some(track) = self.playable.get(self.state.current_index).cloned() else {
            return;
        };

        let tap = match self.graph.attach(&track.source) {
            Ok(tap) => Some(tap),
            Err(e) => {
                // Unfiltered playback beats silence.
                warn!(error = %e, "equalizer wiring failed, playing unfiltered");
                None
            }
        };

        match self.sync.load(&mut self.backend, &track, tap) {
            Ok(()) => {
                self.state.mark_loaded();
                self.graph.resume();
                self.sync.play();
                self.state.transport = Transport::Playing;
            }
            Err(e) => {
                warn!(source = %track.source, error = %e, "failed to load track");
                self.state.report_error(e.kind());
            }
        }
    }

    /// Auto-advance always runs on track end, regardless of prior errors.
    /// With repeat on this reloads the same track from the top; the
    /// drained resource cannot be rewound by seeking.
    fn handle_ended(&mut self) {
        if self.state.handle_track_ended(self.playable.len()) {
            self.start_current();
        }
    }

    fn refresh_playable(&mut self) {
        self.playable = self.store.playable_set();
        if self.playable.is_empty() {
            self.state.current_index = 0;
            self.state.transport = Transport::Idle;
            if !self.store.is_empty() {
                self.state.last_error = Some(ErrorKind::SourceUnsupported);
            }
            return;
        }
        if self.state.current_index >= self.playable.len() {
            self.state.current_index %= self.playable.len();
        }
        if self.state.transport == Transport::Idle {
            self.state.transport = Transport::Ready;
            if self.state.last_error == Some(ErrorKind::SourceUnsupported) {
                self.state.last_error = None;
            }
        }
    }
}
