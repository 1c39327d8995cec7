//! Signal graph ownership: lazy context creation, source attach/detach
//! discipline, and live gain changes.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::EngineError;
use crate::library::TrackSource;

use super::filter::{Band, FilterChain, clamp_gain};

/// Shared handle to the filter chain. A media backend installs this into
/// its sample path; gain changes made through the manager take effect on
/// the next processed sample.
pub type EqTap = Arc<Mutex<FilterChain>>;

/// User-facing equalizer gains. Owned independently of playback state and
/// persisting across track changes within a session.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EqualizerState {
    pub bass_db: f32,
    pub mid_db: f32,
    pub treble_db: f32,
}

impl EqualizerState {
    pub fn gain(&self, band: Band) -> f32 {
        match band {
            Band::Bass => self.bass_db,
            Band::Mid => self.mid_db,
            Band::Treble => self.treble_db,
        }
    }

    fn set(&mut self, band: Band, db: f32) {
        match band {
            Band::Bass => self.bass_db = db,
            Band::Mid => self.mid_db = db,
            Band::Treble => self.treble_db = db,
        }
    }

    fn as_array(&self) -> [f32; 3] {
        [self.bass_db, self.mid_db, self.treble_db]
    }
}

/// Owns the processing context and enforces the one-source-at-a-time
/// attach discipline.
pub struct SignalGraph {
    /// Created on the first attach, never afterwards. Stands in for the
    /// gesture-gated audio context: construction must happen inside a
    /// user-initiated playback action.
    chain: Option<EqTap>,
    attached: Option<TrackSource>,
    equalizer: EqualizerState,
    /// Contexts start suspended; the sync layer resumes before playing.
    suspended: bool,
}

impl SignalGraph {
    pub fn new(defaults: EqualizerState) -> Self {
        let mut equalizer = EqualizerState::default();
        for band in Band::ALL {
            equalizer.set(band, clamp_gain(defaults.gain(band)));
        }
        Self {
            chain: None,
            attached: None,
            equalizer,
            suspended: true,
        }
    }

    pub fn has_context(&self) -> bool {
        self.chain.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Resume a suspended context. Must be called from the play path
    /// before a play request is issued.
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn equalizer(&self) -> EqualizerState {
        self.equalizer
    }

    pub fn attached_source(&self) -> Option<&TrackSource> {
        self.attached.as_ref()
    }

    /// Number of source nodes currently connected into the chain.
    /// The attach discipline keeps this at most one.
    pub fn connected_sources(&self) -> usize {
        usize::from(self.attached.is_some())
    }

    /// Ensure exactly one signal path exists for `source`.
    ///
    /// The first call creates the context and chain. Later calls
    /// disconnect the previous source before connecting the new one.
    /// Attaching the currently attached source again is a no-op and
    /// returns the existing tap without rewiring.
    pub fn attach(&mut self, source: &TrackSource) -> Result<EqTap, EngineError> {
        let tap = match &self.chain {
            Some(tap) => tap.clone(),
            None => {
                let tap: EqTap = Arc::new(Mutex::new(FilterChain::new(self.equalizer.as_array())));
                self.chain = Some(tap.clone());
                self.suspended = true;
                debug!("signal graph context created");
                tap
            }
        };

        if self.attached.as_ref() == Some(source) {
            return Ok(tap);
        }

        // Disconnect the old source before connecting the new one: at
        // most one source may feed the chain at any time.
        if let Some(old) = self.attached.take() {
            debug!(source = %old, "detached source node");
            tap.lock()
                .map_err(|_| EngineError::GraphConstruction("filter chain lock poisoned".into()))?
                .reset_state();
        }

        self.attached = Some(source.clone());
        debug!(source = %source, "attached source node");
        Ok(tap)
    }

    /// Clamp `db` into [-12, 12] and apply it live. Returns the value in
    /// effect. Works before the context exists; the chain is built with
    /// the recorded gains on first attach.
    pub fn set_gain(&mut self, band: Band, db: f32) -> f32 {
        let db = clamp_gain(db);
        self.equalizer.set(band, db);
        if let Some(tap) = &self.chain {
            if let Ok(mut chain) = tap.lock() {
                chain.set_gain(band, db);
            }
        }
        db
    }
}
