//! Playback state observed by the shell.

use std::time::Duration;

use crate::error::ErrorKind;

/// Transport states of the playback controller.
///
/// `Ended` is terminal per track; end-of-track handling immediately
/// transitions out of it unless nothing can play next. Errors are
/// orthogonal: they live in `last_error` and clear on the next
/// successful track load.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    /// No playable entries.
    #[default]
    Idle,
    /// Has entries, nothing started yet.
    Ready,
    Playing,
    Paused,
    Ended,
}

/// The observable playback state. Mutated only by controller transitions
/// and the transport sync layer.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Index into the playable set, always kept below its length.
    pub current_index: usize,
    pub transport: Transport,
    pub position: Duration,
    pub shuffle: bool,
    pub repeat: bool,
    pub last_error: Option<ErrorKind>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: 0,
            transport: Transport::Idle,
            position: Duration::ZERO,
            shuffle: false,
            repeat: false,
            last_error: None,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }
}
