//! Transport state machine transitions.
//!
//! Every transition here mutates only `PlaybackState`. Starting and
//! stopping the real media resource, and rewiring the signal graph, is
//! the sync layer's job: it observes this state and reconciles the
//! resource to match.

use std::time::Duration;

use rand::Rng;

use crate::error::ErrorKind;

use super::model::{PlaybackState, Transport};

impl PlaybackState {
    /// Select a track by index. Always legal: the index is taken modulo
    /// the playable set size, position resets and intent becomes play.
    pub fn select_track(&mut self, idx: usize, len: usize) {
        self.position = Duration::ZERO;
        if len == 0 {
            self.current_index = 0;
            self.transport = Transport::Idle;
            return;
        }
        self.current_index = idx % len;
        self.transport = Transport::Playing;
    }

    /// Flip play/pause intent. Never touches the current index.
    pub fn toggle_play_pause(&mut self) {
        self.transport = match self.transport {
            Transport::Playing => Transport::Paused,
            Transport::Paused | Transport::Ready | Transport::Ended => Transport::Playing,
            Transport::Idle => Transport::Idle,
        };
    }

    /// Advance to the next track. Returns whether playback should
    /// (re)start; a singleton set in shuffle mode cannot pick a
    /// different index, so the call is a no-op.
    pub fn advance(&mut self, len: usize) -> bool {
        self.step(len, 1)
    }

    /// Retreat to the previous track, wrapping to the end.
    pub fn retreat(&mut self, len: usize) -> bool {
        self.step(len, len.saturating_sub(1))
    }

    fn step(&mut self, len: usize, offset: usize) -> bool {
        if len == 0 {
            self.transport = Transport::Idle;
            return false;
        }
        if self.shuffle {
            if len == 1 {
                return false;
            }
            self.current_index = random_other_index(self.current_index, len);
        } else {
            self.current_index = (self.current_index + offset) % len;
        }
        self.position = Duration::ZERO;
        self.transport = Transport::Playing;
        true
    }

    /// End-of-track: with repeat on, stay on the current track from the
    /// top and keep playing; otherwise behave like `advance`. Returns
    /// whether playback should restart; when it should not, the
    /// transport parks in `Ended`.
    pub fn handle_track_ended(&mut self, len: usize) -> bool {
        if self.repeat && len > 0 {
            self.position = Duration::ZERO;
            self.transport = Transport::Playing;
            return true;
        }
        let restart = self.advance(len);
        if !restart && len > 0 {
            self.transport = Transport::Ended;
        }
        restart
    }

    /// Clamp a seek target into `[0, duration]` and record it. Play
    /// intent is untouched. Returns the clamped position.
    pub fn seek_position(&mut self, target: Duration, duration: Option<Duration>) -> Duration {
        let clamped = match duration {
            Some(d) => target.min(d),
            None => target,
        };
        self.position = clamped;
        clamped
    }

    /// Record a transport failure and force pause.
    pub fn report_error(&mut self, kind: ErrorKind) {
        self.last_error = Some(kind);
        if self.transport == Transport::Playing {
            self.transport = Transport::Paused;
        }
    }

    /// A track loaded successfully: clear the orthogonal error state.
    pub fn mark_loaded(&mut self) {
        self.last_error = None;
    }
}

/// Uniform pick over `[0, len)` excluding `current`. Requires `len > 1`.
fn random_other_index(current: usize, len: usize) -> usize {
    let mut pick = rand::rng().random_range(0..len - 1);
    if pick >= current {
        pick += 1;
    }
    pick
}
