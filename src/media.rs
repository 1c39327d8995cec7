//! The media resource boundary.
//!
//! The engine drives playback through this contract: a handle exposing
//! `play`/`pause`, a settable position, a readable duration, and a
//! drainable event stream. Any environment providing it is sufficient;
//! the shipped implementation decodes through `rodio`.
//!
//! Start/stop are fire-and-forget requests; outcomes arrive later as
//! events, never as return values.

use std::time::Duration;

use crate::error::EngineError;
use crate::graph::EqTap;
use crate::library::Track;

pub mod rodio;

/// Asynchronous reports from a media resource.
#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// Periodic position report while playing.
    Progress(Duration),
    /// The resource's metadata became readable.
    Metadata { duration: Duration },
    /// The resource reached its end.
    Ended,
    /// Resource-level failure (unreachable source, decode error).
    Error(String),
}

/// A playable media resource for one track.
pub trait MediaResource {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn duration(&self) -> Option<Duration>;
    /// Drain one pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}

/// Opens media resources for tracks.
pub trait MediaBackend {
    type Resource: MediaResource;

    /// Open a resource for `track`, routing its samples through `tap`
    /// when one is provided. The resource starts paused.
    fn open(&mut self, track: &Track, tap: Option<EqTap>) -> Result<Self::Resource, EngineError>;
}
