//! Transport sync: bridges a media resource's event stream into the
//! controller's observable state.
//!
//! Loading a new track pauses the superseded resource (cancelling any
//! pending start) and drops it together with its event queue. Only the
//! currently attached resource is ever polled, so a stale event can
//! never mutate state on behalf of an older track.

use std::time::Duration;

use tracing::debug;

use crate::error::EngineError;
use crate::graph::EqTap;
use crate::library::{Track, TrackSource};
use crate::media::{MediaBackend, MediaEvent, MediaResource};

pub struct TransportSync<R> {
    active: Option<Active<R>>,
}

struct Active<R> {
    resource: R,
    source: TrackSource,
}

/// Events surfaced to the engine from the attached resource.
#[derive(Debug)]
pub enum SyncEvent {
    Position(Duration),
    Metadata {
        source: TrackSource,
        duration: Duration,
    },
    Ended,
    Failed(String),
}

impl<R: MediaResource> TransportSync<R> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn has_resource(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_source(&self) -> Option<&TrackSource> {
        self.active.as_ref().map(|a| &a.source)
    }

    /// Attach to the media resource for `track`, detaching the previous
    /// one first. The old resource is paused before it is dropped so a
    /// pending start on it cannot land after the switch, and its event
    /// queue dies with it.
    pub fn load<B>(
        &mut self,
        backend: &mut B,
        track: &Track,
        tap: Option<EqTap>,
    ) -> Result<(), EngineError>
    where
        B: MediaBackend<Resource = R>,
    {
        self.detach();
        let resource = backend.open(track, tap)?;
        debug!(source = %track.source, "transport attached");
        self.active = Some(Active {
            resource,
            source: track.source.clone(),
        });
        Ok(())
    }

    /// Detach from the current resource, pausing it first.
    pub fn detach(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.resource.pause();
            debug!(source = %active.source, "transport detached");
        }
    }

    pub fn play(&mut self) {
        if let Some(active) = &mut self.active {
            active.resource.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(active) = &mut self.active {
            active.resource.pause();
        }
    }

    pub fn seek(&mut self, position: Duration) {
        if let Some(active) = &mut self.active {
            active.resource.seek(position);
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.active.as_ref().and_then(|a| a.resource.duration())
    }

    /// Drain pending events from the attached resource.
    pub fn pump(&mut self) -> Vec<SyncEvent> {
        let Some(active) = &mut self.active else {
            return Vec::new();
        };

        let mut out = Vec::new();
        while let Some(event) = active.resource.poll_event() {
            out.push(match event {
                MediaEvent::Progress(p) => SyncEvent::Position(p),
                MediaEvent::Metadata { duration } => SyncEvent::Metadata {
                    source: active.source.clone(),
                    duration,
                },
                MediaEvent::Ended => SyncEvent::Ended,
                MediaEvent::Error(msg) => SyncEvent::Failed(msg),
            });
        }
        out
    }
}
