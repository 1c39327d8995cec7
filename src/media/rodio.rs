//! `rodio`-backed media resources.
//!
//! Each opened track decodes into a paused `Sink`, optionally routed
//! through the equalizer tap. A ticker thread reports progress and
//! detects the end of the stream by watching the sink drain.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use lofty::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::error::EngineError;
use crate::graph::EqTap;
use crate::library::Track;

use super::{MediaBackend, MediaEvent, MediaResource};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Backend decoding local files through the default output device.
///
/// The output stream is opened on the first `open` call, not at
/// construction: device acquisition belongs to the first playback
/// attempt, mirroring the gesture-gated context rule.
pub struct RodioBackend {
    stream: Option<OutputStream>,
}

impl RodioBackend {
    pub fn new() -> Self {
        Self { stream: None }
    }

    fn ensure_stream(&mut self) -> Result<&OutputStream, EngineError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| EngineError::Playback(format!("no audio output device: {e}")))?;
            // rodio logs to stderr when OutputStream is dropped; noisy here.
            stream.log_on_drop(false);
            self.stream = Some(stream);
        }
        Ok(self.stream.as_ref().expect("stream just set"))
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn source_path(track: &Track) -> PathBuf {
    let uri = track.source.as_str();
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

impl MediaBackend for RodioBackend {
    type Resource = RodioResource;

    fn open(&mut self, track: &Track, tap: Option<EqTap>) -> Result<RodioResource, EngineError> {
        let path = source_path(track);
        let stream = self.ensure_stream()?;

        let file = File::open(&path)
            .map_err(|e| EngineError::Playback(format!("failed to open {}: {e}", path.display())))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| EngineError::Playback(format!("failed to decode {}: {e}", path.display())))?;

        let duration = track.duration.or_else(|| probe_duration(&path));

        let (events_tx, events_rx) = mpsc::channel::<MediaEvent>();
        if track.duration.is_none() {
            if let Some(d) = duration {
                // First successful metadata read for this source.
                let _ = events_tx.send(MediaEvent::Metadata { duration: d });
            }
        }

        let sink = Sink::connect_new(stream.mixer());
        match tap {
            Some(tap) => {
                let sample_rate = source.sample_rate() as f32;
                if let Ok(mut chain) = tap.lock() {
                    chain.set_sample_rate(sample_rate);
                }
                sink.append(EqSource::new(source, tap));
            }
            None => sink.append(source),
        }
        sink.pause();
        debug!(path = %path.display(), "opened media resource");

        let sink = Arc::new(sink);
        let clock = Arc::new(Mutex::new(Clock::default()));
        let stop = Arc::new(AtomicBool::new(false));
        spawn_ticker(sink.clone(), clock.clone(), events_tx, stop.clone());

        Ok(RodioResource {
            sink,
            clock,
            events: events_rx,
            duration,
            stop,
        })
    }
}

/// Elapsed-time accounting shared with the ticker thread.
#[derive(Default)]
struct Clock {
    base: Duration,
    started_at: Option<Instant>,
    playing: bool,
}

impl Clock {
    fn elapsed(&self) -> Duration {
        self.base + self.started_at.map_or(Duration::ZERO, |s| s.elapsed())
    }
}

fn spawn_ticker(
    sink: Arc<Sink>,
    clock: Arc<Mutex<Clock>>,
    events: Sender<MediaEvent>,
    stop: Arc<AtomicBool>,
) {
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_INTERVAL);
            if stop.load(Ordering::Relaxed) {
                break;
            }
            let Ok(clock) = clock.lock() else { break };
            if !clock.playing {
                continue;
            }
            if sink.empty() {
                let _ = events.send(MediaEvent::Ended);
                break;
            }
            if events.send(MediaEvent::Progress(clock.elapsed())).is_err() {
                break;
            }
        }
    });
}

pub struct RodioResource {
    sink: Arc<Sink>,
    clock: Arc<Mutex<Clock>>,
    events: Receiver<MediaEvent>,
    duration: Option<Duration>,
    stop: Arc<AtomicBool>,
}

impl MediaResource for RodioResource {
    fn play(&mut self) {
        self.sink.play();
        if let Ok(mut clock) = self.clock.lock() {
            if !clock.playing {
                clock.started_at = Some(Instant::now());
                clock.playing = true;
            }
        }
    }

    fn pause(&mut self) {
        self.sink.pause();
        if let Ok(mut clock) = self.clock.lock() {
            if clock.playing {
                clock.base = clock.elapsed();
                clock.started_at = None;
                clock.playing = false;
            }
        }
    }

    fn seek(&mut self, position: Duration) {
        match self.sink.try_seek(position) {
            Ok(()) => {
                if let Ok(mut clock) = self.clock.lock() {
                    clock.base = position;
                    clock.started_at = clock.playing.then(Instant::now);
                }
            }
            Err(e) => debug!("seek not supported for this source: {e}"),
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for RodioResource {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.sink.stop();
    }
}

/// Routes decoded samples through the shared filter chain.
///
/// The per-sample lock is uncontended except while a gain slider moves.
struct EqSource<S> {
    inner: S,
    tap: EqTap,
    frame_pos: u16,
}

impl<S: Source> EqSource<S> {
    fn new(inner: S, tap: EqTap) -> Self {
        Self {
            inner,
            tap,
            frame_pos: 0,
        }
    }
}

impl<S: Source> Iterator for EqSource<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.inner.next()?;
        let channels = self.inner.channels().max(1);
        let channel = self.frame_pos as usize;
        self.frame_pos = (self.frame_pos + 1) % channels;
        match self.tap.lock() {
            Ok(mut chain) => Some(chain.process(sample, channel)),
            Err(_) => Some(sample),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Source> Source for EqSource<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.inner.try_seek(pos)?;
        if let Ok(mut chain) = self.tap.lock() {
            chain.reset_state();
        }
        Ok(())
    }
}
