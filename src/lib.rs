//! boombox: the playback and signal-graph engine of a retro music player.
//!
//! The crate owns three things: the playlist (built-in tracks plus user
//! uploads), the transport state machine (play/pause/seek/next/prev with
//! shuffle and repeat), and a live 3-band equalizer sitting between the
//! decoded media stream and the output device.
//!
//! The visual shell is a collaborator, not part of this crate: it calls the
//! [`Engine`] operations and renders the state the engine exposes.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod library;
pub mod media;

pub use engine::Engine;
pub use error::{EngineError, ErrorKind};
pub use graph::Band;
pub use library::{Track, TrackSource};
