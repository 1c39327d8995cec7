//! Engine error kinds.
//!
//! Every error here is recoverable at the engine boundary: it is surfaced
//! as observable state for the shell to render and never crashes playback.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The validator rejected every candidate source; the engine falls back
    /// to the sentinel track with transport disabled.
    #[error("no playable sources in the playlist")]
    SourceUnsupported,

    /// An upload batch contained no admissible files; the store is unchanged.
    #[error("no valid files in upload batch")]
    UploadRejected,

    /// Some files in an upload batch were ignored; the rest were admitted.
    #[error("some files in the upload batch were ignored")]
    UploadPartial,

    /// Resource-level playback failure (unreachable source, decode error).
    /// Forces pause; the user may retry by re-selecting the track.
    #[error("playback failed: {0}")]
    Playback(String),

    /// The equalizer graph could not be wired. Playback continues
    /// unfiltered with the previous graph, if any, left intact.
    #[error("equalizer graph construction failed: {0}")]
    GraphConstruction(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnsupported => ErrorKind::SourceUnsupported,
            Self::UploadRejected => ErrorKind::UploadRejected,
            Self::UploadPartial => ErrorKind::UploadPartial,
            Self::Playback(_) => ErrorKind::PlaybackError,
            Self::GraphConstruction(_) => ErrorKind::GraphConstructionFailed,
        }
    }
}

/// Lightweight error tag kept in `PlaybackState.last_error`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnsupported,
    UploadRejected,
    UploadPartial,
    PlaybackError,
    GraphConstructionFailed,
}
