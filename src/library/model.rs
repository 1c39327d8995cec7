use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Locator for a track's media data.
///
/// Either a remote URL, a filesystem path, or an ephemeral blob-style
/// reference handed over by the upload widget. Two tracks are the same
/// track exactly when their sources are equal; display names never
/// participate in identity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrackSource(String);

impl TrackSource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercased extension of the final path segment, if any.
    /// Query strings and fragments are ignored, so `song.mp3?token=x`
    /// still reports `mp3`.
    pub fn extension(&self) -> Option<String> {
        let trimmed = self.0.split(['?', '#']).next().unwrap_or(&self.0);
        let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
        let (stem, ext) = segment.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Debug for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackSource({})", self.0)
    }
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A playable unit with metadata and a source locator.
#[derive(Clone)]
pub struct Track {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub source: TrackSource,
    /// Unknown for uploads until the first successful metadata read;
    /// built-in tracks carry an asserted duration.
    pub duration: Option<Duration>,
    pub user_uploaded: bool,
}

impl Track {
    /// A minimal track around a source, used for uploads before any
    /// metadata has loaded.
    pub fn uploaded(title: impl Into<String>, source: TrackSource) -> Self {
        Self {
            title: title.into(),
            artist: None,
            album: None,
            source,
            duration: None,
            user_uploaded: true,
        }
    }
}
