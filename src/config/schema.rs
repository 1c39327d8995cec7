use serde::Deserialize;

/// Top-level engine settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/boombox/config.toml` or
/// `~/.config/boombox/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BOOMBOX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub equalizer: EqualizerSettings,
    pub library: LibrarySettings,
    pub sentinel: SentinelSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-current-track starts enabled.
    pub repeat: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EqualizerSettings {
    /// Starting gain per band, in dB. Legal range is [-12, 12].
    pub bass_db: f32,
    pub mid_db: f32,
    pub treble_db: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions the runtime can decode (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

/// The known-good track the engine falls back to when nothing in the
/// playlist is playable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SentinelSettings {
    pub title: String,
    pub source: String,
}

impl Default for SentinelSettings {
    fn default() -> Self {
        Self {
            title: "Demo Loop".to_string(),
            source: "assets/demo-loop.mp3".to_string(),
        }
    }
}
