//! Engine settings: file + environment backed configuration.

mod load;
mod schema;

#[cfg(test)]
mod tests;

pub use load::{default_config_path, resolve_config_path};
pub use schema::{
    EqualizerSettings, LibrarySettings, PlaybackSettings, SentinelSettings, Settings,
};
