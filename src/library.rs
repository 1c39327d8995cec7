//! The track library: data model, source validation, the playlist store,
//! upload intake and the built-in library scanner.

mod intake;
mod model;
mod scan;
mod store;
mod validate;


pub use intake::{Admission, UploadCandidate, ingest};
pub use model::{Track, TrackSource};
pub use scan::scan;
pub use store::PlaylistStore;
pub use validate::CodecSupport;
