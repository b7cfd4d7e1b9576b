//! Tag Writer: embeds a [`TrackMetadata`](crate::domain::track::TrackMetadata) into an audio file.
//!
//! Public API:
//! - [`write_tags`] overwrites the file's primary tag in place.
//! - [`read_tags`] reads the primary tag back.

mod art;
pub mod error;
mod read;
mod write;

pub use read::{StoredTags, read_tags};
pub use write::write_tags;

#[cfg(test)]
pub(crate) mod testutil;

use std::path::Path;

use lofty::{file::TaggedFile, probe::Probe};

use error::TagWriteError;

/// Opens `path` and detects its container from content, not extension
fn open_tagged(path: &Path) -> Result<TaggedFile, TagWriteError> {
    std::fs::metadata(path).map_err(|source| TagWriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let probe = Probe::open(path)
        .map_err(|e| TagWriteError::from_lofty(path, e))?
        .guess_file_type()
        .map_err(|source| TagWriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    probe.read().map_err(|e| TagWriteError::from_lofty(path, e))
}
