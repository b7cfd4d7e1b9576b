//! Resolver/Fetcher: turns a video reference into a local audio file

use std::path::PathBuf;

use crate::domain::reference::VideoRef;

pub mod error;
pub mod info;
pub mod ytdlp;

use error::RetrievalError;
use info::VideoInfo;

/// External video retrieval capability
pub trait Fetcher {
    /// Downloads the best available audio for `reference`, returns the local file
    fn fetch(&self, reference: &VideoRef) -> Result<PathBuf, RetrievalError>;

    /// Video info without downloading. Playlists yield one entry per video.
    fn info(&self, reference: &VideoRef) -> Result<Vec<VideoInfo>, RetrievalError>;
}

/// Checks that the fetched file exists and is non-empty
pub(crate) fn ensure_downloaded(path: PathBuf) -> Result<PathBuf, RetrievalError> {
    let meta = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RetrievalError::MissingOutput(path));
        }
        Err(e) => return Err(e.into()),
    };

    if !meta.is_file() {
        return Err(RetrievalError::MissingOutput(path));
    }
    if meta.len() == 0 {
        return Err(RetrievalError::EmptyOutput(path));
    }
    Ok(path)
}
