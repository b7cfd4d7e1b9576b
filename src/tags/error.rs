use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagWriteError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load artwork {reference}: {reason}")]
    Artwork { reference: String, reason: String },

    #[error("tag error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),
}

impl TagWriteError {
    /// Sorts a lofty failure on `path` into format and filesystem problems
    pub(crate) fn from_lofty(path: &std::path::Path, err: lofty::error::LoftyError) -> Self {
        use lofty::error::ErrorKind;

        match err.kind() {
            ErrorKind::UnknownFormat => Self::UnsupportedFormat(path.to_path_buf()),
            ErrorKind::Io(e) => Self::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(e.kind(), e.to_string()),
            },
            _ => Self::Lofty(err),
        }
    }
}
