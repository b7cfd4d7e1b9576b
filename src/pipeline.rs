//! The sequential workflow: resolve, fetch, then tag one Track Request

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    domain::track::{TrackMetadata, TrackRequest},
    fetch::{Fetcher, error::RetrievalError},
    tags::{self, error::TagWriteError},
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// the audio file was downloaded but its tags may be partially written
    #[error("{source} (downloaded file kept at {})", .path.to_string_lossy())]
    Tag {
        path: PathBuf,
        #[source]
        source: TagWriteError,
    },
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// fill fields missing from the request with the video's own info
    pub auto_metadata: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            auto_metadata: true,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug)]
pub struct TaggedTrack {
    pub path: PathBuf,
    pub metadata: TrackMetadata,
}

/// Resolves request metadata against the video info when asked to
pub fn resolve_metadata(
    fetcher: &dyn Fetcher,
    request: &TrackRequest,
    options: &RunOptions,
) -> Result<TrackMetadata, RetrievalError> {
    if !options.auto_metadata {
        return Ok(request.metadata.clone());
    }

    let infos = fetcher.info(&request.reference)?;
    match infos.as_slice() {
        [info] => {
            log::debug!("filling missing tags from video info of {}", info.id);
            Ok(request.metadata.clone().merge_defaults(info.to_metadata()))
        }
        [] => {
            log::warn!("no video info for {}", request.reference);
            Ok(request.metadata.clone())
        }
        many => Err(RetrievalError::Playlist {
            entries: many.len(),
        }),
    }
}

/// Fetches the audio for `request` and writes its tags
pub fn run_request(
    fetcher: &dyn Fetcher,
    request: &TrackRequest,
    options: &RunOptions,
) -> Result<TaggedTrack, PipelineError> {
    let metadata = resolve_metadata(fetcher, request, options)?;

    log::info!("fetching {}", request.reference);
    let path = fetcher.fetch(&request.reference)?;

    tag_file(&path, &metadata)?;
    Ok(TaggedTrack { path, metadata })
}

/// Writes `metadata` into an existing file. An empty record clears its tags.
pub fn tag_file(path: &Path, metadata: &TrackMetadata) -> Result<(), PipelineError> {
    if metadata.is_empty() {
        log::warn!("no metadata given, clearing tags of {}", path.to_string_lossy());
    }

    tags::write_tags(path, metadata).map_err(|source| PipelineError::Tag {
        path: path.to_path_buf(),
        source,
    })
}
