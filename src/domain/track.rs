use std::path::PathBuf;

use super::reference::VideoRef;

/// Represent one invocation's input: which video to fetch and how to tag it
#[derive(Debug, Clone)]
pub struct TrackRequest {
    pub reference: VideoRef,
    pub metadata: TrackMetadata,
}

impl TrackRequest {
    pub fn new(reference: VideoRef, metadata: TrackMetadata) -> Self {
        Self {
            reference,
            metadata,
        }
    }
}

/// Tag values to embed into the downloaded file.
///
/// Every field is optional: a missing field is removed from the file's tag,
/// so writing the same record twice always leaves identical tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub artwork: Option<ArtworkRef>,
}

impl TrackMetadata {
    /// Fills fields missing in `self` from `fallback`. Explicit values win.
    pub fn merge_defaults(self, fallback: TrackMetadata) -> Self {
        Self {
            title: self.title.or(fallback.title),
            artist: self.artist.or(fallback.artist),
            album: self.album.or(fallback.album),
            year: self.year.or(fallback.year),
            comment: self.comment.or(fallback.comment),
            description: self.description.or(fallback.description),
            artwork: self.artwork.or(fallback.artwork),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Where to take the cover image from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkRef {
    File(PathBuf),
    Url(String),
}

impl ArtworkRef {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for ArtworkRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtworkRef::File(path) => write!(f, "{}", path.to_string_lossy()),
            ArtworkRef::Url(url) => write!(f, "{url}"),
        }
    }
}
