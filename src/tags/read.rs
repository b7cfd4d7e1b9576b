//! Read the primary tag of an audio file back into a `TrackMetadata`

use std::path::Path;

use lofty::{
    picture::{Picture, PictureType},
    prelude::*,
    tag::{ItemKey, Tag},
};

use crate::{domain::track::TrackMetadata, tags::error::TagWriteError};

/// Tag values found in a file. `metadata.artwork` is always `None`,
/// the embedded image is returned in `cover` instead.
#[derive(Debug, Clone, Default)]
pub struct StoredTags {
    pub metadata: TrackMetadata,
    pub cover: Option<Picture>,
}

pub fn read_tags(path: &Path) -> Result<StoredTags, TagWriteError> {
    let tagged_file = super::open_tagged(path)?;

    let Some(tag) = tagged_file.primary_tag() else {
        return Ok(StoredTags::default());
    };

    let metadata = metadata_from_tag(tag);
    let cover = tag
        .pictures()
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| tag.pictures().first())
        .cloned();

    Ok(StoredTags { metadata, cover })
}

pub(super) fn metadata_from_tag(tag: &Tag) -> TrackMetadata {
    TrackMetadata {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        year: tag.year(),
        comment: tag.comment().map(|s| s.to_string()),
        description: tag
            .get_string(&ItemKey::Description)
            .map(|s| s.to_string()),
        artwork: None,
    }
}
