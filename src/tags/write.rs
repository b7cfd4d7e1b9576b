//! Write a `TrackMetadata` into the primary tag of an audio file.

use std::path::Path;

use lofty::{
    config::WriteOptions,
    picture::{Picture, PictureType},
    prelude::*,
    tag::{ItemKey, Tag},
};

use crate::{
    domain::track::TrackMetadata,
    tags::{art::load_artwork, error::TagWriteError},
};

/// Helper: set a text field or drop it when the record has nothing
fn set_text_opt(
    tag: &mut Tag,
    v: &Option<String>,
    set: fn(&mut Tag, String),
    remove: fn(&mut Tag),
) {
    match v.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => set(tag, s.to_string()),
        _ => remove(tag),
    }
}

/// Overwrites the file's tag fields with `metadata`, in place.
///
/// Fields missing from `metadata` are removed. Artwork is loaded before the
/// file is opened, so a bad image leaves the audio file untouched.
pub fn write_tags(path: &Path, metadata: &TrackMetadata) -> Result<(), TagWriteError> {
    let picture = metadata.artwork.as_ref().map(load_artwork).transpose()?;

    let mut tagged_file = super::open_tagged(path)?;
    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.primary_tag().is_none() {
        log::debug!(
            "{} has no {tag_type:?} tag, creating one",
            path.to_string_lossy()
        );
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .primary_tag_mut()
        .ok_or_else(|| TagWriteError::UnsupportedFormat(path.to_path_buf()))?;

    apply_metadata(tag, metadata, picture);

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| TagWriteError::from_lofty(path, e))?;

    log::info!("wrote tags to {}", path.to_string_lossy());
    Ok(())
}

/// Replaces every field `write_tags` manages, leaving other items alone
pub(super) fn apply_metadata(tag: &mut Tag, metadata: &TrackMetadata, picture: Option<Picture>) {
    set_text_opt(tag, &metadata.title, Tag::set_title, Tag::remove_title);
    set_text_opt(tag, &metadata.artist, Tag::set_artist, Tag::remove_artist);
    set_text_opt(tag, &metadata.album, Tag::set_album, Tag::remove_album);
    set_text_opt(tag, &metadata.comment, Tag::set_comment, Tag::remove_comment);
    set_text_opt(
        tag,
        &metadata.description,
        |tag, value| {
            tag.insert_text(ItemKey::Description, value);
        },
        |tag| {
            tag.remove_key(&ItemKey::Description);
        },
    );
    match metadata.year {
        Some(year) => tag.set_year(year),
        None => tag.remove_year(),
    }

    // yt-dlp embeds thumbnails without a picture type
    tag.remove_picture_type(PictureType::CoverFront);
    tag.remove_picture_type(PictureType::Other);
    if let Some(picture) = picture {
        tag.push_picture(picture);
    }
}
