//! Cover art loading: local image files or http(s) thumbnails

use std::path::Path;

use lofty::picture::{MimeType, Picture, PictureType};

use crate::{domain::track::ArtworkRef, tags::error::TagWriteError};

/// Loads `artwork` into a front-cover picture
pub fn load_artwork(artwork: &ArtworkRef) -> Result<Picture, TagWriteError> {
    let (data, name) = match artwork {
        ArtworkRef::File(path) => {
            let data = std::fs::read(path).map_err(|source| TagWriteError::Io {
                path: path.clone(),
                source,
            })?;
            (data, path.to_string_lossy().to_string())
        }
        ArtworkRef::Url(url) => (download(url)?, url.clone()),
    };

    let mime = sniff_mime(&data)
        .or_else(|| guess_mime(&name))
        .ok_or_else(|| TagWriteError::Artwork {
            reference: artwork.to_string(),
            reason: "not an image".to_string(),
        })?;
    if !is_embeddable(&mime) {
        return Err(TagWriteError::Artwork {
            reference: artwork.to_string(),
            reason: format!("unsupported image format {}, use JPEG or PNG", mime.as_str()),
        });
    }

    log::debug!(
        "loaded {} bytes of {} artwork from {artwork}",
        data.len(),
        mime.as_str()
    );
    Ok(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(mime),
        None,
        data,
    ))
}

fn download(url: &str) -> Result<Vec<u8>, TagWriteError> {
    let to_err = |e: reqwest::Error| TagWriteError::Artwork {
        reference: url.to_string(),
        reason: e.to_string(),
    };

    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(to_err)?;
    Ok(response.bytes().map_err(to_err)?.to_vec())
}

/// Formats every supported container (MP4 `covr` included) can store
fn is_embeddable(mime: &MimeType) -> bool {
    matches!(
        mime,
        MimeType::Png | MimeType::Jpeg | MimeType::Gif | MimeType::Bmp
    )
}

/// Detects the image type from its leading bytes
fn sniff_mime(data: &[u8]) -> Option<MimeType> {
    match data {
        [0x89, b'P', b'N', b'G', ..] => Some(MimeType::Png),
        [0xFF, 0xD8, 0xFF, ..] => Some(MimeType::Jpeg),
        [b'G', b'I', b'F', b'8', ..] => Some(MimeType::Gif),
        [b'B', b'M', ..] => Some(MimeType::Bmp),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(MimeType::Tiff),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
            Some(MimeType::Unknown("image/webp".to_string()))
        }
        _ => None,
    }
}

/// Falls back to the file extension, ignoring any url query
fn guess_mime(name: &str) -> Option<MimeType> {
    let name = name.split(['?', '#']).next().unwrap_or(name);
    let guess = mime_guess::from_path(Path::new(name)).first()?;
    if guess.type_() != mime_guess::mime::IMAGE {
        return None;
    }
    Some(match guess.subtype().as_str() {
        "png" => MimeType::Png,
        "jpeg" => MimeType::Jpeg,
        "gif" => MimeType::Gif,
        "bmp" => MimeType::Bmp,
        "tiff" => MimeType::Tiff,
        _ => MimeType::Unknown(guess.essence_str().to_string()),
    })
}
