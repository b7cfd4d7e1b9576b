//! Video info as dumped by `yt-dlp --dump-json`

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    domain::track::{ArtworkRef, TrackMetadata},
    fetch::error::RetrievalError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    /// `YYYYMMDD`
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// listed from worst to best
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub description: Option<String>,
    /// e.g. `youtube`
    #[serde(default)]
    pub extractor: Option<String>,
    /// everything else yt-dlp reports, kept for `--metadata-only`
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VideoInfo {
    /// Default tag values derived from the video itself
    pub fn to_metadata(&self) -> TrackMetadata {
        TrackMetadata {
            title: Some(self.title.clone()),
            artist: self.channel.clone().or_else(|| self.uploader.clone()),
            album: None,
            year: self.upload_date.as_deref().and_then(upload_year),
            comment: self.webpage_url.clone(),
            description: self.description.clone(),
            artwork: self.cover_url().as_deref().map(ArtworkRef::parse),
        }
    }

    /// Best thumbnail that audio containers can embed as-is (JPEG or PNG).
    ///
    /// YouTube's default `thumbnail` is usually WebP; its JPEG renditions
    /// live under `i.ytimg.com/vi/<id>/`.
    pub fn cover_url(&self) -> Option<String> {
        if let Some(url) = self.thumbnail.as_deref().filter(|u| is_jpeg_or_png(u)) {
            return Some(url.to_string());
        }
        if let Some(thumb) = self.thumbnails.iter().rev().find(|t| is_jpeg_or_png(&t.url)) {
            return Some(thumb.url.clone());
        }
        if self
            .extractor
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("youtube"))
        {
            return Some(format!("{YTIMG_URL}{}/hqdefault.jpg", self.id));
        }
        None
    }
}

const YTIMG_URL: &str = "https://i.ytimg.com/vi/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn is_jpeg_or_png(url: &str) -> bool {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .to_ascii_lowercase();
    [".jpg", ".jpeg", ".png"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

fn upload_year(date: &str) -> Option<u32> {
    NaiveDate::parse_from_str(date, "%Y%m%d")
        .ok()
        .and_then(|d| u32::try_from(d.year()).ok())
}

/// Parses yt-dlp's stdout. A playlist yields one JSON document per line.
pub fn parse_info(stdout: &[u8]) -> Result<Vec<VideoInfo>, RetrievalError> {
    let infos = serde_json::Deserializer::from_slice(stdout)
        .into_iter::<VideoInfo>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(infos)
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::track::ArtworkRef,
        fetch::{error::RetrievalError, info::parse_info},
    };

    const SINGLE: &str = r#"{
        "id": "abc123",
        "title": "Some Video",
        "channel": "Some Channel",
        "uploader": "someuploader",
        "upload_date": "20190704",
        "webpage_url": "https://www.youtube.com/watch?v=abc123",
        "thumbnail": "https://i.ytimg.com/vi/abc123/maxresdefault.jpg",
        "description": "desc",
        "duration": 215,
        "view_count": 1000
    }"#;

    #[test]
    fn parses_single_video() {
        let infos = parse_info(SINGLE.as_bytes()).unwrap();
        assert_eq!(infos.len(), 1);

        let info = &infos[0];
        assert_eq!(info.id, "abc123");
        assert_eq!(info.extra.get("duration"), Some(&serde_json::json!(215)));

        let meta = info.to_metadata();
        assert_eq!(meta.title.as_deref(), Some("Some Video"));
        assert_eq!(meta.artist.as_deref(), Some("Some Channel"));
        assert_eq!(meta.year, Some(2019));
        assert_eq!(meta.description.as_deref(), Some("desc"));
        assert_eq!(
            meta.comment.as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
        assert_eq!(
            meta.artwork,
            Some(ArtworkRef::Url(
                "https://i.ytimg.com/vi/abc123/maxresdefault.jpg".to_string()
            ))
        );
    }

    #[test]
    fn parses_playlist_lines() {
        let stdout = "{\"id\":\"a\",\"title\":\"A\"}\n{\"id\":\"b\",\"title\":\"B\"}\n";
        let infos = parse_info(stdout.as_bytes()).unwrap();
        let ids: Vec<_> = infos.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn falls_back_to_uploader_and_ignores_bad_dates() {
        let stdout = r#"{"id":"x","title":"X","uploader":"up","upload_date":"sometime"}"#;
        let meta = parse_info(stdout.as_bytes()).unwrap()[0].to_metadata();
        assert_eq!(meta.artist.as_deref(), Some("up"));
        assert_eq!(meta.year, None);
        assert_eq!(meta.artwork, None);
    }

    #[test]
    fn webp_thumbnail_is_swapped_for_a_jpeg_rendition() {
        let stdout = r#"{
            "id": "abc123",
            "title": "X",
            "extractor": "youtube",
            "thumbnail": "https://i.ytimg.com/vi_webp/abc123/maxresdefault.webp",
            "thumbnails": [
                {"url": "https://i.ytimg.com/vi/abc123/default.jpg", "preference": -10},
                {"url": "https://i.ytimg.com/vi/abc123/sddefault.jpg?v=1", "preference": -5},
                {"url": "https://i.ytimg.com/vi_webp/abc123/maxresdefault.webp", "preference": 0}
            ]
        }"#;
        let info = parse_info(stdout.as_bytes()).unwrap().remove(0);

        assert_eq!(
            info.to_metadata().artwork,
            Some(ArtworkRef::Url(
                "https://i.ytimg.com/vi/abc123/sddefault.jpg?v=1".to_string()
            ))
        );
    }

    #[test]
    fn webp_only_youtube_video_falls_back_to_hqdefault() {
        let stdout = r#"{
            "id": "abc123",
            "title": "X",
            "extractor": "youtube",
            "thumbnail": "https://i.ytimg.com/vi_webp/abc123/maxresdefault.webp"
        }"#;
        let info = parse_info(stdout.as_bytes()).unwrap().remove(0);

        assert_eq!(
            info.cover_url().as_deref(),
            Some("https://i.ytimg.com/vi/abc123/hqdefault.jpg")
        );
    }

    #[test]
    fn webp_only_other_site_has_no_cover() {
        let stdout = r#"{"id":"x","title":"X","extractor":"vimeo","thumbnail":"https://example.com/t.webp"}"#;
        let info = parse_info(stdout.as_bytes()).unwrap().remove(0);
        assert_eq!(info.cover_url(), None);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_info(b"ERROR: not json").unwrap_err();
        assert!(matches!(err, RetrievalError::BadInfo(_)));
    }
}
