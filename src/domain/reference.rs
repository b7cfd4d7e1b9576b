use std::fmt::Display;

use url::Url;

use crate::fetch::error::RetrievalError;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// A video reference as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoRef {
    /// bare video id, e.g. `dQw4w9WgXcQ`
    Id(String),
    /// full http(s) url, passed to yt-dlp untouched
    Url(Url),
}

impl VideoRef {
    pub fn parse(input: &str) -> Result<Self, RetrievalError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RetrievalError::InvalidReference {
                reference: input.to_string(),
                reason: "reference is empty".to_string(),
            });
        }

        if is_video_id(input) {
            return Ok(Self::Id(input.to_string()));
        }

        match Url::parse(input) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Self::Url(url)),
            Ok(url) => Err(RetrievalError::InvalidReference {
                reference: input.to_string(),
                reason: format!("unsupported url scheme '{}'", url.scheme()),
            }),
            Err(e) => Err(RetrievalError::InvalidReference {
                reference: input.to_string(),
                reason: format!("neither a video id nor a url ({e})"),
            }),
        }
    }

    /// url handed to the retrieval tool
    pub fn to_url(&self) -> String {
        match self {
            VideoRef::Id(id) => format!("{WATCH_URL}{id}"),
            VideoRef::Url(url) => url.to_string(),
        }
    }
}

impl Display for VideoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoRef::Id(id) => write!(f, "{id}"),
            VideoRef::Url(url) => write!(f, "{url}"),
        }
    }
}

fn is_video_id(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use crate::{domain::reference::VideoRef, fetch::error::RetrievalError};

    #[test]
    fn parse_bare_id() {
        let r = VideoRef::parse("abc123").unwrap();
        assert_eq!(r, VideoRef::Id("abc123".to_string()));
        assert_eq!(r.to_url(), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn parse_trims_whitespace() {
        let r = VideoRef::parse("  dQw4w9WgXcQ\n").unwrap();
        assert_eq!(r, VideoRef::Id("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn parse_url() {
        let r = VideoRef::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert!(matches!(r, VideoRef::Url(_)));
        assert_eq!(r.to_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn empty_reference_is_rejected() {
        let err = VideoRef::parse("").unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidReference { .. }));

        let err = VideoRef::parse("   ").unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidReference { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = VideoRef::parse("ftp://example.com/video").unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidReference { .. }));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = VideoRef::parse("not a video").unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidReference { .. }));
    }
}
