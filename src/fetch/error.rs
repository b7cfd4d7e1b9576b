use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid video reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("yt-dlp executable not found: {0}")]
    ToolNotFound(String),

    #[error("yt-dlp exited with {}: {stderr}", describe_exit(.code))]
    ToolFailed { code: Option<i32>, stderr: String },

    #[error("yt-dlp did not report a downloaded file")]
    NoOutputPath,

    #[error("reference is a playlist with {entries} videos, pass a single video")]
    Playlist { entries: usize },

    #[error("yt-dlp downloaded {} files, expected one", .0.len())]
    MultipleDownloads(Vec<PathBuf>),

    #[error("downloaded file {0} does not exist")]
    MissingOutput(PathBuf),

    #[error("downloaded file {0} is empty")]
    EmptyOutput(PathBuf),

    #[error("failed to parse video info: {0}")]
    BadInfo(#[from] serde_json::Error),

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("code {c}"),
        None => "signal".to_string(),
    }
}
