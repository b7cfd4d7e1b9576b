//! Fetcher backed by the `yt-dlp` executable

use std::{
    ffi::OsStr,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

use crate::{
    config::YtDlpConfig,
    domain::reference::VideoRef,
    fetch::{Fetcher, ensure_downloaded, error::RetrievalError, info, info::VideoInfo},
};

const BINARY_NAME: &str = "yt-dlp";

pub struct YtDlp {
    binary: PathBuf,
    config: YtDlpConfig,
}

impl YtDlp {
    /// Locates the executable: configured path first, then PATH
    pub fn new(config: YtDlpConfig) -> Result<Self, RetrievalError> {
        let wanted = config
            .binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(BINARY_NAME));
        let binary = which::which(&wanted).map_err(|e| {
            RetrievalError::ToolNotFound(format!("{} ({e})", wanted.to_string_lossy()))
        })?;
        log::debug!("using yt-dlp at {}", binary.to_string_lossy());
        Ok(Self { binary, config })
    }

    /// Writes the video thumbnail next to where the audio would go
    pub fn download_thumbnail(&self, reference: &VideoRef) -> Result<(), RetrievalError> {
        self.prepare_output_dir()?;
        let mut cmd = self.command();
        cmd.arg("--write-thumbnail")
            .arg("--skip-download")
            .arg("--no-playlist")
            .arg("-P")
            .arg(&self.config.output_dir)
            .arg("-o")
            .arg(&self.config.output_template)
            .arg(reference.to_url());
        self.run(cmd)?;
        Ok(())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn prepare_output_dir(&self) -> Result<(), RetrievalError> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        Ok(())
    }

    fn run(&self, mut cmd: Command) -> Result<Output, RetrievalError> {
        log::debug!(
            "running {} {}",
            self.binary.to_string_lossy(),
            cmd.get_args()
                .map(OsStr::to_string_lossy)
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = cmd.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                RetrievalError::ToolNotFound(self.binary.to_string_lossy().to_string())
            }
            _ => RetrievalError::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("yt-dlp failed: {stderr}");
            return Err(RetrievalError::ToolFailed {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(output)
    }
}

impl Fetcher for YtDlp {
    fn fetch(&self, reference: &VideoRef) -> Result<PathBuf, RetrievalError> {
        self.prepare_output_dir()?;

        let mut cmd = self.command();
        cmd.arg("--extract-audio")
            .arg("--audio-format")
            .arg(&self.config.audio_format)
            .arg("--no-playlist")
            .arg("--no-progress");
        if self.config.embed_thumbnail {
            cmd.arg("--embed-thumbnail");
        }
        if self.config.add_metadata {
            cmd.arg("--add-metadata");
        }
        cmd.arg("-P")
            .arg(&self.config.output_dir)
            .arg("-o")
            .arg(&self.config.output_template)
            .arg("--print")
            .arg("after_move:filepath")
            .arg("--no-simulate")
            .arg(reference.to_url());

        let output = self.run(cmd)?;
        let mut paths = downloaded_paths(&output.stdout);
        let path = match paths.len() {
            0 => return Err(RetrievalError::NoOutputPath),
            1 => paths.remove(0),
            _ => return Err(RetrievalError::MultipleDownloads(paths)),
        };
        log::info!("downloaded {reference} to {}", path.to_string_lossy());
        ensure_downloaded(path)
    }

    fn info(&self, reference: &VideoRef) -> Result<Vec<VideoInfo>, RetrievalError> {
        let mut cmd = self.command();
        cmd.arg("--dump-json")
            .arg("--no-playlist")
            .arg("--skip-download")
            .arg(reference.to_url());

        let output = self.run(cmd)?;
        info::parse_info(&output.stdout)
    }
}

/// One `after_move:filepath` line per downloaded file; `[extractor]` log lines are skipped
fn downloaded_paths(stdout: &[u8]) -> Vec<PathBuf> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(PathBuf::from)
        .collect()
}
