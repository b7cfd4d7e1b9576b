use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{self, Config, YtDlpConfig};
use crate::domain::{
    reference::VideoRef,
    track::{ArtworkRef, TrackMetadata, TrackRequest},
};
use crate::fetch::{Fetcher, error::RetrievalError, ytdlp::YtDlp};
use crate::pipeline::{self, PipelineError, RunOptions};
use crate::tags::{self, error::TagWriteError};

pub const EXIT_RETRIEVAL: u8 = 1;
pub const EXIT_TAG: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "ytmeta")]
#[command(version = "0.1")]
#[command(about = "Download audio from YouTube videos and tag it with music metadata")]
#[command(group(
    ArgGroup::new("mode")
        .args(["metadata_only", "download_thumbnail", "tag_file", "show_tags"])
        .multiple(false)
))]
pub struct Cli {
    /// URL or id of the YouTube video
    #[arg(required_unless_present = "show_tags")]
    pub reference: Option<String>,

    /// Track title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Track artist
    #[arg(short, long)]
    pub artist: Option<String>,

    /// Album name
    #[arg(short = 'A', long)]
    pub album: Option<String>,

    /// Release year
    #[arg(short, long)]
    pub year: Option<u32>,

    /// Comment tag
    #[arg(long)]
    pub comment: Option<String>,

    /// Description tag, e.g. the video description
    #[arg(long)]
    pub description: Option<String>,

    /// Cover image: local file or http(s) url
    #[arg(long)]
    pub artwork: Option<String>,

    /// Do not fill missing tags from the video's title, channel, date and thumbnail
    #[arg(long)]
    pub no_auto_metadata: bool,

    /// yt-dlp output template, e.g. "%(channel)s - %(title)s.%(ext)s"
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory to save files to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Audio format yt-dlp converts to (m4a, mp3, opus, flac, ...)
    #[arg(long)]
    pub audio_format: Option<String>,

    /// Only print the video metadata as JSON, do not download
    #[arg(long)]
    pub metadata_only: bool,

    /// Only download the video thumbnail
    #[arg(long)]
    pub download_thumbnail: bool,

    /// Write tags to an existing audio file instead of downloading
    #[arg(long, value_name = "FILE")]
    pub tag_file: Option<PathBuf>,

    /// Print the tags of an audio file and exit
    #[arg(long, value_name = "FILE")]
    pub show_tags: Option<PathBuf>,

    /// Path to the config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" (overrides config and RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Metadata record given on the command line
    pub fn metadata(&self) -> TrackMetadata {
        TrackMetadata {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            year: self.year,
            comment: self.comment.clone(),
            description: self.description.clone(),
            artwork: self.artwork.as_deref().map(ArtworkRef::parse),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            auto_metadata: !self.no_auto_metadata,
        }
    }

    /// Config values with command line overrides applied
    pub fn ytdlp_config(&self, base: &YtDlpConfig) -> YtDlpConfig {
        let mut cfg = base.clone();
        if let Some(template) = &self.output {
            cfg.output_template = template.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(format) = &self.audio_format {
            cfg.audio_format = format.clone();
        }
        cfg
    }

    fn reference(&self) -> Result<VideoRef, RetrievalError> {
        VideoRef::parse(self.reference.as_deref().unwrap_or_default())
    }
}

/// Entrypoint for CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match Config::load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_logging(cli.log_level.as_deref().or(cfg.logging.level.as_deref()));

    match execute(&cli, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        }
    };
    builder.format_target(false).init();
}

fn execute(cli: &Cli, cfg: &config::Config) -> anyhow::Result<()> {
    if let Some(path) = &cli.show_tags {
        return show_tags(path);
    }

    let reference = cli.reference()?;
    // only modes that talk to yt-dlp need the executable
    let ytdlp = || YtDlp::new(cli.ytdlp_config(&cfg.ytdlp));

    if cli.metadata_only {
        let infos = ytdlp()?.info(&reference)?;
        let json = match infos.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        println!("{json}");
        return Ok(());
    }

    if cli.download_thumbnail {
        ytdlp()?.download_thumbnail(&reference)?;
        println!("Thumbnail for {reference} saved");
        return Ok(());
    }

    let request = TrackRequest::new(reference, cli.metadata());

    if let Some(path) = &cli.tag_file {
        let options = cli.run_options();
        let metadata = if options.auto_metadata {
            pipeline::resolve_metadata(&ytdlp()?, &request, &options)?
        } else {
            request.metadata.clone()
        };
        pipeline::tag_file(path, &metadata)?;
        println!("Tagged {}", path.to_string_lossy());
        print_metadata(&metadata);
        return Ok(());
    }

    let track = pipeline::run_request(&ytdlp()?, &request, &cli.run_options())?;
    println!("Saved {}", track.path.to_string_lossy());
    print_metadata(&track.metadata);
    Ok(())
}

fn show_tags(path: &Path) -> anyhow::Result<()> {
    let stored = tags::read_tags(path)?;
    println!("{}", path.to_string_lossy());
    print_metadata(&stored.metadata);
    if let Some(cover) = &stored.cover {
        println!(
            "  {:<12} {} ({} bytes)",
            "cover:",
            cover.mime_type().map_or("unknown", |m| m.as_str()),
            cover.data().len()
        );
    }
    Ok(())
}

fn print_metadata(metadata: &TrackMetadata) {
    let fields = [
        ("title", metadata.title.clone()),
        ("artist", metadata.artist.clone()),
        ("album", metadata.album.clone()),
        ("year", metadata.year.map(|y| y.to_string())),
        ("comment", metadata.comment.clone()),
        ("description", metadata.description.clone()),
        ("artwork", metadata.artwork.as_ref().map(|a| a.to_string())),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            println!("  {:<12} {value}", format!("{name}:"));
        }
    }
}

/// Maps a failure to the process exit status
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<PipelineError>() {
        return match err {
            PipelineError::Retrieval(_) => EXIT_RETRIEVAL,
            PipelineError::Tag { .. } => EXIT_TAG,
        };
    }
    if err.downcast_ref::<RetrievalError>().is_some() {
        return EXIT_RETRIEVAL;
    }
    if err.downcast_ref::<TagWriteError>().is_some() {
        return EXIT_TAG;
    }
    EXIT_CONFIG
}
