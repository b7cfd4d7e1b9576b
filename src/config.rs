use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "ytmeta.toml";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ytdlp: YtDlpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// Loads `path` if given, otherwise the default file when it exists
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Config> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct YtDlpConfig {
    /// explicit path to the executable, otherwise looked up on PATH
    pub binary: Option<PathBuf>,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_output_template")]
    pub output_template: String,
    #[serde(default)]
    pub embed_thumbnail: bool,
    #[serde(default)]
    pub add_metadata: bool,
}

fn default_audio_format() -> String {
    "m4a".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_template() -> String {
    "%(title)s.%(ext)s".to_string()
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            binary: None,
            audio_format: default_audio_format(),
            output_dir: default_output_dir(),
            output_template: default_output_template(),
            embed_thumbnail: false,
            add_metadata: false,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    /// env_logger filter, e.g. `debug` or `ytmeta=trace`
    pub level: Option<String>,
}
