//! Configuration types for media-fetch

use crate::engine::EngineOptions;
use crate::logger::EngineLogger;
use crate::progress::ProgressHook;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// URL fetched when nothing else is configured
pub const DEFAULT_URL: &str = "https://www.youtube.com/watch?v=apREl0KmTdQ";

/// Output file name template, expanded by the engine
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "%(title)s-%(id)s.%(ext)s";

/// Directory downloads land in
pub const DEFAULT_DOWNLOADS_DIR: &str = "./downloads";

/// Largest file the engine may fetch
pub const DEFAULT_MAX_FILESIZE: &str = "50M";

/// URLs this long or longer are refused
pub const MAX_URL_LENGTH: usize = 1000;

/// External tool lookup (yt-dlp)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
        }
    }
}

/// Settings the orchestrator turns into [`EngineOptions`]
///
/// Keys follow the engine's option names, so a serialized config reads
/// `{"output": ..., "restrictfilenames": ..., "urls": [...]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Output file name template (default: "%(title)s-%(id)s.%(ext)s")
    #[serde(rename = "output", default = "default_output_template")]
    pub output_template: String,

    /// Restrict file names to ASCII without spaces or `&` (default: true)
    #[serde(rename = "restrictfilenames", default = "default_true")]
    pub restrict_filenames: bool,

    /// URLs to download, in order
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,

    /// Ask the engine for verbose `[debug] ` trace lines (default: false)
    #[serde(default)]
    pub verbose: bool,

    /// Download directory (default: "./downloads")
    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,

    /// Size cap such as "50M" or "1.5G" (default: "50M", None = unlimited)
    #[serde(default = "default_max_filesize")]
    pub max_filesize: Option<String>,

    /// External tool lookup
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_template: default_output_template(),
            restrict_filenames: true,
            urls: default_urls(),
            verbose: false,
            downloads_dir: default_downloads_dir(),
            max_filesize: default_max_filesize(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Check the settings before any engine is involved
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an empty URL list, template or downloads directory
    /// and for a malformed size cap, [`Error::InvalidUrl`] for a URL rejected
    /// by [`validate_url`].
    pub fn validate(&self) -> Result<()> {
        if self.urls.is_empty() {
            return Err(Error::config("urls", "at least one URL is required"));
        }
        if self.output_template.trim().is_empty() {
            return Err(Error::config("output", "output template must not be empty"));
        }
        if self.downloads_dir.as_os_str().is_empty() {
            return Err(Error::config(
                "downloads_dir",
                "downloads directory must not be empty",
            ));
        }
        if let Some(ref size) = self.max_filesize
            && !is_valid_size(size)
        {
            return Err(Error::config(
                "max_filesize",
                format!("invalid size {:?}, expected e.g. \"50M\"", size),
            ));
        }
        for url in &self.urls {
            validate_url(url)?;
        }
        Ok(())
    }

    /// Build the immutable option record handed to the engine
    pub fn engine_options(
        &self,
        logger: Arc<dyn EngineLogger>,
        progress_hooks: Vec<Arc<dyn ProgressHook>>,
    ) -> EngineOptions {
        EngineOptions {
            output: self.output_template.clone(),
            restrict_filenames: self.restrict_filenames,
            verbose: self.verbose,
            downloads_dir: self.downloads_dir.clone(),
            max_filesize: self.max_filesize.clone(),
            logger,
            progress_hooks,
        }
    }
}

/// Accept only absolute http(s) URLs shorter than [`MAX_URL_LENGTH`] without whitespace
pub fn validate_url(raw: &str) -> Result<Url> {
    if raw.len() >= MAX_URL_LENGTH {
        return Err(Error::InvalidUrl {
            url: raw.chars().take(64).collect(),
            reason: format!("longer than {} characters", MAX_URL_LENGTH - 1),
        });
    }
    // The parser would silently strip these
    if raw.chars().any(char::is_whitespace) {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: "contains whitespace".to_string(),
        });
    }

    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}", other),
        }),
    }
}

// Number with an optional fraction and an optional k/M/G/T unit, as yt-dlp reads it
fn is_valid_size(size: &str) -> bool {
    let number = size.strip_suffix(['b', 'B']).unwrap_or(size);
    let number = number
        .strip_suffix(['k', 'K', 'm', 'M', 'g', 'G', 't', 'T'])
        .unwrap_or(number);
    let mut parts = number.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.is_none_or(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOWNLOADS_DIR)
}

fn default_max_filesize() -> Option<String> {
    Some(DEFAULT_MAX_FILESIZE.to_string())
}

fn default_output_template() -> String {
    DEFAULT_OUTPUT_TEMPLATE.to_string()
}

fn default_urls() -> Vec<String> {
    vec![DEFAULT_URL.to_string()]
}

fn default_true() -> bool {
    true
}
