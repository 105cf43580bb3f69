//! CLI-based engine using the external yt-dlp binary

use super::output::{EngineLine, PROGRESS_TEMPLATE, already_downloaded_event, classify_line};
use super::traits::{EngineOptions, EngineSession, MediaEngine};
use crate::config::validate_url;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::SplitStream;
use tracing::{debug, info, warn};

/// Engine driving the external `yt-dlp` binary
///
/// # Examples
///
/// ```no_run
/// use media_fetch::engine::{MediaEngine, YtDlpEngine};
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let engine = YtDlpEngine::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or auto-discover from PATH
/// let engine = YtDlpEngine::from_path().expect("yt-dlp not found in PATH");
/// assert_eq!(engine.name(), "yt-dlp");
/// ```
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    binary_path: PathBuf,
}

impl YtDlpEngine {
    /// Create a new engine with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Returns `None` when the binary is not installed.
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }

    /// Path of the binary this engine runs
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

#[async_trait]
impl MediaEngine for YtDlpEngine {
    async fn open(&self, options: EngineOptions) -> crate::Result<Box<dyn EngineSession>> {
        Ok(Box::new(YtDlpSession {
            binary_path: self.binary_path.clone(),
            options,
            child: None,
            closed: false,
        }))
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

/// One yt-dlp session; each `download` call runs the binary once
pub struct YtDlpSession {
    binary_path: PathBuf,
    options: EngineOptions,
    child: Option<Child>,
    closed: bool,
}

impl YtDlpSession {
    /// Command-line arguments for downloading `urls`
    pub fn command_args(&self, urls: &[String]) -> Vec<String> {
        let mut args = vec![
            "--newline".to_string(),
            "--no-colors".to_string(),
            "--paths".to_string(),
            self.options.downloads_dir.display().to_string(),
            "--output".to_string(),
            self.options.output.clone(),
            "--progress-template".to_string(),
            PROGRESS_TEMPLATE.to_string(),
        ];
        if let Some(ref size) = self.options.max_filesize {
            args.push("--max-filesize".to_string());
            args.push(size.clone());
        }
        if self.options.restrict_filenames {
            args.push("--restrict-filenames".to_string());
        }
        if self.options.verbose {
            args.push("--verbose".to_string());
        }
        args.push("--".to_string());
        args.extend(urls.iter().cloned());
        args
    }

    fn dispatch(&self, line: &str, last_error: &mut Option<String>) {
        let logger = &self.options.logger;
        match classify_line(line) {
            EngineLine::Progress(event) => self.options.emit(&event),
            EngineLine::Debug(msg) => logger.debug(&msg),
            EngineLine::Warning(msg) => logger.warning(&msg),
            EngineLine::Error(msg) => {
                logger.error(&msg);
                *last_error = Some(msg);
            }
            EngineLine::Info(msg) => {
                logger.debug(&msg);
                if let Some(event) = already_downloaded_event(&msg) {
                    self.options.emit(&event);
                }
            }
        }
    }
}

/// Decode one raw output line, replacing invalid UTF-8 and dropping a trailing `\r`
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[async_trait]
impl EngineSession for YtDlpSession {
    async fn download(&mut self, urls: &[String]) -> crate::Result<()> {
        if self.closed {
            return Err(crate::Error::Other("yt-dlp session is closed".into()));
        }
        if urls.is_empty() {
            return Ok(());
        }
        for url in urls {
            validate_url(url)?;
        }

        let args = self.command_args(urls);
        debug!(binary = %self.binary_path.display(), ?args, "spawning yt-dlp");

        let mut child = Command::new(&self.binary_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| crate::Error::ExternalTool("yt-dlp stdout not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| crate::Error::ExternalTool("yt-dlp stderr not captured".into()))?;
        self.child = Some(child);

        // Raw lines: yt-dlp output is not guaranteed to be UTF-8
        let mut lines = SplitStream::new(BufReader::new(stdout).split(b'\n'))
            .merge(SplitStream::new(BufReader::new(stderr).split(b'\n')));

        let mut last_error = None;
        while let Some(line) = lines.next().await {
            self.dispatch(&decode_line(&line?), &mut last_error);
        }

        let status = match self.child.as_mut() {
            Some(child) => child.wait().await?,
            None => return Err(crate::Error::Other("yt-dlp process went away".into())),
        };
        self.child = None;

        if status.success() {
            info!(urls = urls.len(), "yt-dlp finished");
            Ok(())
        } else {
            warn!(%status, "yt-dlp failed");
            Err(crate::Error::Download {
                url: urls.join(" "),
                reason: last_error.unwrap_or_else(|| format!("yt-dlp exited with {}", status)),
                exit_code: status.code(),
            })
        }
    }

    fn close(&mut self) {
        if let Some(mut child) = self.child.take() {
            // Still running means the download was abandoned mid-way
            if let Err(e) = child.start_kill() {
                warn!(error = %e, "failed to kill yt-dlp");
            }
        }
        self.closed = true;
    }
}
