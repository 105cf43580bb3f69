//! Download events and the progress observer
//!
//! The engine emits one [`DownloadEvent`] per lifecycle step. Observers get a
//! read-only view and must tolerate statuses they do not know about, since the
//! engine may grow new ones.

use crate::console::Console;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line printed once the transfer finished and post-processing starts
pub const FINISHED_MESSAGE: &str = "Done downloading, now post-processing ...";

/// Status tag of a [`DownloadEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DownloadStatus {
    /// Transfer in progress
    Downloading,
    /// Transfer complete, post-processing follows
    Finished,
    /// Transfer failed
    Error,
    /// Any status this crate does not know about
    Other(String),
}

impl DownloadStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            Self::Downloading => "downloading",
            Self::Finished => "finished",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for DownloadStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "downloading" => Self::Downloading,
            "finished" => Self::Finished,
            "error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for DownloadStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<DownloadStatus> for String {
    fn from(status: DownloadStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress notification from the engine
///
/// Only `status` is guaranteed. The remaining fields mirror what yt-dlp puts
/// in its progress dictionary and are filled when the engine reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadEvent {
    /// Lifecycle step
    pub status: DownloadStatus,
    /// Final file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Temporary file being written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmpfilename: Option<String>,
    /// Bytes on disk so far
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub downloaded_bytes: Option<u64>,
    /// Exact size, when known
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_bytes: Option<u64>,
    /// Estimated size, when the exact one is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bytes_estimate: Option<f64>,
    /// Bytes per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Seconds remaining
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<f64>,
    /// Seconds since the transfer started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<f64>,
    /// Current fragment (fragmented formats only)
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub fragment_index: Option<u64>,
    /// Fragment count (fragmented formats only)
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub fragment_count: Option<u64>,
}

impl DownloadEvent {
    /// Event carrying only a status
    pub fn new(status: impl Into<DownloadStatus>) -> Self {
        Self {
            status: status.into(),
            filename: None,
            tmpfilename: None,
            downloaded_bytes: None,
            total_bytes: None,
            total_bytes_estimate: None,
            speed: None,
            eta: None,
            elapsed: None,
            fragment_index: None,
            fragment_count: None,
        }
    }

    /// Set the final file name
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Completion percentage, if the engine gave enough to compute it
    pub fn percent(&self) -> Option<f64> {
        let done = self.downloaded_bytes? as f64;
        let total = self
            .total_bytes
            .map(|t| t as f64)
            .or(self.total_bytes_estimate)?;
        if total <= 0.0 {
            return None;
        }
        Some((done / total * 100.0).min(100.0))
    }
}

// yt-dlp occasionally reports byte counts as floats
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64))
}

/// Receiver for [`DownloadEvent`]s
pub trait ProgressHook: Send + Sync {
    /// Called by the engine for every event, in order
    fn on_event(&self, event: &DownloadEvent);
}

impl<F> ProgressHook for F
where
    F: Fn(&DownloadEvent) + Send + Sync,
{
    fn on_event(&self, event: &DownloadEvent) {
        self(event)
    }
}

/// Prints [`FINISHED_MESSAGE`] when a transfer finishes, ignores everything else
#[derive(Debug, Clone)]
pub struct FinishedNotifier {
    console: Console,
}

impl FinishedNotifier {
    /// Create a notifier printing to `console`
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl ProgressHook for FinishedNotifier {
    fn on_event(&self, event: &DownloadEvent) {
        if event.status == DownloadStatus::Finished {
            self.console.write_line(FINISHED_MESSAGE);
        }
    }
}
