//! Parser for yt-dlp console output
//!
//! yt-dlp prints everything as text lines on stdout/stderr. Each line maps to
//! one callback: a progress event, or a message at some severity.

use crate::progress::{DownloadEvent, DownloadStatus};

/// Marker prepended to progress lines through `--progress-template`
pub const PROGRESS_MARKER: &str = "[progress] ";

/// Value passed to `--progress-template`: the progress dict as JSON
pub const PROGRESS_TEMPLATE: &str = "download:[progress] %(progress)j";

const WARNING_PREFIX: &str = "WARNING: ";
const ERROR_PREFIX: &str = "ERROR: ";
const ALREADY_DOWNLOADED_SUFFIX: &str = " has already been downloaded";
const DOWNLOAD_TAG: &str = "[download] ";

/// One classified line of engine output
#[derive(Debug, Clone, PartialEq)]
pub enum EngineLine {
    /// Progress dict emitted through the progress template
    Progress(DownloadEvent),
    /// Verbose trace line starting with `[debug] `
    Debug(String),
    /// Ordinary output; the engine reports it on the debug channel
    Info(String),
    /// `WARNING: ...`
    Warning(String),
    /// `ERROR: ...`
    Error(String),
}

/// Classify one output line
///
/// A progress line whose JSON cannot be read is kept as ordinary output
/// rather than dropped.
pub fn classify_line(line: &str) -> EngineLine {
    if let Some(json) = line.strip_prefix(PROGRESS_MARKER) {
        match serde_json::from_str::<DownloadEvent>(json) {
            Ok(event) => return EngineLine::Progress(event),
            Err(e) => {
                tracing::debug!(error = %e, "unreadable progress line");
                return EngineLine::Info(line.to_string());
            }
        }
    }

    if line.starts_with(crate::logger::DEBUG_PREFIX) {
        EngineLine::Debug(line.to_string())
    } else if line.starts_with(WARNING_PREFIX) {
        EngineLine::Warning(line.to_string())
    } else if line.starts_with(ERROR_PREFIX) {
        EngineLine::Error(line.to_string())
    } else {
        EngineLine::Info(line.to_string())
    }
}

/// `finished` event for a `[download] <file> has already been downloaded` line
///
/// yt-dlp calls its hooks for a skipped file without printing the progress
/// template, so the event has to be recovered from this line.
pub fn already_downloaded_event(line: &str) -> Option<DownloadEvent> {
    let rest = line.strip_prefix(DOWNLOAD_TAG)?;
    let filename = rest.strip_suffix(ALREADY_DOWNLOADED_SUFFIX)?;
    if filename.is_empty() {
        return None;
    }
    Some(DownloadEvent::new(DownloadStatus::Finished).with_filename(filename))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_progress_line() {
        let line = r#"[progress] {"status": "finished", "filename": "Title-apREl0KmTdQ.mp4", "total_bytes": 100, "downloaded_bytes": 100}"#;
        match classify_line(line) {
            EngineLine::Progress(event) => {
                assert_eq!(event.status, DownloadStatus::Finished);
                assert_eq!(event.filename.as_deref(), Some("Title-apREl0KmTdQ.mp4"));
            }
            other => panic!("Expected progress, got: {:?}", other),
        }
    }

    #[test]
    fn test_classify_broken_progress_line_as_info() {
        let line = "[progress] {not json";
        assert_eq!(classify_line(line), EngineLine::Info(line.to_string()));
    }

    #[test]
    fn test_classify_severities() {
        assert_eq!(
            classify_line("[debug] Python 3.12.3"),
            EngineLine::Debug("[debug] Python 3.12.3".to_string())
        );
        assert_eq!(
            classify_line("WARNING: [youtube] nsig extraction failed"),
            EngineLine::Warning("WARNING: [youtube] nsig extraction failed".to_string())
        );
        assert_eq!(
            classify_line("ERROR: [generic] Unable to download webpage"),
            EngineLine::Error("ERROR: [generic] Unable to download webpage".to_string())
        );
        assert_eq!(
            classify_line("[youtube] apREl0KmTdQ: Downloading webpage"),
            EngineLine::Info("[youtube] apREl0KmTdQ: Downloading webpage".to_string())
        );
        assert_eq!(classify_line(""), EngineLine::Info(String::new()));
    }

    #[test]
    fn test_already_downloaded_line() {
        let event =
            already_downloaded_event("[download] Title-apREl0KmTdQ.mp4 has already been downloaded")
                .unwrap();
        assert_eq!(event.status, DownloadStatus::Finished);
        assert_eq!(event.filename.as_deref(), Some("Title-apREl0KmTdQ.mp4"));

        assert!(already_downloaded_event("[download] Destination: Title-apREl0KmTdQ.mp4").is_none());
        assert!(already_downloaded_event("[download]  has already been downloaded").is_none());
        assert!(already_downloaded_event("has already been downloaded").is_none());
    }
}
