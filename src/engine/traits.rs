//! Traits and types for driving a media-fetch engine

use crate::logger::EngineLogger;
use crate::progress::{DownloadEvent, ProgressHook};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Immutable option record handed to [`MediaEngine::open`]
///
/// Mirrors the engine's option mapping: `output`, `restrictfilenames`,
/// `logger` and `progress_hooks`, plus verbosity, the target directory and
/// the size cap.
#[derive(Clone)]
pub struct EngineOptions {
    /// Output file name template
    pub output: String,
    /// Restrict file names to a safe character set
    pub restrict_filenames: bool,
    /// Ask for `[debug] ` trace lines
    pub verbose: bool,
    /// Directory the engine writes into
    pub downloads_dir: PathBuf,
    /// Size cap in the engine's notation (e.g. "50M"), `None` for no cap
    pub max_filesize: Option<String>,
    /// Log sink receiving every engine message
    pub logger: Arc<dyn EngineLogger>,
    /// Observers receiving every download event, in list order
    pub progress_hooks: Vec<Arc<dyn ProgressHook>>,
}

impl EngineOptions {
    /// Deliver `event` to every progress hook
    pub fn emit(&self, event: &DownloadEvent) {
        for hook in &self.progress_hooks {
            hook.on_event(event);
        }
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("output", &self.output)
            .field("restrict_filenames", &self.restrict_filenames)
            .field("verbose", &self.verbose)
            .field("downloads_dir", &self.downloads_dir)
            .field("max_filesize", &self.max_filesize)
            .field("progress_hooks", &self.progress_hooks.len())
            .finish_non_exhaustive()
    }
}

/// Session constructor of a media-fetch engine
///
/// Implementations can drive an external binary or stand in when none is
/// available. Callers normally go through
/// [`ScopedSession::open`](super::ScopedSession::open), which guarantees the
/// session is closed.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Open a session configured with `options`
    async fn open(&self, options: EngineOptions) -> crate::Result<Box<dyn EngineSession>>;

    /// Get the name of this engine implementation
    fn name(&self) -> &'static str;
}

/// An open engine session
#[async_trait]
pub trait EngineSession: Send {
    /// Download every URL in order
    ///
    /// Invokes the session's logger and progress hooks zero or more times.
    /// Returns an error on the first unrecoverable failure.
    async fn download(&mut self, urls: &[String]) -> crate::Result<()>;

    /// Release everything the session holds
    ///
    /// Must be safe to call more than once.
    fn close(&mut self);
}
