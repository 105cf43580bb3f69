//! Stand-in engine for when no yt-dlp binary is available

use super::traits::{EngineOptions, EngineSession, MediaEngine};
use async_trait::async_trait;

/// Engine used when yt-dlp is neither configured nor found in PATH
///
/// Opening a session works, so the orchestrator behaves the same as with a
/// real engine; every download then fails with `Error::NotSupported`.
///
/// # Examples
///
/// ```
/// use media_fetch::engine::{MediaEngine, NoEngine};
///
/// let engine = NoEngine;
/// assert_eq!(engine.name(), "none");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEngine;

struct NoEngineSession;

#[async_trait]
impl MediaEngine for NoEngine {
    async fn open(&self, _options: EngineOptions) -> crate::Result<Box<dyn EngineSession>> {
        Ok(Box::new(NoEngineSession))
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

#[async_trait]
impl EngineSession for NoEngineSession {
    async fn download(&mut self, _urls: &[String]) -> crate::Result<()> {
        Err(crate::Error::NotSupported(
            "downloading requires the external yt-dlp binary. \
             Configure ytdlp_path in config or ensure yt-dlp is in PATH."
                .into(),
        ))
    }

    fn close(&mut self) {}
}
