//! Media-fetch engine integration
//!
//! The shell never resolves or transfers media itself. It opens a session on
//! an engine, asks it to download a URL list and lets it report back through
//! the logger and progress hooks in [`EngineOptions`].
//!
//! ## Architecture
//!
//! - [`MediaEngine`]: session constructor
//! - [`EngineSession`]: `download` + `close`
//! - [`ScopedSession`]: guard closing a session exactly once
//!
//! Implementations:
//!
//! - [`YtDlpEngine`]: runs the external `yt-dlp` binary
//! - [`NoEngine`]: stand-in when no binary is available
//!
//! ## Usage
//!
//! ```no_run
//! use media_fetch::config::Config;
//! use media_fetch::console::Console;
//! use media_fetch::engine::{self, ScopedSession};
//! use media_fetch::logger::ConsoleLogger;
//! use media_fetch::progress::FinishedNotifier;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let console = Console::stdout();
//!     let engine = engine::from_config(&config.tools);
//!
//!     let options = config.engine_options(
//!         Arc::new(ConsoleLogger::new(console.clone())),
//!         vec![Arc::new(FinishedNotifier::new(console))],
//!     );
//!     let mut session = ScopedSession::open(engine.as_ref(), options).await?;
//!     session.download(&config.urls).await?;
//!     Ok(())
//! }
//! ```

mod noop;
pub mod output;
mod session;
mod traits;
mod ytdlp;

pub use noop::NoEngine;
pub use session::ScopedSession;
pub use traits::{EngineOptions, EngineSession, MediaEngine};
pub use ytdlp::{YtDlpEngine, YtDlpSession};

use crate::config::ToolsConfig;

/// Pick the engine the tool settings point at
///
/// An explicit `ytdlp_path` wins; otherwise PATH is searched when allowed.
/// Falls back to [`NoEngine`].
pub fn from_config(tools: &ToolsConfig) -> Box<dyn MediaEngine> {
    let engine: Box<dyn MediaEngine> = if let Some(ref path) = tools.ytdlp_path {
        Box::new(YtDlpEngine::new(path.clone()))
    } else if tools.search_path {
        YtDlpEngine::from_path()
            .map(|e| Box::new(e) as Box<dyn MediaEngine>)
            .unwrap_or_else(|| Box::new(NoEngine))
    } else {
        Box::new(NoEngine)
    };

    if engine.name() == NoEngine.name() {
        tracing::warn!("yt-dlp not available, downloads will fail");
    } else {
        tracing::info!(engine = engine.name(), "media engine selected");
    }
    engine
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_explicit_path_wins() {
        let tools = ToolsConfig {
            ytdlp_path: Some(PathBuf::from("/opt/yt-dlp")),
            search_path: false,
        };
        assert_eq!(from_config(&tools).name(), "yt-dlp");
    }

    #[test]
    fn test_no_path_and_no_search_gives_no_engine() {
        let tools = ToolsConfig {
            ytdlp_path: None,
            search_path: false,
        };
        assert_eq!(from_config(&tools).name(), "none");
    }

    #[test]
    fn test_path_search_agrees_with_which() {
        let tools = ToolsConfig::default();
        let expected = if which::which("yt-dlp").is_ok() {
            "yt-dlp"
        } else {
            "none"
        };
        assert_eq!(from_config(&tools).name(), expected);
    }
}
