//! # media-fetch
//!
//! Thin shell around a media-fetch engine: it prints a start line, hands the
//! engine an output template, a logger and a progress hook, downloads one URL
//! inside a scoped session and lets any failure surface unchanged.
//!
//! Resolution, format selection, transfer and muxing all happen inside the
//! engine. The bundled [`YtDlpEngine`] drives the external `yt-dlp` binary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use media_fetch::{Config, Console, engine, orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let engine = engine::from_config(&config.tools);
//!     orchestrator::run(&config, engine.as_ref(), &Console::stdout()).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Shared output stream
pub mod console;
/// Media-fetch engine integration
pub mod engine;
/// Error types
pub mod error;
/// Log sink handed to the engine
pub mod logger;
/// Single download run
pub mod orchestrator;
/// Download events and the progress observer
pub mod progress;

// Re-export commonly used types
pub use config::{Config, ToolsConfig};
pub use console::Console;
pub use engine::{
    EngineOptions, EngineSession, MediaEngine, NoEngine, ScopedSession, YtDlpEngine,
};
pub use error::{Error, Result};
pub use logger::{ConsoleLogger, EngineLogger, route_debug};
pub use progress::{DownloadEvent, DownloadStatus, FinishedNotifier, ProgressHook};
