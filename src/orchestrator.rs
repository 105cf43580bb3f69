//! Single download run
//!
//! Prints the liveness line, wires the console logger and the finished
//! notifier into the engine options, and downloads the configured URLs inside
//! a scoped session. Engine failures come back unchanged.

use crate::config::Config;
use crate::console::Console;
use crate::engine::{MediaEngine, ScopedSession};
use crate::logger::{ConsoleLogger, EngineLogger};
use crate::progress::{FinishedNotifier, ProgressHook};
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Line printed before the engine is touched
pub const STARTING_MESSAGE: &str = "Starting download";

/// Download `config.urls` with `engine`, printing to `console`
///
/// # Errors
///
/// Whatever the engine returns, plus [`Error::Io`](crate::Error::Io) if the
/// console could not be written. The session is closed either way.
pub async fn run(config: &Config, engine: &dyn MediaEngine, console: &Console) -> Result<()> {
    console.write_line(STARTING_MESSAGE);
    console.check()?;

    let logger: Arc<dyn EngineLogger> = Arc::new(ConsoleLogger::new(console.clone()));
    let hooks: Vec<Arc<dyn ProgressHook>> = vec![Arc::new(FinishedNotifier::new(console.clone()))];
    let options = config.engine_options(logger, hooks);

    info!(engine = engine.name(), urls = config.urls.len(), "starting download");
    let mut session = ScopedSession::open(engine, options).await?;
    session.download(&config.urls).await?;
    session.close();

    console.check()?;
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NoEngine;

    #[tokio::test]
    async fn test_without_engine_prints_start_then_fails() {
        let console = Console::in_memory();
        let result = run(&Config::default(), &NoEngine, &console).await;

        assert!(matches!(result, Err(crate::Error::NotSupported(_))));
        assert_eq!(console.lines(), vec![STARTING_MESSAGE]);
    }
}
