//! Log sink handed to the engine
//!
//! The engine reports diagnostics through four severities. Informational
//! messages historically arrive on the debug channel too, so the debug entry
//! point tells them apart by the literal `"[debug] "` prefix and forwards
//! everything else to `info`.

use crate::console::Console;

/// Prefix marking a genuine verbose trace line on the debug channel
pub const DEBUG_PREFIX: &str = "[debug] ";

/// Receiver for engine log messages
///
/// Every method is fire-and-forget. Receiving an error message does not stop
/// the download; only a failure returned by the engine does.
pub trait EngineLogger: Send + Sync {
    /// Verbose trace line, or an info message multiplexed onto this channel
    fn debug(&self, msg: &str);

    /// Informational message
    fn info(&self, msg: &str);

    /// Warning message
    fn warning(&self, msg: &str);

    /// Error message
    fn error(&self, msg: &str);
}

/// Where a message received on the debug channel belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugRoute {
    /// Real trace line, printed as is
    Verbatim,
    /// Info message that came in through the debug channel
    Info,
}

impl DebugRoute {
    /// Classify a debug-channel message by its prefix
    pub fn of(msg: &str) -> Self {
        if msg.starts_with(DEBUG_PREFIX) {
            Self::Verbatim
        } else {
            Self::Info
        }
    }
}

/// Route a debug-channel message: trace lines go to `verbatim`, anything
/// else to `logger.info`. Exactly one of the two is called.
pub fn route_debug<L: EngineLogger + ?Sized>(logger: &L, msg: &str, verbatim: impl FnOnce(&str)) {
    match DebugRoute::of(msg) {
        DebugRoute::Verbatim => verbatim(msg),
        DebugRoute::Info => logger.info(msg),
    }
}

/// Logger printing every message verbatim to a [`Console`]
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    console: Console,
}

impl ConsoleLogger {
    /// Create a logger printing to `console`
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl EngineLogger for ConsoleLogger {
    fn debug(&self, msg: &str) {
        route_debug(self, msg, |line| self.console.write_line(line));
    }

    fn info(&self, msg: &str) {
        self.console.write_line(msg);
    }

    fn warning(&self, msg: &str) {
        self.console.write_line(msg);
    }

    fn error(&self, msg: &str) {
        self.console.write_line(msg);
    }
}
