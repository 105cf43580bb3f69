//! Shared output stream
//!
//! The logger, the progress observer and the orchestrator all print to the
//! same stream. [`Console`] is a cheap cloneable handle to it. Writes never
//! return an error to the caller; the first failure is kept and handed back
//! by [`Console::check`], after which further writes are dropped.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

enum Target {
    Stdout(io::Stdout),
    Memory(Vec<u8>),
    Writer(Box<dyn Write + Send>),
}

struct Inner {
    target: Target,
    error: Option<io::Error>,
}

/// Line-oriented handle to the process output stream (or a test buffer)
#[derive(Clone)]
pub struct Console {
    inner: Arc<Mutex<Inner>>,
}

impl Console {
    fn with_target(target: Target) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                target,
                error: None,
            })),
        }
    }

    /// Console writing to the process's standard output
    pub fn stdout() -> Self {
        Self::with_target(Target::Stdout(io::stdout()))
    }

    /// Console capturing everything in memory, see [`Console::contents`]
    pub fn in_memory() -> Self {
        Self::with_target(Target::Memory(Vec::new()))
    }

    /// Console writing to an arbitrary writer
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_target(Target::Writer(Box::new(writer)))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic mid-write leaves nothing half-updated worth refusing
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write `line` followed by a newline and flush
    pub fn write_line(&self, line: &str) {
        let mut inner = self.lock();
        if inner.error.is_some() {
            return;
        }

        let result = match &mut inner.target {
            Target::Stdout(stdout) => {
                let mut out = stdout.lock();
                writeln!(out, "{}", line).and_then(|()| out.flush())
            }
            Target::Memory(buf) => writeln!(buf, "{}", line),
            Target::Writer(writer) => writeln!(writer, "{}", line).and_then(|()| writer.flush()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "output stream write failed");
            inner.error = Some(e);
        }
    }

    /// Take the first write failure, if any
    pub fn check(&self) -> io::Result<()> {
        match self.lock().error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Everything written so far (in-memory consoles only, empty otherwise)
    pub fn contents(&self) -> String {
        match &self.lock().target {
            Target::Memory(buf) => String::from_utf8_lossy(buf).into_owned(),
            _ => String::new(),
        }
    }

    /// [`Console::contents`] split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let target = match &self.lock().target {
            Target::Stdout(_) => "stdout",
            Target::Memory(_) => "memory",
            Target::Writer(_) => "writer",
        };
        f.debug_struct("Console").field("target", &target).finish()
    }
}
