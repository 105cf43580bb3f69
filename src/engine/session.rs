//! Scoped engine session

use super::traits::{EngineOptions, EngineSession, MediaEngine};
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Engine session that is closed exactly once
///
/// The session is closed by [`ScopedSession::close`] or, on every other exit
/// path (`?`, early return, panic, a dropped future), by `Drop`.
pub struct ScopedSession {
    session: Option<Box<dyn EngineSession>>,
    engine: &'static str,
}

impl ScopedSession {
    /// Open a session on `engine`
    pub async fn open(engine: &dyn MediaEngine, options: EngineOptions) -> crate::Result<Self> {
        let session = engine.open(options).await?;
        debug!(engine = engine.name(), "engine session opened");
        Ok(Self {
            session: Some(session),
            engine: engine.name(),
        })
    }

    /// Close the session now instead of at drop
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            debug!(engine = self.engine, "engine session closed");
        }
    }
}

impl Deref for ScopedSession {
    type Target = dyn EngineSession;

    fn deref(&self) -> &Self::Target {
        match &self.session {
            Some(session) => session.as_ref(),
            // Only `close(self)` and `drop` take the session, both consume the guard
            None => unreachable!("scoped session used after release"),
        }
    }
}

impl DerefMut for ScopedSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.session {
            Some(session) => session.as_mut(),
            None => unreachable!("scoped session used after release"),
        }
    }
}

impl Drop for ScopedSession {
    fn drop(&mut self) {
        self.release();
    }
}
