//! Scripted in-process engine

use async_trait::async_trait;
use media_fetch::{DownloadEvent, EngineOptions, EngineSession, Error, MediaEngine, Result};
use std::sync::{Arc, Mutex};

/// One thing the scripted engine does during `download`
#[derive(Debug, Clone)]
pub enum Step {
    Debug(&'static str),
    Info(&'static str),
    Warning(&'static str),
    Error(&'static str),
    Event(&'static str),
}

/// Everything the engine saw, shared with the test
#[derive(Debug, Default)]
pub struct Record {
    pub opens: usize,
    pub closes: usize,
    pub downloads: Vec<Vec<String>>,
    pub output: Option<String>,
    pub restrict_filenames: Option<bool>,
    pub hook_count: usize,
}

/// Engine replaying `steps`, then succeeding or failing with `failure`
pub struct ScriptedEngine {
    pub steps: Vec<Step>,
    pub failure: Option<&'static str>,
    pub record: Arc<Mutex<Record>>,
}

impl ScriptedEngine {
    pub fn succeeding(steps: Vec<Step>) -> Self {
        Self {
            steps,
            failure: None,
            record: Arc::new(Mutex::new(Record::default())),
        }
    }

    pub fn failing(steps: Vec<Step>, reason: &'static str) -> Self {
        Self {
            failure: Some(reason),
            ..Self::succeeding(steps)
        }
    }

    pub fn record(&self) -> std::sync::MutexGuard<'_, Record> {
        self.record.lock().expect("record lock poisoned")
    }
}

struct ScriptedSession {
    steps: Vec<Step>,
    failure: Option<&'static str>,
    options: EngineOptions,
    record: Arc<Mutex<Record>>,
}

#[async_trait]
impl MediaEngine for ScriptedEngine {
    async fn open(&self, options: EngineOptions) -> Result<Box<dyn EngineSession>> {
        {
            let mut record = self.record();
            record.opens += 1;
            record.output = Some(options.output.clone());
            record.restrict_filenames = Some(options.restrict_filenames);
            record.hook_count = options.progress_hooks.len();
        }
        Ok(Box::new(ScriptedSession {
            steps: self.steps.clone(),
            failure: self.failure,
            options,
            record: self.record.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[async_trait]
impl EngineSession for ScriptedSession {
    async fn download(&mut self, urls: &[String]) -> Result<()> {
        self.record
            .lock()
            .expect("record lock poisoned")
            .downloads
            .push(urls.to_vec());

        let logger = &self.options.logger;
        for step in &self.steps {
            match step {
                Step::Debug(msg) => logger.debug(msg),
                Step::Info(msg) => logger.info(msg),
                Step::Warning(msg) => logger.warning(msg),
                Step::Error(msg) => logger.error(msg),
                Step::Event(status) => self.options.emit(&DownloadEvent::new(*status)),
            }
        }

        match self.failure {
            Some(reason) => Err(Error::Download {
                url: urls.join(" "),
                reason: reason.to_string(),
                exit_code: Some(1),
            }),
            None => Ok(()),
        }
    }

    fn close(&mut self) {
        self.record.lock().expect("record lock poisoned").closes += 1;
    }
}
