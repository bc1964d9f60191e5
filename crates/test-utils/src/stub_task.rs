#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use taskresult::result::{DataBag, TaskResult};
use taskresult::task::{Task, TaskError, TaskFuture};

/// What a [`StubTask`] does when run.
#[derive(Debug, Clone)]
pub enum StubBehaviour {
    Succeed(String),
    Fail(i32, String),
    Raise(TaskError),
}

/// A task with scripted behaviour and a run counter.
#[derive(Debug)]
pub struct StubTask {
    name: String,
    kind: String,
    metadata: DataBag,
    behaviour: StubBehaviour,
    runs: AtomicUsize,
}

impl StubTask {
    pub fn new(name: &str, behaviour: StubBehaviour) -> Self {
        Self {
            name: name.to_string(),
            kind: "stub".to_string(),
            metadata: DataBag::new(),
            behaviour,
            runs: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(name: &str) -> Arc<Self> {
        Arc::new(Self::new(name, StubBehaviour::Succeed(String::new())))
    }

    pub fn failing(name: &str, code: i32, message: &str) -> Arc<Self> {
        Arc::new(Self::new(name, StubBehaviour::Fail(code, message.to_string())))
    }

    pub fn raising(name: &str, err: TaskError) -> Arc<Self> {
        Arc::new(Self::new(name, StubBehaviour::Raise(err)))
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Task for StubTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn metadata(&self) -> DataBag {
        self.metadata.clone()
    }

    fn run(self: Arc<Self>) -> TaskFuture {
        Box::pin(async move {
            self.runs.fetch_add(1, Ordering::SeqCst);
            match self.behaviour.clone() {
                StubBehaviour::Succeed(message) => {
                    Ok(TaskResult::success(self, message, DataBag::new()))
                }
                StubBehaviour::Fail(code, message) => {
                    Ok(TaskResult::new(self, code, message, DataBag::new()))
                }
                StubBehaviour::Raise(err) => Err(err),
            }
        })
    }
}

/// Shorthand: a stub task as `Arc<dyn Task>`.
pub fn stub(name: &str) -> Arc<dyn Task> {
    StubTask::succeeding(name)
}
