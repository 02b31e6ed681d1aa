//! process::mock
//!
//! Mock runner for deterministic testing.
//!
//! # Design
//!
//! The mock records every command it receives and replays canned outputs
//! in FIFO order. When the queue is empty it answers with an empty
//! successful run, so tests only script the calls they care about.
//!
//! # Example
//!
//! ```
//! use dvcswrap::process::mock::MockRunner;
//! use dvcswrap::process::{CommandRunner, RunOutput};
//!
//! let runner = MockRunner::new().respond(RunOutput::exit(1, "no changes found", ""));
//!
//! let out = runner.run("hg push").unwrap();
//! assert_eq!(out.code, 1);
//! assert_eq!(runner.commands(), vec!["hg push".to_string()]);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::runner::{CommandRunner, RunOutput};
use crate::error::DvcsError;

/// Mock runner for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state,
/// so a test can keep a handle while the adapter owns another.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    /// Outputs to replay, oldest first.
    responses: VecDeque<RunOutput>,
    /// Every command received, in order.
    commands: Vec<String>,
}

impl MockRunner {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered command.
    pub fn respond(self, output: RunOutput) -> Self {
        self.push_response(output);
        self
    }

    /// Queue a response through a shared handle.
    pub fn push_response(&self, output: RunOutput) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(output);
    }

    /// All commands received so far.
    pub fn commands(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.commands.clone()
    }

    /// The most recent command, if any.
    pub fn last_command(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.commands.last().cloned()
    }

    /// Forget recorded commands.
    pub fn clear_commands(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.commands.clear();
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str) -> Result<RunOutput, DvcsError> {
        let mut inner = self.inner.lock().unwrap();
        inner.commands.push(command.to_string());
        Ok(inner.responses.pop_front().unwrap_or_default())
    }
}
