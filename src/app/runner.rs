// LogAnalyzer - app/runner.rs
//
// Per-task procedure: probe the target, run the analysis step, and turn
// whatever happened into exactly one `Outcome`.
//
// Every failure path, including a panic inside the analysis step, ends in
// a FAILED outcome. Nothing escapes to the engine.

use crate::core::analysis::Analysis;
use crate::core::model::{Outcome, TaskDescriptor};
use crate::platform::fs::ResourceProbe;
use crate::util::error::{TaskError, UnavailableKind};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Runs single tasks against a probe and an analysis implementation.
///
/// Holds only shared references, so one runner is used by every worker
/// thread of a run.
#[derive(Clone, Copy)]
pub struct TaskRunner<'a> {
    probe: &'a dyn ResourceProbe,
    analysis: &'a dyn Analysis,
}

impl<'a> TaskRunner<'a> {
    pub fn new(probe: &'a dyn ResourceProbe, analysis: &'a dyn Analysis) -> Self {
        Self { probe, analysis }
    }

    /// Run `task` to completion and classify the result.
    pub fn run(&self, task: &TaskDescriptor) -> Outcome {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.execute(task)))
            .unwrap_or_else(|payload| {
                Err(TaskError::AnalysisFailure {
                    task_id: task.id.clone(),
                    source: panic_message(payload.as_ref()).into(),
                })
            });

        match result {
            Ok(()) => {
                tracing::debug!(task = %task.id, target = %task.target, "Task succeeded");
                Outcome::success(task)
            }
            Err(e) => {
                tracing::debug!(task = %task.id, error = %e, "Task failed");
                Outcome::failure(task, &e)
            }
        }
    }

    fn execute(&self, task: &TaskDescriptor) -> Result<(), TaskError> {
        self.check_resource(Path::new(&task.target))?;

        self.analysis
            .analyse(task)
            .map_err(|source| TaskError::AnalysisFailure {
                task_id: task.id.clone(),
                source,
            })
    }

    /// Stat, then open. A failed stat is NotFound or AccessError depending on
    /// the error kind; a failed open after a good stat is NotAccessible.
    fn check_resource(&self, path: &Path) -> Result<(), TaskError> {
        if let Err(source) = self.probe.stat(path) {
            let kind = if source.kind() == io::ErrorKind::NotFound {
                UnavailableKind::NotFound
            } else {
                UnavailableKind::AccessError
            };
            return Err(TaskError::ResourceUnavailable {
                kind,
                path: path.to_path_buf(),
                source,
            });
        }

        self.probe
            .open(path)
            .map_err(|source| TaskError::ResourceUnavailable {
                kind: UnavailableKind::NotAccessible,
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
