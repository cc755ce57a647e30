use freshtask::registry::Task;
use freshtask::runner::report::{running_line, skipped_line};
use freshtask::runner::{Reporter, RunCause, TaskOutcome};

/// Event seen by a [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Started { task: String, cause: RunCause },
    Skipped { task: String },
    Ran { task: String },
    Failed { task: String, error: String },
}

/// Reporter that keeps every notification, for assertions on ordering.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The console lines a `ConsoleReporter` would have printed.
    pub fn console_lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Started { task, cause } => Some(running_line(task, cause)),
                ReportEvent::Skipped { task } => Some(skipped_line(task)),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn task_started(&mut self, task: &Task, cause: &RunCause) {
        self.events.push(ReportEvent::Started {
            task: task.name().to_string(),
            cause: cause.clone(),
        });
    }

    fn task_finished(&mut self, outcome: &TaskOutcome) {
        let event = match outcome {
            TaskOutcome::Skipped { name } => ReportEvent::Skipped { task: name.clone() },
            TaskOutcome::Ran { name, .. } => ReportEvent::Ran { task: name.clone() },
            TaskOutcome::Failed { name, error } => ReportEvent::Failed {
                task: name.clone(),
                error: error.to_string(),
            },
        };
        self.events.push(event);
    }
}
