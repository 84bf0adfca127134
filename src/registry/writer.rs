//! Lifecycle mutations.
//!
//! A mutation that the utility rejects is still `Ok`: the exit status and
//! captured text come back as a [`MutationOutcome`] for the caller to inspect.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::command::{ScheduleKind, TaskCommand};
use super::decoder::ResponseDecoder;
use super::process::ProcessRunner;
use crate::error::Result;

/// Exit status and output of one mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    /// Exit code; `None` if the process was terminated without one.
    pub status_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl MutationOutcome {
    /// Returns `true` if the utility exited with code zero.
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Issues create/change/enable/disable/run/stop/delete commands.
pub struct RegistryWriter<'a, R: ProcessRunner> {
    runner: &'a R,
    program: &'a Path,
    decoder: ResponseDecoder,
}

impl<'a, R: ProcessRunner> RegistryWriter<'a, R> {
    /// Create a writer that invokes `program` through `runner`.
    pub fn new(runner: &'a R, program: &'a Path, decoder: ResponseDecoder) -> Self {
        Self {
            runner,
            program,
            decoder,
        }
    }

    /// Register a new task.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid arguments or if the utility cannot be
    /// started; a rejected create is reported in the outcome.
    pub fn create_task(
        &self,
        name: &str,
        task_to_run: &str,
        schedule: ScheduleKind,
    ) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Create {
            name,
            task_to_run,
            schedule,
        })
    }

    /// Overwrite an existing task's command and schedule.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub fn change_task(
        &self,
        name: &str,
        task_to_run: &str,
        schedule: ScheduleKind,
    ) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Change {
            name,
            task_to_run,
            schedule,
        })
    }

    /// Enable a task.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub fn enable_task(&self, name: &str) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Enable { name })
    }

    /// Disable a task.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub fn disable_task(&self, name: &str) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Disable { name })
    }

    /// Start a task now.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub fn run_task(&self, name: &str) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Run { name })
    }

    /// Stop a running instance of a task.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub fn stop_task(&self, name: &str) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Stop { name })
    }

    /// Delete a task without confirmation.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub fn delete_task(&self, name: &str) -> Result<MutationOutcome> {
        self.execute(TaskCommand::Delete { name })
    }

    fn execute(&self, command: TaskCommand<'_>) -> Result<MutationOutcome> {
        let args = command.args()?;
        debug!(operation = command.operation(), ?args, "mutating task registry");

        let output = self.runner.run(self.program, &args)?;
        let outcome = MutationOutcome {
            status_code: output.status_code,
            stdout: self.decoder.decode_lossy(&output.stdout),
            stderr: self.decoder.decode_lossy(&output.stderr),
        };

        if !outcome.success() {
            warn!(
                operation = command.operation(),
                status = ?outcome.status_code,
                stderr = outcome.stderr.trim(),
                "task scheduler rejected mutation"
            );
        }
        Ok(outcome)
    }
}
