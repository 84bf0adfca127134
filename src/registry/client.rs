//! [`TaskRegistry`]: a single handle over the reader and writer.

use std::path::{Path, PathBuf};

use super::command::ScheduleKind;
use super::decoder::ResponseDecoder;
use super::process::{ProcessRunner, SystemRunner, locate_program};
use super::reader::{RegistryReader, TaskSnapshot};
use super::record::TaskRecord;
use super::writer::{MutationOutcome, RegistryWriter};
use crate::config::Config;
use crate::error::Result;

/// Client for the OS task registry.
///
/// Holds no task state: every call runs the utility once. Enumeration results
/// come back as a [`TaskSnapshot`] owned by the caller.
pub struct TaskRegistry<R: ProcessRunner = SystemRunner> {
    runner: R,
    program: PathBuf,
    decoder: ResponseDecoder,
    strict_single_row: bool,
}

impl TaskRegistry<SystemRunner> {
    /// Build a client that spawns the real utility located from `config.program`.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Config`](crate::SchtasksError::Config) if the
    /// configured codepage is unknown.
    pub fn system(config: &Config) -> Result<Self> {
        let program = locate_program(&config.program);
        Self::with_runner(SystemRunner, program, config)
    }
}

impl<R: ProcessRunner> TaskRegistry<R> {
    /// Build a client over an arbitrary runner.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Config`](crate::SchtasksError::Config) if the
    /// configured codepage is unknown.
    pub fn with_runner(runner: R, program: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        Ok(Self {
            runner,
            program: program.into(),
            decoder: ResponseDecoder::for_label(&config.codepage)?,
            strict_single_row: config.strict_single_row,
        })
    }

    /// Path of the utility this client invokes.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The runner used for every invocation.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Read-side view.
    pub fn reader(&self) -> RegistryReader<'_, R> {
        RegistryReader::new(&self.runner, &self.program, self.decoder)
            .with_strict_single_row(self.strict_single_row)
    }

    /// Write-side view.
    pub fn writer(&self) -> RegistryWriter<'_, R> {
        RegistryWriter::new(&self.runner, &self.program, self.decoder)
    }

    /// Take a fresh snapshot of registered task names.
    ///
    /// # Errors
    ///
    /// See [`RegistryReader::list_task_identifiers`].
    pub fn refresh(&self) -> Result<TaskSnapshot> {
        self.reader().list_task_identifiers()
    }

    /// Fetch one task's record.
    ///
    /// # Errors
    ///
    /// See [`RegistryReader::get_task_record`].
    pub fn task(&self, name: &str) -> Result<TaskRecord> {
        self.reader().get_task_record(name)
    }

    /// Register a new task.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::create_task`].
    pub fn create(
        &self,
        name: &str,
        task_to_run: &str,
        schedule: ScheduleKind,
    ) -> Result<MutationOutcome> {
        self.writer().create_task(name, task_to_run, schedule)
    }

    /// Overwrite a task's command and schedule.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::change_task`].
    pub fn change(
        &self,
        name: &str,
        task_to_run: &str,
        schedule: ScheduleKind,
    ) -> Result<MutationOutcome> {
        self.writer().change_task(name, task_to_run, schedule)
    }

    /// Enable a task.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::enable_task`].
    pub fn enable(&self, name: &str) -> Result<MutationOutcome> {
        self.writer().enable_task(name)
    }

    /// Disable a task.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::disable_task`].
    pub fn disable(&self, name: &str) -> Result<MutationOutcome> {
        self.writer().disable_task(name)
    }

    /// Run a task now.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::run_task`].
    pub fn run(&self, name: &str) -> Result<MutationOutcome> {
        self.writer().run_task(name)
    }

    /// Stop a running task.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::stop_task`].
    pub fn stop(&self, name: &str) -> Result<MutationOutcome> {
        self.writer().stop_task(name)
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// See [`RegistryWriter::delete_task`].
    pub fn delete(&self, name: &str) -> Result<MutationOutcome> {
        self.writer().delete_task(name)
    }
}
