//! Read operations: enumerate task names and fetch one task record.
//!
//! Reads fail loudly. A non-zero exit becomes
//! [`SchtasksError::RegistryQuery`] and no partial data is returned.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::command::TaskCommand;
use super::decoder::ResponseDecoder;
use super::process::ProcessRunner;
use super::record::TaskRecord;
use crate::error::{Result, SchtasksError};

/// Point-in-time set of task names.
///
/// Never updated after capture; take a new snapshot to observe creates or deletes.
/// Serializes as `{ "names": [...], "captured_at": "<RFC 3339>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSnapshot {
    names: BTreeSet<String>,
    captured_at: DateTime<Utc>,
}

impl TaskSnapshot {
    /// Wrap a set of names captured at `captured_at`.
    pub fn new(names: BTreeSet<String>, captured_at: DateTime<Utc>) -> Self {
        Self { names, captured_at }
    }

    /// When the enumeration ran.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Returns `true` if `name` was registered at capture time.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct task names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no tasks were registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Task names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Consume the snapshot and return the underlying set.
    pub fn into_inner(self) -> BTreeSet<String> {
        self.names
    }
}

/// Issues read-only queries against the registry.
pub struct RegistryReader<'a, R: ProcessRunner> {
    runner: &'a R,
    program: &'a Path,
    decoder: ResponseDecoder,
    strict_single_row: bool,
}

impl<'a, R: ProcessRunner> RegistryReader<'a, R> {
    /// Create a reader that invokes `program` through `runner`.
    pub fn new(runner: &'a R, program: &'a Path, decoder: ResponseDecoder) -> Self {
        Self {
            runner,
            program,
            decoder,
            strict_single_row: false,
        }
    }

    /// Reject verbose responses with more than one data row instead of keeping the last.
    pub fn with_strict_single_row(mut self, strict: bool) -> Self {
        self.strict_single_row = strict;
        self
    }

    /// Enumerate registered task names.
    ///
    /// # Errors
    ///
    /// - [`SchtasksError::RegistryQuery`] if the utility exits unsuccessfully.
    /// - [`SchtasksError::Decode`] for bytes invalid under the codepage.
    /// - [`SchtasksError::Spawn`] if the utility cannot be started.
    pub fn list_task_identifiers(&self) -> Result<TaskSnapshot> {
        let rows = self.query_rows(TaskCommand::List)?;
        let captured_at = Utc::now();
        let names: BTreeSet<String> = rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect();
        debug!(count = names.len(), "enumerated scheduled tasks");
        Ok(TaskSnapshot::new(names, captured_at))
    }

    /// Fetch the verbose record for one task.
    ///
    /// Every row must match the schema. When several rows come back (one per
    /// trigger), the last one wins unless strict mode is on.
    ///
    /// # Errors
    ///
    /// - [`SchtasksError::RegistryQuery`] if the utility exits unsuccessfully,
    ///   including when the task does not exist.
    /// - [`SchtasksError::Parse`] if a row has the wrong arity, if no row came
    ///   back, or if several rows came back in strict mode.
    /// - [`SchtasksError::Decode`] for bytes invalid under the codepage.
    pub fn get_task_record(&self, name: &str) -> Result<TaskRecord> {
        let rows = self.query_rows(TaskCommand::Query { name })?;
        let row_count = rows.len();

        if self.strict_single_row && row_count > 1 {
            return Err(SchtasksError::Parse {
                expected: 1,
                found: row_count,
            });
        }

        let mut record = None;
        for row in rows {
            record = Some(TaskRecord::from_row(row)?);
        }

        if row_count > 1 {
            warn!(
                task = name,
                rows = row_count,
                "verbose query returned several rows, keeping the last"
            );
        }

        record.ok_or(SchtasksError::Parse {
            expected: TaskRecord::FIELD_COUNT,
            found: 0,
        })
    }

    fn query_rows(&self, command: TaskCommand<'_>) -> Result<Vec<Vec<String>>> {
        let args = command.args()?;
        debug!(operation = command.operation(), ?args, "querying task registry");

        let output = self.runner.run(self.program, &args)?;
        if !output.success() {
            return Err(SchtasksError::RegistryQuery {
                operation: command.operation(),
                status_code: output.status_code,
                stderr: self.decoder.decode_lossy(&output.stderr).trim().to_owned(),
            });
        }

        self.decoder.decode_rows(&output.stdout)
    }
}
