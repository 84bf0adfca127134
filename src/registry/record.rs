//! Fixed-schema task record.
//!
//! Defines [`TaskRecord`], the typed view of one row of the utility's verbose
//! CSV output. Columns are positional; [`TaskRecord::FIELD_NAMES`] is the
//! single source of truth for their order.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchtasksError};

/// One task's attributes as reported by a verbose query.
///
/// Every field is the display string the utility emitted. Dates, durations
/// and flags are left uninterpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Host the task is registered on.
    pub host_name: String,
    /// Full task name, including folder path.
    pub task_name: String,
    /// Next scheduled run time.
    pub next_run_time: String,
    /// Current status (e.g. `Ready`, `Running`, `Disabled`).
    pub status: String,
    /// Logon mode.
    pub logon_mode: String,
    /// Time of the previous run.
    pub last_run_time: String,
    /// Result code of the previous run.
    pub last_result: String,
    /// Task author.
    pub author: String,
    /// Command line the task executes.
    pub task_to_run: String,
    /// Working directory for the command.
    pub start_in: String,
    /// Free-form comment.
    pub comment: String,
    /// Enabled/disabled state of the registration.
    pub scheduled_task_state: String,
    /// Idle-time condition.
    pub idle_time: String,
    /// Power-management flags.
    pub power_management: String,
    /// Account the task runs as.
    pub run_as_user: String,
    /// Whether the task is deleted when it is not rescheduled.
    pub delete_if_not_rescheduled: String,
    /// Maximum run duration before the task is stopped.
    pub stop_task_if_runs_for: String,
    /// Human-readable schedule description.
    pub schedule: String,
    /// Schedule type.
    pub schedule_type: String,
    /// Trigger start time.
    pub start_time: String,
    /// Trigger start date.
    pub start_date: String,
    /// Trigger end date.
    pub end_date: String,
    /// Days the trigger fires on.
    pub days: String,
    /// Months the trigger fires in.
    pub months: String,
    /// Repetition interval.
    pub repeat_every: String,
    /// Repetition end time.
    pub repeat_until_time: String,
    /// Repetition duration.
    pub repeat_until_duration: String,
    /// Whether a repetition stops a still-running instance.
    pub repeat_stop_if_still_running: String,
}

impl TaskRecord {
    /// Column names in the order the utility emits them.
    pub const FIELD_NAMES: [&'static str; 28] = [
        "host_name",
        "task_name",
        "next_run_time",
        "status",
        "logon_mode",
        "last_run_time",
        "last_result",
        "author",
        "task_to_run",
        "start_in",
        "comment",
        "scheduled_task_state",
        "idle_time",
        "power_management",
        "run_as_user",
        "delete_if_not_rescheduled",
        "stop_task_if_runs_for",
        "schedule",
        "schedule_type",
        "start_time",
        "start_date",
        "end_date",
        "days",
        "months",
        "repeat_every",
        "repeat_until_time",
        "repeat_until_duration",
        "repeat_stop_if_still_running",
    ];

    /// Number of columns in a verbose row.
    pub const FIELD_COUNT: usize = Self::FIELD_NAMES.len();

    /// Build a record from one decoded row.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Parse`] if `row` does not have exactly
    /// [`FIELD_COUNT`](Self::FIELD_COUNT) fields.
    pub fn from_row(row: Vec<String>) -> Result<Self> {
        let fields: [String; Self::FIELD_COUNT] =
            row.try_into().map_err(|row: Vec<String>| SchtasksError::Parse {
                expected: Self::FIELD_COUNT,
                found: row.len(),
            })?;

        let [
            host_name,
            task_name,
            next_run_time,
            status,
            logon_mode,
            last_run_time,
            last_result,
            author,
            task_to_run,
            start_in,
            comment,
            scheduled_task_state,
            idle_time,
            power_management,
            run_as_user,
            delete_if_not_rescheduled,
            stop_task_if_runs_for,
            schedule,
            schedule_type,
            start_time,
            start_date,
            end_date,
            days,
            months,
            repeat_every,
            repeat_until_time,
            repeat_until_duration,
            repeat_stop_if_still_running,
        ] = fields;

        Ok(Self {
            host_name,
            task_name,
            next_run_time,
            status,
            logon_mode,
            last_run_time,
            last_result,
            author,
            task_to_run,
            start_in,
            comment,
            scheduled_task_state,
            idle_time,
            power_management,
            run_as_user,
            delete_if_not_rescheduled,
            stop_task_if_runs_for,
            schedule,
            schedule_type,
            start_time,
            start_date,
            end_date,
            days,
            months,
            repeat_every,
            repeat_until_time,
            repeat_until_duration,
            repeat_stop_if_still_running,
        })
    }

    /// Field values in schema order.
    pub fn values(&self) -> [&str; Self::FIELD_COUNT] {
        [
            self.host_name.as_str(),
            self.task_name.as_str(),
            self.next_run_time.as_str(),
            self.status.as_str(),
            self.logon_mode.as_str(),
            self.last_run_time.as_str(),
            self.last_result.as_str(),
            self.author.as_str(),
            self.task_to_run.as_str(),
            self.start_in.as_str(),
            self.comment.as_str(),
            self.scheduled_task_state.as_str(),
            self.idle_time.as_str(),
            self.power_management.as_str(),
            self.run_as_user.as_str(),
            self.delete_if_not_rescheduled.as_str(),
            self.stop_task_if_runs_for.as_str(),
            self.schedule.as_str(),
            self.schedule_type.as_str(),
            self.start_time.as_str(),
            self.start_date.as_str(),
            self.end_date.as_str(),
            self.days.as_str(),
            self.months.as_str(),
            self.repeat_every.as_str(),
            self.repeat_until_time.as_str(),
            self.repeat_until_duration.as_str(),
            self.repeat_stop_if_still_running.as_str(),
        ]
    }

    /// `(name, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Self::FIELD_NAMES.into_iter().zip(self.values())
    }

    /// Look up a field by its schema name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}
