//! Argument vectors for each `schtasks` operation.
//!
//! Every value is a separate vector element; nothing is passed through a
//! shell, so spaces and metacharacters in names or commands need no quoting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchtasksError};

/// Value for the `/SC` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScheduleKind {
    /// Every N minutes.
    Minute,
    /// Every N hours.
    Hourly,
    /// Every N days.
    Daily,
    /// Every N weeks.
    Weekly,
    /// Every N months.
    Monthly,
    /// A single run.
    Once,
    /// At system start.
    OnStart,
    /// At user logon.
    OnLogon,
    /// When the system is idle.
    OnIdle,
    /// On an event log entry.
    OnEvent,
}

impl ScheduleKind {
    /// All schedule kinds, in `schtasks /?` order.
    pub const ALL: [Self; 10] = [
        Self::Minute,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Once,
        Self::OnStart,
        Self::OnLogon,
        Self::OnIdle,
        Self::OnEvent,
    ];

    /// The token passed after `/SC`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "MINUTE",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Once => "ONCE",
            Self::OnStart => "ONSTART",
            Self::OnLogon => "ONLOGON",
            Self::OnIdle => "ONIDLE",
            Self::OnEvent => "ONEVENT",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleKind {
    type Err = SchtasksError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SchtasksError::InvalidArgument(format!("unknown schedule type: {s}")))
    }
}

/// One invocation of the utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCommand<'a> {
    /// Enumerate every task, CSV, no header.
    List,
    /// Verbose CSV query for one task.
    Query {
        /// Task name.
        name: &'a str,
    },
    /// Register a new task.
    Create {
        /// Task name.
        name: &'a str,
        /// Command line to run.
        task_to_run: &'a str,
        /// Trigger type.
        schedule: ScheduleKind,
    },
    /// Replace an existing task's command and schedule.
    Change {
        /// Task name.
        name: &'a str,
        /// Command line to run.
        task_to_run: &'a str,
        /// Trigger type.
        schedule: ScheduleKind,
    },
    /// Enable a task.
    Enable {
        /// Task name.
        name: &'a str,
    },
    /// Disable a task.
    Disable {
        /// Task name.
        name: &'a str,
    },
    /// Start a task immediately.
    Run {
        /// Task name.
        name: &'a str,
    },
    /// Stop a running instance.
    Stop {
        /// Task name.
        name: &'a str,
    },
    /// Remove a task without prompting.
    Delete {
        /// Task name.
        name: &'a str,
    },
}

impl TaskCommand<'_> {
    /// Short operation name used in logs and errors.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Query { .. } => "query",
            Self::Create { .. } => "create",
            Self::Change { .. } => "change",
            Self::Enable { .. } => "enable",
            Self::Disable { .. } => "disable",
            Self::Run { .. } => "run",
            Self::Stop { .. } => "stop",
            Self::Delete { .. } => "delete",
        }
    }

    /// Build the argument vector, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::InvalidArgument`] if a task name or command
    /// line is empty or contains a NUL or line break.
    pub fn args(&self) -> Result<Vec<String>> {
        let args: Vec<&str> = match *self {
            Self::List => vec!["/Query", "/NH", "/FO", "CSV"],
            Self::Query { name } => {
                vec!["/Query", "/NH", "/TN", checked("task name", name)?, "/V", "/FO", "CSV"]
            }
            Self::Create {
                name,
                task_to_run,
                schedule,
            } => vec![
                "/Create",
                "/TN",
                checked("task name", name)?,
                "/TR",
                checked("command", task_to_run)?,
                "/SC",
                schedule.as_str(),
            ],
            Self::Change {
                name,
                task_to_run,
                schedule,
            } => vec![
                "/Change",
                "/TN",
                checked("task name", name)?,
                "/TR",
                checked("command", task_to_run)?,
                "/SC",
                schedule.as_str(),
            ],
            Self::Enable { name } => vec!["/Change", "/TN", checked("task name", name)?, "/ENABLE"],
            Self::Disable { name } => {
                vec!["/Change", "/TN", checked("task name", name)?, "/DISABLE"]
            }
            Self::Run { name } => vec!["/Run", "/TN", checked("task name", name)?],
            Self::Stop { name } => vec!["/End", "/TN", checked("task name", name)?],
            Self::Delete { name } => vec!["/Delete", "/TN", checked("task name", name)?, "/F"],
        };
        Ok(args.into_iter().map(str::to_owned).collect())
    }
}

/// Reject values the utility cannot receive as a single argument.
fn checked<'v>(what: &str, value: &'v str) -> Result<&'v str> {
    if value.trim().is_empty() {
        return Err(SchtasksError::InvalidArgument(format!("{what} cannot be empty")));
    }
    if value.contains(['\0', '\r', '\n']) {
        return Err(SchtasksError::InvalidArgument(format!(
            "{what} cannot contain NUL or line breaks"
        )));
    }
    Ok(value)
}
