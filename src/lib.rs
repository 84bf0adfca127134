//! schtasks-admin: a typed client for the OS scheduled-task registry.
//!
//! The registry is driven through the `schtasks` utility. This crate builds
//! its argument vectors, decodes its codepage CSV output into
//! [`TaskRecord`]s, and reports lifecycle mutations as
//! [`MutationOutcome`] values.
//!
//! # Architecture
//!
//! - **Command builder** ([`registry::command`]): operation → argument vector
//! - **Process boundary** ([`registry::process`]): injectable [`ProcessRunner`]
//! - **Decoder** ([`registry::decoder`]): bytes → CSV rows
//! - **Reader / Writer** ([`registry::reader`], [`registry::writer`]): queries fail
//!   with [`SchtasksError`], mutations return outcomes
//!
//! ```no_run
//! use schtasks_admin::{Config, TaskRegistry};
//!
//! # fn main() -> schtasks_admin::Result<()> {
//! let registry = TaskRegistry::system(&Config::default())?;
//! let snapshot = registry.refresh()?;
//! for name in snapshot.iter() {
//!     let record = registry.task(name)?;
//!     println!("{name}: {}", record.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod registry;

pub use config::Config;
pub use error::{Result, SchtasksError};
pub use registry::{
    MutationOutcome, ProcessOutput, ProcessRunner, ScheduleKind, SystemRunner, TaskRecord,
    TaskRegistry, TaskSnapshot,
};
