//! Scheduled-task registry client.
//!
//! Talks to the OS task registry through the `schtasks` utility:
//! [`command`] builds argument vectors, [`process`] runs them,
//! [`decoder`] turns codepage CSV output into rows, and [`reader`] /
//! [`writer`] implement the read and mutation operations on top.

pub mod client;
pub mod command;
pub mod decoder;
pub mod process;
pub mod reader;
pub mod record;
pub mod writer;

pub use client::TaskRegistry;
pub use command::{ScheduleKind, TaskCommand};
pub use decoder::ResponseDecoder;
pub use process::{ProcessOutput, ProcessRunner, SystemRunner};
pub use reader::{RegistryReader, TaskSnapshot};
pub use record::TaskRecord;
pub use writer::{MutationOutcome, RegistryWriter};
