//! Process boundary for the task-scheduling utility.
//!
//! [`ProcessRunner`] is the seam between the registry logic and the OS.
//! [`SystemRunner`] spawns the real program; tests pass a closure instead.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, SchtasksError};

/// Raw result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was terminated without one.
    pub status_code: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Returns `true` if the process exited with code zero.
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Runs a program to completion and captures its output.
///
/// Implementations block until the process exits. No timeout is applied.
pub trait ProcessRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Spawn`] if the process could not be started.
    /// A non-zero exit is not an error.
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput>;
}

impl<F> ProcessRunner for F
where
    F: Fn(&Path, &[String]) -> Result<ProcessOutput>,
{
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        self(program, args)
    }
}

/// Spawns real processes via [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        debug!(program = %program.display(), ?args, "spawning process");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SchtasksError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        debug!(
            program = %program.display(),
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "process exited"
        );

        Ok(ProcessOutput {
            status_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Resolve the utility to an executable path.
///
/// Probes in this order:
/// 1. `program` itself, if it names an existing file
/// 2. `PATH` lookup via [`which::which`]
/// 3. `%SystemRoot%\System32\<program>.exe`
///
/// Falls back to `program` unchanged so the OS can resolve it at spawn time.
pub fn locate_program(program: &str) -> PathBuf {
    let direct = PathBuf::from(program);
    if direct.is_file() {
        return direct;
    }

    if let Ok(found) = which::which(program) {
        return found;
    }

    if let Some(root) = std::env::var_os("SystemRoot") {
        let mut candidate = PathBuf::from(root).join("System32").join(program);
        if candidate.extension().is_none() {
            candidate.set_extension("exe");
        }
        if candidate.is_file() {
            return candidate;
        }
    }

    debug!(program, "utility not found on disk, deferring to OS lookup");
    direct
}
