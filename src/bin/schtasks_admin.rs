//! Manage scheduled tasks from the command line.
//!
//! Diagnostics go to stderr; stdout carries only command results.

use std::path::PathBuf;

use schtasks_admin::{
    Config, MutationOutcome, ScheduleKind, SchtasksError, TaskRecord, TaskRegistry, TaskSnapshot,
};

/// One parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    List {
        json: bool,
    },
    Query {
        name: String,
        json: bool,
    },
    Create {
        name: String,
        task_to_run: String,
        schedule: ScheduleKind,
    },
    Change {
        name: String,
        task_to_run: String,
        schedule: ScheduleKind,
    },
    Enable(String),
    Disable(String),
    Run(String),
    Stop(String),
    Delete(String),
}

/// Parsed command line: an optional config override and the subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    config_path: Option<PathBuf>,
    command: Command,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("schtasks_admin=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            print_usage();
            return Err(e.into());
        }
    };

    if invocation.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let config = match &invocation.config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };

    let registry = TaskRegistry::system(&config)?;
    tracing::debug!(program = %registry.program().display(), "using task scheduler");

    let outcome = match invocation.command {
        Command::Help => return Ok(()),
        Command::List { json } => {
            print!("{}", render_snapshot(&registry.refresh()?, json)?);
            return Ok(());
        }
        Command::Query { name, json } => {
            print!("{}", render_record(&registry.task(&name)?, json)?);
            return Ok(());
        }
        Command::Create {
            name,
            task_to_run,
            schedule,
        } => registry.create(&name, &task_to_run, schedule)?,
        Command::Change {
            name,
            task_to_run,
            schedule,
        } => registry.change(&name, &task_to_run, schedule)?,
        Command::Enable(name) => registry.enable(&name)?,
        Command::Disable(name) => registry.disable(&name)?,
        Command::Run(name) => registry.run(&name)?,
        Command::Stop(name) => registry.stop(&name)?,
        Command::Delete(name) => registry.delete(&name)?,
    };

    report(&outcome);
    if let Some(code) = exit_code(&outcome) {
        std::process::exit(code);
    }
    Ok(())
}

/// Parse `[--config <path>] <command> [args..]`.
///
/// `--config` is only recognised before the command; anything after the
/// command name belongs to the command.
fn parse_args(args: &[String]) -> Result<Invocation, SchtasksError> {
    let mut config_path = None;
    let mut rest = args;
    while let [flag, tail @ ..] = rest {
        if flag != "--config" {
            break;
        }
        let [path, tail @ ..] = tail else {
            return Err(SchtasksError::InvalidArgument(
                "--config requires a file path".to_owned(),
            ));
        };
        config_path = Some(PathBuf::from(path));
        rest = tail;
    }

    let Some((name, params)) = rest.split_first() else {
        return Ok(Invocation {
            config_path,
            command: Command::Help,
        });
    };

    let command = match (name.as_str(), params) {
        ("list", []) => Command::List { json: false },
        ("list", [flag]) if flag == "--json" => Command::List { json: true },
        ("query", [task]) => Command::Query {
            name: task.clone(),
            json: false,
        },
        ("query", [task, flag]) if flag == "--json" => Command::Query {
            name: task.clone(),
            json: true,
        },
        ("create", [task, task_to_run, schedule]) => Command::Create {
            name: task.clone(),
            task_to_run: task_to_run.clone(),
            schedule: schedule.parse()?,
        },
        ("change", [task, task_to_run, schedule]) => Command::Change {
            name: task.clone(),
            task_to_run: task_to_run.clone(),
            schedule: schedule.parse()?,
        },
        ("enable", [task]) => Command::Enable(task.clone()),
        ("disable", [task]) => Command::Disable(task.clone()),
        ("run", [task]) => Command::Run(task.clone()),
        ("stop", [task]) => Command::Stop(task.clone()),
        ("delete", [task]) => Command::Delete(task.clone()),
        ("help" | "--help" | "-h", _) => Command::Help,
        (other, _) => {
            return Err(SchtasksError::InvalidArgument(format!(
                "unknown or malformed command `{other}`"
            )));
        }
    };

    Ok(Invocation {
        config_path,
        command,
    })
}

fn render_snapshot(snapshot: &TaskSnapshot, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(snapshot)? + "\n");
    }
    Ok(snapshot.iter().map(|name| format!("{name}\n")).collect())
}

fn render_record(record: &TaskRecord, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(record)? + "\n");
    }
    Ok(record
        .fields()
        .map(|(field, value)| format!("{field}: {value}\n"))
        .collect())
}

/// Process exit code for a finished mutation; `None` when it succeeded.
fn exit_code(outcome: &MutationOutcome) -> Option<i32> {
    if outcome.success() {
        None
    } else {
        Some(outcome.status_code.unwrap_or(1))
    }
}

fn report(outcome: &MutationOutcome) {
    if !outcome.stdout.trim().is_empty() {
        println!("{}", outcome.stdout.trim_end());
    }
    if !outcome.stderr.trim().is_empty() {
        eprintln!("{}", outcome.stderr.trim_end());
    }
    if outcome.success() {
        tracing::info!("task scheduler accepted command");
    }
}

fn print_usage() {
    println!(
        "usage: schtasks-admin [--config <path>] <command>\n\
         \n\
         commands:\n  \
         list [--json]\n  \
         query <name> [--json]\n  \
         create <name> <command> <schedule>\n  \
         change <name> <command> <schedule>\n  \
         enable|disable|run|stop|delete <name>"
    );
}
