//! Shared helpers for integration tests.
//!
//! [`FakeScheduler`] stands in for the `schtasks` binary: it keeps an
//! in-memory task table, answers the same argument vectors, and writes its
//! output in cp932 with CRLF line endings.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

use schtasks_admin::{Config, ProcessOutput, ProcessRunner, TaskRecord, TaskRegistry};

/// One registered task in the fake table.
#[derive(Debug, Clone)]
pub(crate) struct FakeTask {
    pub(crate) task_to_run: String,
    pub(crate) schedule: String,
    pub(crate) status: String,
    pub(crate) enabled: bool,
}

/// In-memory imitation of the task-scheduling utility.
#[derive(Default)]
pub(crate) struct FakeScheduler {
    tasks: RefCell<BTreeMap<String, FakeTask>>,
    calls: RefCell<Vec<Vec<String>>>,
    /// Extra verbose rows emitted for a task, one per additional trigger.
    extra_rows: RefCell<BTreeMap<String, usize>>,
}

impl FakeScheduler {
    /// Fake pre-populated with ready tasks.
    pub(crate) fn with_tasks(names: &[&str]) -> Self {
        let fake = Self::default();
        for name in names {
            fake.tasks.borrow_mut().insert(
                (*name).to_owned(),
                FakeTask {
                    task_to_run: format!("C:\\jobs\\{name}.cmd"),
                    schedule: "DAILY".to_owned(),
                    status: "Ready".to_owned(),
                    enabled: true,
                },
            );
        }
        fake
    }

    /// Make verbose queries for `name` return `extra` additional rows first.
    pub(crate) fn add_trigger_rows(&self, name: &str, extra: usize) {
        self.extra_rows.borrow_mut().insert(name.to_owned(), extra);
    }

    pub(crate) fn task(&self, name: &str) -> Option<FakeTask> {
        self.tasks.borrow().get(name).cloned()
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    fn verbose_row(name: &str, task: &FakeTask, status: &str) -> String {
        let mut fields: Vec<String> = TaskRecord::FIELD_NAMES
            .iter()
            .map(|f| format!("<{f}>"))
            .collect();
        fields[0] = "HOST".to_owned();
        fields[1] = name.to_owned();
        fields[3] = status.to_owned();
        fields[8] = task.task_to_run.clone();
        fields[11] = if task.enabled { "有効" } else { "無効" }.to_owned();
        fields[18] = task.schedule.clone();
        let quoted: Vec<String> = fields
            .iter()
            .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
            .collect();
        quoted.join(",") + "\r\n"
    }

    fn handle(&self, args: &[String]) -> (i32, String, String) {
        let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or_default();
        let not_found = || {
            (
                1,
                String::new(),
                "エラー: 指定されたファイルが見つかりません。\r\n".to_owned(),
            )
        };
        let ok = || (0, "成功: 完了しました。\r\n".to_owned(), String::new());

        let mut tasks = self.tasks.borrow_mut();
        match (arg(0), arg(1)) {
            ("/Query", "/NH") if arg(2) == "/FO" => {
                let mut out = String::new();
                for (name, task) in tasks.iter() {
                    out.push_str(&format!("\"{name}\",\"N/A\",\"{}\"\r\n", task.status));
                }
                // Folder separators show up as blank rows.
                out.push_str("\"\",\"\",\"\"\r\n");
                (0, out, String::new())
            }
            ("/Query", "/NH") if arg(2) == "/TN" => match tasks.get(arg(3)) {
                Some(task) => {
                    let extra = self.extra_rows.borrow().get(arg(3)).copied().unwrap_or(0);
                    let mut out = String::new();
                    for _ in 0..extra {
                        out.push_str(&Self::verbose_row(arg(3), task, "Stale"));
                    }
                    out.push_str(&Self::verbose_row(arg(3), task, &task.status));
                    (0, out, String::new())
                }
                None => not_found(),
            },
            ("/Create", "/TN") => {
                if tasks.contains_key(arg(2)) {
                    return (1, String::new(), "エラー: タスクは既に存在します。\r\n".to_owned());
                }
                tasks.insert(
                    arg(2).to_owned(),
                    FakeTask {
                        task_to_run: arg(4).to_owned(),
                        schedule: arg(6).to_owned(),
                        status: "Ready".to_owned(),
                        enabled: true,
                    },
                );
                ok()
            }
            ("/Change", "/TN") => match tasks.get_mut(arg(2)) {
                Some(task) => {
                    match arg(3) {
                        "/ENABLE" => task.enabled = true,
                        "/DISABLE" => {
                            task.enabled = false;
                            task.status = "Disabled".to_owned();
                        }
                        _ => {
                            task.task_to_run = arg(4).to_owned();
                            task.schedule = arg(6).to_owned();
                        }
                    }
                    if task.enabled && task.status == "Disabled" {
                        task.status = "Ready".to_owned();
                    }
                    ok()
                }
                None => not_found(),
            },
            ("/Run", "/TN") => match tasks.get_mut(arg(2)) {
                Some(task) if task.status == "Running" => (
                    0,
                    "警告: タスクは既に実行中です。\r\n".to_owned(),
                    String::new(),
                ),
                Some(task) => {
                    task.status = "Running".to_owned();
                    ok()
                }
                None => not_found(),
            },
            ("/End", "/TN") => match tasks.get_mut(arg(2)) {
                Some(task) => {
                    task.status = "Ready".to_owned();
                    ok()
                }
                None => not_found(),
            },
            ("/Delete", "/TN") if arg(3) == "/F" => match tasks.remove(arg(2)) {
                Some(_) => ok(),
                None => not_found(),
            },
            _ => (
                1,
                String::new(),
                "エラー: 無効な引数です。\r\n".to_owned(),
            ),
        }
    }
}

impl ProcessRunner for FakeScheduler {
    fn run(&self, _program: &Path, args: &[String]) -> schtasks_admin::Result<ProcessOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        let (code, stdout, stderr) = self.handle(args);
        Ok(ProcessOutput {
            status_code: Some(code),
            stdout: encode_cp932(&stdout),
            stderr: encode_cp932(&stderr),
        })
    }
}

/// Encode text the way a Japanese-locale host writes console output.
pub(crate) fn encode_cp932(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors, "test text must be representable in cp932");
    bytes.into_owned()
}

/// Registry client over a fake scheduler with default settings.
pub(crate) fn registry(fake: FakeScheduler) -> TaskRegistry<FakeScheduler> {
    TaskRegistry::with_runner(fake, "schtasks", &Config::default()).expect("default config is valid")
}
