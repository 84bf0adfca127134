//! Multi-row verbose responses and codepage handling through the full client.

use std::path::Path;

use schtasks_admin::registry::decoder::ResponseDecoder;
use schtasks_admin::{Config, ProcessOutput, SchtasksError, TaskRecord, TaskRegistry};

use crate::helpers::{FakeScheduler, encode_cp932, registry};

#[test]
fn last_trigger_row_wins() {
    let fake = FakeScheduler::with_tasks(&["Backup"]);
    fake.add_trigger_rows("Backup", 2);
    let registry = registry(fake);

    let record = registry.task("Backup").expect("query");
    assert_eq!(record.status, "Ready");
}

#[test]
fn strict_mode_rejects_trigger_rows() {
    let fake = FakeScheduler::with_tasks(&["Backup"]);
    fake.add_trigger_rows("Backup", 1);
    let config = Config {
        strict_single_row: true,
        ..Config::default()
    };
    let registry = TaskRegistry::with_runner(fake, "schtasks", &config).expect("valid config");

    let err = registry.task("Backup").expect_err("two rows");
    assert!(matches!(err, SchtasksError::Parse { expected: 1, found: 2 }));
}

#[test]
fn two_rows_equal_second_row_alone() {
    let first: Vec<String> = (0..TaskRecord::FIELD_COUNT).map(|i| format!("a{i}")).collect();
    let second: Vec<String> = (0..TaskRecord::FIELD_COUNT).map(|i| format!("b{i}")).collect();
    let body = format!("{}\r\n{}\r\n", first.join(","), second.join(","));

    let runner = move |_: &Path, _: &[String]| -> schtasks_admin::Result<ProcessOutput> {
        Ok(ProcessOutput {
            status_code: Some(0),
            stdout: encode_cp932(&body),
            stderr: Vec::new(),
        })
    };
    let registry =
        TaskRegistry::with_runner(runner, "schtasks", &Config::default()).expect("valid config");

    let record = registry.task("x").expect("query");
    assert_eq!(record, TaskRecord::from_row(second).expect("full row"));
}

#[test]
fn wrong_arity_is_parse_error() {
    let runner = |_: &Path, _: &[String]| -> schtasks_admin::Result<ProcessOutput> {
        Ok(ProcessOutput {
            status_code: Some(0),
            stdout: b"\"HOST\",\"Backup\",\"Ready\"\r\n".to_vec(),
            stderr: Vec::new(),
        })
    };
    let registry =
        TaskRegistry::with_runner(runner, "schtasks", &Config::default()).expect("valid config");

    let err = registry.task("Backup").expect_err("short row");
    assert!(matches!(
        err,
        SchtasksError::Parse {
            expected: 28,
            found: 3
        }
    ));
}

#[test]
fn invalid_codepage_bytes_abort_the_read() {
    let runner = |_: &Path, _: &[String]| -> schtasks_admin::Result<ProcessOutput> {
        Ok(ProcessOutput {
            status_code: Some(0),
            stdout: vec![b'"', 0x81, 0x20, b'"', b'\r', b'\n'],
            stderr: Vec::new(),
        })
    };
    let registry =
        TaskRegistry::with_runner(runner, "schtasks", &Config::default()).expect("valid config");

    assert!(matches!(
        registry.refresh(),
        Err(SchtasksError::Decode { .. })
    ));
}

#[test]
fn utf8_codepage_can_be_configured() {
    let runner = |_: &Path, _: &[String]| -> schtasks_admin::Result<ProcessOutput> {
        Ok(ProcessOutput {
            status_code: Some(0),
            stdout: "\"Sauvegarde été\"\r\n".as_bytes().to_vec(),
            stderr: Vec::new(),
        })
    };
    let config = Config {
        codepage: "utf-8".to_owned(),
        ..Config::default()
    };
    let registry = TaskRegistry::with_runner(runner, "schtasks", &config).expect("valid config");

    let snapshot = registry.refresh().expect("enumerate");
    assert!(snapshot.contains("Sauvegarde été"));
}

#[test]
fn crlf_and_lf_streams_decode_identically() {
    let decoder = ResponseDecoder::default();
    let crlf = encode_cp932("\"バックアップ\",\"準備完了\"\r\n\"掃除\",\"実行中\"\r\n");
    let lf = encode_cp932("\"バックアップ\",\"準備完了\"\n\"掃除\",\"実行中\"\n");
    let rows = decoder.decode_rows(&crlf).expect("decode crlf");
    assert_eq!(rows, decoder.decode_rows(&lf).expect("decode lf"));
    assert_eq!(rows[0], ["バックアップ", "準備完了"]);
}
