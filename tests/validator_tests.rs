// Tests are allowed to panic for assertions and test failure
#![allow(
    clippy::panic,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]

//! Facade tests using mock [`EngineRunner`] implementations.
//!
//! These verify exit-code classification, report decoding, and the literal
//! command line handed to the runtime, without launching a JVM.

use std::sync::Mutex;

use vnu_wrapper::exec::{EngineOutput, EngineRunner};
use vnu_wrapper::{Result, RunOutput, Validator, ValidatorError};

const TWO_MESSAGE_REPORT: &str = r#"{"messages":[
    {"type":"info","subType":"warning","message":"Consider adding a lang attribute to the html start tag to declare the language of this document."},
    {"type":"error","message":"Element head is missing a required instance of child element title."}
]}"#;

/// Mock runner returning a fixed output regardless of the command line.
struct FixedRunner {
    exit_code: i32,
    stdout: &'static str,
    stderr: &'static str,
}

impl EngineRunner for FixedRunner {
    fn run(&self, _runtime: &str, _args: &[String], _input: &[u8]) -> Result<EngineOutput> {
        Ok(EngineOutput {
            exit_code: self.exit_code,
            stdout: self.stdout.to_owned(),
            stderr: self.stderr.to_owned(),
        })
    }
}

/// Mock runner recording the invocation it receives.
#[derive(Default)]
struct RecordingRunner {
    seen: Mutex<Option<(String, Vec<String>, Vec<u8>)>>,
}

impl EngineRunner for RecordingRunner {
    fn run(&self, runtime: &str, args: &[String], input: &[u8]) -> Result<EngineOutput> {
        *self.seen.lock().unwrap() = Some((runtime.to_owned(), args.to_vec(), input.to_vec()));
        Ok(EngineOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

#[test]
fn json_run_decodes_both_streams() {
    let runner = FixedRunner {
        exit_code: 1,
        stdout: "",
        stderr: TWO_MESSAGE_REPORT,
    };
    let result = Validator::with_engine("vnu.jar")
        .data("<html></html>")
        .run_with(&runner)
        .unwrap();

    match result {
        RunOutput::Json { normal, error } => {
            assert!(normal.is_none());
            let report = error.expect("stderr should carry a report");
            assert_eq!(report.messages.len(), 2);
        }
        RunOutput::Text { .. } => panic!("expected json output"),
    }
}

#[test]
fn text_run_returns_raw_blobs() {
    let runner = FixedRunner {
        exit_code: 1,
        stdout: "",
        stderr: "Error: Missing title element.\n",
    };
    let result = Validator::with_engine("vnu.jar")
        .format("text")
        .data("<html></html>")
        .run_with(&runner)
        .unwrap();

    match result {
        RunOutput::Text { output, error } => {
            assert_eq!(output, "");
            assert!(error.starts_with("Error:"), "unexpected stderr: {error}");
        }
        RunOutput::Json { .. } => panic!("expected text output"),
    }
}

#[test]
fn exit_one_is_not_an_error() {
    let runner = FixedRunner {
        exit_code: 1,
        stdout: "",
        stderr: "",
    };
    let result = Validator::with_engine("vnu.jar").run_with(&runner).unwrap();
    match result {
        RunOutput::Json { normal, error } => {
            assert!(normal.is_none());
            assert!(error.is_none());
        }
        RunOutput::Text { .. } => panic!("expected json output"),
    }
}

#[test]
fn exit_above_one_carries_exact_stderr() {
    let runner = FixedRunner {
        exit_code: 2,
        stdout: "",
        stderr: "java.io.FileNotFoundException: vnu.jar",
    };
    let err = Validator::with_engine("vnu.jar")
        .run_with(&runner)
        .unwrap_err();
    assert!(matches!(
        err,
        ValidatorError::EngineFailure { code: 2, ref stderr }
            if stderr == "java.io.FileNotFoundException: vnu.jar"
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let runner = FixedRunner {
        exit_code: 0,
        stdout: "not json at all",
        stderr: "",
    };
    let err = Validator::with_engine("vnu.jar")
        .run_with(&runner)
        .unwrap_err();
    assert!(matches!(
        err,
        ValidatorError::Parse {
            stream: "stdout",
            ..
        }
    ));
}

#[test]
fn command_line_shape_matches_the_engine_contract() {
    let runner = RecordingRunner::default();
    let validator = Validator::with_engine("/opt/vnu/vnu.jar")
        .runtime_arg("-Xss10M")
        .format("text")
        .errors_only()
        .data("<html></html>");
    validator.run_with(&runner).unwrap();

    let (runtime, args, input) = runner.seen.lock().unwrap().take().unwrap();
    assert_eq!(runtime, "java");
    assert_eq!(
        args,
        vec![
            "-Xss10M",
            "-jar",
            "/opt/vnu/vnu.jar",
            "--format",
            "text",
            "--errors-only",
            "-"
        ]
    );
    assert_eq!(input, b"<html></html>");
}

#[test]
fn engaged_flags_never_emit_an_empty_value_token() {
    let runner = RecordingRunner::default();
    Validator::with_engine("vnu.jar")
        .asciiquotes()
        .werror()
        .run_with(&runner)
        .unwrap();

    let (_, args, _) = runner.seen.lock().unwrap().take().unwrap();
    assert!(!args.iter().any(String::is_empty), "empty token in {args:?}");
    assert!(args.contains(&"--asciiquotes".to_owned()));
    assert!(args.contains(&"--Werror".to_owned()));
}

#[test]
fn file_target_replaces_the_stdin_marker() {
    let runner = RecordingRunner::default();
    Validator::with_engine("vnu.jar")
        .file_name("site/index.html")
        .run_with(&runner)
        .unwrap();

    let (_, args, _) = runner.seen.lock().unwrap().take().unwrap();
    assert_eq!(args.last().map(String::as_str), Some("site/index.html"));
}
