//! vnu CLI entry point
//!
//! Thin front end over [`Validator`]: `vnu [--<option> [value]]... [file|-]`.
//! Reads the document from stdin when the target is `-` (the default),
//! mirrors the engine's success/issues split in the process exit code.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use vnu_wrapper::options::{self, OptionKind};
use vnu_wrapper::validator::STDIN_MARKER;
use vnu_wrapper::{Report, RunOutput, Validator};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(env::args().skip(1).collect()) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vnu: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Runs the validator; returns whether it reported any issues.
fn run(args: Vec<String>) -> Result<bool> {
    let mut validator = Validator::new();
    let mut target: Option<String> = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--") {
            match options::kind(name)? {
                OptionKind::Flag => validator = validator.engage(name)?,
                OptionKind::Value => {
                    let value = iter
                        .next()
                        .with_context(|| format!("--{name} requires a value"))?;
                    validator = validator.set(name, value)?;
                }
            }
        } else if target.is_none() {
            target = Some(arg);
        } else {
            bail!("unexpected argument: {arg}");
        }
    }

    let target = target.unwrap_or_else(|| STDIN_MARKER.to_owned());
    if target == STDIN_MARKER {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read document from stdin")?;
        validator = validator.data(content);
    }
    validator = validator.file_name(target);

    match validator.run()? {
        RunOutput::Json { normal, error } => {
            let mut found = false;
            if let Some(report) = normal {
                found |= !report.messages.is_empty();
                println!("{}", render(&report)?);
            }
            if let Some(report) = error {
                found |= !report.messages.is_empty();
                eprintln!("{}", render(&report)?);
            }
            Ok(found)
        }
        RunOutput::Text { output, error } => {
            print!("{output}");
            eprint!("{error}");
            Ok(!error.trim().is_empty())
        }
    }
}

fn render(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to render report")
}
