//! Engine subprocess execution.
//!
//! Spawns the runtime with the engine jar, relays document content over
//! stdin, drains both output streams without deadlocking, and classifies the
//! exit code. A seam trait ([`EngineRunner`]) abstracts spawn-and-capture so
//! tests can exercise error paths without a real engine.

use std::io::Write;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::{Result, ValidatorError};

/// Captured output of a finished engine run.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// The child's exit code (-1 when terminated by a signal)
    pub exit_code: i32,
    /// Everything the engine wrote to stdout
    pub stdout: String,
    /// Everything the engine wrote to stderr
    pub stderr: String,
}

/// Pipe handles passed to a custom stream callback.
///
/// The callback owns writing input and draining output; whatever it returns
/// becomes both the output and the error blob of the run.
pub struct EngineStreams {
    /// The child's standard input
    pub stdin: ChildStdin,
    /// The child's standard output
    pub stdout: ChildStdout,
    /// The child's standard error
    pub stderr: ChildStderr,
}

/// Seam for spawning the engine and capturing its output.
///
/// Enables mocking in tests to verify exit-code classification and parse
/// handling without launching a JVM.
pub trait EngineRunner: Send + Sync {
    /// Spawn `runtime` with `args`, feed `input` to its stdin, and capture
    /// both output streams to completion.
    fn run(&self, runtime: &str, args: &[String], input: &[u8]) -> Result<EngineOutput>;
}

/// Real implementation using [`std::process::Command`].
///
/// This is the default implementation used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEngineRunner;

impl EngineRunner for ProcessEngineRunner {
    fn run(&self, runtime: &str, args: &[String], input: &[u8]) -> Result<EngineOutput> {
        let mut child = spawn(runtime, args)?;

        // Feed stdin from its own thread so a child blocked writing output
        // can never deadlock against us blocked writing input.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_vec();
            thread::spawn(move || stdin.write_all(&input))
        });

        // wait_with_output drains stdout and stderr concurrently
        let output = child.wait_with_output()?;

        if let Some(handle) = writer {
            // A child that exits without reading its stdin closes the pipe;
            // the resulting broken-pipe write is not a failure of the run.
            let _ = handle.join();
        }

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "engine exited");
        Ok(EngineOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Spawn the engine and hand its pipes to `handler`, then wait for exit.
///
/// The handler's returned string is used as both the stdout and stderr blob,
/// matching the single combined return value of custom stream handling.
pub fn run_with_streams<F>(runtime: &str, args: &[String], handler: F) -> Result<EngineOutput>
where
    F: FnOnce(EngineStreams) -> std::io::Result<String>,
{
    let mut child = spawn(runtime, args)?;
    let streams = take_streams(&mut child)?;
    let combined = handler(streams)?;
    let status = child.wait()?;
    let exit_code = status.code().unwrap_or(-1);
    debug!(exit_code, "engine exited");
    Ok(EngineOutput {
        exit_code,
        stdout: combined.clone(),
        stderr: combined,
    })
}

/// Exit 0 is success and exit 1 means the engine found issues; anything
/// above 1 is an engine failure carrying the captured stderr.
pub fn classify(output: EngineOutput) -> Result<EngineOutput> {
    if output.exit_code > 1 {
        return Err(ValidatorError::EngineFailure {
            code: output.exit_code,
            stderr: output.stderr,
        });
    }
    Ok(output)
}

fn spawn(runtime: &str, args: &[String]) -> Result<Child> {
    debug!(runtime, ?args, "spawning engine");
    Command::new(runtime)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ValidatorError::Launch { source })
}

fn take_streams(child: &mut Child) -> Result<EngineStreams> {
    match (child.stdin.take(), child.stdout.take(), child.stderr.take()) {
        (Some(stdin), Some(stdout), Some(stderr)) => Ok(EngineStreams {
            stdin,
            stdout,
            stderr,
        }),
        // unreachable with piped stdio
        _ => Err(ValidatorError::Io(std::io::Error::other(
            "engine pipes unavailable",
        ))),
    }
}
