//! The validator facade: option state, content source, and run orchestration.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command::build_args;
use crate::error::Result;
use crate::exec::{
    classify, run_with_streams, EngineRunner, EngineStreams, ProcessEngineRunner,
};
use crate::options::{OptionCall, OptionSet};
use crate::report::{parse_stream, Report};

/// Environment variable overriding the bundled engine path.
pub const ENGINE_PATH_VAR: &str = "VNU_JAR";

/// Marker telling the engine to read the document from stdin.
pub const STDIN_MARKER: &str = "-";

/// Decoded result of a run.
#[derive(Debug)]
pub enum RunOutput {
    /// Reports decoded from both streams (`--format json`)
    Json {
        /// Primary report from stdout; `None` when the engine wrote nothing
        normal: Option<Report>,
        /// Fatal/document-level report from stderr
        error: Option<Report>,
    },
    /// Raw blobs in output-then-error order (any other format)
    Text {
        /// Everything the engine wrote to stdout
        output: String,
        /// Everything the engine wrote to stderr
        error: String,
    },
}

/// Configures and runs the engine against one document.
///
/// A `Validator` holds the engine path, the runtime invocation, the engaged
/// options, and the content source. Every run is independent; no state
/// survives an invocation other than the configuration itself.
///
/// ```no_run
/// use vnu_wrapper::{RunOutput, Validator};
///
/// # fn main() -> vnu_wrapper::Result<()> {
/// let result = Validator::new()
///     .errors_only()
///     .data("<html></html>")
///     .run()?;
/// if let RunOutput::Json { error: Some(report), .. } = result {
///     for message in &report.messages {
///         eprintln!("{}", message.message);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    engine: PathBuf,
    runtime: String,
    runtime_arg: String,
    options: OptionSet,
    data: String,
    file_name: String,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator using the bundled engine: `$VNU_JAR` when set,
    /// otherwise a `vnu.jar` next to the current executable.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(default_engine_path())
    }

    /// Creates a validator with an explicit engine jar path.
    #[must_use]
    pub fn with_engine(engine: impl Into<PathBuf>) -> Self {
        let mut options = OptionSet::new();
        // json output is the construction-time default
        options.store("format", "json".to_owned());
        Self {
            engine: engine.into(),
            runtime: "java".to_owned(),
            runtime_arg: String::new(),
            options,
            data: String::new(),
            file_name: STDIN_MARKER.to_owned(),
        }
    }

    // ---- content source ----

    /// Sets the inline document content streamed to the engine's stdin.
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Sets the invocation target: a file path, or [`STDIN_MARKER`] to make
    /// the engine read the inline content from stdin.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Sets extra runtime arguments placed before `-jar` (e.g. `-Xss10M`).
    /// Whitespace-split into individual argv tokens.
    #[must_use]
    pub fn runtime_arg(mut self, arg: impl Into<String>) -> Self {
        self.runtime_arg = arg.into();
        self
    }

    /// Overrides the runtime program itself (default `java`).
    #[must_use]
    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// The currently held inline content.
    #[must_use]
    pub fn data_ref(&self) -> &str {
        &self.data
    }

    /// The current invocation target.
    #[must_use]
    pub fn file_name_ref(&self) -> &str {
        &self.file_name
    }

    /// The current extra runtime argument string.
    #[must_use]
    pub fn runtime_arg_ref(&self) -> &str {
        &self.runtime_arg
    }

    /// The engine jar path this validator will invoke.
    #[must_use]
    pub fn engine_path(&self) -> &Path {
        &self.engine
    }

    // ---- generic option access ----

    /// Stores a value for a registry option.
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Result<Self> {
        self.options.set(name, value)?;
        Ok(self)
    }

    /// Engages a registry flag.
    pub fn engage(mut self, name: &str) -> Result<Self> {
        self.options.engage(name)?;
        Ok(self)
    }

    /// Generic accessor/mutator; see [`OptionSet::call`] for the protocol.
    pub fn call(&mut self, name: &str, args: &[&str]) -> Result<OptionCall> {
        self.options.call(name, args)
    }

    /// Reads an option's current value (empty string when unset).
    pub fn get(&self, name: &str) -> Result<String> {
        self.options.get(name)
    }

    /// Whether an option has been stored at all.
    pub fn is_set(&self, name: &str) -> Result<bool> {
        self.options.is_set(name)
    }

    // ---- typed option setters ----

    /// Substitute ASCII quotation marks for Unicode smart quotes in messages.
    #[must_use]
    pub fn asciiquotes(mut self) -> Self {
        self.options.store("asciiquotes", String::new());
        self
    }

    /// Report only error-level messages and non-document errors.
    #[must_use]
    pub fn errors_only(mut self) -> Self {
        self.options.store("errors-only", String::new());
        self
    }

    /// Exit non-zero if any warnings are encountered, even without errors.
    #[must_use]
    pub fn werror(mut self) -> Self {
        self.options.store("Werror", String::new());
        self
    }

    /// Exit zero even if errors are reported for any documents.
    #[must_use]
    pub fn exit_zero_always(mut self) -> Self {
        self.options.store("exit-zero-always", String::new());
        self
    }

    /// Filter file: each line holds a regular expression (or a `#` comment);
    /// matching messages are dropped.
    #[must_use]
    pub fn filterfile(mut self, path: impl Into<String>) -> Self {
        self.options.store("filterfile", path.into());
        self
    }

    /// Drop any message matching this regular-expression pattern.
    #[must_use]
    pub fn filterpattern(mut self, pattern: impl Into<String>) -> Self {
        self.options.store("filterpattern", pattern.into());
        self
    }

    /// Output format for reporting results (`json`, `text`, `gnu`, `xml`).
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.store("format", format.into());
        self
    }

    /// Show the engine's detailed usage information.
    #[must_use]
    pub fn help(mut self) -> Self {
        self.options.store("help", String::new());
        self
    }

    /// Skip documents without *.html, *.htm, *.xhtml, or *.xht extensions.
    #[must_use]
    pub fn skip_non_html(mut self) -> Self {
        self.options.store("skip-non-html", String::new());
        self
    }

    /// Force *.xhtml and *.xht documents through the HTML parser.
    #[must_use]
    pub fn html(mut self) -> Self {
        self.options.store("html", String::new());
        self
    }

    /// Disable language detection.
    #[must_use]
    pub fn no_langdetect(mut self) -> Self {
        self.options.store("no-langdetect", String::new());
        self
    }

    /// Parse all documents in buffered mode instead of streaming mode.
    #[must_use]
    pub fn no_stream(mut self) -> Self {
        self.options.store("no-stream", String::new());
        self
    }

    /// Write the names of checked files to stdout.
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.options.store("verbose", String::new());
        self
    }

    /// Show the engine version number.
    #[must_use]
    pub fn version(mut self) -> Self {
        self.options.store("version", String::new());
        self
    }

    // ---- execution ----

    /// Runs the engine with the configured options and content.
    ///
    /// Exit code 1 ("issues found") returns results normally; anything above
    /// 1 fails with [`crate::ValidatorError::EngineFailure`]. When the format
    /// option is `json`, both streams are decoded into reports.
    pub fn run(&self) -> Result<RunOutput> {
        self.run_with(&ProcessEngineRunner)
    }

    /// Like [`Validator::run`], executing through the given runner.
    pub fn run_with(&self, runner: &dyn EngineRunner) -> Result<RunOutput> {
        let tail = build_args(&self.options, &self.file_name);
        let (output, error) = self.exec_with_runner(&tail, runner)?;
        if self.get("format")? == "json" {
            Ok(RunOutput::Json {
                normal: parse_stream("stdout", &output)?,
                error: parse_stream("stderr", &error)?,
            })
        } else {
            Ok(RunOutput::Text { output, error })
        }
    }

    /// Low-level execution with raw extra argv tokens and default stream
    /// handling: inline content is fed to stdin, both output streams are
    /// drained to completion, and the exit code is classified.
    pub fn exec(&self, extra: &[String]) -> Result<(String, String)> {
        self.exec_with_runner(extra, &ProcessEngineRunner)
    }

    /// Low-level execution handing the raw pipes to `handler`.
    ///
    /// The handler owns writing input and draining output; its returned
    /// string becomes both the output and the error blob. Exit-code
    /// classification still applies afterwards.
    pub fn exec_streaming<F>(&self, extra: &[String], handler: F) -> Result<(String, String)>
    where
        F: FnOnce(EngineStreams) -> std::io::Result<String>,
    {
        let args = self.runtime_args(extra);
        let output = classify(run_with_streams(&self.runtime, &args, handler)?)?;
        Ok((output.stdout, output.stderr))
    }

    fn exec_with_runner(
        &self,
        extra: &[String],
        runner: &dyn EngineRunner,
    ) -> Result<(String, String)> {
        let args = self.runtime_args(extra);
        debug!(runtime = %self.runtime, ?args, "running engine");
        let output = classify(runner.run(&self.runtime, &args, self.data.as_bytes())?)?;
        Ok((output.stdout, output.stderr))
    }

    /// Full argv: runtime arguments, `-jar <engine>`, then the given tail.
    fn runtime_args(&self, tail: &[String]) -> Vec<String> {
        let mut args: Vec<String> = self
            .runtime_arg
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        args.push("-jar".to_owned());
        args.push(self.engine.to_string_lossy().into_owned());
        args.extend_from_slice(tail);
        args
    }
}

fn default_engine_path() -> PathBuf {
    if let Ok(path) = env::var(ENGINE_PATH_VAR) {
        return PathBuf::from(path);
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("vnu.jar")))
        .unwrap_or_else(|| PathBuf::from("vnu.jar"))
}
