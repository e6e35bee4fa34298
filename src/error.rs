//! Error types for vnu-wrapper

use thiserror::Error;

/// Errors that can occur while configuring or running the engine
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Option name not present in the registry
    #[error("unknown option '{name}'")]
    UnknownOption {
        /// The normalized name that failed the registry lookup
        name: String,
    },

    /// Wrong number of value arguments for an option call
    #[error("option '{name}' called with {count} value arguments (at most 1 allowed)")]
    InvalidArgument {
        /// The option the caller was addressing
        name: String,
        /// How many value arguments were supplied
        count: usize,
    },

    /// The runtime (normally `java`) could not be started at all
    #[error("failed to launch engine runtime: {source}")]
    Launch {
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a code above 1.
    ///
    /// Exit code 1 means "validation ran and found issues" and is not an
    /// error; the caller inspects the returned report instead.
    #[error("engine exited with code {code}: {stderr}")]
    EngineFailure {
        /// The child's exit code (always > 1)
        code: i32,
        /// Everything the engine wrote to stderr
        stderr: String,
    },

    /// Structured output decoding failed
    #[error("failed to parse engine {stream} as a JSON report: {source}")]
    Parse {
        /// Which stream carried the malformed document ("stdout" or "stderr")
        stream: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Pipe I/O failed while exchanging data with the engine
    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ValidatorError`]
pub type Result<T> = std::result::Result<T, ValidatorError>;
