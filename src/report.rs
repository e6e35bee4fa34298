//! Structured report model for the engine's JSON output.
//!
//! With `--format json` the engine emits a document of the shape
//! `{"messages": [...]}` on each stream. Stdout carries the primary report;
//! stderr may carry its own report for fatal and document-level errors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};

/// A single message from the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message class: "error", "info", or "non-document-error"
    #[serde(rename = "type")]
    pub message_type: String,
    /// Finer classification, e.g. "warning" on info or "fatal" on error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    /// Human-readable message text
    pub message: String,
    /// Snippet of the document around the problem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    /// URL of the document the message refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_line: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_column: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_column: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hilite_start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hilite_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl Message {
    /// Whether this message is an error (including fatal errors).
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.message_type == "error"
    }

    /// Whether this message is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.sub_type.as_deref() == Some("warning")
    }
}

/// Top-level report: the engine wraps all messages in a single array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// Messages in document order
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Decodes one captured stream as a report.
///
/// Empty (or whitespace-only) output and a literal JSON `null` both mean the
/// engine had nothing to report on that stream. Anything else must be a valid
/// report document.
pub fn parse_stream(stream: &'static str, text: &str) -> Result<Option<Report>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<Report>>(text)
        .map_err(|source| ValidatorError::Parse { stream, source })
}
