//! vnu-wrapper library
//!
//! A wrapper around the Nu HTML Checker (`vnu.jar`) that builds the engine
//! command line, relays document content over pipes, and decodes the JSON
//! reports the engine emits.

pub mod command;
pub mod error;
pub mod exec;
pub mod options;
pub mod report;
pub mod validator;

pub use error::{Result, ValidatorError};
pub use report::{Message, Report};
pub use validator::{RunOutput, Validator};
