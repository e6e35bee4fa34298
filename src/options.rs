//! Engine option registry and argument store.
//!
//! The engine accepts a fixed set of long options. The registry is closed:
//! any name outside it fails with [`ValidatorError::UnknownOption`], and the
//! store only ever holds names the registry vouches for.

use crate::error::{Result, ValidatorError};

/// Whether an option is a bare flag or carries a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Engaged with no value (`--errors-only`)
    Flag,
    /// Carries a string value (`--format json`)
    Value,
}

/// The closed set of options recognized by the engine.
///
/// Names are the engine's long-flag spellings. `Werror` keeps its capital;
/// case is significant, only separators are normalized.
pub const REGISTRY: &[(&str, OptionKind)] = &[
    ("asciiquotes", OptionKind::Flag),
    ("errors-only", OptionKind::Flag),
    ("Werror", OptionKind::Flag),
    ("exit-zero-always", OptionKind::Flag),
    ("filterfile", OptionKind::Value),
    ("filterpattern", OptionKind::Value),
    ("format", OptionKind::Value),
    ("help", OptionKind::Flag),
    ("skip-non-html", OptionKind::Flag),
    ("html", OptionKind::Flag),
    ("no-langdetect", OptionKind::Flag),
    ("no-stream", OptionKind::Flag),
    ("verbose", OptionKind::Flag),
    ("version", OptionKind::Flag),
];

/// Maps accessor spellings to engine spellings (`errors_only` → `errors-only`).
fn normalize(name: &str) -> String {
    name.replace('_', "-")
}

fn lookup(name: &str) -> Result<(&'static str, OptionKind)> {
    let normalized = normalize(name);
    REGISTRY
        .iter()
        .copied()
        .find(|(candidate, _)| *candidate == normalized)
        .ok_or(ValidatorError::UnknownOption { name: normalized })
}

/// Looks up an option's kind by (normalized) name.
pub fn kind(name: &str) -> Result<OptionKind> {
    lookup(name).map(|(_, kind)| kind)
}

/// Outcome of a generic option call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionCall {
    /// The call read the option's current value
    Read(String),
    /// The call stored a value (or engaged a flag)
    Wrote,
}

/// Ordered store of engaged options.
///
/// Insertion order is preserved and becomes the literal argument order handed
/// to the engine. Engaging a flag stores the empty string as its "set"
/// indicator.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    values: Vec<(&'static str, String)>,
}

impl OptionSet {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generic accessor/mutator following the engine-option call protocol:
    /// zero value arguments on a flag engages it, zero on a value option
    /// reads it back, exactly one stores it, and anything more is invalid.
    pub fn call(&mut self, name: &str, args: &[&str]) -> Result<OptionCall> {
        let (canonical, kind) = lookup(name)?;
        match args {
            [] if kind == OptionKind::Flag => {
                self.store(canonical, String::new());
                Ok(OptionCall::Wrote)
            }
            [] => Ok(OptionCall::Read(self.value(canonical).unwrap_or_default())),
            [value] => {
                self.store(canonical, (*value).to_owned());
                Ok(OptionCall::Wrote)
            }
            _ => Err(ValidatorError::InvalidArgument {
                name: canonical.to_owned(),
                count: args.len(),
            }),
        }
    }

    /// Stores `value` under `name`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let (canonical, _) = lookup(name)?;
        self.store(canonical, value.into());
        Ok(())
    }

    /// Engages a flag, storing the empty string as its "set" indicator.
    pub fn engage(&mut self, name: &str) -> Result<()> {
        let (canonical, _) = lookup(name)?;
        self.store(canonical, String::new());
        Ok(())
    }

    /// Reads the current value; empty string when unset.
    pub fn get(&self, name: &str) -> Result<String> {
        let (canonical, _) = lookup(name)?;
        Ok(self.value(canonical).unwrap_or_default())
    }

    /// Whether the option is present in the store at all.
    pub fn is_set(&self, name: &str) -> Result<bool> {
        let (canonical, _) = lookup(name)?;
        Ok(self.values.iter().any(|(stored, _)| *stored == canonical))
    }

    /// Iterates stored options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Infallible store for registry-literal names.
    pub(crate) fn store(&mut self, name: &'static str, value: String) {
        if let Some(slot) = self.values.iter_mut().find(|(stored, _)| *stored == name) {
            slot.1 = value;
        } else {
            self.values.push((name, value));
        }
    }

    fn value(&self, name: &str) -> Option<String> {
        self.values
            .iter()
            .find(|(stored, _)| *stored == name)
            .map(|(_, value)| value.clone())
    }
}
