//! Command-line construction for engine invocations.

use crate::options::OptionSet;

/// Serializes stored options and the invocation target into argv tokens.
///
/// Options are emitted in insertion order as `--<name>` followed by a value
/// token. Engaged flags emit only their `--<name>` token: the engine rejects
/// a literal empty-string argument, and the shell-string invocation this
/// replaces collapsed empty tokens before the engine ever saw them. The
/// target (file path or the stdin marker `-`) goes last.
///
/// No escaping happens here. Tokens are handed to the child as discrete argv
/// elements, so none is needed.
#[must_use]
pub fn build_args(options: &OptionSet, target: &str) -> Vec<String> {
    let mut args = Vec::new();
    for (name, value) in options.iter() {
        args.push(format!("--{name}"));
        if !value.is_empty() {
            args.push(value.to_owned());
        }
    }
    args.push(target.to_owned());
    args
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn value_options_emit_flag_and_value() {
        let mut options = OptionSet::new();
        options.set("format", "json").unwrap();
        assert_eq!(build_args(&options, "-"), vec!["--format", "json", "-"]);
    }

    #[test]
    fn engaged_flags_emit_no_value_token() {
        let mut options = OptionSet::new();
        options.engage("errors-only").unwrap();
        options.engage("Werror").unwrap();
        assert_eq!(
            build_args(&options, "page.html"),
            vec!["--errors-only", "--Werror", "page.html"]
        );
    }

    #[test]
    fn target_is_always_last() {
        let mut options = OptionSet::new();
        options.engage("verbose").unwrap();
        options.set("format", "text").unwrap();
        let args = build_args(&options, "-");
        assert_eq!(args.last().map(String::as_str), Some("-"));
        assert_eq!(args, vec!["--verbose", "--format", "text", "-"]);
    }

    #[test]
    fn empty_store_yields_only_the_target() {
        assert_eq!(build_args(&OptionSet::new(), "doc.html"), vec!["doc.html"]);
    }
}
