//! Evaluation of a single entry against its raw value.

use crate::entry::{BoxError, Entry, Mask};
use crate::error::EntryError;
use crate::value::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Printed for a value hidden by `Mask::Hide`.
pub const MASKED: &str = "<masked>";
/// Printed for a variable with no value and no default.
pub const MISSING: &str = "<missing>";
/// Appended to the printed form of a default.
pub const DEFAULT_SUFFIX: &str = " (default)";

/// Result of evaluating one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resolved { value: Value, via_default: bool },
    Failed(EntryError),
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved { .. })
    }
}

/// Evaluates one entry and renders it for the printable mapping.
///
/// A raw value that is empty or only whitespace counts as absent. A present
/// value goes through the parser (if any) and then the mask; an absent one
/// falls back to the default, which skips the parser. Parser and mask
/// failures, including panics, end up in the returned [`Outcome`] and never
/// escape this function. A caught panic still goes through the process panic
/// hook, which by default prints the panic message to stderr.
pub fn evaluate(entry: &Entry, raw: Option<&str>) -> (Outcome, String) {
    match raw.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => {
            let parsed = match entry.get_parser() {
                Some(parser) => guarded(|| parser.parse(raw)),
                None => Ok(Value::from(raw)),
            };
            match parsed {
                Ok(value) => resolve(entry.get_mask(), value, false),
                Err(message) => {
                    let printable = format!("<parser: \"{message}\">");
                    (Outcome::Failed(EntryError::Parse(message)), printable)
                }
            }
        }
        None => match entry.get_default() {
            Some(default) => resolve(entry.get_mask(), default.clone(), true),
            None => (Outcome::Failed(EntryError::Missing), MISSING.to_string()),
        },
    }
}

fn resolve(mask: &Mask, value: Value, via_default: bool) -> (Outcome, String) {
    match render(mask, &value) {
        Ok(mut printable) => {
            if via_default {
                printable.push_str(DEFAULT_SUFFIX);
            }
            (Outcome::Resolved { value, via_default }, printable)
        }
        Err(message) => {
            let printable = format!("<mask: \"{message}\">");
            (Outcome::Failed(EntryError::Mask(message)), printable)
        }
    }
}

fn render(mask: &Mask, value: &Value) -> Result<String, String> {
    match mask {
        Mask::Off => Ok(value.to_string()),
        Mask::Hide => Ok(MASKED.to_string()),
        Mask::With(f) => guarded(|| (**f)(value)).map(|shown| format!("<masked: \"{shown}\">")),
    }
}

// Runs a caller-supplied function, folding errors and panics into a message.
fn guarded<T>(f: impl FnOnce() -> Result<T, BoxError>) -> Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers;

    #[test]
    fn test_blank_is_absent() {
        let entry = Entry::new();
        for raw in [None, Some(""), Some("   "), Some("\t\n")] {
            let (outcome, printable) = evaluate(&entry, raw);
            assert_eq!(outcome, Outcome::Failed(EntryError::Missing));
            assert_eq!(printable, MISSING);
        }
    }

    #[test]
    fn test_parser_receives_untrimmed_value() {
        let entry = Entry::new().parse_with(|raw: &str| Ok::<_, BoxError>(raw.len() as i64));
        let (outcome, _) = evaluate(&entry, Some(" ab "));
        assert_eq!(
            outcome,
            Outcome::Resolved {
                value: Value::Int(4),
                via_default: false
            }
        );
    }

    #[test]
    fn test_parser_failure_skips_mask() {
        let entry = Entry::new()
            .parser(parsers::int())
            .mask(Mask::with(|_: &Value| -> Result<String, BoxError> {
                panic!("mask must not run")
            }));
        let (outcome, printable) = evaluate(&entry, Some("abc"));
        assert!(matches!(outcome, Outcome::Failed(EntryError::Parse(_))));
        assert_eq!(printable, "<parser: \"not an integer: abc\">");
    }

    #[test]
    fn test_default_bypasses_parser() {
        let entry = Entry::new()
            .parse_with(|_: &str| Err::<i64, _>("should not be called"))
            .with_default("fallback");
        let (outcome, printable) = evaluate(&entry, None);
        assert_eq!(
            outcome,
            Outcome::Resolved {
                value: Value::from("fallback"),
                via_default: true
            }
        );
        assert_eq!(printable, "\"fallback\" (default)");
    }

    #[test]
    fn test_null_default_is_configured() {
        let (outcome, printable) = evaluate(&Entry::new().with_default(Value::Null), Some(""));
        assert!(outcome.is_resolved());
        assert_eq!(printable, "null (default)");

        let (_, printable) = evaluate(&Entry::new().with_default(Value::Undefined), None);
        assert_eq!(printable, "undefined (default)");
    }

    #[test]
    fn test_masks() {
        let (_, printable) = evaluate(&Entry::new().mask(true), Some("secret"));
        assert_eq!(printable, "<masked>");

        let (_, printable) = evaluate(&Entry::new().mask(true).with_default("x"), None);
        assert_eq!(printable, "<masked> (default)");

        let last_two = Mask::with(|value: &Value| -> Result<String, BoxError> {
            let s = value.as_str().ok_or("not a string")?;
            Ok(format!("...{}", &s[s.len() - 2..]))
        });
        let (outcome, printable) = evaluate(&Entry::new().mask(last_two), Some("secret"));
        assert!(outcome.is_resolved());
        assert_eq!(printable, "<masked: \"...et\">");
    }

    #[test]
    fn test_mask_failure_fails_entry() {
        let failing = Mask::with(|_: &Value| Err::<String, _>("cannot show this"));
        let (outcome, printable) = evaluate(&Entry::new().mask(failing.clone()), Some("x"));
        assert_eq!(
            outcome,
            Outcome::Failed(EntryError::Mask("cannot show this".to_string()))
        );
        assert_eq!(printable, "<mask: \"cannot show this\">");

        // Defaults go through the same mask and fail the same way.
        let (outcome, printable) =
            evaluate(&Entry::new().mask(failing).with_default("x"), None);
        assert!(!outcome.is_resolved());
        assert_eq!(printable, "<mask: \"cannot show this\">");
    }

    #[test]
    fn test_panics_are_contained() {
        let entry = Entry::new().parse_with(|_: &str| -> Result<Value, BoxError> {
            panic!("boom")
        });
        let (outcome, printable) = evaluate(&entry, Some("x"));
        assert_eq!(outcome, Outcome::Failed(EntryError::Parse("boom".to_string())));
        assert_eq!(printable, "<parser: \"boom\">");

        let entry = Entry::new().mask(Mask::with(|value: &Value| -> Result<String, BoxError> {
            panic!("bad {}", value.kind())
        }));
        let (_, printable) = evaluate(&entry, Some("x"));
        assert_eq!(printable, "<mask: \"bad string\">");
    }
}
