/*!
Acceptors validate and convert raw string values from the command line.

An [`Acceptor`] is attached to a flag or positional argument. When a value
arrives, the acceptor first [`matches`][Acceptor::matches] it; a rejection
becomes a usage error and the value is discarded. Otherwise the match is
[`convert`][Acceptor::convert]ed into the value that gets bound.
*/

use core::{fmt, ops::RangeInclusive};
use std::sync::Arc;

use crate::{suggest, value::Value};

/**
Validation and conversion for a single raw value.

Most acceptors can do all of their work in [`matches`][Acceptor::matches],
returning the converted value as the match. [`convert`][Acceptor::convert]
exists for acceptors that want to separate recognizing a value from building
the final one; its default passes the match through unchanged.
*/
pub trait Acceptor: fmt::Debug + Send + Sync {
    /// Check a raw value. [`None`] means the value is rejected.
    fn matches(&self, raw: &str) -> Option<Value>;

    /// Turn a successful match into the value to bind.
    fn convert(&self, matched: Value) -> Value {
        matched
    }

    /// Suggestions to show the user when `raw` was rejected.
    fn suggestions(&self, _raw: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Accepts any string, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl Acceptor for Any {
    fn matches(&self, raw: &str) -> Option<Value> {
        Some(Value::Str(raw.to_owned()))
    }
}

/// Accepts a base-10 integer, converting it to [`Value::Int`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl Acceptor for Integer {
    fn matches(&self, raw: &str) -> Option<Value> {
        raw.trim().parse().ok().map(Value::Int)
    }
}

/// Accepts a decimal number, converting it to [`Value::Float`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Acceptor for Float {
    fn matches(&self, raw: &str) -> Option<Value> {
        raw.trim().parse().ok().map(Value::Float)
    }
}

/// Accepts the usual spellings of true and false, case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl Boolean {
    const TRUE: &[&str] = &["true", "yes", "on", "1"];
    const FALSE: &[&str] = &["false", "no", "off", "0"];
}

impl Acceptor for Boolean {
    fn matches(&self, raw: &str) -> Option<Value> {
        let lookup = |words: &[&str]| words.iter().any(|word| word.eq_ignore_ascii_case(raw));

        if lookup(Self::TRUE) {
            Some(Value::Bool(true))
        } else if lookup(Self::FALSE) {
            Some(Value::Bool(false))
        } else {
            None
        }
    }

    fn suggestions(&self, raw: &str) -> Vec<String> {
        suggest::spelling(
            &raw.to_ascii_lowercase(),
            Self::TRUE.iter().chain(Self::FALSE).copied(),
        )
    }
}

/// Accepts one of a fixed set of strings. On rejection, the closest choices
/// are offered as suggestions.
#[derive(Debug, Clone)]
pub struct OneOf {
    choices: Vec<String>,
}

impl OneOf {
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl Acceptor for OneOf {
    fn matches(&self, raw: &str) -> Option<Value> {
        self.choices
            .iter()
            .find(|choice| *choice == raw)
            .map(|choice| Value::Str(choice.clone()))
    }

    fn suggestions(&self, raw: &str) -> Vec<String> {
        suggest::spelling(raw, self.choices.iter().map(String::as_str))
    }
}

/// Accepts an integer within an inclusive range.
#[derive(Debug, Clone)]
pub struct IntRange {
    range: RangeInclusive<i64>,
}

impl IntRange {
    #[must_use]
    pub fn new(range: RangeInclusive<i64>) -> Self {
        Self { range }
    }
}

impl Acceptor for IntRange {
    fn matches(&self, raw: &str) -> Option<Value> {
        raw.trim()
            .parse()
            .ok()
            .filter(|value| self.range.contains(value))
            .map(Value::Int)
    }
}

type PredicateFn = dyn Fn(&str) -> Option<Value> + Send + Sync;

/// An acceptor backed by a closure, for one-off validation rules.
#[derive(Clone)]
pub struct Predicate {
    name: &'static str,
    check: Arc<PredicateFn>,
}

impl Predicate {
    /// Create a predicate acceptor. `name` is only used for debug output.
    pub fn new(
        name: &'static str,
        check: impl Fn(&str) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            check: Arc::new(check),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

impl Acceptor for Predicate {
    fn matches(&self, raw: &str) -> Option<Value> {
        (self.check)(raw)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("42", Some(Value::Int(42)))]
    #[case(" -7 ", Some(Value::Int(-7)))]
    #[case("4.2", None)]
    #[case("", None)]
    fn integers(#[case] raw: &str, #[case] expected: Option<Value>) {
        assert_eq!(Integer.matches(raw), expected);
    }

    #[rstest]
    #[case("YES", Some(Value::Bool(true)))]
    #[case("off", Some(Value::Bool(false)))]
    #[case("maybe", None)]
    fn booleans(#[case] raw: &str, #[case] expected: Option<Value>) {
        assert_eq!(Boolean.matches(raw), expected);
    }

    #[test]
    fn one_of_suggests_close_choices() {
        let acceptor = OneOf::new(["json", "yaml", "toml"]);

        assert_eq!(acceptor.matches("yaml"), Some(Value::from("yaml")));
        assert_eq!(acceptor.matches("ymal"), None);
        assert_eq!(acceptor.suggestions("ymal"), ["yaml"]);
    }

    #[test]
    fn int_range_bounds() {
        let acceptor = IntRange::new(1..=3);

        assert_eq!(acceptor.matches("3"), Some(Value::Int(3)));
        assert_eq!(acceptor.matches("4"), None);
    }

    #[test]
    fn predicate() {
        let acceptor = Predicate::new("even", |raw| {
            raw.parse::<i64>()
                .ok()
                .filter(|n| n % 2 == 0)
                .map(Value::Int)
        });

        assert_eq!(acceptor.matches("4"), Some(Value::Int(4)));
        assert_eq!(acceptor.matches("5"), None);
    }
}
