/*!
Error types for [`parley`][crate].

Problems with the command line itself are [`UsageError`] values. They are
never raised; the parser collects them in discovery order and the caller
decides what to do with them after [`finish`][crate::parser::ArgParser::finish].
The other error types here are for mistakes made by the *programmer*: a
malformed tool declaration ([`DefinitionError`]) or a parser that was fed
after it was sealed ([`ParserFinished`]).
*/

use core::fmt::Display;

use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::value::Key;

/// Append a spelling hint to a message, if there's anything to suggest
fn did_you_mean(suggestions: &[String]) -> impl Display + '_ {
    lazy_format! {
        match (suggestions) {
            [] => "",
            [suggestion] => " Did you mean {suggestion:?}?",
            suggestions => (
                " Did you mean one of {}?",
                quoted_list(suggestions, ", ")
            ),
        }
    }
}

fn possible_matches(matches: &[String]) -> impl Display + '_ {
    lazy_format! {
        match (matches) {
            [] => "",
            matches => (" Possible matches: {}.", quoted_list(matches, ", ")),
        }
    }
}

fn quoted_list<'a>(items: &'a [String], separator: &'a str) -> impl Display + 'a {
    items
        .iter()
        .map(|item| lazy_format!("{item:?}"))
        .join_with(separator)
}

fn joined(items: &[String]) -> impl Display + '_ {
    items.iter().join_with(" ")
}

/**
A problem with the command line, discovered while parsing it.

Every variant renders a complete, human-readable sentence through
[`Display`]; the structured fields are available through the accessors for
callers that want to build their own messages.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UsageError {
    /// A boolean flag was given an inline value, as in `--verbose=yes`
    #[error("Flag {name:?} should not take an argument.")]
    FlagValueNotAllowed { name: String },

    /// A flag that requires a value was the last thing on the command line
    #[error("Flag {name:?} is missing a value.")]
    FlagValueMissing { name: String },

    /// No flag matched, even as a prefix
    #[error("Flag {value:?} is not recognized.{}", did_you_mean(.suggestions))]
    FlagUnrecognized {
        value: String,
        suggestions: Vec<String>,
    },

    /// The flag was a prefix of more than one long flag
    #[error("Flag prefix {value:?} is ambiguous.{}", possible_matches(.suggestions))]
    FlagAmbiguous {
        value: String,
        suggestions: Vec<String>,
    },

    /// A flag's acceptor rejected its value
    #[error(
        "Unacceptable value {value:?} for flag {name:?}.{}",
        did_you_mean(.suggestions)
    )]
    FlagValueUnacceptable {
        name: String,
        value: String,
        suggestions: Vec<String>,
    },

    /// A positional argument's acceptor rejected its value
    #[error(
        "Unacceptable value {value:?} for positional argument {name:?}.{}",
        did_you_mean(.suggestions)
    )]
    ArgValueUnacceptable {
        name: String,
        value: String,
        suggestions: Vec<String>,
    },

    /// A required positional argument never got a value
    #[error("Required positional argument {name:?} is missing.")]
    ArgMissing { name: String },

    /// Positional tokens were left over after every positional argument was
    /// filled
    #[error("Extra arguments: {}.", quoted_list(.values, " "))]
    ExtraArguments { values: Vec<String> },

    /// The first leftover positional token looks like the name of a subtool
    /// that doesn't exist. `values` is the tool's full name followed by that
    /// token.
    #[error(
        "Tool not found: \"{}\".{}",
        joined(.values),
        did_you_mean(.suggestions)
    )]
    ToolUnrecognized {
        values: Vec<String>,
        suggestions: Vec<String>,
    },

    /// A flag group's constraint was violated
    #[error("{message}")]
    FlagGroupConstraint { message: String },
}

impl UsageError {
    /// The flag or argument name this error is about, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::FlagValueNotAllowed { name }
            | Self::FlagValueMissing { name }
            | Self::FlagValueUnacceptable { name, .. }
            | Self::ArgValueUnacceptable { name, .. }
            | Self::ArgMissing { name } => Some(name),
            _ => None,
        }
    }

    /// The offending value from the command line, if any
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::FlagUnrecognized { value, .. }
            | Self::FlagAmbiguous { value, .. }
            | Self::FlagValueUnacceptable { value, .. }
            | Self::ArgValueUnacceptable { value, .. } => Some(value),
            _ => None,
        }
    }

    /// All offending values, for errors that carry more than one
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::ExtraArguments { values } | Self::ToolUnrecognized { values, .. } => values,
            _ => &[],
        }
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::FlagUnrecognized { suggestions, .. }
            | Self::FlagAmbiguous { suggestions, .. }
            | Self::FlagValueUnacceptable { suggestions, .. }
            | Self::ArgValueUnacceptable { suggestions, .. }
            | Self::ToolUnrecognized { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// A parser was fed, or finished, after it had already been finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("parser already finished")]
pub struct ParserFinished;

/// A tool declaration was malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("illegal flag syntax {syntax:?}")]
    InvalidFlagSyntax { syntax: String },

    #[error("flag {key} was declared without any flag syntax")]
    NoFlagSyntax { key: Key },

    #[error("flag {key} mixes boolean and value-taking syntaxes")]
    MixedFlagKinds { key: Key },

    #[error("flag {key} mixes required and optional value syntaxes")]
    MixedValueRequirements { key: Key },

    #[error("flag string {flag:?} is already in use")]
    DuplicateFlag { flag: String },

    #[error("required positional argument {name:?} can't follow optional ones")]
    RequiredAfterOptional { name: String },

    #[error("positional argument {name:?} can't follow a remaining argument")]
    ArgAfterRemaining { name: String },

    #[error("flag group refers to unknown flag key {key}")]
    UnknownGroupKey { key: Key },
}
