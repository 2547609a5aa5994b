/*!
Parsing of flag declaration strings, like `-o FILE` or `--[no-]color`.

A flag is declared with one or more of these strings. Each one says how the
flag is spelled on the command line, and whether (and how) it takes a value:

| Declaration | Meaning |
|---|---|
| `-a`, `--all` | boolean flag |
| `--[no-]all` | boolean flag with a negative form, `--no-all` |
| `-o FILE`, `--out FILE` | required value, in the next token |
| `-oFILE`, `--out=FILE` | required value, attached or after `=` |
| `-o [FILE]`, `--out [FILE]` | optional value, in the next token |
| `-o[FILE]`, `--out=[FILE]`, `--out[=FILE]` | optional value, attached or after `=` |
*/

use core::fmt;

use crate::error::DefinitionError;

/// Whether a flag is spelled with one dash and one character, or two dashes
/// and a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStyle {
    Short,
    Long,
}

/// Whether a value-taking flag must be given a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRequirement {
    Required,
    Optional,
}

/// How a value is separated from the flag in the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `--out FILE`: the value is the next token
    Space,

    /// `--out=FILE`
    Equals,

    /// `-oFILE`
    Attached,
}

/// The value part of a flag declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSyntax {
    pub delimiter: Delimiter,
    pub requirement: ValueRequirement,

    /// The placeholder used in the declaration, like `FILE`
    pub label: String,
}

/// A single parsed flag declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSyntax {
    declaration: String,
    positive: String,
    negative: Option<String>,
    style: FlagStyle,
    value: Option<ValueSyntax>,
}

impl FlagSyntax {
    /// Parse a declaration string.
    pub fn parse(declaration: &str) -> Result<Self, DefinitionError> {
        let parsed = match declaration.strip_prefix("--") {
            Some(body) => parse_long(body),
            None => declaration.strip_prefix('-').and_then(parse_short),
        };

        let (positive, negative, style, value) =
            parsed.ok_or_else(|| DefinitionError::InvalidFlagSyntax {
                syntax: declaration.to_owned(),
            })?;

        Ok(Self {
            declaration: declaration.to_owned(),
            positive,
            negative,
            style,
            value,
        })
    }

    /// The declaration this syntax was parsed from
    #[inline]
    #[must_use]
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// The flag as it's written on the command line, like `--color`
    #[inline]
    #[must_use]
    pub fn positive_flag(&self) -> &str {
        &self.positive
    }

    /// The negative form, like `--no-color`, if the declaration has one
    #[inline]
    #[must_use]
    pub fn negative_flag(&self) -> Option<&str> {
        self.negative.as_deref()
    }

    /// Every flag string this syntax registers
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.positive.as_str()).chain(self.negative.as_deref())
    }

    #[inline]
    #[must_use]
    pub fn style(&self) -> FlagStyle {
        self.style
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&ValueSyntax> {
        self.value.as_ref()
    }

    /// True if the value is expected in the token after the flag
    #[inline]
    #[must_use]
    pub fn value_follows(&self) -> bool {
        matches!(self.value, Some(ValueSyntax { delimiter: Delimiter::Space, .. }))
    }
}

impl fmt::Display for FlagSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declaration)
    }
}

type Parsed = (String, Option<String>, FlagStyle, Option<ValueSyntax>);

fn parse_long(body: &str) -> Option<Parsed> {
    if let Some(name) = body.strip_prefix("[no-]") {
        return is_long_name(name).then(|| {
            (
                format!("--{name}"),
                Some(format!("--no-{name}")),
                FlagStyle::Long,
                None,
            )
        });
    }

    let name_len = body
        .find(|c: char| !is_name_char(c))
        .unwrap_or(body.len());
    let (name, rest) = body.split_at(name_len);

    if !is_long_name(name) {
        return None;
    }

    let value = match rest {
        "" => None,
        rest => Some(parse_long_value(rest)?),
    };

    Some((format!("--{name}"), None, FlagStyle::Long, value))
}

fn parse_long_value(rest: &str) -> Option<ValueSyntax> {
    use Delimiter::*;
    use ValueRequirement::*;

    let (delimiter, requirement, label) = if let Some(label) = bracketed(rest, " [") {
        (Space, Optional, label)
    } else if let Some(label) = rest.strip_prefix(' ') {
        (Space, Required, label)
    } else if let Some(label) = bracketed(rest, "=[").or_else(|| bracketed(rest, "[=")) {
        (Equals, Optional, label)
    } else if let Some(label) = rest.strip_prefix('=') {
        (Equals, Required, label)
    } else {
        return None;
    };

    value_syntax(delimiter, requirement, label)
}

fn parse_short(body: &str) -> Option<Parsed> {
    use Delimiter::*;
    use ValueRequirement::*;

    let mut chars = body.chars();
    let option = chars.next().filter(|&c| is_word_char(c) || c == '?')?;
    let rest = chars.as_str();
    let positive = format!("-{option}");

    let value = if rest.is_empty() {
        None
    } else if let Some(label) = bracketed(rest, " [") {
        Some(value_syntax(Space, Optional, label)?)
    } else if let Some(label) = rest.strip_prefix(' ') {
        Some(value_syntax(Space, Required, label)?)
    } else if let Some(label) = bracketed(rest, "[") {
        Some(value_syntax(Attached, Optional, label)?)
    } else {
        Some(value_syntax(Attached, Required, rest)?)
    };

    Some((positive, None, FlagStyle::Short, value))
}

fn bracketed<'a>(input: &'a str, open: &str) -> Option<&'a str> {
    input.strip_prefix(open)?.strip_suffix(']')
}

fn value_syntax(
    delimiter: Delimiter,
    requirement: ValueRequirement,
    label: &str,
) -> Option<ValueSyntax> {
    let valid = !label.is_empty()
        && !label
            .chars()
            .any(|c| c.is_whitespace() || c == '[' || c == ']' || c == '=');

    valid.then(|| ValueSyntax {
        delimiter,
        requirement,
        label: label.to_owned(),
    })
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
fn is_name_char(c: char) -> bool {
    is_word_char(c) || c == '-' || c == '?'
}

fn is_long_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_word_char) && chars.all(is_name_char)
}
