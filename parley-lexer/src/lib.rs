#![no_std]

/*!
Low-level classification of raw command-line tokens. Takes care of the
lexical distinctions between separators, long flags, short flag clusters,
and positionals. No flag lookup or value handling happens here; that's the
job of the `parley` crate, which feeds tokens through [`classify`] one at a
time. Usually this is too low level to use directly.
*/

mod cluster;

pub use cluster::ShortCluster;

/// The token that disables all further flag parsing.
pub const SEPARATOR: &str = "--";

/**
The lexical shape of a single command-line token.

Flag names are always returned *with* their dash prefix, since flag
resolution is done against the full registered spelling (`--verbose`, `-v`).
For instance, given `--target=foo`, the token is classified as
[`Token::LongWithValue`] with a `name` of `--target` and a `value` of `foo`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A bare `--`
    Separator,

    /// A long flag with an inline value, given as `--name=value`
    LongWithValue { name: &'a str, value: &'a str },

    /// A long flag without an inline value, such as `--name`
    Long { name: &'a str },

    /// One or more single-character flags clustered behind a single dash,
    /// such as `-abc`
    Shorts(ShortCluster<'a>),

    /// Anything else, including a lone `-`
    Positional(&'a str),
}

/**
Classify a single token.

This function has no state: it doesn't know whether a `--` was seen earlier,
or whether the previous token was a flag waiting for a value. Callers are
expected to check those things before asking for a classification.
*/
#[must_use]
pub fn classify(token: &str) -> Token<'_> {
    if token == SEPARATOR {
        return Token::Separator;
    }

    if let Some(body) = token.strip_prefix("--") {
        return match split_inline_value(body) {
            Some((name_len, value)) => Token::LongWithValue {
                name: &token[..name_len + 2],
                value,
            },
            None => Token::Long { name: token },
        };
    }

    match token.strip_prefix('-').and_then(ShortCluster::new) {
        Some(cluster) => Token::Shorts(cluster),
        None => Token::Positional(token),
    }
}

/// True if the token would be treated as a flag (rather than a value) by a
/// flag that only optionally takes a value.
#[inline]
#[must_use]
pub fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Given the body of a long flag (everything after `--`), find the inline
/// value. The name must start with a word character and may only contain
/// word characters, `-`, and `?`; otherwise the whole token is treated as a
/// flag name with no inline value.
fn split_inline_value(body: &str) -> Option<(usize, &str)> {
    let index = memchr::memchr(b'=', body.as_bytes())?;
    let name = &body.as_bytes()[..index];

    match name.split_first() {
        Some((&first, rest))
            if is_word_byte(first)
                && rest
                    .iter()
                    .all(|&b| is_word_byte(b) || b == b'-' || b == b'?') =>
        {
            Some((index, &body[index + 1..]))
        }
        _ => None,
    }
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
