/*!
The value pipeline: every value on its way into the data map, whether it came
from a flag or a positional argument, passes through [`apply`].
*/

use crate::{
    accept::Acceptor,
    error::UsageError,
    handler::Handler,
    value::{Data, Key, Value},
};

/// Where a value came from. Only used to choose the right error when an
/// acceptor rejects the value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Source<'a> {
    /// A flag, named as it appeared on the command line
    Flag(&'a str),

    /// A positional argument, named by its display name
    Positional(&'a str),
}

/// Everything needed to bind a value to a key
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target<'a> {
    pub key: &'a Key,
    pub handler: Option<&'a Handler>,
    pub acceptor: Option<&'a dyn Acceptor>,
    pub source: Source<'a>,
}

/**
Run `value` through the target's acceptor (string values only) and handler,
and store the result under the target's key.

A rejected value is reported as a [`UsageError`] and leaves the data map
untouched.
*/
pub(crate) fn apply(
    data: &mut Data,
    errors: &mut Vec<UsageError>,
    target: Target<'_>,
    value: Value,
) {
    let value = match (target.acceptor, value) {
        (Some(acceptor), Value::Str(raw)) => match acceptor.matches(&raw) {
            Some(matched) => acceptor.convert(matched),
            None => {
                tracing::debug!(key = %target.key, value = %raw, "value rejected by acceptor");
                let suggestions = acceptor.suggestions(&raw);
                errors.push(match target.source {
                    Source::Flag(name) => UsageError::FlagValueUnacceptable {
                        name: name.to_owned(),
                        value: raw,
                        suggestions,
                    },
                    Source::Positional(name) => UsageError::ArgValueUnacceptable {
                        name: name.to_owned(),
                        value: raw,
                        suggestions,
                    },
                });
                return;
            }
        },
        (_, value) => value,
    };

    let value = match target.handler {
        Some(handler) => {
            let previous = data.remove(target.key).unwrap_or_default();
            handler.call(value, previous)
        }
        None => value,
    };

    tracing::trace!(key = %target.key, %value, "bound value");
    data.insert(target.key.clone(), value);
}
