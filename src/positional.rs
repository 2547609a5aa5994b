use std::sync::Arc;

use crate::{
    accept::Acceptor,
    error::UsageError,
    handler::Handler,
    pipeline::{self, Source, Target},
    value::{Data, Key, Value},
};

/// How many tokens a positional argument consumes, and whether it must
/// consume any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one token, which must be present
    Required,

    /// At most one token
    Optional,

    /// Every positional token left over after the other positional
    /// arguments have been filled
    Remaining,
}

/**
A declared positional argument.

Remaining arguments collect their tokens into a list: they start out bound
to an empty list and use [`Handler::push`] unless some other handler is
given.
*/
#[derive(Debug, Clone)]
pub struct PositionalArg {
    key: Key,
    arity: Arity,
    display_name: String,
    acceptor: Option<Arc<dyn Acceptor>>,
    handler: Option<Handler>,
    default: Option<Value>,
}

impl PositionalArg {
    pub fn new(key: impl Into<Key>, arity: Arity) -> Self {
        let key = key.into();
        let display_name = key.to_string().replace('-', "_").to_uppercase();

        let (handler, default) = match arity {
            Arity::Remaining => (Some(Handler::push()), Some(Value::List(Vec::new()))),
            Arity::Required | Arity::Optional => (None, None),
        };

        Self {
            key,
            arity,
            display_name,
            acceptor: None,
            handler,
            default,
        }
    }

    #[inline]
    pub fn required(key: impl Into<Key>) -> Self {
        Self::new(key, Arity::Required)
    }

    #[inline]
    pub fn optional(key: impl Into<Key>) -> Self {
        Self::new(key, Arity::Optional)
    }

    #[inline]
    pub fn remaining(key: impl Into<Key>) -> Self {
        Self::new(key, Arity::Remaining)
    }

    /// Override the name used in messages, which defaults to the key in
    /// upper case
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    #[must_use]
    pub fn with_acceptor(mut self, acceptor: impl Acceptor + 'static) -> Self {
        self.acceptor = Some(Arc::new(acceptor));
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    #[must_use]
    pub fn acceptor(&self) -> Option<&dyn Acceptor> {
        self.acceptor.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn target(&self) -> Target<'_> {
        Target {
            key: &self.key,
            handler: self.handler.as_ref(),
            acceptor: self.acceptor.as_deref(),
            source: Source::Positional(&self.display_name),
        }
    }
}

/// The collections a positional token can end up in
pub(crate) struct Sinks<'a> {
    pub data: &'a mut Data,
    pub errors: &'a mut Vec<UsageError>,
    pub extra: &'a mut Vec<String>,
}

/**
Tracks which positional argument the next positional token belongs to.

The cursor moves past required and optional arguments as they're filled,
but stays on a remaining argument forever.
*/
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Cursor {
    index: usize,
}

impl Cursor {
    /// The argument the next positional token will be bound to
    #[inline]
    pub fn current<'d>(&self, args: &'d [PositionalArg]) -> Option<&'d PositionalArg> {
        args.get(self.index)
    }

    /// Bind `token` to the current argument, or record it as extra if every
    /// argument has been filled.
    pub fn consume(&mut self, args: &[PositionalArg], token: String, sinks: Sinks<'_>) {
        let Some(arg) = self.current(args) else {
            tracing::debug!(%token, "extra positional argument");
            sinks.extra.push(token);
            return;
        };

        if arg.arity() != Arity::Remaining {
            self.index += 1;
        }

        pipeline::apply(sinks.data, sinks.errors, arg.target(), Value::Str(token));
    }
}
