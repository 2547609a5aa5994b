use std::sync::Arc;

use crate::{
    accept::Acceptor,
    error::DefinitionError,
    handler::Handler,
    pipeline::{Source, Target},
    syntax::{FlagStyle, FlagSyntax, ValueRequirement},
    value::{Key, Value},
};

/// Whether a flag is a switch or carries a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Boolean,
    Value(ValueRequirement),
}

/**
A declared flag: the key it binds, the ways it can be spelled, and how its
values are accepted and folded.

```
use parley::{Flag, FlagKind, ValueRequirement, accept::Integer, handler::Handler};

let flag = Flag::new("count", ["-c COUNT", "--count=COUNT"])
    .unwrap()
    .with_acceptor(Integer)
    .with_handler(Handler::push());

assert_eq!(flag.kind(), FlagKind::Value(ValueRequirement::Required));
assert_eq!(flag.display_name(), "--count");
```
*/
#[derive(Debug, Clone)]
pub struct Flag {
    key: Key,
    syntaxes: Vec<FlagSyntax>,
    kind: FlagKind,
    acceptor: Option<Arc<dyn Acceptor>>,
    handler: Option<Handler>,
    default: Option<Value>,
}

impl Flag {
    /// Declare a flag from one or more declaration strings. See the
    /// [`syntax`][crate::syntax] module for the accepted forms. All of the
    /// declarations must agree on whether the flag takes a value, and if so,
    /// whether that value is required.
    pub fn new<I>(key: impl Into<Key>, declarations: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let key = key.into();
        let syntaxes = declarations
            .into_iter()
            .map(|declaration| FlagSyntax::parse(declaration.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut requirements = syntaxes
            .iter()
            .map(|syntax| syntax.value().map(|value| value.requirement));

        let kind = match requirements.next() {
            None => return Err(DefinitionError::NoFlagSyntax { key }),
            Some(None) => match requirements.all(|requirement| requirement.is_none()) {
                true => FlagKind::Boolean,
                false => return Err(DefinitionError::MixedFlagKinds { key }),
            },
            Some(Some(first)) => {
                for requirement in requirements {
                    match requirement {
                        None => return Err(DefinitionError::MixedFlagKinds { key }),
                        Some(requirement) if requirement != first => {
                            return Err(DefinitionError::MixedValueRequirements { key });
                        }
                        Some(_) => {}
                    }
                }

                FlagKind::Value(first)
            }
        };

        Ok(Self {
            key,
            syntaxes,
            kind,
            acceptor: None,
            handler: None,
            default: None,
        })
    }

    /// Validate and convert values with `acceptor`. Ignored for boolean
    /// flags.
    #[must_use]
    pub fn with_acceptor(mut self, acceptor: impl Acceptor + 'static) -> Self {
        self.acceptor = Some(Arc::new(acceptor));
        self
    }

    /// Fold values into the key with `handler`, rather than replacing it.
    #[must_use]
    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// The value bound to the key before parsing begins.
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
    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn syntaxes(&self) -> &[FlagSyntax] {
        &self.syntaxes
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

    /// The name used for this flag in messages: its first long flag, or its
    /// first flag if it only has short ones.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.syntaxes
            .iter()
            .find(|syntax| syntax.style() == FlagStyle::Long)
            .or(self.syntaxes.first())
            .map_or("", |syntax| syntax.positive_flag())
    }

    /// Every flag string registered by this flag, including negative forms
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.syntaxes.iter().flat_map(|syntax| syntax.flags())
    }

    /// Bind values for this flag, naming it `name` if they're rejected
    pub(crate) fn target<'a>(&'a self, name: &'a str) -> Target<'a> {
        Target {
            key: &self.key,
            handler: self.handler.as_ref(),
            acceptor: self.acceptor.as_deref(),
            source: Source::Flag(name),
        }
    }
}
