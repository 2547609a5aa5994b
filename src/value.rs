/*!
Dynamically typed values and the keys they're bound to.

Handlers fold arbitrary values together, and acceptors convert strings into
arbitrary values, so the data map produced by a parse is dynamically typed.
*/

use std::{borrow::Cow, collections::HashMap, fmt};

use joinery::JoinableIterator;

use crate::error::UsageError;

/// The accumulated bindings produced by a parse.
pub type Data = HashMap<Key, Value>;

/**
The name a value is bound to in the [`Data`] map.

Most keys are [`Key::Named`], coming from flag and positional declarations.
The remaining variants are reserved for entries that the parser itself
writes.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Every raw token given to the parser, in order
    Args,

    /// The usage errors collected during the parse
    UsageErrors,

    /// Positional tokens that had no positional argument to bind to
    ExtraArgs,

    /// The verbosity level, seeded before parsing
    Verbosity,

    /// A key declared by a flag or positional argument
    Named(Cow<'static, str>),
}

impl Key {
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }
}

impl From<&'static str> for Key {
    #[inline]
    fn from(name: &'static str) -> Self {
        Self::Named(Cow::Borrowed(name))
    }
}

impl From<String> for Key {
    #[inline]
    fn from(name: String) -> Self {
        Self::Named(Cow::Owned(name))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Args => f.write_str("<args>"),
            Key::UsageErrors => f.write_str("<usage errors>"),
            Key::ExtraArgs => f.write_str("<extra args>"),
            Key::Verbosity => f.write_str("<verbosity>"),
            Key::Named(name) => f.write_str(name),
        }
    }
}

/// A dynamically typed value bound to a [`Key`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value. This is what a flag with an optional value receives when
    /// the value is omitted, and what a handler sees for an unbound key.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),

    /// Only used for [`Key::UsageErrors`]
    Errors(Vec<UsageError>),
}

impl Value {
    #[inline]
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(f) => Some(f),
            Value::Int(i) => Some(i as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Build a [`Value::List`] of strings
    #[must_use]
    pub fn strings<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::Str(s.into())).collect())
    }
}

macro_rules! from_primitive {
    ($($variant:ident($($type:ty)*))*) => {
        $($(
            impl From<$type> for Value {
                #[inline]
                fn from(value: $type) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*)*
    };
}

from_primitive! {
    Bool(bool)
    Int(i8 i16 i32 i64 u8 u16 u32)
    Float(f32 f64)
    Str(String &str char)
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => write!(f, "[{}]", items.iter().join_with(", ")),
            Value::Errors(errors) => write!(f, "[{}]", errors.iter().join_with("; ")),
        }
    }
}
