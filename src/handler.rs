use core::fmt;
use std::sync::Arc;

use crate::value::Value;

type FoldFn = dyn Fn(Value, Value) -> Value + Send + Sync;

/**
A fold function that combines a newly parsed value with whatever was already
bound to the same key, producing the new binding.

The previous value is whatever the data map held before: a default seeded
before parsing, the result of an earlier fold, or [`Value::Nil`] if nothing
was bound yet. Handlers are cheap to clone, and can be shared between any
number of concurrent parses.
*/
#[derive(Clone)]
pub struct Handler {
    name: &'static str,
    fold: Arc<FoldFn>,
}

impl Handler {
    /// A handler backed by an arbitrary closure, called as
    /// `fold(new, previous)`.
    pub fn new(fold: impl Fn(Value, Value) -> Value + Send + Sync + 'static) -> Self {
        Self::named("custom", fold)
    }

    fn named(
        name: &'static str,
        fold: impl Fn(Value, Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            fold: Arc::new(fold),
        }
    }

    /// Replace the previous value. This is the same as having no handler.
    #[must_use]
    pub fn set() -> Self {
        Self::named("set", |value, _previous| value)
    }

    /// Append to a list, creating it if the key was unbound. A non-list
    /// previous value becomes the first element of the new list.
    #[must_use]
    pub fn push() -> Self {
        Self::named("push", |value, previous| match previous {
            Value::List(mut list) => {
                list.push(value);
                Value::List(list)
            }
            Value::Nil => Value::List(vec![value]),
            other => Value::List(vec![other, value]),
        })
    }

    /// Count occurrences, ignoring the new value. Useful for `-vvv`
    /// verbosity flags; a `false` from a negated flag counts down instead.
    #[must_use]
    pub fn count() -> Self {
        Self::named("count", |value, previous| {
            let previous = previous.as_int().unwrap_or(0);
            match value {
                Value::Bool(false) => Value::Int(previous - 1),
                _ => Value::Int(previous + 1),
            }
        })
    }

    /// Fold `value` into `previous`.
    #[inline]
    #[must_use]
    pub fn call(&self, value: Value, previous: Value) -> Value {
        (self.fold)(value, previous)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.name).finish()
    }
}
