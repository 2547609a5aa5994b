/*!
The incremental argument parser.

An [`ArgParser`] is fed tokens one at a time with [`add`][ArgParser::add],
and sealed with [`finish`][ArgParser::finish]. It never fails on a bad
command line: every problem is collected as a [`UsageError`], in the order it
was found, and parsing carries on. After `finish`, the data map holds every
bound value, plus the errors, the raw tokens and the extra positional tokens
under their reserved [`Key`]s.

```
use parley::{ArgParser, Flag, Key, PositionalArg, ToolSpec, Value};

let mut tool = ToolSpec::new(["greet"]);
tool.add_flag(Flag::new("loud", ["-l", "--[no-]loud"])?)?
    .add_positional(PositionalArg::required("name"))?;

let mut parser = ArgParser::new(&tool, Default::default());
parser.add_all(["--lo", "world"])?.finish()?;

assert!(parser.errors().is_empty());
assert_eq!(parser.data()[&Key::from("loud")], Value::Bool(true));
assert_eq!(parser.data()[&Key::from("name")], Value::from("world"));
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use parley_lexer::{ShortCluster, Token};

use crate::{
    error::{ParserFinished, UsageError},
    flag::{Flag, FlagKind},
    positional::{Arity, Cursor, PositionalArg, Sinks},
    resolve::{FlagMatch, FlagResolution},
    suggest,
    syntax::ValueRequirement,
    tool::Tool,
    value::{Data, Key, Value},
};

/// A value-taking flag that was given without a value, waiting for the next
/// token.
#[derive(Debug, Clone, Copy)]
pub struct PendingFlag<'t> {
    pub flag: &'t Flag,

    /// The registered flag string that matched, used in messages
    pub name: &'t str,
}

impl PendingFlag<'_> {
    #[inline]
    fn value_required(&self) -> bool {
        self.flag.kind() == FlagKind::Value(ValueRequirement::Required)
    }
}

/// Parse state for a single command line of a single tool.
#[derive(Debug)]
pub struct ArgParser<'t, T: Tool + ?Sized> {
    tool: &'t T,
    data: Data,
    errors: Vec<UsageError>,
    raw_args: Vec<String>,
    extra_args: Vec<String>,
    unmatched_flags: Vec<String>,
    seen_flag_keys: Vec<Key>,
    pending: Option<PendingFlag<'t>>,
    cursor: Cursor,
    flags_allowed: bool,
    finished: bool,
}

impl<'t, T: Tool + ?Sized> ArgParser<'t, T> {
    /**
    Start parsing a command line for `tool`.

    The data map starts with a verbosity of 0, then the tool's defaults, then
    everything in `seed`; later entries replace earlier ones.
    */
    pub fn new(tool: &'t T, seed: Data) -> Self {
        let mut data = Data::from([(Key::Verbosity, Value::Int(0))]);
        data.extend(tool.default_data());
        data.extend(seed);

        Self {
            tool,
            data,
            errors: Vec::new(),
            raw_args: Vec::new(),
            extra_args: Vec::new(),
            unmatched_flags: Vec::new(),
            seen_flag_keys: Vec::new(),
            pending: None,
            cursor: Cursor::default(),
            flags_allowed: true,
            finished: false,
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, level: i64) -> Self {
        self.data.insert(Key::Verbosity, Value::Int(level));
        self
    }

    /// Parse a single token.
    pub fn add(&mut self, token: impl Into<String>) -> Result<&mut Self, ParserFinished> {
        if self.finished {
            return Err(ParserFinished);
        }

        let token = token.into();
        tracing::trace!(%token, "adding token");
        self.raw_args.push(token.clone());

        if self.tool.argument_parsing_disabled() {
            return Ok(self);
        }

        if let Some(pending) = self.pending.take() {
            if pending.value_required() || !parley_lexer::looks_like_flag(&token) {
                tracing::debug!(flag = pending.name, %token, "token is the pending flag's value");
                self.bind_flag(pending.flag, pending.name, Value::Str(token));
                return Ok(self);
            }

            tracing::debug!(flag = pending.name, "pending flag given no value");
            self.bind_flag(pending.flag, pending.name, Value::Nil);
        }

        self.dispatch(token);
        Ok(self)
    }

    /// Parse each of `tokens` in order.
    pub fn add_all<I>(&mut self, tokens: I) -> Result<&mut Self, ParserFinished>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for token in tokens {
            self.add(token)?;
        }

        Ok(self)
    }

    /**
    Seal the parser, running every check that can only happen once the
    whole command line has been seen: a flag left waiting for its value, a
    missing positional argument, extra positional tokens, and flag group
    constraints.

    Afterwards the errors, raw tokens and extra tokens are stored in the data
    map, and any further call to [`add`][Self::add] or `finish` fails.
    */
    pub fn finish(&mut self) -> Result<&mut Self, ParserFinished> {
        if self.finished {
            return Err(ParserFinished);
        }

        let tool = self.tool;

        if let Some(pending) = self.pending.take() {
            match pending.value_required() {
                true => self.errors.push(UsageError::FlagValueMissing {
                    name: pending.name.to_owned(),
                }),
                false => self.bind_flag(pending.flag, pending.name, Value::Nil),
            }
        }

        if let Some(arg) = self.cursor.current(tool.positional_args())
            && arg.arity() == Arity::Required
        {
            self.errors.push(UsageError::ArgMissing {
                name: arg.display_name().to_owned(),
            });
        }

        if let Some(first) = self.extra_args.first() {
            let error = match tool.is_runnable() || !self.seen_flag_keys.is_empty() {
                true => UsageError::ExtraArguments {
                    values: self.extra_args.clone(),
                },
                false => UsageError::ToolUnrecognized {
                    values: tool
                        .full_name()
                        .iter()
                        .chain([first])
                        .cloned()
                        .collect(),
                    suggestions: suggest::spelling(
                        first,
                        tool.subtool_names().iter().map(String::as_str),
                    ),
                },
            };

            self.errors.push(error);
        }

        for group in tool.flag_groups() {
            self.errors.extend(
                group
                    .validation_errors(&self.seen_flag_keys)
                    .into_iter()
                    .map(|message| UsageError::FlagGroupConstraint { message }),
            );
        }

        tracing::debug!(errors = self.errors.len(), "finished parsing");

        self.data
            .insert(Key::UsageErrors, Value::Errors(self.errors.clone()));
        self.data
            .insert(Key::Args, Value::strings(self.raw_args.iter().cloned()));
        self.data
            .insert(Key::ExtraArgs, Value::strings(self.extra_args.iter().cloned()));
        self.finished = true;

        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &Data {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Every usage error found so far, in the order they were found
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[UsageError] {
        &self.errors
    }

    /// Every token given to the parser
    #[inline]
    #[must_use]
    pub fn raw_args(&self) -> &[String] {
        &self.raw_args
    }

    /// Positional tokens that didn't fit any positional argument
    #[inline]
    #[must_use]
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// Flags that didn't resolve, as they appeared on the command line
    #[inline]
    #[must_use]
    pub fn unmatched_flags(&self) -> &[String] {
        &self.unmatched_flags
    }

    /// The key of every flag that resolved, in order, including repeats
    #[inline]
    #[must_use]
    pub fn seen_flag_keys(&self) -> &[Key] {
        &self.seen_flag_keys
    }

    /// False once `--` has been seen, or once a positional argument has been
    /// seen by a tool that requires flags to come first
    #[inline]
    #[must_use]
    pub fn flags_allowed(&self) -> bool {
        self.flags_allowed
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    #[must_use]
    pub fn pending_flag(&self) -> Option<&PendingFlag<'t>> {
        self.pending.as_ref()
    }

    /// The positional argument the next positional token would be bound to
    #[inline]
    #[must_use]
    pub fn next_positional(&self) -> Option<&'t PositionalArg> {
        let tool = self.tool;
        self.cursor.current(tool.positional_args())
    }

    fn dispatch(&mut self, token: String) {
        if self.flags_allowed {
            match parley_lexer::classify(&token) {
                Token::Separator => {
                    tracing::debug!("separator; flags disabled");
                    self.flags_allowed = false;
                    return;
                }
                Token::LongWithValue { name, value } => {
                    return self.long_flag_with_value(name, value);
                }
                Token::Long { name } => return self.long_flag(name),
                Token::Shorts(cluster) => return self.short_flags(cluster),
                Token::Positional(_) => {}
            }

            if self.tool.flags_before_args_enforced() {
                tracing::debug!(%token, "first positional argument; flags disabled");
                self.flags_allowed = false;
            }
        }

        let tool = self.tool;
        let sinks = Sinks {
            data: &mut self.data,
            errors: &mut self.errors,
            extra: &mut self.extra_args,
        };

        self.cursor.consume(tool.positional_args(), token, sinks);
    }

    fn long_flag_with_value(&mut self, name: &str, value: &str) {
        let Some(found) = self.resolve(name) else {
            return;
        };

        let flag_string = found.flag_string();

        match found.flag.kind() {
            FlagKind::Value(_) => {
                self.bind_flag(found.flag, flag_string, Value::Str(value.to_owned()));
            }
            FlagKind::Boolean => {
                self.bind_flag(found.flag, flag_string, Value::Bool(!found.negative));
                self.errors.push(UsageError::FlagValueNotAllowed {
                    name: flag_string.to_owned(),
                });
            }
        }
    }

    fn long_flag(&mut self, name: &str) {
        if let Some(found) = self.resolve(name) {
            self.begin_flag(found);
        }
    }

    fn short_flags(&mut self, mut cluster: ShortCluster<'_>) {
        while let Some(option) = cluster.next() {
            let Some(found) = self.resolve(&format!("-{option}")) else {
                continue;
            };

            if let FlagKind::Value(_) = found.flag.kind()
                && let Some(value) = cluster.take_remainder()
            {
                let value = Value::Str(value.to_owned());
                return self.bind_flag(found.flag, found.flag_string(), value);
            }

            self.begin_flag(found);
        }
    }

    /// Handle a resolved flag that came without an inline value
    fn begin_flag(&mut self, found: FlagMatch<'t>) {
        let flag_string = found.flag_string();

        match found.flag.kind() {
            FlagKind::Boolean => {
                self.bind_flag(found.flag, flag_string, Value::Bool(!found.negative));
            }
            FlagKind::Value(ValueRequirement::Optional) if !found.syntax.value_follows() => {
                self.bind_flag(found.flag, flag_string, Value::Nil);
            }
            FlagKind::Value(_) => {
                tracing::debug!(flag = flag_string, "waiting for flag value");
                self.pending = Some(PendingFlag {
                    flag: found.flag,
                    name: flag_string,
                });
            }
        }
    }

    /// Resolve a flag string, recording it as seen, or recording the error
    /// if it doesn't resolve.
    fn resolve(&mut self, name: &str) -> Option<FlagMatch<'t>> {
        let tool = self.tool;

        let error = match tool.resolve_flag(name) {
            FlagResolution::Unique(found) => {
                tracing::trace!(flag = name, key = %found.flag.key(), "resolved flag");
                self.seen_flag_keys.push(found.flag.key().clone());
                return Some(found);
            }
            FlagResolution::NotFound => UsageError::FlagUnrecognized {
                value: name.to_owned(),
                suggestions: flag_suggestions(tool, name),
            },
            FlagResolution::Ambiguous { candidates } => UsageError::FlagAmbiguous {
                value: name.to_owned(),
                suggestions: candidates,
            },
        };

        tracing::debug!(flag = name, "unmatched flag");
        self.errors.push(error);
        self.unmatched_flags.push(name.to_owned());
        None
    }

    fn bind_flag(&mut self, flag: &'t Flag, name: &str, value: Value) {
        crate::pipeline::apply(&mut self.data, &mut self.errors, flag.target(name), value);
    }
}

/// Registered flag strings close to an unrecognized long flag. A short flag
/// is a single character, which is one edit away from every other short flag,
/// so those get no suggestions.
fn flag_suggestions<T: Tool + ?Sized>(tool: &T, name: &str) -> Vec<String> {
    match name.starts_with("--") {
        true => suggest::spelling(name, tool.used_flags()),
        false => Vec::new(),
    }
}
